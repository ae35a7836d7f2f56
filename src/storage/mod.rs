//! Persistence boundary: the gateway trait the tracker talks to and its backends.

pub mod json_backend;
pub mod sqlite_backend;

use crate::{
    domain::{Record, RecordId},
    errors::Result,
    ledger::Entry,
};

pub use json_backend::{load_snapshot_from_path, save_snapshot_to_path};
pub use sqlite_backend::SqliteGateway;

/// Storage-side projection of an expense: the record plus its stable identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedRecord {
    pub id: RecordId,
    pub record: Record,
}

impl From<PersistedRecord> for Entry {
    fn from(row: PersistedRecord) -> Self {
        Entry::new(Some(row.id), row.record)
    }
}

/// Abstraction over durable stores capable of holding expense rows.
pub trait PersistenceGateway {
    /// Durably stores a new record and returns its freshly assigned identifier.
    fn insert(&mut self, record: &Record) -> Result<RecordId>;

    /// Removes the row with `id`. Deleting an absent row is not an error.
    fn delete_by_id(&mut self, id: RecordId) -> Result<()>;

    fn update_category_by_id(&mut self, id: RecordId, category: Option<&str>) -> Result<()>;

    /// Every stored row, ordered by identifier ascending.
    fn fetch_all(&self) -> Result<Vec<PersistedRecord>>;

    /// Releases the underlying connection.
    fn close(self: Box<Self>) -> Result<()>;
}
