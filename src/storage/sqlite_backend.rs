use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tracing::{debug, info};

use crate::{
    domain::{parse_date, Record, RecordId},
    errors::{ExpenseError, Result},
    utils::paths::ensure_dir,
};

use super::{PersistedRecord, PersistenceGateway};

/// SQLite-backed [`PersistenceGateway`] storing rows in the `expenses` table.
#[derive(Debug)]
pub struct SqliteGateway {
    path: Option<PathBuf>,
    conn: Connection,
}

impl SqliteGateway {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        let conn = Connection::open(&path)?;
        let gateway = Self {
            path: Some(path),
            conn,
        };
        gateway.migrate()?;
        info!(path = %gateway.describe(), "expense store opened");
        Ok(gateway)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let gateway = Self { path: None, conn };
        gateway.migrate()?;
        Ok(gateway)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn describe(&self) -> String {
        self.path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| ":memory:".into())
    }

    // Databases created without AUTOINCREMENT keep their original schema.
    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT,
                description TEXT,
                amount REAL,
                category TEXT
            );
            "#,
        )?;
        Ok(())
    }
}

impl PersistenceGateway for SqliteGateway {
    fn insert(&mut self, record: &Record) -> Result<RecordId> {
        self.conn.execute(
            "INSERT INTO expenses (date, description, amount, category) VALUES (?1, ?2, ?3, ?4)",
            params![
                record.date_label(),
                record.description,
                record.amount,
                record.category
            ],
        )?;
        let id = RecordId(self.conn.last_insert_rowid());
        debug!(%id, "expense row inserted");
        Ok(id)
    }

    fn delete_by_id(&mut self, id: RecordId) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM expenses WHERE id = ?1", params![id.0])?;
        debug!(%id, affected, "expense row deleted");
        Ok(())
    }

    fn update_category_by_id(&mut self, id: RecordId, category: Option<&str>) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE expenses SET category = ?1 WHERE id = ?2",
            params![category, id.0],
        )?;
        if affected == 0 {
            return Err(ExpenseError::Storage(format!(
                "expense {} is missing from the store",
                id
            )));
        }
        debug!(%id, ?category, "expense row category updated");
        Ok(())
    }

    fn fetch_all(&self) -> Result<Vec<PersistedRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, date, description, amount, category
            FROM expenses
            ORDER BY id ASC
            "#,
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<f64>>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, date, description, amount, category) = row?;
            let id = RecordId(id);
            let date = parse_date(date.as_deref().unwrap_or_default()).map_err(|err| {
                ExpenseError::Storage(format!("expense {} has an unreadable date: {}", id, err))
            })?;
            let amount = amount.ok_or_else(|| {
                ExpenseError::Storage(format!("expense {} has no amount", id))
            })?;
            records.push(PersistedRecord {
                id,
                record: Record {
                    date,
                    description: description.unwrap_or_default(),
                    amount,
                    category,
                },
            });
        }
        Ok(records)
    }

    fn close(self: Box<Self>) -> Result<()> {
        let description = self.describe();
        self.conn.close().map_err(|(_, err)| ExpenseError::from(err))?;
        info!(path = %description, "expense store closed");
        Ok(())
    }
}
