use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    domain::{sum_amounts, AddOutcome, Amounted, CategoryRegistry, Record, RecordId},
    errors::{ExpenseError, Result},
};

/// A ledger slot: the record plus the storage identifier once it has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(flatten)]
    pub record: Record,
}

impl Entry {
    pub fn new(id: Option<RecordId>, record: Record) -> Self {
        Self { id, record }
    }
}

impl Amounted for Entry {
    fn amount(&self) -> f64 {
        self.record.amount
    }
}

/// Ordered, position-addressed collection of expenses for the current session.
///
/// Positions shift down by one after a removal. Persisted entries also carry a
/// [`RecordId`], which is what storage-facing callers should address them by.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    categories: CategoryRegistry,
    #[serde(default)]
    entries: Vec<Entry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an unpersisted record and returns its position.
    pub fn add(&mut self, record: Record) -> usize {
        self.push(Entry::new(None, record))
    }

    /// Appends a record already known to storage under `id`.
    pub fn add_identified(&mut self, id: RecordId, record: Record) -> Result<usize> {
        if self.position_of(id).is_some() {
            return Err(ExpenseError::InvalidInput(format!(
                "expense {} is already in the ledger",
                id
            )));
        }
        Ok(self.push(Entry::new(Some(id), record)))
    }

    fn push(&mut self, entry: Entry) -> usize {
        self.entries.push(entry);
        let position = self.entries.len() - 1;
        debug!(position, "expense appended to ledger");
        position
    }

    pub fn remove_at(&mut self, position: usize) -> Result<Entry> {
        self.check_position(position)?;
        let removed = self.entries.remove(position);
        debug!(position, "expense removed from ledger");
        Ok(removed)
    }

    pub fn remove_by_id(&mut self, id: RecordId) -> Result<Entry> {
        let position = self.position_of(id).ok_or(ExpenseError::UnknownRecord(id))?;
        self.remove_at(position)
    }

    pub fn get(&self, position: usize) -> Result<&Entry> {
        self.entries
            .get(position)
            .ok_or(ExpenseError::IndexOutOfRange {
                index: position,
                len: self.entries.len(),
            })
    }

    /// Live view of `(position, entry)` pairs in ledger order.
    pub fn list(&self) -> impl Iterator<Item = (usize, &Entry)> + '_ {
        self.entries.iter().enumerate()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.entries.iter().map(|entry| &entry.record)
    }

    pub fn total(&self) -> f64 {
        sum_amounts(&self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tags the record at `position` with a registered category.
    ///
    /// The position is validated before the category; on failure nothing changes.
    pub fn assign_category(&mut self, position: usize, category: &str) -> Result<()> {
        self.check_assignment(position, category)?;
        self.entries[position].record.category = Some(category.to_string());
        debug!(position, category, "category assigned");
        Ok(())
    }

    pub fn assign_category_by_id(&mut self, id: RecordId, category: &str) -> Result<()> {
        let position = self.position_of(id).ok_or(ExpenseError::UnknownRecord(id))?;
        self.assign_category(position, category)
    }

    /// Runs the checks [`Ledger::assign_category`] performs without mutating anything.
    pub fn check_assignment(&self, position: usize, category: &str) -> Result<()> {
        self.check_position(position)?;
        if !self.categories.contains(category) {
            return Err(ExpenseError::UnknownCategory(category.to_string()));
        }
        Ok(())
    }

    pub fn add_category(&mut self, name: impl Into<String>) -> AddOutcome {
        self.categories.add(name)
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn id_at(&self, position: usize) -> Result<Option<RecordId>> {
        self.get(position).map(|entry| entry.id)
    }

    pub fn position_of(&self, id: RecordId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == Some(id))
    }

    /// Swaps in a fresh set of entries, keeping the category registry.
    pub fn replace_entries(&mut self, entries: Vec<Entry>) -> Vec<Entry> {
        std::mem::replace(&mut self.entries, entries)
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position < self.entries.len() {
            Ok(())
        } else {
            Err(ExpenseError::IndexOutOfRange {
                index: position,
                len: self.entries.len(),
            })
        }
    }
}
