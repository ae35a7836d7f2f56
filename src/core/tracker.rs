//! Application context that keeps the in-memory ledger and the expense store in step.
//!
//! Every mutation is written to storage first, addressed by the stable
//! [`RecordId`] attached to the ledger entry, and applied in memory only after the
//! store accepted it. A failed write therefore leaves both sides untouched.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::{
    config::Config,
    core::charts::{BoxStats, LineSeries},
    domain::{normalize_name, AddOutcome, CategoryRegistry, Record, RecordId},
    errors::Result,
    ledger::{Entry, Ledger},
    storage::{save_snapshot_to_path, PersistenceGateway},
};

/// Startup behaviour of an [`ExpenseTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerOptions {
    pub seed_categories_from_records: bool,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            seed_categories_from_records: true,
        }
    }
}

impl From<&Config> for TrackerOptions {
    fn from(config: &Config) -> Self {
        Self {
            seed_categories_from_records: config.seed_categories_from_records,
        }
    }
}

/// Outcome of [`ExpenseTracker::reconcile`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    /// Rows present in the store but missing from the ledger.
    pub store_only: Vec<RecordId>,
    /// Ledger entries the store does not know about; dropped by the rebuild.
    pub ledger_only: Vec<Entry>,
    /// Identifiers whose fields differ between ledger and store.
    pub changed: Vec<RecordId>,
    /// Whether the ledger was rebuilt from the store.
    pub rebuilt: bool,
}

impl ReconcileReport {
    pub fn in_sync(&self) -> bool {
        !self.rebuilt
    }
}

pub struct ExpenseTracker {
    ledger: Ledger,
    gateway: Box<dyn PersistenceGateway>,
    options: TrackerOptions,
}

impl ExpenseTracker {
    /// Replays every stored row into a fresh ledger.
    pub fn open(gateway: Box<dyn PersistenceGateway>, options: TrackerOptions) -> Result<Self> {
        let rows = gateway.fetch_all()?;
        let mut ledger = Ledger::new();
        for row in rows {
            if options.seed_categories_from_records {
                if let Some(category) = row.record.category.as_deref() {
                    ledger.add_category(category);
                }
            }
            ledger.add_identified(row.id, row.record)?;
        }
        info!(
            expenses = ledger.len(),
            categories = ledger.categories().len(),
            "ledger replayed from store"
        );
        Ok(Self {
            ledger,
            gateway,
            options,
        })
    }

    pub fn add_expense(&mut self, record: Record) -> Result<(usize, RecordId)> {
        let id = self.gateway.insert(&record)?;
        let position = self.ledger.add_identified(id, record)?;
        debug!(%id, position, "expense added");
        Ok((position, id))
    }

    pub fn remove_expense(&mut self, position: usize) -> Result<Entry> {
        match self.ledger.id_at(position)? {
            Some(id) => {
                self.gateway.delete_by_id(id)?;
                let removed = self.ledger.remove_by_id(id)?;
                debug!(%id, position, "expense removed");
                Ok(removed)
            }
            None => self.ledger.remove_at(position),
        }
    }

    /// Registers a category for this session. Categories live in memory only.
    pub fn add_category(&mut self, name: &str) -> Result<AddOutcome> {
        let name = normalize_name(name)?;
        Ok(self.ledger.add_category(name))
    }

    pub fn assign_category(&mut self, position: usize, category: &str) -> Result<()> {
        self.ledger.check_assignment(position, category)?;
        if let Some(id) = self.ledger.id_at(position)? {
            self.gateway.update_category_by_id(id, Some(category))?;
        }
        self.ledger.assign_category(position, category)
    }

    pub fn expenses(&self) -> impl Iterator<Item = (usize, &Entry)> + '_ {
        self.ledger.list()
    }

    pub fn get(&self, position: usize) -> Result<&Entry> {
        self.ledger.get(position)
    }

    pub fn total(&self) -> f64 {
        self.ledger.total()
    }

    pub fn categories(&self) -> &CategoryRegistry {
        self.ledger.categories()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn line_series(&self) -> LineSeries {
        LineSeries::from_records(self.ledger.records())
    }

    pub fn box_stats(&self) -> Option<BoxStats> {
        let amounts: Vec<f64> = self.ledger.records().map(|record| record.amount).collect();
        BoxStats::from_amounts(&amounts)
    }

    /// Compares the ledger against a fresh read of the store and, when they have
    /// diverged, rebuilds the ledger from the store.
    pub fn reconcile(&mut self) -> Result<ReconcileReport> {
        let stored: Vec<Entry> = self
            .gateway
            .fetch_all()?
            .into_iter()
            .map(Entry::from)
            .collect();
        let mut report = ReconcileReport::default();
        if stored.as_slice() == self.ledger.entries() {
            debug!(expenses = stored.len(), "ledger matches store");
            return Ok(report);
        }

        for entry in &stored {
            let Some(id) = entry.id else { continue };
            match self.ledger.position_of(id) {
                None => report.store_only.push(id),
                Some(position) => {
                    if self.ledger.entries()[position].record != entry.record {
                        report.changed.push(id);
                    }
                }
            }
        }
        report.ledger_only = self
            .ledger
            .entries()
            .iter()
            .filter(|entry| match entry.id {
                Some(id) => !stored.iter().any(|row| row.id == Some(id)),
                None => true,
            })
            .cloned()
            .collect();

        if self.options.seed_categories_from_records {
            for category in stored.iter().filter_map(|entry| entry.record.category.clone()) {
                self.ledger.add_category(category);
            }
        }
        self.ledger.replace_entries(stored);
        report.rebuilt = true;
        warn!(
            store_only = report.store_only.len(),
            ledger_only = report.ledger_only.len(),
            changed = report.changed.len(),
            "ledger diverged from store and was rebuilt"
        );
        Ok(report)
    }

    /// Writes a JSON snapshot of the current ledger.
    pub fn export_json(&self, path: &Path) -> Result<()> {
        save_snapshot_to_path(&self.ledger, path)?;
        info!(path = %path.display(), expenses = self.ledger.len(), "ledger exported");
        Ok(())
    }

    /// Releases the store. Consumes the tracker so the connection closes exactly once.
    pub fn close(self) -> Result<()> {
        self.gateway.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExpenseError;
    use crate::storage::SqliteGateway;
    use chrono::NaiveDate;

    fn record(day: u32, description: &str, amount: f64) -> Record {
        Record::new(
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            description,
            amount,
        )
    }

    fn tracker() -> ExpenseTracker {
        let gateway = SqliteGateway::open_in_memory().unwrap();
        ExpenseTracker::open(Box::new(gateway), TrackerOptions::default()).unwrap()
    }

    #[test]
    fn add_expense_attaches_storage_identifier() {
        let mut tracker = tracker();
        let (position, id) = tracker.add_expense(record(1, "coffee", 3.5)).unwrap();
        assert_eq!(position, 0);
        assert_eq!(tracker.get(0).unwrap().id, Some(id));
        assert!(tracker.reconcile().unwrap().in_sync());
    }

    #[test]
    fn remove_expense_deletes_the_addressed_row() {
        let mut tracker = tracker();
        tracker.add_expense(record(1, "a", 1.0)).unwrap();
        let (_, middle) = tracker.add_expense(record(2, "b", 2.0)).unwrap();
        tracker.add_expense(record(3, "c", 3.0)).unwrap();

        let removed = tracker.remove_expense(1).unwrap();
        assert_eq!(removed.id, Some(middle));
        let remaining: Vec<_> = tracker
            .expenses()
            .map(|(_, entry)| entry.record.description.clone())
            .collect();
        assert_eq!(remaining, ["a", "c"]);
        assert!(tracker.reconcile().unwrap().in_sync());
    }

    #[test]
    fn out_of_range_remove_touches_nothing() {
        let mut tracker = tracker();
        let err = tracker.remove_expense(0).unwrap_err();
        assert!(matches!(err, ExpenseError::IndexOutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn assign_category_requires_registration() {
        let mut tracker = tracker();
        tracker.add_expense(record(1, "lunch", 12.0)).unwrap();
        assert_eq!(tracker.add_category(" food ").unwrap(), AddOutcome::Added);
        tracker.assign_category(0, "food").unwrap();

        let err = tracker.assign_category(0, "drinks").unwrap_err();
        assert!(matches!(err, ExpenseError::UnknownCategory(_)));
        assert_eq!(
            tracker.get(0).unwrap().record.category.as_deref(),
            Some("food")
        );
        assert!(tracker.reconcile().unwrap().in_sync());
    }

    #[test]
    fn chart_data_follows_ledger() {
        let mut tracker = tracker();
        assert!(tracker.line_series().is_empty());
        assert!(tracker.box_stats().is_none());
        tracker.add_expense(record(2, "b", 2.0)).unwrap();
        tracker.add_expense(record(1, "a", 4.0)).unwrap();
        assert_eq!(tracker.line_series().points()[0].amount, 4.0);
        assert_eq!(tracker.box_stats().unwrap().median, 3.0);
    }
}
