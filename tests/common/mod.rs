#![allow(dead_code)]

use std::{cell::Cell, path::PathBuf, rc::Rc, sync::Mutex};

use chrono::NaiveDate;
use expense_tracker::{
    domain::{Record, RecordId},
    errors::{ExpenseError, Result},
    storage::{PersistedRecord, PersistenceGateway, SqliteGateway},
    ExpenseTracker, TrackerOptions,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid test date")
}

pub fn record(day: u32, description: &str, amount: f64) -> Record {
    Record::new(date(1, day), description, amount)
}

pub fn memory_tracker() -> ExpenseTracker {
    let gateway = SqliteGateway::open_in_memory().expect("open in-memory store");
    ExpenseTracker::open(Box::new(gateway), TrackerOptions::default()).expect("open tracker")
}

/// Switches shared between a test and the [`FaultyGateway`] it handed to a tracker.
#[derive(Debug, Default)]
pub struct Faults {
    pub insert: Cell<bool>,
    pub delete: Cell<bool>,
    pub update: Cell<bool>,
    pub fetch: Cell<bool>,
}

/// Wraps a real gateway and fails the operations whose switch is on.
pub struct FaultyGateway {
    inner: SqliteGateway,
    faults: Rc<Faults>,
}

impl FaultyGateway {
    pub fn new(inner: SqliteGateway) -> (Self, Rc<Faults>) {
        let faults = Rc::new(Faults::default());
        (
            Self {
                inner,
                faults: Rc::clone(&faults),
            },
            faults,
        )
    }
}

fn injected(operation: &str) -> ExpenseError {
    ExpenseError::Storage(format!("injected {} failure", operation))
}

impl PersistenceGateway for FaultyGateway {
    fn insert(&mut self, record: &Record) -> Result<RecordId> {
        if self.faults.insert.get() {
            return Err(injected("insert"));
        }
        self.inner.insert(record)
    }

    fn delete_by_id(&mut self, id: RecordId) -> Result<()> {
        if self.faults.delete.get() {
            return Err(injected("delete"));
        }
        self.inner.delete_by_id(id)
    }

    fn update_category_by_id(&mut self, id: RecordId, category: Option<&str>) -> Result<()> {
        if self.faults.update.get() {
            return Err(injected("update"));
        }
        self.inner.update_category_by_id(id, category)
    }

    fn fetch_all(&self) -> Result<Vec<PersistedRecord>> {
        if self.faults.fetch.get() {
            return Err(injected("fetch"));
        }
        self.inner.fetch_all()
    }

    fn close(self: Box<Self>) -> Result<()> {
        let this = *self;
        Box::new(this.inner).close()
    }
}

/// A tracker over an in-memory store whose operations can be made to fail.
pub fn faulty_tracker() -> (ExpenseTracker, Rc<Faults>) {
    let inner = SqliteGateway::open_in_memory().expect("open in-memory store");
    let (gateway, faults) = FaultyGateway::new(inner);
    let tracker =
        ExpenseTracker::open(Box::new(gateway), TrackerOptions::default()).expect("open tracker");
    (tracker, faults)
}

/// Descriptions in ledger order.
pub fn descriptions(tracker: &ExpenseTracker) -> Vec<String> {
    tracker
        .expenses()
        .map(|(_, entry)| entry.record.description.clone())
        .collect()
}
