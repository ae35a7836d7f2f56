mod common;

use common::{descriptions, faulty_tracker, record, temp_dir};
use expense_tracker::{
    domain::RecordId,
    errors::ExpenseError,
    storage::{PersistenceGateway, SqliteGateway},
    ExpenseTracker, TrackerOptions,
};

#[test]
fn failed_insert_leaves_ledger_unchanged() {
    let (mut tracker, faults) = faulty_tracker();
    tracker.add_expense(record(1, "kept", 1.0)).unwrap();
    let before = tracker.ledger().clone();

    faults.insert.set(true);
    let err = tracker.add_expense(record(2, "lost", 2.0)).unwrap_err();

    assert!(err.is_storage());
    assert_eq!(tracker.ledger(), &before);
}

#[test]
fn failed_delete_leaves_ledger_unchanged() {
    let (mut tracker, faults) = faulty_tracker();
    tracker.add_expense(record(1, "a", 1.0)).unwrap();
    tracker.add_expense(record(2, "b", 2.0)).unwrap();

    faults.delete.set(true);
    assert!(tracker.remove_expense(0).unwrap_err().is_storage());
    assert_eq!(descriptions(&tracker), ["a", "b"]);

    faults.delete.set(false);
    tracker.remove_expense(0).unwrap();
    assert_eq!(descriptions(&tracker), ["b"]);
    assert!(tracker.reconcile().unwrap().in_sync());
}

#[test]
fn failed_category_update_leaves_ledger_unchanged() {
    let (mut tracker, faults) = faulty_tracker();
    tracker.add_expense(record(1, "lunch", 12.0)).unwrap();
    tracker.add_category("food").unwrap();

    faults.update.set(true);
    assert!(tracker.assign_category(0, "food").unwrap_err().is_storage());
    assert_eq!(tracker.get(0).unwrap().record.category, None);
}

#[test]
fn validation_runs_before_storage_is_touched() {
    let (mut tracker, faults) = faulty_tracker();
    tracker.add_expense(record(1, "lunch", 12.0)).unwrap();
    faults.update.set(true);
    faults.delete.set(true);

    // These fail on their own merits, not with the injected storage error.
    assert!(matches!(
        tracker.assign_category(0, "unknown"),
        Err(ExpenseError::UnknownCategory(_))
    ));
    assert!(matches!(
        tracker.remove_expense(3),
        Err(ExpenseError::IndexOutOfRange { index: 3, len: 1 })
    ));
}

#[test]
fn removal_addresses_storage_by_identifier_not_position() {
    let path = temp_dir().join("gaps.db");
    let mut seed = SqliteGateway::open(&path).unwrap();
    let ids: Vec<RecordId> = ["a", "b", "c", "d"]
        .iter()
        .enumerate()
        .map(|(day, name)| seed.insert(&record(day as u32 + 1, name, 1.0)).unwrap())
        .collect();
    // Leave a hole so ledger positions no longer line up with row identifiers.
    seed.delete_by_id(ids[0]).unwrap();
    seed.delete_by_id(ids[2]).unwrap();
    Box::new(seed).close().unwrap();

    let mut tracker = ExpenseTracker::open(
        Box::new(SqliteGateway::open(&path).unwrap()),
        TrackerOptions::default(),
    )
    .unwrap();
    assert_eq!(descriptions(&tracker), ["b", "d"]);

    let removed = tracker.remove_expense(1).unwrap();
    assert_eq!(removed.id, Some(ids[3]));
    tracker.close().unwrap();

    let remaining = SqliteGateway::open(&path).unwrap().fetch_all().unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, ids[1]);
    assert_eq!(remaining[0].record.description, "b");
}

#[test]
fn reconcile_detects_and_repairs_external_changes() {
    let path = temp_dir().join("shared.db");
    let mut tracker = ExpenseTracker::open(
        Box::new(SqliteGateway::open(&path).unwrap()),
        TrackerOptions::default(),
    )
    .unwrap();
    let (_, first) = tracker.add_expense(record(1, "first", 1.0)).unwrap();
    let (_, second) = tracker.add_expense(record(2, "second", 2.0)).unwrap();
    assert!(tracker.reconcile().unwrap().in_sync());

    // Another connection edits the same file behind the tracker's back.
    let mut other = SqliteGateway::open(&path).unwrap();
    other.delete_by_id(first).unwrap();
    other
        .update_category_by_id(second, Some("travel"))
        .unwrap();
    let third = other.insert(&record(3, "third", 3.0)).unwrap();
    Box::new(other).close().unwrap();

    let report = tracker.reconcile().unwrap();
    assert!(report.rebuilt);
    assert_eq!(report.store_only, vec![third]);
    assert_eq!(report.changed, vec![second]);
    assert_eq!(report.ledger_only.len(), 1);
    assert_eq!(report.ledger_only[0].id, Some(first));

    assert_eq!(descriptions(&tracker), ["second", "third"]);
    assert!(tracker.categories().contains("travel"));
    assert!(tracker.reconcile().unwrap().in_sync());
}

#[test]
fn reconcile_surfaces_unreadable_store() {
    let (mut tracker, faults) = faulty_tracker();
    tracker.add_expense(record(1, "a", 1.0)).unwrap();
    faults.fetch.set(true);
    assert!(tracker.reconcile().unwrap_err().is_storage());
    assert_eq!(descriptions(&tracker), ["a"]);
}
