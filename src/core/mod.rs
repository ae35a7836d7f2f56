//! Coordination between the ledger and storage, plus derived chart data.

pub mod charts;
pub mod tracker;

pub use charts::{BoxStats, LinePoint, LineSeries};
pub use tracker::{ExpenseTracker, ReconcileReport, TrackerOptions};
