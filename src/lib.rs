#![doc(test(attr(deny(warnings))))]

//! Expense Tracker records dated expenses, tags them with categories, keeps them in a
//! local SQLite store, and offers totals, listings, and terminal charts.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{ExpenseTracker, TrackerOptions};
pub use errors::{ExpenseError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Expense Tracker tracing initialized.");
    });
}
