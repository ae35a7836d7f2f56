//! In-memory expense ledger and its positional/identifier addressing.

#[allow(clippy::module_inception)]
pub mod ledger;

pub use ledger::{Entry, Ledger};
