pub mod category;
pub mod common;
pub mod record;

pub use category::{normalize_name, AddOutcome, CategoryRegistry};
pub use common::{sum_amounts, Amounted, Displayable};
pub use record::{parse_amount, parse_date, Record, RecordId, DATE_FORMAT};
