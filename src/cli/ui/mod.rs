pub mod charts;
pub mod formatting;
pub mod table;
