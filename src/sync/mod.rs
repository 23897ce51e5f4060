//! Date sync: canonical date handling and the two sync workflows.

pub mod date;
pub mod engine;

pub use date::DateValue;
pub use engine::{ColumnConfig, SyncEngine, SyncOutcome, SyncResult};
