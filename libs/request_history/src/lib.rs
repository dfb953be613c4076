pub mod log;
pub mod models;

pub use log::{DEFAULT_RETENTION, HistoryLog, MAX_RECENT};
pub use models::{HistoryRecord, Route};
