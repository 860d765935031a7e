pub mod access_log;
pub mod distance;
pub mod resolver;

pub use crate::domain::model::{AccessLogSummary, AddressSummary, RawLocation};
pub use crate::domain::ports::{AccessLogStore, LocationLookup};
pub use crate::utils::error::Result;
