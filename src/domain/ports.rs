use crate::domain::model::{AccessLogSummary, RawLocation};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Outbound lookup of the raw locations registered for a postal code.
///
/// Implementations must return the empty vector (not an error) when the
/// postal code has no registered locations.
#[async_trait]
pub trait LocationLookup: Send + Sync {
    async fn fetch(&self, postal_code: &str) -> Result<Vec<RawLocation>>;
}

/// Append-only store of access log events.
#[async_trait]
pub trait AccessLogStore: Send + Sync {
    /// Persist one lookup event. Every call is its own unit of work.
    async fn insert(&self, postal_code: &str, occurred_at: DateTime<Utc>) -> Result<()>;

    /// Group all stored events by postal code and return the counts ordered
    /// by count descending. Pure read; an empty store yields an empty
    /// vector.
    async fn group_count(&self) -> Result<Vec<AccessLogSummary>>;
}
