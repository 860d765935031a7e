use std::sync::Arc;

use chrono::Utc;

use crate::domain::model::AccessLogSummary;
use crate::domain::ports::AccessLogStore;
use crate::utils::error::Result;

/// Records lookup events and produces the ranked frequency report.
///
/// All mutable state lives behind the store port; this service only stamps
/// timestamps and delegates.
pub struct AccessLogService {
    store: Arc<dyn AccessLogStore>,
}

impl AccessLogService {
    pub fn new(store: Arc<dyn AccessLogStore>) -> Self {
        Self { store }
    }

    /// Persist one lookup event with the current UTC timestamp. No
    /// deduplication, no batching; a store failure surfaces verbatim.
    pub async fn record(&self, postal_code: &str) -> Result<()> {
        let now = Utc::now();
        tracing::debug!(postal_code, "recording access log entry");
        self.store.insert(postal_code, now).await
    }

    /// Group stored events by postal code, ordered by request count
    /// descending. Recomputed on every call; never mutates the store.
    pub async fn report(&self) -> Result<Vec<AccessLogSummary>> {
        let summaries = self.store.group_count().await?;
        tracing::debug!(groups = summaries.len(), "aggregated access logs");
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAccessLogStore;

    #[tokio::test]
    async fn test_record_then_report_reflects_event() {
        let store = Arc::new(InMemoryAccessLogStore::new());
        let service = AccessLogService::new(store);

        service.record("1020073").await.unwrap();

        let report = service.report().await.unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].postal_code, "1020073");
        assert_eq!(report[0].request_count, 1);
    }

    #[tokio::test]
    async fn test_report_orders_by_count_descending() {
        let store = Arc::new(InMemoryAccessLogStore::new());
        let service = AccessLogService::new(store);

        for _ in 0..7 {
            service.record("1020073").await.unwrap();
        }
        for _ in 0..5 {
            service.record("1000001").await.unwrap();
        }
        for _ in 0..2 {
            service.record("5300001").await.unwrap();
        }

        let report = service.report().await.unwrap();
        let ranked: Vec<(&str, i64)> = report
            .iter()
            .map(|s| (s.postal_code.as_str(), s.request_count))
            .collect();
        assert_eq!(
            ranked,
            vec![("1020073", 7), ("1000001", 5), ("5300001", 2)]
        );
    }

    #[tokio::test]
    async fn test_report_on_empty_store_is_empty() {
        let service = AccessLogService::new(Arc::new(InMemoryAccessLogStore::new()));
        assert!(service.report().await.unwrap().is_empty());
    }
}
