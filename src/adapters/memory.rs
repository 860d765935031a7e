use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::model::AccessLogSummary;
use crate::domain::ports::AccessLogStore;
use crate::utils::error::Result;

/// In-memory [`AccessLogStore`] for tests and database-less local runs.
#[derive(Default)]
pub struct InMemoryAccessLogStore {
    events: Mutex<Vec<(String, DateTime<Utc>)>>,
}

impl InMemoryAccessLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.events.lock().await.len()
    }
}

#[async_trait]
impl AccessLogStore for InMemoryAccessLogStore {
    async fn insert(&self, postal_code: &str, occurred_at: DateTime<Utc>) -> Result<()> {
        self.events
            .lock()
            .await
            .push((postal_code.to_string(), occurred_at));
        Ok(())
    }

    async fn group_count(&self) -> Result<Vec<AccessLogSummary>> {
        let mut counts: HashMap<String, i64> = HashMap::new();
        for (postal_code, _) in self.events.lock().await.iter() {
            *counts.entry(postal_code.clone()).or_insert(0) += 1;
        }

        let mut summaries: Vec<AccessLogSummary> = counts
            .into_iter()
            .map(|(postal_code, request_count)| AccessLogSummary {
                postal_code,
                request_count,
            })
            .collect();

        // Descending by count; ties land in map iteration order, the same
        // unspecified-tie contract as the database adapter.
        summaries.sort_by(|a, b| b.request_count.cmp(&a.request_count));

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_group_count() {
        let store = InMemoryAccessLogStore::new();
        let now = Utc::now();

        store.insert("1020073", now).await.unwrap();
        store.insert("1020073", now).await.unwrap();
        store.insert("1000001", now).await.unwrap();

        assert_eq!(store.len().await, 3);

        let summaries = store.group_count().await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].postal_code, "1020073");
        assert_eq!(summaries[0].request_count, 2);
        assert_eq!(summaries[1].request_count, 1);
    }

    #[tokio::test]
    async fn test_group_count_empty() {
        let store = InMemoryAccessLogStore::new();
        assert!(store.group_count().await.unwrap().is_empty());
    }
}
