use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::domain::model::AccessLogSummary;
use crate::domain::ports::AccessLogStore;
use crate::utils::error::Result;

const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(5);
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_CONNECTIONS: u32 = 5;

/// [`AccessLogStore`] backed by a MySQL `access_logs` table.
///
/// Rows are append-only; this adapter never updates or deletes them. The
/// aggregation relies on the database's read-committed grouped query, so a
/// report reflects a recent, not necessarily linearizable, snapshot.
pub struct MySqlAccessLogStore {
    pool: MySqlPool,
}

impl MySqlAccessLogStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Connect to the database, retrying once after a short delay. The
    /// database container often comes up after the service does.
    pub async fn connect(database_url: &str) -> Result<Self> {
        match Self::try_connect(database_url).await {
            Ok(pool) => {
                tracing::info!("database connection established");
                Ok(Self::new(pool))
            }
            Err(e) => {
                tracing::warn!(error = %e, "database connection failed, retrying");
                tokio::time::sleep(CONNECT_RETRY_DELAY).await;
                let pool = Self::try_connect(database_url).await?;
                tracing::info!("database connection established after retry");
                Ok(Self::new(pool))
            }
        }
    }

    async fn try_connect(database_url: &str) -> std::result::Result<MySqlPool, sqlx::Error> {
        MySqlPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await
    }

    /// Create the `access_logs` table if it does not exist.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS access_logs (
                id INT AUTO_INCREMENT NOT NULL,
                postal_code VARCHAR(8) NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (id)
            )",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("access_logs table ready");
        Ok(())
    }
}

#[async_trait]
impl AccessLogStore for MySqlAccessLogStore {
    async fn insert(&self, postal_code: &str, occurred_at: DateTime<Utc>) -> Result<()> {
        sqlx::query("INSERT INTO access_logs (postal_code, created_at) VALUES (?, ?)")
            .bind(postal_code)
            .bind(occurred_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn group_count(&self) -> Result<Vec<AccessLogSummary>> {
        // Tie order among equal counts is whatever the database returns.
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT postal_code, COUNT(*) AS request_count
             FROM access_logs
             GROUP BY postal_code
             ORDER BY request_count DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(postal_code, request_count)| AccessLogSummary {
                postal_code,
                request_count,
            })
            .collect())
    }
}
