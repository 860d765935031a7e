use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("geocoder request failed: {0}")]
    LookupTransport(#[from] reqwest::Error),

    #[error("geocoder returned unexpected status code: {0}")]
    LookupStatus(u16),

    #[error("failed to decode geocoder response: {0}")]
    LookupDecode(#[from] serde_json::Error),

    #[error("access log store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl AppError {
    /// Whether the error originated in the outbound geocoder lookup, as
    /// opposed to the access log store or local configuration.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            AppError::LookupTransport(_) | AppError::LookupStatus(_) | AppError::LookupDecode(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
