use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the persistence collaborators
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Serialization error for key {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Storage lock poisoned: {0}")]
    LockPoisoned(&'static str),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Backend(_))
    }
}
