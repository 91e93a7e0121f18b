use crate::core::error::ReconcilerCoreError;
use thiserror::Error;

/// Result type for service-level operations
pub type ReconcilerResult<T> = Result<T, ReconcilerError>;

/// Error types for the reconciliation service
#[derive(Error, Debug)]
pub enum ReconcilerError {
    #[error("Core error: {0}")]
    CoreError(#[from] ReconcilerCoreError),

    /// Raised at startup only; the service refuses to run on invalid tunables
    #[error("Configuration invalid: {0}")]
    ConfigurationInvalid(String),

    #[error("Worker error: {0}")]
    WorkerError(String),

    #[error("Metrics error: {0}")]
    MetricsError(String),

    #[error("Reconciler error: {0}")]
    AnyhowError(#[from] anyhow::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Mongo error
    #[error("Mongo error: {0}")]
    MongoError(#[from] mongodb::error::Error),
}
