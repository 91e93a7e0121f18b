use super::client::{database::DatabaseError, gateway::GatewayError, lock::LockError};
use thiserror::Error;

pub type ReconcilerCoreResult<T> = Result<T, ReconcilerCoreError>;

#[derive(Error, Debug)]
pub enum ReconcilerCoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Lock error: {0}")]
    LockError(#[from] LockError),

    #[error("Gateway error: {0}")]
    GatewayError(#[from] GatewayError),
}
