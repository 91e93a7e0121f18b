pub mod error;
pub mod mongodb;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use error::LockError;

/// A time-boxed lease as stored in the locks collection
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LockDocument {
    pub _id: String,
    pub holder_id: String,
    // `::mongodb` disambiguates the crate from the sibling module below
    #[serde(with = "::mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub acquired_at: DateTime<Utc>,
    #[serde(with = "::mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub expires_at: DateTime<Utc>,
}

impl LockDocument {
    /// An expired lease is equivalent to no lease and may be reclaimed
    /// by any instance.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Result of lock operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockResult {
    Acquired,
    /// A live lease is held by someone else; the caller must skip the
    /// cycle entirely
    Busy { holder: String },
    Released,
    /// Release of an absent, expired or foreign lease. A no-op, never an
    /// error.
    NotHeld,
}

/// Time-boxed exclusivity leases over shared storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LockClient: Send + Sync {
    /// try_acquire - Take the lease if no live lease exists. Never blocks
    /// or spins; a held lease answers `Busy`.
    async fn try_acquire(&self, key: &str, holder_id: &str, lease: Duration) -> Result<LockResult, LockError>;

    /// release - Give the lease back if still held by `holder_id`.
    /// Idempotent.
    async fn release(&self, key: &str, holder_id: &str) -> Result<LockResult, LockError>;
}
