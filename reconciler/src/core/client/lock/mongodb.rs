use super::error::LockError;
use super::{LockClient, LockDocument, LockResult};
use crate::core::client::database::constant::LOCKS_COLLECTION;
use crate::types::params::database::DatabaseArgs;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, SubsecRound, Utc};
use mongodb::bson::{self, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::{Client, Collection, Database};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB-backed time-boxed leases.
///
/// Acquisition is a single `findOneAndUpdate` with an expired-lease filter
/// and upsert. A live lease makes the filter miss and the upsert collide on
/// `_id`, which surfaces as a duplicate-key error - that is the `Busy` path,
/// not a failure.
pub struct MongoDbLockClient {
    database: Arc<Database>,
}

impl MongoDbLockClient {
    pub async fn new(config: &DatabaseArgs) -> Result<Self, LockError> {
        let client = Client::with_uri_str(&config.connection_uri).await?;
        let database = Arc::new(client.database(&config.database_name));
        Ok(Self { database })
    }

    /// Build on an already-connected client, sharing its connection pool.
    pub fn with_client(client: &Client, database_name: &str) -> Self {
        Self { database: Arc::new(client.database(database_name)) }
    }

    fn get_lock_collection(&self) -> Collection<LockDocument> {
        self.database.collection(LOCKS_COLLECTION)
    }

    fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
        match error.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_CODE,
            ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
            _ => false,
        }
    }
}

#[async_trait]
impl LockClient for MongoDbLockClient {
    async fn try_acquire(&self, key: &str, holder_id: &str, lease: Duration) -> Result<LockResult, LockError> {
        let now = Utc::now().round_subsecs(3);
        let lease = ChronoDuration::from_std(lease).unwrap_or_else(|_| ChronoDuration::zero());

        // Matches only an expired lease; on a missing document the upsert
        // inserts, on a live lease the upsert collides on _id.
        let filter = doc! {
            "_id": key,
            "expires_at": { "$lte": bson::DateTime::from_chrono(now) },
        };
        let update = doc! {
            "$set": {
                "holder_id": holder_id,
                "acquired_at": bson::DateTime::from_chrono(now),
                "expires_at": bson::DateTime::from_chrono(now + lease),
            },
        };
        let options = FindOneAndUpdateOptions::builder().upsert(true).return_document(ReturnDocument::After).build();

        match self.get_lock_collection().find_one_and_update(filter, update, options).await {
            Ok(_) => {
                debug!(key, holder_id, "Lease acquired");
                Ok(LockResult::Acquired)
            }
            Err(e) if Self::is_duplicate_key(&e) => {
                let holder = self
                    .get_lock_collection()
                    .find_one(doc! { "_id": key }, None)
                    .await?
                    .map(|lock| lock.holder_id)
                    .unwrap_or_else(|| "unknown".to_string());
                Ok(LockResult::Busy { holder })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn release(&self, key: &str, holder_id: &str) -> Result<LockResult, LockError> {
        let result = self.get_lock_collection().delete_one(doc! { "_id": key, "holder_id": holder_id }, None).await?;
        if result.deleted_count == 1 {
            debug!(key, holder_id, "Lease released");
            Ok(LockResult::Released)
        } else {
            Ok(LockResult::NotHeld)
        }
    }
}
