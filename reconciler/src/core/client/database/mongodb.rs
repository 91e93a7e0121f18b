use super::error::DatabaseError;
use crate::core::client::database::constant::{ORDERS_COLLECTION, OUTCOMES_COLLECTION};
use crate::core::client::database::DatabaseClient;
use crate::types::order::{Order, OrderStatus};
use crate::types::outcome::ReconciliationOutcome;
use crate::types::params::database::DatabaseArgs;
use crate::utils::metrics::RECONCILER_METRICS;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, SubsecRound, Utc};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{bson, Client, Collection, Database};
use opentelemetry::KeyValue;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// MongoDB client implementation
pub struct MongoDbClient {
    client: Client,
    database: Arc<Database>,
}

impl MongoDbClient {
    pub async fn new(config: &DatabaseArgs) -> Result<Self, DatabaseError> {
        let client = Client::with_uri_str(&config.connection_uri).await?;
        let database = Arc::new(client.database(&config.database_name));
        Ok(Self { client, database })
    }

    /// Mongodb client uses Arc internally, reducing the cost of clone.
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    fn get_order_collection(&self) -> Collection<Order> {
        self.database.collection(ORDERS_COLLECTION)
    }

    fn get_outcome_collection(&self) -> Collection<ReconciliationOutcome> {
        self.database.collection(OUTCOMES_COLLECTION)
    }

    fn record_db_call(&self, operation: &'static str, start: Instant) {
        let duration = start.elapsed().as_secs_f64();
        RECONCILER_METRICS.db_calls_response_time.record(duration, &[KeyValue::new("db_operation", operation)]);
    }
}

#[async_trait]
impl DatabaseClient for MongoDbClient {
    async fn disconnect(&self) -> Result<(), DatabaseError> {
        self.client.clone().shutdown().await;
        Ok(())
    }

    async fn get_pending_orders(
        &self,
        limit: u64,
        min_age: Duration,
        max_age: Duration,
    ) -> Result<Vec<Order>, DatabaseError> {
        let start = Instant::now();
        let now = Utc::now();
        let newest_eligible = now - ChronoDuration::from_std(min_age).unwrap_or_else(|_| ChronoDuration::zero());
        let oldest_eligible = now - ChronoDuration::from_std(max_age).unwrap_or_else(|_| ChronoDuration::zero());

        let filter = doc! {
            "status": OrderStatus::Pending.to_string(),
            "created_at": {
                "$gte": bson::DateTime::from_chrono(oldest_eligible),
                "$lte": bson::DateTime::from_chrono(newest_eligible),
            },
        };
        let options = FindOptions::builder().sort(doc! { "created_at": 1 }).limit(limit as i64).build();

        let orders: Vec<Order> = self.get_order_collection().find(filter, options).await?.try_collect().await?;

        debug!(count = orders.len(), "Fetched pending orders batch");
        self.record_db_call("get_pending_orders", start);
        Ok(orders)
    }

    async fn update_order_status(&self, order: &Order, status: OrderStatus) -> Result<Order, DatabaseError> {
        let start = Instant::now();
        // Guard on the status the order had when it was read. A concurrent
        // webhook update turns this into a no-match rather than a lost update.
        let filter = doc! {
            "id": order.id.to_string(),
            "status": order.status.to_string(),
        };
        let update = doc! {
            "$set": {
                "status": status.to_string(),
                "updated_at": bson::DateTime::from_chrono(Utc::now().round_subsecs(3)),
            },
        };
        let options = FindOneAndUpdateOptions::builder().return_document(ReturnDocument::After).build();

        let result = self.get_order_collection().find_one_and_update(filter, update, options).await?;
        self.record_db_call("update_order_status", start);
        result.ok_or(DatabaseError::OrderNotFound(order.id))
    }

    async fn create_outcome(&self, outcome: ReconciliationOutcome) -> Result<ReconciliationOutcome, DatabaseError> {
        let start = Instant::now();
        self.get_outcome_collection().insert_one(&outcome, None).await?;
        self.record_db_call("create_outcome", start);
        Ok(outcome)
    }

    async fn purge_outcomes_older_than(&self, days: u64) -> Result<u64, DatabaseError> {
        let start = Instant::now();
        let cutoff = Utc::now() - ChronoDuration::days(days as i64);
        let filter = doc! {
            "created_at": { "$lt": bson::DateTime::from_chrono(cutoff) },
        };

        let result = self.get_outcome_collection().delete_many(filter, None).await?;
        self.record_db_call("purge_outcomes", start);
        Ok(result.deleted_count)
    }
}
