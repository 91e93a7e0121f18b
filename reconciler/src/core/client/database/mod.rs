pub mod constant;
pub mod error;
pub mod mongodb;

use crate::types::order::{Order, OrderStatus};
use crate::types::outcome::ReconciliationOutcome;
use async_trait::async_trait;
use std::time::Duration;

pub use error::DatabaseError;

/// Trait defining database operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// disconnect - Disconnect from the database
    async fn disconnect(&self) -> Result<(), DatabaseError>;

    /// get_pending_orders - Load a bounded batch of pending orders whose age lies
    /// within `[min_age, max_age]`, oldest first so long-pending orders cannot
    /// starve under a fixed batch size. An empty result is not an error.
    async fn get_pending_orders(
        &self,
        limit: u64,
        min_age: Duration,
        max_age: Duration,
    ) -> Result<Vec<Order>, DatabaseError>;

    /// update_order_status - Move an order out of `Pending`, stamping `updated_at`.
    /// The write is guarded on the status the order had when it was read, so a
    /// concurrent webhook update makes this a no-match instead of a lost update.
    async fn update_order_status(&self, order: &Order, status: OrderStatus) -> Result<Order, DatabaseError>;

    /// create_outcome - Append one audit record
    async fn create_outcome(&self, outcome: ReconciliationOutcome) -> Result<ReconciliationOutcome, DatabaseError>;

    /// purge_outcomes_older_than - Delete audit records older than the retention
    /// window, returning how many were removed
    async fn purge_outcomes_older_than(&self, days: u64) -> Result<u64, DatabaseError>;
}
