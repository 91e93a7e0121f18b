use crate::types::order::{Order, OrderStatus};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a single reconciliation attempt ended.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OutcomeKind {
    /// The gateway disagreed with local state and the order was moved to
    /// the gateway's status
    Updated,
    /// Gateway and local state agree; nothing written
    Unchanged,
    /// The gateway could not be consulted (retries exhausted or the
    /// reference is unknown); local state untouched
    Failed,
    /// The gateway disagrees with a terminal local status; surfaced for
    /// manual review, never auto-resolved
    Conflict,
    /// The charged amount differs from the order amount beyond the
    /// configured tolerance
    AmountMismatch,
    /// The order carries no payment reference; no gateway call was made
    Skipped,
}

/// Append-only audit record, one per order per reconciliation attempt.
/// Retained for a configured window, then purged by the maintenance
/// trigger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReconciliationOutcome {
    pub id: Uuid,
    pub order_id: Uuid,
    pub kind: OutcomeKind,
    pub previous_status: OrderStatus,
    pub new_status: Option<OrderStatus>,
    pub attempt_count: u64,
    pub error_kind: Option<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl ReconciliationOutcome {
    pub fn new(order: &Order, kind: OutcomeKind, attempt_count: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id: order.id,
            kind,
            previous_status: order.status,
            new_status: None,
            attempt_count,
            error_kind: None,
            // BSON datetimes carry millisecond precision
            created_at: Utc::now().round_subsecs(3),
        }
    }

    pub fn with_new_status(mut self, status: OrderStatus) -> Self {
        self.new_status = Some(status);
        self
    }

    pub fn with_error_kind(mut self, error_kind: impl Into<String>) -> Self {
        self.error_kind = Some(error_kind.into());
        self
    }
}
