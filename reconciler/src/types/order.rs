use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    /// The order has been created at checkout and is waiting for the
    /// gateway to confirm the charge
    Pending,
    /// The charge has settled; the order can be fulfilled
    Paid,
    /// The charge was cancelled or refunded on the gateway side
    Cancelled,
    /// The charge expired without ever being paid
    Expired,
}

impl OrderStatus {
    /// Terminal statuses are never overwritten by reconciliation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled | OrderStatus::Expired)
    }
}

/// An order row as stored by the storefront. The reconciler only ever
/// mutates `status` and `updated_at`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    /// Charge identifier issued by the gateway at checkout. Absent on
    /// orders that were never submitted for payment.
    pub payment_reference: Option<String>,
    pub status: OrderStatus,
    /// Integer minor units (centavos). The only currency representation
    /// in this codebase.
    pub amount: i64,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}
