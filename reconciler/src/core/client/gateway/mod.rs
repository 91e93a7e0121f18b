pub mod error;
pub mod pix;

use crate::types::order::OrderStatus;
use async_trait::async_trait;
use serde_json::Value;

pub use error::GatewayError;

/// Fee reported by the gateway, normalized out of its shape-shifting
/// payload. The fallback chain lives in [`pix::extract_fee`] as an
/// explicit priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeField {
    /// Fee in integer minor units
    Recognized(i64),
    /// None of the known payload shapes carried a fee
    Unrecognized,
}

/// Ground-truth charge state as reported by the gateway, normalized at
/// the boundary into the local status vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayCharge {
    pub status: OrderStatus,
    /// Status string exactly as the gateway sent it, kept for audit logs
    pub raw_status: String,
    /// Charged amount in integer minor units
    pub amount: i64,
    pub fee: FeeField,
    pub raw_payload: Value,
}

/// Query-by-reference client against the PIX billing gateway. This
/// service only reads charge status; it never creates or cancels
/// charges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn query_status(&self, payment_reference: &str) -> Result<GatewayCharge, GatewayError>;
}
