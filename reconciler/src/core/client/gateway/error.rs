use thiserror::Error;

/// Classification of a failed gateway call.
///
/// Only `Timeout`, `ServerError` and `Transport` are transient; everything
/// else is permanent for the current cycle and must not be retried.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Gateway call timed out")]
    Timeout,

    /// The payment reference is unknown to the gateway. Permanent for
    /// this cycle - the order stays pending, flagged failed.
    #[error("Payment reference unknown to the gateway")]
    NotFound,

    #[error("Gateway server error (status {status})")]
    ServerError { status: u16 },

    /// Connection-level failure before any response; transient like a 5xx
    #[error("Could not reach the gateway: {0}")]
    Transport(String),

    #[error("Unrecognized gateway response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Timeout | GatewayError::ServerError { .. } | GatewayError::Transport(_))
    }

    /// Stable label recorded on audit outcomes
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Timeout => "timeout",
            GatewayError::NotFound => "not-found",
            GatewayError::ServerError { .. } => "server-error",
            GatewayError::Transport(_) => "transport",
            GatewayError::InvalidResponse(_) => "invalid-response",
        }
    }
}
