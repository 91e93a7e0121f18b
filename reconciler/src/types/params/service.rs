use crate::cli::service::ServiceCliArgs;
use crate::error::ReconcilerError;
use crate::types::params::require_positive;
use std::time::Duration;

/// Validated reconciliation tunables. Constructed once at startup; the
/// service refuses to run on any invalid value.
#[derive(Debug, Clone)]
pub struct ServiceParams {
    /// Maximum orders reconciled per cycle
    pub batch_size: u64,
    /// Interval between cycle starts
    pub cycle_interval: Duration,
    /// Cooperative budget for one cycle, checked between orders
    pub execution_timeout: Duration,
    /// Total gateway attempts per order within one cycle
    pub max_retries: u64,
    /// Base delay before the first retry
    pub retry_delay: Duration,
    /// Exponential backoff factor applied per attempt
    pub backoff_multiplier: f64,
    /// Lease duration for the cycle lock; always exceeds `execution_timeout`
    pub lock_lease: Duration,
    pub min_pending_age: Duration,
    pub max_pending_age: Duration,
    /// Tolerated deviation fraction between order and charged amount
    pub amount_tolerance: f64,
    pub audit_retention_days: u64,
    pub purge_interval: Duration,
}

impl TryFrom<&ServiceCliArgs> for ServiceParams {
    type Error = ReconcilerError;

    fn try_from(args: &ServiceCliArgs) -> Result<Self, Self::Error> {
        if !(args.backoff_multiplier >= 1.0) {
            return Err(ReconcilerError::ConfigurationInvalid(format!(
                "backoff multiplier must be >= 1.0, got {}",
                args.backoff_multiplier
            )));
        }
        if !(0.0..=1.0).contains(&args.amount_tolerance) {
            return Err(ReconcilerError::ConfigurationInvalid(format!(
                "amount tolerance must be a fraction within [0, 1], got {}",
                args.amount_tolerance
            )));
        }
        if args.min_pending_age_seconds > args.max_pending_age_seconds {
            return Err(ReconcilerError::ConfigurationInvalid(format!(
                "min pending age ({}s) must not exceed max pending age ({}s)",
                args.min_pending_age_seconds, args.max_pending_age_seconds
            )));
        }
        // A lease shorter than the execution budget could be reclaimed by a
        // second instance while the first is still legitimately running.
        if args.lock_lease_seconds <= args.execution_timeout_seconds {
            return Err(ReconcilerError::ConfigurationInvalid(format!(
                "lock lease ({}s) must exceed the execution timeout ({}s)",
                args.lock_lease_seconds, args.execution_timeout_seconds
            )));
        }

        Ok(Self {
            batch_size: require_positive(args.batch_size, "batch size")?,
            cycle_interval: Duration::from_secs(require_positive(args.cycle_interval_seconds, "cycle interval")?),
            execution_timeout: Duration::from_secs(require_positive(
                args.execution_timeout_seconds,
                "execution timeout",
            )?),
            max_retries: require_positive(args.max_retries, "max retries")?,
            retry_delay: Duration::from_millis(require_positive(args.retry_delay_ms, "retry delay")?),
            backoff_multiplier: args.backoff_multiplier,
            lock_lease: Duration::from_secs(require_positive(args.lock_lease_seconds, "lock lease")?),
            min_pending_age: Duration::from_secs(args.min_pending_age_seconds),
            max_pending_age: Duration::from_secs(require_positive(args.max_pending_age_seconds, "max pending age")?),
            amount_tolerance: args.amount_tolerance,
            audit_retention_days: require_positive(args.audit_retention_days, "audit retention")?,
            purge_interval: Duration::from_secs(require_positive(args.purge_interval_seconds, "purge interval")?),
        })
    }
}
