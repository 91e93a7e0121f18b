use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct ServiceCliArgs {
    /// Maximum number of pending orders reconciled per cycle.
    #[arg(env = "PIX_RECONCILER_BATCH_SIZE", long, default_value = "50")]
    pub batch_size: u64,

    /// Interval between reconciliation cycles, in seconds. The in-process
    /// rendition of the deployment cron schedule (every 5/10/15 minutes
    /// depending on tier).
    #[arg(env = "PIX_RECONCILER_CYCLE_INTERVAL_SECONDS", long, default_value = "300")]
    pub cycle_interval_seconds: u64,

    /// Overall execution budget for one cycle, in seconds. Checked
    /// cooperatively between orders; must stay below the lock lease.
    #[arg(env = "PIX_RECONCILER_EXECUTION_TIMEOUT_SECONDS", long, default_value = "240")]
    pub execution_timeout_seconds: u64,

    /// Maximum gateway query attempts per order within one cycle.
    #[arg(env = "PIX_RECONCILER_MAX_RETRIES", long, default_value = "3")]
    pub max_retries: u64,

    /// Base delay before the first retry, in milliseconds.
    #[arg(env = "PIX_RECONCILER_RETRY_DELAY_MS", long, default_value = "1000")]
    pub retry_delay_ms: u64,

    /// Exponential backoff multiplier applied per retry attempt.
    #[arg(env = "PIX_RECONCILER_BACKOFF_MULTIPLIER", long, default_value = "2.0")]
    pub backoff_multiplier: f64,

    /// Lease duration for the cycle lock, in seconds. Must exceed the
    /// execution timeout so a live holder is never reclaimed mid-cycle.
    #[arg(env = "PIX_RECONCILER_LOCK_LEASE_SECONDS", long, default_value = "300")]
    pub lock_lease_seconds: u64,

    /// Orders younger than this are skipped - they are still within the
    /// gateway's normal confirmation latency.
    #[arg(env = "PIX_RECONCILER_MIN_PENDING_AGE_SECONDS", long, default_value = "120")]
    pub min_pending_age_seconds: u64,

    /// Orders older than this are left to the abandonment/expiry policy.
    #[arg(env = "PIX_RECONCILER_MAX_PENDING_AGE_SECONDS", long, default_value = "172800")]
    pub max_pending_age_seconds: u64,

    /// Tolerated fraction of deviation between the order amount and the
    /// charged amount before an amount-mismatch outcome is raised.
    #[arg(env = "PIX_RECONCILER_AMOUNT_TOLERANCE", long, default_value = "0.01")]
    pub amount_tolerance: f64,

    /// Days to keep reconciliation outcome records before purging.
    #[arg(env = "PIX_RECONCILER_AUDIT_RETENTION_DAYS", long, default_value = "30")]
    pub audit_retention_days: u64,

    /// Interval between audit purge runs, in seconds.
    #[arg(env = "PIX_RECONCILER_PURGE_INTERVAL_SECONDS", long, default_value = "21600")]
    pub purge_interval_seconds: u64,
}
