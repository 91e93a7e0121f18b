/// Lock key for the reconciliation cycle
///
/// Only one reconciliation cycle may run cluster-wide at any time. The
/// lease is reclaimable once expired, which tolerates crashed holders
/// without explicit heartbeating.
pub const RECONCILIATION_LOCK_KEY: &str = "ReconciliationWorker";

/// Lock key for the audit retention purge
pub const AUDIT_PURGE_LOCK_KEY: &str = "AuditPurgeWorker";
