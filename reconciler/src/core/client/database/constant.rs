/// Collection holding the storefront's orders
///
/// Owned by the surrounding application; checkout creates rows here and
/// webhook handlers mutate them outside this service. The reconciler
/// only reads pending rows and writes `status` / `updated_at`.
pub const ORDERS_COLLECTION: &str = "orders";

/// Collection holding append-only reconciliation audit records
pub const OUTCOMES_COLLECTION: &str = "reconciliation_outcomes";

/// Collection holding the time-boxed worker leases
pub const LOCKS_COLLECTION: &str = "locks";
