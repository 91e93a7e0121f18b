use once_cell::sync::Lazy;
use opentelemetry::global;
use opentelemetry::metrics::{Counter, Histogram, Meter};

pub static RECONCILER_METRICS: Lazy<ReconcilerMetrics> = Lazy::new(ReconcilerMetrics::register);

pub struct ReconcilerMetrics {
    /// Count per outcome kind, attributed with `kind`
    pub reconciliation_outcomes: Counter<u64>,
    /// Cycles that ended without touching any order, attributed with `reason`
    pub cycles_skipped: Counter<u64>,
    pub orders_selected: Counter<u64>,
    pub outcomes_purged: Counter<u64>,
    pub cycle_duration: Histogram<f64>,
    pub gateway_response_time: Histogram<f64>,
    pub db_calls_response_time: Histogram<f64>,
}

impl ReconcilerMetrics {
    pub fn register() -> Self {
        let meter: Meter = global::meter("crates.reconciler.opentelemetry");

        let reconciliation_outcomes = meter
            .u64_counter("reconciliation_outcomes")
            .with_description("Count of reconciliation outcomes per kind over time")
            .with_unit("orders")
            .init();

        let cycles_skipped = meter
            .u64_counter("cycles_skipped")
            .with_description("Count of reconciliation cycles skipped without processing any order")
            .with_unit("cycles")
            .init();

        let orders_selected = meter
            .u64_counter("orders_selected")
            .with_description("Count of pending orders selected for reconciliation")
            .with_unit("orders")
            .init();

        let outcomes_purged = meter
            .u64_counter("outcomes_purged")
            .with_description("Count of audit records removed by the retention purge")
            .with_unit("records")
            .init();

        let cycle_duration = meter
            .f64_histogram("cycle_duration")
            .with_description("Wall-clock duration of reconciliation cycles")
            .with_unit("s")
            .init();

        let gateway_response_time = meter
            .f64_histogram("gateway_response_time")
            .with_description("Response time of gateway calls over time")
            .with_unit("s")
            .init();

        let db_calls_response_time = meter
            .f64_histogram("db_calls_response_time")
            .with_description("Response time of DB calls over time")
            .with_unit("s")
            .init();

        Self {
            reconciliation_outcomes,
            cycles_skipped,
            orders_selected,
            outcomes_purged,
            cycle_duration,
            gateway_response_time,
            db_calls_response_time,
        }
    }
}
