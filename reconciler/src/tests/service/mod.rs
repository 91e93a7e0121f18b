use crate::core::client::gateway::GatewayError;
use crate::tests::common::{make_charge, make_order, make_order_without_reference, TestConfigBuilder};
use crate::types::order::{Order, OrderStatus};
use crate::types::outcome::OutcomeKind;
use crate::worker::event_handler::service::ReconciliationService;
use chrono::Utc;
use rstest::rstest;

#[tokio::test]
async fn order_without_reference_is_skipped_without_gateway_call() {
    let mut builder = TestConfigBuilder::new();
    builder.gateway.expect_query_status().never();
    let config = builder.build();

    let order = make_order_without_reference(OrderStatus::Pending, 5000);
    let outcome = ReconciliationService::reconcile_one(&config, &order).await;

    assert_eq!(outcome.kind, OutcomeKind::Skipped);
    assert_eq!(outcome.error_kind.as_deref(), Some("no-reference"));
    assert_eq!(outcome.attempt_count, 0);
    assert_eq!(outcome.new_status, None);
}

/// Reconciling an already-paid order against an agreeing gateway reply
/// writes nothing, so repeating it is free of side effects.
#[tokio::test]
async fn agreeing_gateway_reply_leaves_order_untouched() {
    let mut builder = TestConfigBuilder::new();
    builder.gateway.expect_query_status().times(1).returning(|_| Ok(make_charge("paid_out", 9000)));
    builder.database.expect_update_order_status().never();
    let config = builder.build();

    let order = make_order(OrderStatus::Paid, 9000);
    let outcome = ReconciliationService::reconcile_one(&config, &order).await;

    assert_eq!(outcome.kind, OutcomeKind::Unchanged);
    assert_eq!(outcome.previous_status, OrderStatus::Paid);
    assert_eq!(outcome.new_status, None);
}

/// Scenario: pending order of R$90.00, gateway answers paid_out with the
/// exact amount - a clean update, no mismatch flag.
#[tokio::test]
async fn pending_order_is_moved_to_paid() {
    let mut builder = TestConfigBuilder::new();
    builder.gateway.expect_query_status().times(1).returning(|_| Ok(make_charge("paid_out", 9000)));
    builder
        .database
        .expect_update_order_status()
        .withf(|_, status| *status == OrderStatus::Paid)
        .times(1)
        .returning(|order, status| Ok(Order { status, updated_at: Utc::now(), ..order.clone() }));
    let config = builder.build();

    let order = make_order(OrderStatus::Pending, 9000);
    let outcome = ReconciliationService::reconcile_one(&config, &order).await;

    assert_eq!(outcome.kind, OutcomeKind::Updated);
    assert_eq!(outcome.previous_status, OrderStatus::Pending);
    assert_eq!(outcome.new_status, Some(OrderStatus::Paid));
    assert_eq!(outcome.attempt_count, 1);
}

/// Scenario: a paid order against a gateway that now says cancelled.
/// Terminal statuses are never regressed - the disagreement is surfaced.
#[rstest]
#[case(OrderStatus::Paid, "cancelled")]
#[case(OrderStatus::Cancelled, "paid")]
#[case(OrderStatus::Expired, "paid_out")]
#[tokio::test]
async fn terminal_status_disagreement_is_flagged_not_applied(
    #[case] local_status: OrderStatus,
    #[case] gateway_status: &str,
) {
    let raw = gateway_status.to_string();
    let mut builder = TestConfigBuilder::new();
    builder.gateway.expect_query_status().times(1).returning(move |_| Ok(make_charge(&raw, 9000)));
    builder.database.expect_update_order_status().never();
    let config = builder.build();

    let order = make_order(local_status, 9000);
    let outcome = ReconciliationService::reconcile_one(&config, &order).await;

    assert_eq!(outcome.kind, OutcomeKind::Conflict);
    assert_eq!(outcome.previous_status, local_status);
}

/// A gateway that always times out is asked exactly `max_retries` times,
/// then the order fails for this cycle - never an unbounded loop.
#[tokio::test(start_paused = true)]
async fn retries_are_bounded_on_persistent_timeout() {
    let mut builder = TestConfigBuilder::new();
    builder.gateway.expect_query_status().times(3).returning(|_| Err(GatewayError::Timeout));
    builder.database.expect_update_order_status().never();
    let config = builder.build();

    let order = make_order(OrderStatus::Pending, 5000);
    let outcome = ReconciliationService::reconcile_one(&config, &order).await;

    assert_eq!(outcome.kind, OutcomeKind::Failed);
    assert_eq!(outcome.attempt_count, 3);
    assert_eq!(outcome.error_kind.as_deref(), Some("timeout"));
}

/// An unknown reference is a permanent negative result for this cycle;
/// retrying it would only burn the rate budget.
#[tokio::test]
async fn not_found_is_never_retried() {
    let mut builder = TestConfigBuilder::new();
    builder.gateway.expect_query_status().times(1).returning(|_| Err(GatewayError::NotFound));
    builder.database.expect_update_order_status().never();
    let config = builder.build();

    let order = make_order(OrderStatus::Pending, 5000);
    let outcome = ReconciliationService::reconcile_one(&config, &order).await;

    assert_eq!(outcome.kind, OutcomeKind::Failed);
    assert_eq!(outcome.attempt_count, 1);
    assert_eq!(outcome.error_kind.as_deref(), Some("not-found"));
}

#[tokio::test(start_paused = true)]
async fn transient_server_error_recovers_on_retry() {
    let mut builder = TestConfigBuilder::new();
    let mut calls = 0;
    builder.gateway.expect_query_status().times(2).returning(move |_| {
        calls += 1;
        if calls == 1 {
            Err(GatewayError::ServerError { status: 503 })
        } else {
            Ok(make_charge("paid", 5000))
        }
    });
    builder
        .database
        .expect_update_order_status()
        .times(1)
        .returning(|order, status| Ok(Order { status, updated_at: Utc::now(), ..order.clone() }));
    let config = builder.build();

    let order = make_order(OrderStatus::Pending, 5000);
    let outcome = ReconciliationService::reconcile_one(&config, &order).await;

    assert_eq!(outcome.kind, OutcomeKind::Updated);
    assert_eq!(outcome.attempt_count, 2);
}

/// An out-of-tolerance charge is flagged as its own outcome kind, but the
/// status transition still goes through.
#[tokio::test]
async fn amount_mismatch_is_flagged_without_blocking_update() {
    let mut builder = TestConfigBuilder::new();
    builder.gateway.expect_query_status().times(1).returning(|_| Ok(make_charge("paid", 12000)));
    builder
        .database
        .expect_update_order_status()
        .withf(|_, status| *status == OrderStatus::Paid)
        .times(1)
        .returning(|order, status| Ok(Order { status, updated_at: Utc::now(), ..order.clone() }));
    let config = builder.build();

    let order = make_order(OrderStatus::Pending, 10000);
    let outcome = ReconciliationService::reconcile_one(&config, &order).await;

    assert_eq!(outcome.kind, OutcomeKind::AmountMismatch);
    assert_eq!(outcome.new_status, Some(OrderStatus::Paid));
}

/// A lost guarded write (typically a webhook racing us) fails this order
/// only; nothing is guessed, nothing is overwritten.
#[tokio::test]
async fn failed_status_write_leaves_order_untouched() {
    let mut builder = TestConfigBuilder::new();
    builder.gateway.expect_query_status().times(1).returning(|_| Ok(make_charge("paid", 5000)));
    builder.database.expect_update_order_status().times(1).returning(|order, _| {
        Err(crate::core::client::database::DatabaseError::OrderNotFound(order.id))
    });
    let config = builder.build();

    let order = make_order(OrderStatus::Pending, 5000);
    let outcome = ReconciliationService::reconcile_one(&config, &order).await;

    assert_eq!(outcome.kind, OutcomeKind::Failed);
    assert_eq!(outcome.error_kind.as_deref(), Some("database"));
}
