use crate::core::client::database::MockDatabaseClient;
use crate::core::client::gateway::pix::normalize_status;
use crate::core::client::gateway::{FeeField, GatewayCharge, MockGatewayClient};
use crate::core::client::lock::MockLockClient;
use crate::core::config::Config;
use crate::types::order::{Order, OrderStatus};
use crate::types::params::service::ServiceParams;
use chrono::{TimeDelta, Utc};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub fn test_service_params() -> ServiceParams {
    ServiceParams {
        batch_size: 10,
        cycle_interval: Duration::from_secs(300),
        execution_timeout: Duration::from_secs(240),
        max_retries: 3,
        retry_delay: Duration::from_millis(10),
        backoff_multiplier: 2.0,
        lock_lease: Duration::from_secs(300),
        min_pending_age: Duration::from_secs(120),
        max_pending_age: Duration::from_secs(172_800),
        amount_tolerance: 0.01,
        audit_retention_days: 30,
        purge_interval: Duration::from_secs(21_600),
    }
}

pub fn make_order(status: OrderStatus, amount: i64) -> Order {
    let created_at = Utc::now() - TimeDelta::minutes(10);
    Order {
        id: Uuid::new_v4(),
        payment_reference: Some(format!("chg_{}", Uuid::new_v4().simple())),
        status,
        amount,
        created_at,
        updated_at: created_at,
    }
}

pub fn make_order_without_reference(status: OrderStatus, amount: i64) -> Order {
    Order { payment_reference: None, ..make_order(status, amount) }
}

pub fn make_charge(raw_status: &str, amount: i64) -> GatewayCharge {
    GatewayCharge {
        status: normalize_status(raw_status),
        raw_status: raw_status.to_string(),
        amount,
        fee: FeeField::Unrecognized,
        raw_payload: json!({ "status": raw_status, "amount": amount }),
    }
}

/// Builder assembling a `Config` over mock clients. Expectations are set
/// on the mocks before `build()` hands everything to the config.
pub struct TestConfigBuilder {
    service_params: ServiceParams,
    pub database: MockDatabaseClient,
    pub lock: MockLockClient,
    pub gateway: MockGatewayClient,
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            service_params: test_service_params(),
            database: MockDatabaseClient::new(),
            lock: MockLockClient::new(),
            gateway: MockGatewayClient::new(),
        }
    }

    pub fn with_service_params(mut self, service_params: ServiceParams) -> Self {
        self.service_params = service_params;
        self
    }

    pub fn build(self) -> Arc<Config> {
        Arc::new(Config::new(
            self.service_params,
            Box::new(self.database),
            Box::new(self.lock),
            Box::new(self.gateway),
        ))
    }
}
