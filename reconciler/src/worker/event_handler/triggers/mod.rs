pub(crate) mod audit_purge;
pub(crate) mod reconciliation;

use crate::core::config::Config;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait JobTrigger: Send + Sync {
    async fn run_worker(&self, config: Arc<Config>) -> color_eyre::Result<()>;
}
