use crate::cli::RunCmd;
use crate::core::client::database::mongodb::MongoDbClient;
use crate::core::client::gateway::pix::PixGatewayClient;
use crate::core::client::lock::mongodb::MongoDbLockClient;
use crate::core::client::{DatabaseClient, GatewayClient, LockClient};
use crate::core::error::ReconcilerCoreError;
use crate::error::ReconcilerResult;
use crate::types::params::database::DatabaseArgs;
use crate::types::params::gateway::GatewayParams;
use crate::types::params::service::ServiceParams;
use uuid::Uuid;

/// Explicitly constructed service configuration: validated tunables plus
/// the three injected clients. Components receive this by `Arc`; nothing
/// is reached through ambient singletons.
pub struct Config {
    /// Identifier of this running instance, recorded on lock leases
    instance_id: String,
    service_params: ServiceParams,
    database: Box<dyn DatabaseClient>,
    lock: Box<dyn LockClient>,
    gateway: Box<dyn GatewayClient>,
}

impl Config {
    /// Build the production configuration: validate every tunable, then
    /// connect the clients. Any invalid value refuses startup.
    pub async fn from_run_cmd(run_cmd: &RunCmd) -> ReconcilerResult<Self> {
        let service_params = ServiceParams::try_from(&run_cmd.service_args)?;
        let gateway_params = GatewayParams::try_from(&run_cmd.gateway_args)?;
        let database_args = DatabaseArgs::from(run_cmd.mongodb_args.clone());

        let database = MongoDbClient::new(&database_args).await.map_err(ReconcilerCoreError::from)?;
        // The lock client shares the order store's connection pool.
        let lock = MongoDbLockClient::with_client(&database.client(), &database_args.database_name);
        let gateway = PixGatewayClient::new(&gateway_params).map_err(ReconcilerCoreError::from)?;

        Ok(Self::new(service_params, Box::new(database), Box::new(lock), Box::new(gateway)))
    }

    pub fn new(
        service_params: ServiceParams,
        database: Box<dyn DatabaseClient>,
        lock: Box<dyn LockClient>,
        gateway: Box<dyn GatewayClient>,
    ) -> Self {
        Self { instance_id: Uuid::new_v4().to_string(), service_params, database, lock, gateway }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    pub fn service_params(&self) -> &ServiceParams {
        &self.service_params
    }

    pub fn database(&self) -> &dyn DatabaseClient {
        self.database.as_ref()
    }

    pub fn lock(&self) -> &dyn LockClient {
        self.lock.as_ref()
    }

    pub fn gateway(&self) -> &dyn GatewayClient {
        self.gateway.as_ref()
    }
}
