use crate::cli::SetupCmd;
use crate::core::client::database::constant::{ORDERS_COLLECTION, OUTCOMES_COLLECTION};
use crate::core::client::database::mongodb::MongoDbClient;
use crate::core::error::ReconcilerCoreError;
use crate::types::params::database::DatabaseArgs;
use crate::ReconcilerResult;
use mongodb::bson::{doc, Document};
use mongodb::IndexModel;
use tracing::info;

/// Prepare MongoDB for the service: the compound index batch selection
/// filters and sorts on, and the timestamp index the retention purge
/// deletes by. Index creation is idempotent, so re-running setup is safe.
pub async fn setup(setup_cmd: &SetupCmd) -> ReconcilerResult<()> {
    let database_args = DatabaseArgs::from(setup_cmd.mongodb_args.clone());
    let client = MongoDbClient::new(&database_args).await.map_err(ReconcilerCoreError::from)?;
    let database = client.client().database(&database_args.database_name);

    let orders_index = IndexModel::builder().keys(doc! { "status": 1, "created_at": 1 }).build();
    database.collection::<Document>(ORDERS_COLLECTION).create_index(orders_index, None).await?;
    info!(collection = ORDERS_COLLECTION, "Created selection index");

    let outcomes_index = IndexModel::builder().keys(doc! { "created_at": 1 }).build();
    database.collection::<Document>(OUTCOMES_COLLECTION).create_index(outcomes_index, None).await?;
    info!(collection = OUTCOMES_COLLECTION, "Created retention index");

    Ok(())
}
