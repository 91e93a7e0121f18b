use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct MongoDBCliArgs {
    /// MongoDB connection string
    #[arg(env = "PIX_RECONCILER_MONGODB_CONNECTION_URL", long, default_value = "mongodb://localhost:27017")]
    pub mongodb_connection_url: String,

    /// Database holding the orders, locks and audit collections
    #[arg(env = "PIX_RECONCILER_DATABASE_NAME", long, default_value = "ingresso")]
    pub database_name: String,
}
