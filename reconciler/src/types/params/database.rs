use crate::cli::database::MongoDBCliArgs;

/// DatabaseArgs - Arguments used to connect to the order store
#[derive(Debug, Clone)]
pub struct DatabaseArgs {
    pub connection_uri: String,
    pub database_name: String,
}

impl From<MongoDBCliArgs> for DatabaseArgs {
    fn from(args: MongoDBCliArgs) -> Self {
        Self { connection_uri: args.mongodb_connection_url, database_name: args.database_name }
    }
}
