use thiserror::Error;

#[derive(Error, Debug)]
pub enum LockError {
    #[error("Mongodb error: {0}")]
    MongoDbError(#[from] mongodb::error::Error),
}
