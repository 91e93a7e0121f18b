use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Mongodb error: {0}")]
    MongoDbError(#[from] mongodb::error::Error),

    /// The guarded update matched nothing - the order changed under us
    /// (typically a concurrent webhook write) or was deleted
    #[error("Order not found or concurrently modified: {0}")]
    OrderNotFound(uuid::Uuid),
}
