//! Persistence port.
//!
//! Handlers never talk to MongoDB directly: they receive a `web::Data<dyn Store>`
//! and go through the generic CRUD layer in [`crate::crud`]. The trait works on
//! raw BSON documents so it stays object-safe; typing happens one level up.

#[cfg(test)]
mod memory;
mod mongo;

#[cfg(test)]
pub use memory::MemoryStore;
pub use mongo::MongoStore;

use async_trait::async_trait;
use mongodb::bson::{self, Document, oid::ObjectId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures raised by a [`Store`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write collided with a unique index.
    #[error("duplicate key")]
    Duplicate,

    #[error("database driver error: {0}")]
    Driver(#[from] mongodb::error::Error),

    #[error("failed to encode document: {0}")]
    Encode(#[from] bson::ser::Error),

    #[error("failed to decode document: {0}")]
    Decode(#[from] bson::de::Error),
}

/// Document store holding one collection per resource.
#[async_trait]
pub trait Store: Send + Sync {
    /// Declare `field` as unique within `collection`.
    async fn ensure_unique(&self, collection: &str, field: &str) -> Result<()>;

    async fn insert(&self, collection: &str, document: Document) -> Result<()>;

    /// Return documents in storage order. A `limit` of zero means no limit.
    async fn find(&self, collection: &str, skip: u64, limit: u64) -> Result<Vec<Document>>;

    async fn find_by_id(&self, collection: &str, id: ObjectId) -> Result<Option<Document>>;

    /// Replace the document whose `_id` matches `id`.
    async fn replace(&self, collection: &str, id: ObjectId, document: Document) -> Result<()>;

    /// Delete the document whose `_id` matches `id`, returning how many went away.
    async fn delete(&self, collection: &str, id: ObjectId) -> Result<u64>;
}
