use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use service_core::error::AppError;
use thiserror::Error;

use crate::models::Announcement;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found")]
    NotFound,

    #[error("{0}")]
    Backend(anyhow::Error),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(anyhow::Error::new(err))
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound(anyhow::anyhow!("Document not found")),
            StoreError::Backend(e) => AppError::DatabaseError(e),
        }
    }
}

/// Single-collection access to announcement documents.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait AnnouncementStore: Send + Sync {
    /// Returns `StoreError::NotFound` when no document has `id`.
    async fn find_one(&self, id: ObjectId) -> Result<Announcement, StoreError>;

    /// All documents in store order; empty when the collection is empty.
    async fn find_all(&self) -> Result<Vec<Announcement>, StoreError>;

    /// Persists a new document and returns the id the store assigned.
    /// Any id already on `announcement` is ignored.
    async fn insert_one(&self, announcement: Announcement) -> Result<ObjectId, StoreError>;

    /// Replaces every field except the id. Matching nothing is not an error.
    async fn update_one(&self, id: ObjectId, announcement: Announcement)
        -> Result<(), StoreError>;

    /// Removes the document if present. Matching nothing is not an error.
    async fn delete_one(&self, id: ObjectId) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
