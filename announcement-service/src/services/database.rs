use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc, oid::ObjectId},
    Client as MongoClient, Collection,
};
use service_core::error::AppError;

use super::query::Filter;
use super::store::{AnnouncementStore, StoreError};
use crate::models::Announcement;

/// MongoDB-backed store over a single collection.
///
/// Cloning is cheap; the driver pools connections internally.
#[derive(Clone)]
pub struct MongoAnnouncementStore {
    client: MongoClient,
    collection: Collection<Announcement>,
}

impl MongoAnnouncementStore {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let collection = client.database(database).collection(collection);
        tracing::info!(
            database = %database,
            collection = %collection.name(),
            "MongoDB client configured"
        );
        Ok(Self { client, collection })
    }

    pub fn collection(&self) -> &Collection<Announcement> {
        &self.collection
    }
}

#[async_trait]
impl AnnouncementStore for MongoAnnouncementStore {
    async fn find_one(&self, id: ObjectId) -> Result<Announcement, StoreError> {
        self.collection
            .find_one(Filter::by_id(id).into_document(), None)
            .await
            .map_err(|e| {
                tracing::error!(%id, "Failed to find announcement: {}", e);
                StoreError::from(e)
            })?
            .ok_or(StoreError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<Announcement>, StoreError> {
        let cursor = self
            .collection
            .find(Filter::all().into_document(), None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list announcements: {}", e);
                StoreError::from(e)
            })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect announcements: {}", e);
            StoreError::from(e)
        })
    }

    async fn insert_one(&self, mut announcement: Announcement) -> Result<ObjectId, StoreError> {
        announcement.id = None;

        let result = self
            .collection
            .insert_one(&announcement, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert announcement: {}", e);
                StoreError::from(e)
            })?;

        result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Backend(anyhow::anyhow!(
                "Inserted id is not an ObjectId: {}",
                result.inserted_id
            ))
        })
    }

    async fn update_one(&self, id: ObjectId, announcement: Announcement) -> Result<(), StoreError> {
        let mut fields = bson::to_document(&announcement)
            .map_err(|e| StoreError::Backend(anyhow::Error::new(e)))?;
        fields.remove("_id");

        let result = self
            .collection
            .update_one(
                Filter::by_id(id).into_document(),
                doc! { "$set": fields },
                None,
            )
            .await
            .map_err(|e| {
                tracing::error!(%id, "Failed to update announcement: {}", e);
                StoreError::from(e)
            })?;

        if result.matched_count == 0 {
            tracing::debug!(%id, "Update matched no announcement");
        }
        Ok(())
    }

    async fn delete_one(&self, id: ObjectId) -> Result<(), StoreError> {
        let result = self
            .collection
            .delete_one(Filter::by_id(id).into_document(), None)
            .await
            .map_err(|e| {
                tracing::error!(%id, "Failed to delete announcement: {}", e);
                StoreError::from(e)
            })?;

        if result.deleted_count == 0 {
            tracing::debug!(%id, "Delete matched no announcement");
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                StoreError::from(e)
            })?;
        Ok(())
    }
}
