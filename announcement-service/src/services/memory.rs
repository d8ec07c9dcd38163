use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::store::{AnnouncementStore, StoreError};
use crate::models::Announcement;

/// Process-local store with the same contract as the MongoDB one.
///
/// Documents are kept in insertion order, which is what `find_all` returns.
#[derive(Debug, Default)]
pub struct InMemoryAnnouncementStore {
    documents: RwLock<Vec<Announcement>>,
}

impl InMemoryAnnouncementStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl AnnouncementStore for InMemoryAnnouncementStore {
    async fn find_one(&self, id: ObjectId) -> Result<Announcement, StoreError> {
        self.documents
            .read()
            .await
            .iter()
            .find(|doc| doc.id == Some(id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<Announcement>, StoreError> {
        Ok(self.documents.read().await.clone())
    }

    async fn insert_one(&self, announcement: Announcement) -> Result<ObjectId, StoreError> {
        let id = ObjectId::new();
        self.documents
            .write()
            .await
            .push(announcement.with_id(id));
        Ok(id)
    }

    async fn update_one(&self, id: ObjectId, announcement: Announcement) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        if let Some(existing) = documents.iter_mut().find(|doc| doc.id == Some(id)) {
            *existing = announcement.with_id(id);
        }
        Ok(())
    }

    async fn delete_one(&self, id: ObjectId) -> Result<(), StoreError> {
        self.documents.write().await.retain(|doc| doc.id != Some(id));
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
