use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mongodb::bson::{Document, oid::ObjectId};

use super::{Result, Store, StoreError};

#[derive(Debug, Default)]
struct Collection {
    documents: Vec<Document>,
    unique: Vec<String>,
}

impl Collection {
    fn position(&self, id: ObjectId) -> Option<usize> {
        self.documents
            .iter()
            .position(|document| document.get_object_id("_id").ok() == Some(id))
    }

    fn conflicts(&self, candidate: &Document, skip: Option<usize>) -> bool {
        self.unique.iter().any(|field| {
            let Some(value) = candidate.get(field) else {
                return false;
            };
            self.documents
                .iter()
                .enumerate()
                .filter(|(index, _)| Some(*index) != skip)
                .any(|(_, existing)| existing.get(field) == Some(value))
        })
    }
}

/// In-process [`Store`] used by tests in place of a MongoDB server.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Collection>>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Collection>> {
        self.collections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ensure_unique(&self, collection: &str, field: &str) -> Result<()> {
        let mut collections = self.lock();
        let unique = &mut collections.entry(collection.to_owned()).or_default().unique;
        if !unique.iter().any(|existing| existing == field) {
            unique.push(field.to_owned());
        }
        Ok(())
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<()> {
        let mut collections = self.lock();
        let target = collections.entry(collection.to_owned()).or_default();
        if target.conflicts(&document, None) {
            return Err(StoreError::Duplicate);
        }
        if let Ok(id) = document.get_object_id("_id") {
            if target.position(id).is_some() {
                return Err(StoreError::Duplicate);
            }
        }
        target.documents.push(document);
        Ok(())
    }

    async fn find(&self, collection: &str, skip: u64, limit: u64) -> Result<Vec<Document>> {
        let collections = self.lock();
        let Some(source) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        let limit = match limit {
            0 => usize::MAX,
            n => usize::try_from(n).unwrap_or(usize::MAX),
        };
        Ok(source
            .documents
            .iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, collection: &str, id: ObjectId) -> Result<Option<Document>> {
        let collections = self.lock();
        Ok(collections.get(collection).and_then(|source| {
            source
                .position(id)
                .and_then(|index| source.documents.get(index).cloned())
        }))
    }

    async fn replace(&self, collection: &str, id: ObjectId, document: Document) -> Result<()> {
        let mut collections = self.lock();
        let Some(target) = collections.get_mut(collection) else {
            return Ok(());
        };
        let Some(index) = target.position(id) else {
            return Ok(());
        };
        if target.conflicts(&document, Some(index)) {
            return Err(StoreError::Duplicate);
        }
        if let Some(slot) = target.documents.get_mut(index) {
            *slot = document;
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: ObjectId) -> Result<u64> {
        let mut collections = self.lock();
        let Some(target) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match target.position(id) {
            Some(index) => {
                target.documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[actix_web::test]
    async fn unique_fields_reject_duplicates() {
        let store = MemoryStore::default();
        store.ensure_unique("users", "email").await.unwrap();
        store
            .insert("users", doc! { "_id": ObjectId::new(), "email": "a@x.com" })
            .await
            .unwrap();

        let err = store
            .insert("users", doc! { "_id": ObjectId::new(), "email": "a@x.com" })
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }

    #[actix_web::test]
    async fn replace_may_keep_its_own_unique_value() {
        let store = MemoryStore::default();
        store.ensure_unique("users", "email").await.unwrap();
        let id = ObjectId::new();
        store
            .insert("users", doc! { "_id": id, "email": "a@x.com", "name": "A" })
            .await
            .unwrap();

        store
            .replace("users", id, doc! { "_id": id, "email": "a@x.com", "name": "B" })
            .await
            .unwrap();
        let stored = store.find_by_id("users", id).await.unwrap().unwrap();
        assert_eq!(stored.get_str("name").unwrap(), "B");
    }

    #[actix_web::test]
    async fn zero_limit_returns_everything() {
        let store = MemoryStore::default();
        for n in 0..12 {
            store
                .insert("departments", doc! { "_id": ObjectId::new(), "n": n })
                .await
                .unwrap();
        }

        assert_eq!(store.find("departments", 0, 0).await.unwrap().len(), 12);
        assert_eq!(store.find("departments", 10, 5).await.unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn delete_reports_how_many_documents_went_away() {
        let store = MemoryStore::default();
        let id = ObjectId::new();
        store.insert("departments", doc! { "_id": id }).await.unwrap();

        assert_eq!(store.delete("departments", id).await.unwrap(), 1);
        assert_eq!(store.delete("departments", id).await.unwrap(), 0);
        assert!(store.find_by_id("departments", id).await.unwrap().is_none());
    }
}
