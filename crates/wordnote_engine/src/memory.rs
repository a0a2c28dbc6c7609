use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;

use crate::{DocumentStore, NoteDocument, StoreError};

/// Process-local store, also used to simulate an unreachable backend.
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    documents: Mutex<HashMap<(String, String), NoteDocument>>,
    available: AtomicBool,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// While unavailable every call fails with `StoreError::Unavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn document_count(&self, collection: &str) -> usize {
        self.documents
            .lock()
            .await
            .keys()
            .filter(|(c, _)| c == collection)
            .count()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store offline".to_string()))
        }
    }
}

#[async_trait::async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get_document(&self, collection: &str, id: &str) -> Result<NoteDocument, StoreError> {
        self.check_available()?;
        self.documents
            .lock()
            .await
            .get(&(collection.to_string(), id.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::not_found(collection, id))
    }

    async fn create_document(
        &self,
        collection: &str,
        document: NoteDocument,
    ) -> Result<NoteDocument, StoreError> {
        self.check_available()?;
        let mut documents = self.documents.lock().await;
        let slot = (collection.to_string(), document.id.clone());
        if documents.contains_key(&slot) {
            return Err(StoreError::AlreadyExists {
                collection: collection.to_string(),
                id: document.id,
            });
        }
        documents.insert(slot, document.clone());
        Ok(document)
    }

    async fn update_document(
        &self,
        collection: &str,
        document: NoteDocument,
    ) -> Result<NoteDocument, StoreError> {
        self.check_available()?;
        let mut documents = self.documents.lock().await;
        match documents.get_mut(&(collection.to_string(), document.id.clone())) {
            Some(existing) => {
                existing.data.clone_from(&document.data);
                Ok(document)
            }
            None => Err(StoreError::not_found(collection, &document.id)),
        }
    }
}
