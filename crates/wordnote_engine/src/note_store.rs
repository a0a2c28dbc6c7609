use std::sync::Arc;

use wordnote_core::ScopeKey;
use wordnote_logging::{wn_debug, wn_info};

use crate::{DocumentStore, KeyLocks, NoteDocument, StoreError};

/// Collection holding every note written by the widget.
pub const NOTES_COLLECTION: &str = "myExt";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Upsert-or-create and fetch-or-default access to notes.
///
/// Clones share the store and the per-key locks, so operations on one key
/// are serialized across every clone. Writers outside that lock table (other
/// store handles or processes) can still create the same document first; a
/// save that loses that race updates the winner's document instead.
#[derive(Clone)]
pub struct NoteStore {
    store: Arc<dyn DocumentStore>,
    collection: String,
    locks: Arc<KeyLocks>,
}

impl NoteStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_collection(store, NOTES_COLLECTION)
    }

    pub fn with_collection(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
            locks: Arc::new(KeyLocks::new()),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Overwrite the note for `key`, creating it on first save.
    pub async fn save(&self, key: &ScopeKey, text: &str) -> Result<SaveOutcome, StoreError> {
        let _guard = self.locks.acquire(key.as_str()).await;

        match self.store.get_document(&self.collection, key.as_str()).await {
            Ok(mut document) => {
                wn_debug!("Updating note {} in {}", key, self.collection);
                document.data = text.to_owned();
                self.store
                    .update_document(&self.collection, document)
                    .await?;
                Ok(SaveOutcome::Updated)
            }
            Err(err) if err.is_not_found() => {
                wn_info!("Creating note {} in {}", key, self.collection);
                let document = NoteDocument::new(key.as_str(), text);
                match self
                    .store
                    .create_document(&self.collection, document.clone())
                    .await
                {
                    Ok(_) => Ok(SaveOutcome::Created),
                    // Created by another writer after our read.
                    Err(StoreError::AlreadyExists { .. }) => {
                        wn_debug!("Note {} appeared concurrently, updating", key);
                        self.store
                            .update_document(&self.collection, document)
                            .await?;
                        Ok(SaveOutcome::Updated)
                    }
                    Err(err) => Err(err),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Text of the note for `key`; a missing note reads as empty.
    pub async fn load(&self, key: &ScopeKey) -> Result<String, StoreError> {
        let _guard = self.locks.acquire(key.as_str()).await;

        match self.store.get_document(&self.collection, key.as_str()).await {
            Ok(document) => Ok(document.data),
            Err(err) if err.is_not_found() => {
                wn_debug!("No note {} in {}", key, self.collection);
                Ok(String::new())
            }
            Err(err) => Err(err),
        }
    }
}
