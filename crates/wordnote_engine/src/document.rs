use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A stored note: `id` is the scope key, `data` the note text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDocument {
    pub id: String,
    pub data: String,
}

impl NoteDocument {
    pub fn new(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("document {id:?} not found in collection {collection:?}")]
    NotFound { collection: String, id: String },
    #[error("document {id:?} already exists in collection {collection:?}")]
    AlreadyExists { collection: String, id: String },
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document store data is corrupt: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        Self::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Key-value document collections provided by the host platform.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_document(&self, collection: &str, id: &str) -> Result<NoteDocument, StoreError>;

    /// Fails with `AlreadyExists` when a document with the same id is present.
    async fn create_document(
        &self,
        collection: &str,
        document: NoteDocument,
    ) -> Result<NoteDocument, StoreError>;

    /// Fails with `NotFound` when no document with that id is present.
    async fn update_document(
        &self,
        collection: &str,
        document: NoteDocument,
    ) -> Result<NoteDocument, StoreError>;
}
