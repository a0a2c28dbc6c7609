use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use wordnote_logging::wn_debug;

use crate::{DocumentStore, NoteDocument, StoreError};

/// Document store keeping one JSON file per document under
/// `{dir}/{collection}/`, named by the hex-encoded document id.
///
/// Files are staged in the collection directory and renamed into place.
/// Writers to different ids never share a file, so any number of handles
/// or processes may use the same directory. Concurrent writes to one id
/// leave the last rename in place.
#[derive(Debug, Clone)]
pub struct JsonFileDocumentStore {
    root: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Fail with `AlreadyExists` if the target is present.
    CreateNew,
    Replace,
}

impl JsonFileDocumentStore {
    /// Open the store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = dir.into();
        fs::create_dir_all(&root).map_err(|err| unavailable(&root, err))?;
        if !root.is_dir() {
            return Err(StoreError::Unavailable(format!(
                "{} is not a directory",
                root.display()
            )));
        }
        // Refuse read-only directories up front instead of on first save.
        tempfile::tempfile_in(&root).map_err(|err| unavailable(&root, err))?;
        Ok(Self { root })
    }

    pub fn dir(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, collection: &str, id: &str) -> Result<PathBuf, StoreError> {
        validate_collection(collection)?;
        Ok(self
            .root
            .join(collection)
            .join(format!("{}.json", hex::encode(id))))
    }
}

#[async_trait::async_trait]
impl DocumentStore for JsonFileDocumentStore {
    async fn get_document(&self, collection: &str, id: &str) -> Result<NoteDocument, StoreError> {
        let path = self.document_path(collection, id)?;
        let (collection, id) = (collection.to_owned(), id.to_owned());
        run_blocking(move || read_document(&path, &collection, &id)).await
    }

    async fn create_document(
        &self,
        collection: &str,
        document: NoteDocument,
    ) -> Result<NoteDocument, StoreError> {
        let path = self.document_path(collection, &document.id)?;
        let content = encode(&document)?;
        let (collection, id) = (collection.to_owned(), document.id.clone());
        run_blocking(move || {
            place(&path, &content, Placement::CreateNew).map_err(|err| {
                if err.kind() == io::ErrorKind::AlreadyExists {
                    StoreError::AlreadyExists { collection, id }
                } else {
                    unavailable(&path, err)
                }
            })?;
            wn_debug!("Created {:?}", path);
            Ok(())
        })
        .await?;
        Ok(document)
    }

    async fn update_document(
        &self,
        collection: &str,
        document: NoteDocument,
    ) -> Result<NoteDocument, StoreError> {
        let path = self.document_path(collection, &document.id)?;
        let content = encode(&document)?;
        let (collection, id) = (collection.to_owned(), document.id.clone());
        run_blocking(move || {
            match path.try_exists() {
                Ok(true) => {}
                Ok(false) => return Err(StoreError::not_found(&collection, &id)),
                Err(err) => return Err(unavailable(&path, err)),
            }
            place(&path, &content, Placement::Replace).map_err(|err| unavailable(&path, err))?;
            wn_debug!("Replaced {:?}", path);
            Ok(())
        })
        .await?;
        Ok(document)
    }
}

async fn run_blocking<T, F>(job: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|err| StoreError::Unavailable(err.to_string()))?
}

fn validate_collection(collection: &str) -> Result<(), StoreError> {
    let valid = !collection.is_empty()
        && collection
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::Unavailable(format!(
            "invalid collection name {collection:?}"
        )))
    }
}

fn encode(document: &NoteDocument) -> Result<String, StoreError> {
    serde_json::to_string_pretty(document).map_err(|err| StoreError::Corrupt(err.to_string()))
}

fn read_document(path: &Path, collection: &str, id: &str) -> Result<NoteDocument, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(StoreError::not_found(collection, id))
        }
        Err(err) => return Err(unavailable(path, err)),
    };
    let document: NoteDocument = serde_json::from_str(&text)
        .map_err(|err| StoreError::Corrupt(format!("{}: {err}", path.display())))?;
    if document.id != id {
        return Err(StoreError::Corrupt(format!(
            "{} holds document {:?}",
            path.display(),
            document.id
        )));
    }
    Ok(document)
}

/// Stage `content` next to `path`, then rename it into place.
fn place(path: &Path, content: &str, placement: Placement) -> io::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "document path has no parent"))?;
    fs::create_dir_all(dir)?;

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(content.as_bytes())?;
    staged.as_file().sync_all()?;

    let placed = match placement {
        Placement::CreateNew => staged.persist_noclobber(path),
        Placement::Replace => staged.persist(path),
    };
    placed.map(drop).map_err(|err| err.error)
}

fn unavailable(path: &Path, err: io::Error) -> StoreError {
    StoreError::Unavailable(format!("{}: {err}", path.display()))
}
