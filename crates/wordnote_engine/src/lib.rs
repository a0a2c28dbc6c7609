//! Word-count widget engine: note persistence and host effect execution.
mod contribution;
mod document;
mod file_store;
mod host;
mod key_lock;
mod memory;
mod note_store;

pub use contribution::{Contribution, ContributionError};
pub use document::{DocumentStore, NoteDocument, StoreError};
pub use file_store::JsonFileDocumentStore;
pub use host::{HostError, IdentityService, WorkItemFormService};
pub use key_lock::KeyLocks;
pub use memory::InMemoryDocumentStore;
pub use note_store::{NoteStore, SaveOutcome, NOTES_COLLECTION};
