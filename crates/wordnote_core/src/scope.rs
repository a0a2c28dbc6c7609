use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

pub type WorkItemId = u64;

/// Document-store key for a note: `{work_item_id}` or `{user_id}.{work_item_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeKey(String);

impl ScopeKey {
    /// Wrap an already-derived key, e.g. one read back from the store.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScopeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derive the note key for a work item.
///
/// A personal scope without a usable user id is rejected rather than
/// producing a key shared by every anonymous viewer.
pub fn derive_key(
    work_item_id: WorkItemId,
    personal: bool,
    user_id: Option<&str>,
) -> Result<ScopeKey, ConfigurationError> {
    if !personal {
        return Ok(ScopeKey(work_item_id.to_string()));
    }
    match user_id.map(str::trim).filter(|id| !id.is_empty()) {
        Some(user_id) => Ok(ScopeKey(format!("{user_id}.{work_item_id}"))),
        None => Err(ConfigurationError::MissingUserId { work_item_id }),
    }
}
