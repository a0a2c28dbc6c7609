use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::WorkItemId;

/// Host-delivered contribution inputs, keyed by input name.
pub type WitInputs = BTreeMap<String, String>;

pub const MAX_WORD_COUNT_INPUT: &str = "MaxWordCount";
pub const FIELD_NAME_INPUT: &str = "FieldName";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("missing contribution input {0}")]
    MissingInput(&'static str),
    #[error("invalid MaxWordCount {value:?}: expected a non-negative integer")]
    InvalidMaxWordCount { value: String },
    #[error("FieldName must not be empty")]
    EmptyFieldName,
    #[error("personal scope requested for work item {work_item_id} but no user id is available")]
    MissingUserId { work_item_id: WorkItemId },
}

/// Widget settings for one session; immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub max_word_count: u32,
    pub field_name: String,
}

impl WidgetConfig {
    pub fn new(max_word_count: u32, field_name: impl Into<String>) -> Self {
        Self {
            max_word_count,
            field_name: field_name.into(),
        }
    }

    /// Parse `MaxWordCount` and `FieldName` from the host's inputs.
    pub fn from_inputs(inputs: &WitInputs) -> Result<Self, ConfigurationError> {
        let raw_max = inputs
            .get(MAX_WORD_COUNT_INPUT)
            .ok_or(ConfigurationError::MissingInput(MAX_WORD_COUNT_INPUT))?;
        let max_word_count = raw_max.trim().parse::<u32>().map_err(|_| {
            ConfigurationError::InvalidMaxWordCount {
                value: raw_max.clone(),
            }
        })?;

        let field_name = inputs
            .get(FIELD_NAME_INPUT)
            .ok_or(ConfigurationError::MissingInput(FIELD_NAME_INPUT))?
            .trim();
        if field_name.is_empty() {
            return Err(ConfigurationError::EmptyFieldName);
        }

        Ok(Self::new(max_word_count, field_name))
    }
}
