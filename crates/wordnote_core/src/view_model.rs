use serde::Serialize;

use crate::{ScopeKey, SessionPhase, WorkItemId};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WidgetViewModel {
    pub phase: SessionPhase,
    pub work_item_id: Option<WorkItemId>,
    pub max_word_count: u32,
    pub word_count: u32,
    pub exceeded: bool,
    pub validation_message: Option<String>,
    pub note_text: String,
    pub personal: bool,
    pub scope_key: Option<ScopeKey>,
    pub scope_error: Option<String>,
    pub unsaved_changes: bool,
    pub dirty: bool,
}
