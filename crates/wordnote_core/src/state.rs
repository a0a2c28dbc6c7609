use serde::Serialize;

use crate::view_model::WidgetViewModel;
use crate::{derive_key, ConfigurationError, ScopeKey, WidgetConfig, WordCountResult, WorkItemId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    Loaded,
}

/// Everything the host hands over once per load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub config: WidgetConfig,
    pub work_item_id: WorkItemId,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    context: Option<SessionContext>,
    personal: bool,
    word_count: WordCountResult,
    note_text: String,
    unsaved: bool,
    scope_error: Option<ConfigurationError>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.context.is_some() {
            SessionPhase::Loaded
        } else {
            SessionPhase::Uninitialized
        }
    }

    pub fn context(&self) -> Option<&SessionContext> {
        self.context.as_ref()
    }

    pub fn personal(&self) -> bool {
        self.personal
    }

    pub fn note_text(&self) -> &str {
        &self.note_text
    }

    pub fn scope_error(&self) -> Option<&ConfigurationError> {
        self.scope_error.as_ref()
    }

    pub fn word_count(&self) -> WordCountResult {
        self.word_count
    }

    /// Key of the note currently shown, if the session is loaded and the
    /// scope can be derived.
    pub fn scope_key(&self) -> Option<ScopeKey> {
        let context = self.context.as_ref()?;
        derive_key(context.work_item_id, self.personal, context.user_id.as_deref()).ok()
    }

    pub fn view(&self) -> WidgetViewModel {
        WidgetViewModel {
            phase: self.phase(),
            work_item_id: self.context.as_ref().map(|c| c.work_item_id),
            max_word_count: self
                .context
                .as_ref()
                .map_or(0, |c| c.config.max_word_count),
            word_count: self.word_count.count,
            exceeded: self.word_count.exceeded,
            validation_message: self.word_count.message(),
            note_text: self.note_text.clone(),
            personal: self.personal,
            scope_key: self.scope_key(),
            scope_error: self.scope_error.as_ref().map(ToString::to_string),
            unsaved_changes: self.unsaved,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn enter_loaded(&mut self, context: SessionContext) {
        self.word_count = WordCountResult {
            limit: context.config.max_word_count,
            ..WordCountResult::default()
        };
        self.context = Some(context);
        self.clear_note();
        self.mark_dirty();
    }

    pub(crate) fn reset(&mut self) {
        *self = Self {
            dirty: true,
            ..Self::default()
        };
    }

    /// Returns `false` when the flag was already set to `personal`.
    pub(crate) fn set_personal(&mut self, personal: bool) -> bool {
        if self.personal == personal {
            return false;
        }
        self.personal = personal;
        self.clear_note();
        self.mark_dirty();
        true
    }

    pub(crate) fn set_word_count(&mut self, result: WordCountResult) {
        if self.word_count != result {
            self.word_count = result;
            self.mark_dirty();
        }
    }

    pub(crate) fn edit_note(&mut self, text: String) {
        if self.note_text != text {
            self.note_text = text;
            self.unsaved = true;
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_loaded_note(&mut self, text: String) {
        self.note_text = text;
        self.unsaved = false;
        self.mark_dirty();
    }

    pub(crate) fn mark_saved(&mut self, key: &ScopeKey, text: &str) {
        if self.scope_key().as_ref() == Some(key) && self.note_text == text && self.unsaved {
            self.unsaved = false;
            self.mark_dirty();
        }
    }

    /// Derive the current key, recording a scope error when it cannot be built.
    pub(crate) fn resolve_key(&mut self) -> Option<ScopeKey> {
        let context = self.context.as_ref()?;
        let resolved = derive_key(context.work_item_id, self.personal, context.user_id.as_deref());
        match resolved {
            Ok(key) => {
                if self.scope_error.take().is_some() {
                    self.mark_dirty();
                }
                Some(key)
            }
            Err(err) => {
                if self.scope_error.as_ref() != Some(&err) {
                    self.scope_error = Some(err);
                    self.mark_dirty();
                }
                None
            }
        }
    }

    fn clear_note(&mut self) {
        self.note_text.clear();
        self.unsaved = false;
    }
}
