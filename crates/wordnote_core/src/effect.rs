use crate::ScopeKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Read the monitored field; answer with `Msg::FieldValueRead`.
    ReadField { field_name: String },
    /// Flag the work item with a validation error.
    ShowError { message: String },
    /// Clear any validation error set by this widget.
    ClearError,
    /// Fetch the note; answer with `Msg::NoteLoaded`.
    LoadNote { key: ScopeKey },
    /// Upsert the note; answer with `Msg::NoteSaved` or `Msg::NoteSaveFailed`.
    SaveNote { key: ScopeKey, text: String },
}
