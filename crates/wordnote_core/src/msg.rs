use crate::{ScopeKey, SessionContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host finished loading the work item form.
    Loaded(SessionContext),
    /// Host unloaded the contribution.
    Unloaded,
    /// Some field of the hosted work item changed.
    FieldChanged,
    /// Current raw value of the monitored field.
    FieldValueRead(Option<String>),
    /// User switched between shared and personal notes.
    PersonalToggled(bool),
    /// User edited the note text box.
    NoteEdited(String),
    /// User clicked Save.
    SaveClicked,
    /// Store returned the note for `key` (empty when none exists).
    NoteLoaded { key: ScopeKey, text: String },
    /// Store accepted `text` for `key`.
    NoteSaved { key: ScopeKey, text: String },
    /// Store rejected the save for `key`.
    NoteSaveFailed { key: ScopeKey },
}
