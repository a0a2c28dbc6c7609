use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use wordnote_core::{ConfigurationError, SessionPhase, WitInputs, WorkItemId};
use wordnote_engine::{
    Contribution, ContributionError, HostError, IdentityService, InMemoryDocumentStore, NoteStore,
    WorkItemFormService,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostCall {
    SetError(String),
    ClearError,
}

#[derive(Default)]
struct FakeHost {
    work_item_id: WorkItemId,
    user_id: Option<String>,
    fields: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<HostCall>>,
}

impl FakeHost {
    fn new(work_item_id: WorkItemId, user_id: Option<&str>) -> Self {
        Self {
            work_item_id,
            user_id: user_id.map(ToOwned::to_owned),
            ..Self::default()
        }
    }

    fn set_field(&self, name: &str, value: &str) {
        self.fields
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }

    fn take_calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().drain(..).collect()
    }
}

#[async_trait::async_trait]
impl WorkItemFormService for FakeHost {
    async fn work_item_id(&self) -> Result<WorkItemId, HostError> {
        Ok(self.work_item_id)
    }

    async fn field_value(&self, field_name: &str) -> Result<Option<String>, HostError> {
        Ok(self.fields.lock().unwrap().get(field_name).cloned())
    }

    async fn set_error(&self, message: &str) -> Result<(), HostError> {
        self.calls
            .lock()
            .unwrap()
            .push(HostCall::SetError(message.to_string()));
        Ok(())
    }

    async fn clear_error(&self) -> Result<(), HostError> {
        self.calls.lock().unwrap().push(HostCall::ClearError);
        Ok(())
    }
}

impl IdentityService for FakeHost {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}

const FIELD: &str = "System.Description";

fn inputs(max: &str) -> WitInputs {
    [
        ("MaxWordCount".to_string(), max.to_string()),
        ("FieldName".to_string(), FIELD.to_string()),
    ]
    .into_iter()
    .collect()
}

fn mount(
    host: FakeHost,
) -> (
    Contribution<FakeHost>,
    Arc<InMemoryDocumentStore>,
    NoteStore,
) {
    wordnote_logging::initialize_for_tests();
    let backing = Arc::new(InMemoryDocumentStore::new());
    let notes = NoteStore::new(backing.clone());
    (Contribution::new(host, notes.clone()), backing, notes)
}

#[tokio::test]
async fn load_counts_words_and_clears_error() {
    let host = FakeHost::new(42, Some("u1"));
    host.set_field(FIELD, "<p>a b</p>");
    let (mut widget, _backing, _notes) = mount(host);

    widget.on_loaded(&inputs("5")).await.unwrap();

    let view = widget.view();
    assert_eq!(view.phase, SessionPhase::Loaded);
    assert_eq!(view.word_count, 2);
    assert_eq!(view.max_word_count, 5);
    assert_eq!(widget.host().take_calls(), vec![HostCall::ClearError]);
}

#[tokio::test]
async fn field_changes_set_error_every_time() {
    let host = FakeHost::new(42, Some("u1"));
    let (mut widget, _backing, _notes) = mount(host);
    widget.on_loaded(&inputs("2")).await.unwrap();
    widget.host().take_calls();

    widget.host().set_field(FIELD, "a b c");
    widget.on_field_changed().await;
    widget.on_field_changed().await;

    let message = "Description contains 3 words but should have less than 2 words".to_string();
    assert_eq!(
        widget.host().take_calls(),
        vec![
            HostCall::SetError(message.clone()),
            HostCall::SetError(message),
        ]
    );

    widget.host().set_field(FIELD, "a");
    widget.on_field_changed().await;
    assert_eq!(widget.host().take_calls(), vec![HostCall::ClearError]);
    assert!(!widget.view().exceeded);
}

#[tokio::test]
async fn notes_persist_per_scope() {
    let host = FakeHost::new(42, Some("u1"));
    let (mut widget, _backing, notes) = mount(host);
    widget.on_loaded(&inputs("10")).await.unwrap();

    widget.edit_note("shared note").await;
    widget.save_note().await;
    assert!(!widget.view().unsaved_changes);

    widget.set_personal(true).await;
    assert_eq!(widget.view().note_text, "");
    widget.edit_note("my note").await;
    widget.save_note().await;

    widget.set_personal(false).await;
    assert_eq!(widget.view().note_text, "shared note");

    let personal = wordnote_core::derive_key(42, true, Some("u1")).unwrap();
    assert_eq!(notes.load(&personal).await.unwrap(), "my note");
}

#[tokio::test]
async fn existing_note_is_loaded_on_start() {
    let host = FakeHost::new(7, None);
    let (mut widget, _backing, notes) = mount(host);
    notes
        .save(&wordnote_core::ScopeKey::from_raw("7"), "from before")
        .await
        .unwrap();

    widget.on_loaded(&inputs("10")).await.unwrap();
    assert_eq!(widget.view().note_text, "from before");
}

#[tokio::test]
async fn failed_save_stays_unsaved() {
    let host = FakeHost::new(42, Some("u1"));
    let (mut widget, backing, _notes) = mount(host);
    widget.on_loaded(&inputs("10")).await.unwrap();

    backing.set_available(false);
    widget.edit_note("unsent").await;
    widget.save_note().await;

    let view = widget.view();
    assert_eq!(view.note_text, "unsent");
    assert!(view.unsaved_changes);

    backing.set_available(true);
    widget.save_note().await;
    assert!(!widget.view().unsaved_changes);
}

#[tokio::test]
async fn personal_scope_without_user_is_refused() {
    let host = FakeHost::new(42, None);
    let (mut widget, backing, _notes) = mount(host);
    widget.on_loaded(&inputs("10")).await.unwrap();

    widget.set_personal(true).await;
    widget.edit_note("nowhere").await;
    widget.save_note().await;

    let view = widget.view();
    assert!(view.scope_error.is_some());
    assert!(view.unsaved_changes);
    assert_eq!(backing.document_count(wordnote_engine::NOTES_COLLECTION).await, 0);
}

#[tokio::test]
async fn invalid_configuration_fails_load() {
    let host = FakeHost::new(42, Some("u1"));
    let (mut widget, _backing, _notes) = mount(host);

    let err = widget.on_loaded(&inputs("many")).await.unwrap_err();
    assert!(matches!(
        err,
        ContributionError::Configuration(ConfigurationError::InvalidMaxWordCount { .. })
    ));
    assert_eq!(widget.view().phase, SessionPhase::Uninitialized);
}

#[tokio::test]
async fn two_widgets_share_one_note() {
    wordnote_logging::initialize_for_tests();
    let backing = Arc::new(InMemoryDocumentStore::new());
    let notes = NoteStore::new(backing.clone());
    let mut first = Contribution::new(FakeHost::new(5, Some("a")), notes.clone());
    let mut second = Contribution::new(FakeHost::new(5, Some("b")), notes.clone());

    first.on_loaded(&inputs("10")).await.unwrap();
    first.edit_note("team note").await;
    first.save_note().await;

    second.on_loaded(&inputs("10")).await.unwrap();
    assert_eq!(second.view().note_text, "team note");
    assert_eq!(backing.document_count(wordnote_engine::NOTES_COLLECTION).await, 1);
}

#[tokio::test]
async fn unload_resets_view() {
    let host = FakeHost::new(42, Some("u1"));
    let (mut widget, _backing, _notes) = mount(host);
    widget.on_loaded(&inputs("10")).await.unwrap();
    assert!(widget.consume_dirty());

    widget.on_unloaded().await;
    assert!(widget.consume_dirty());
    assert_eq!(widget.view().phase, SessionPhase::Uninitialized);
}
