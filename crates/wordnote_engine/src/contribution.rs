use std::collections::VecDeque;

use thiserror::Error;
use wordnote_core::{
    update, AppState, ConfigurationError, Effect, Msg, SessionContext, WidgetConfig,
    WidgetViewModel, WitInputs,
};
use wordnote_logging::{wn_debug, wn_error, wn_info, wn_warn};

use crate::{HostError, IdentityService, NoteStore, SaveOutcome, WorkItemFormService};

#[derive(Debug, Error)]
pub enum ContributionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Host(#[from] HostError),
}

/// The widget as seen by the host: lifecycle callbacks plus UI actions.
///
/// Every method runs the resulting effects to completion before returning,
/// so callbacks of one session never interleave.
pub struct Contribution<H> {
    state: AppState,
    host: H,
    notes: NoteStore,
}

impl<H> Contribution<H>
where
    H: WorkItemFormService + IdentityService,
{
    pub fn new(host: H, notes: NoteStore) -> Self {
        Self {
            state: AppState::new(),
            host,
            notes,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn view(&self) -> WidgetViewModel {
        self.state.view()
    }

    /// Returns whether the view changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub async fn on_loaded(&mut self, inputs: &WitInputs) -> Result<(), ContributionError> {
        let config = WidgetConfig::from_inputs(inputs)?;
        let work_item_id = self.host.work_item_id().await?;
        let user_id = self.host.current_user_id();
        if user_id.is_none() {
            wn_warn!("No current user id; personal notes are unavailable");
        }
        wn_info!(
            "Loaded work item {} field={} max_word_count={}",
            work_item_id,
            config.field_name,
            config.max_word_count
        );
        self.dispatch(Msg::Loaded(SessionContext {
            config,
            work_item_id,
            user_id,
        }))
        .await;
        Ok(())
    }

    pub async fn on_field_changed(&mut self) {
        self.dispatch(Msg::FieldChanged).await;
    }

    pub async fn on_unloaded(&mut self) {
        self.dispatch(Msg::Unloaded).await;
    }

    pub async fn edit_note(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::NoteEdited(text.into())).await;
    }

    pub async fn set_personal(&mut self, personal: bool) {
        self.dispatch(Msg::PersonalToggled(personal)).await;
    }

    pub async fn save_note(&mut self) {
        self.dispatch(Msg::SaveClicked).await;
    }

    async fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let had_scope_error = self.state.scope_error().is_some();
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;

            if let (false, Some(err)) = (had_scope_error, self.state.scope_error()) {
                wn_warn!("{}", err);
            }

            for effect in effects {
                if let Some(reply) = self.run_effect(effect).await {
                    inbox.push_back(reply);
                }
            }
        }
    }

    async fn run_effect(&self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::ReadField { field_name } => match self.host.field_value(&field_name).await {
                Ok(value) => Some(Msg::FieldValueRead(value)),
                Err(err) => {
                    wn_warn!("Cannot read field {}: {}", field_name, err);
                    None
                }
            },
            Effect::ShowError { message } => {
                wn_debug!("Setting form error: {}", message);
                if let Err(err) = self.host.set_error(&message).await {
                    wn_warn!("Cannot set form error: {}", err);
                }
                None
            }
            Effect::ClearError => {
                if let Err(err) = self.host.clear_error().await {
                    wn_warn!("Cannot clear form error: {}", err);
                }
                None
            }
            Effect::LoadNote { key } => match self.notes.load(&key).await {
                Ok(text) => Some(Msg::NoteLoaded { key, text }),
                Err(err) => {
                    wn_warn!(
                        "Cannot get a document. Collection '{}', key '{}': {}",
                        self.notes.collection(),
                        key,
                        err
                    );
                    None
                }
            },
            Effect::SaveNote { key, text } => match self.notes.save(&key, &text).await {
                Ok(outcome) => {
                    let action = match outcome {
                        SaveOutcome::Created => "Created",
                        SaveOutcome::Updated => "Updated",
                    };
                    wn_info!("{} note {} ({} bytes)", action, key, text.len());
                    Some(Msg::NoteSaved { key, text })
                }
                Err(err) => {
                    wn_error!("Saving note {} failed: {}", key, err);
                    Some(Msg::NoteSaveFailed { key })
                }
            },
        }
    }
}
