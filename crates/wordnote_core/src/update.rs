use crate::{evaluate, AppState, Effect, Msg, SessionPhase};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Loaded(context) => {
            let field_name = context.config.field_name.clone();
            state.enter_loaded(context);
            let mut effects = vec![Effect::ReadField { field_name }];
            if let Some(key) = state.resolve_key() {
                effects.push(Effect::LoadNote { key });
            }
            effects
        }
        Msg::Unloaded => {
            state.reset();
            Vec::new()
        }
        Msg::FieldChanged => match state.context() {
            Some(context) => vec![Effect::ReadField {
                field_name: context.config.field_name.clone(),
            }],
            None => Vec::new(),
        },
        Msg::FieldValueRead(raw) => {
            let Some(limit) = state.context().map(|c| c.config.max_word_count) else {
                return (state, Vec::new());
            };
            let result = evaluate(raw.as_deref(), limit);
            state.set_word_count(result);
            // Set or clear on every recomputation, not only on transitions.
            match result.message() {
                Some(message) => vec![Effect::ShowError { message }],
                None => vec![Effect::ClearError],
            }
        }
        Msg::PersonalToggled(personal) => {
            let changed = state.set_personal(personal);
            if changed && state.phase() == SessionPhase::Loaded {
                state
                    .resolve_key()
                    .map(|key| vec![Effect::LoadNote { key }])
                    .unwrap_or_default()
            } else {
                Vec::new()
            }
        }
        Msg::NoteEdited(text) => {
            state.edit_note(text);
            Vec::new()
        }
        Msg::SaveClicked => match state.resolve_key() {
            Some(key) => vec![Effect::SaveNote {
                key,
                text: state.note_text().to_owned(),
            }],
            None => Vec::new(),
        },
        Msg::NoteLoaded { key, text } => {
            // Drop answers for a scope the user has already left.
            if state.scope_key().as_ref() == Some(&key) {
                state.apply_loaded_note(text);
            }
            Vec::new()
        }
        Msg::NoteSaved { key, text } => {
            state.mark_saved(&key, &text);
            Vec::new()
        }
        Msg::NoteSaveFailed { .. } => Vec::new(),
    };

    (state, effects)
}
