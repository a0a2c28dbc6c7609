//! Word-count widget core: pure state machine, word counting and scope keys.
mod config;
mod effect;
mod msg;
mod scope;
mod state;
mod update;
mod view_model;
mod word_count;

pub use config::{
    ConfigurationError, WidgetConfig, WitInputs, FIELD_NAME_INPUT, MAX_WORD_COUNT_INPUT,
};
pub use effect::Effect;
pub use msg::Msg;
pub use scope::{derive_key, ScopeKey, WorkItemId};
pub use state::{AppState, SessionContext, SessionPhase};
pub use update::update;
pub use view_model::WidgetViewModel;
pub use word_count::{
    evaluate, is_separator, strip_markup, MarkupWordCounter, WordCountResult, WordCounter,
};
