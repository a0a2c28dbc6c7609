//! A host driven by a RON script instead of the real platform SDK.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use wordnote_core::{WitInputs, WorkItemId};
use wordnote_engine::{HostError, IdentityService, WorkItemFormService};

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub work_item_id: WorkItemId,
    #[serde(default)]
    pub user_id: Option<String>,
    pub inputs: WitInputs,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum ScriptEvent {
    Loaded,
    Unloaded,
    /// Change a field value without notifying the widget.
    SetField { name: String, value: Option<String> },
    FieldChanged,
    EditNote(String),
    SetPersonal(bool),
    Save,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum HostCall {
    SetError(String),
    ClearError,
}

#[derive(Debug)]
pub struct ScriptedHost {
    work_item_id: WorkItemId,
    user_id: Option<String>,
    fields: Mutex<BTreeMap<String, String>>,
    calls: Mutex<Vec<HostCall>>,
}

impl ScriptedHost {
    pub fn new(script: &ReplayScript) -> Self {
        Self {
            work_item_id: script.work_item_id,
            user_id: script.user_id.clone(),
            fields: Mutex::new(script.fields.clone()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_field(&self, name: &str, value: Option<String>) -> Result<(), HostError> {
        let mut fields = self.fields.lock().map_err(poisoned)?;
        match value {
            Some(value) => fields.insert(name.to_string(), value),
            None => fields.remove(name),
        };
        Ok(())
    }

    pub fn calls(&self) -> Result<Vec<HostCall>, HostError> {
        Ok(self.calls.lock().map_err(poisoned)?.clone())
    }

    fn record(&self, call: HostCall) -> Result<(), HostError> {
        self.calls.lock().map_err(poisoned)?.push(call);
        Ok(())
    }
}

#[async_trait::async_trait]
impl WorkItemFormService for ScriptedHost {
    async fn work_item_id(&self) -> Result<WorkItemId, HostError> {
        Ok(self.work_item_id)
    }

    async fn field_value(&self, field_name: &str) -> Result<Option<String>, HostError> {
        Ok(self.fields.lock().map_err(poisoned)?.get(field_name).cloned())
    }

    async fn set_error(&self, message: &str) -> Result<(), HostError> {
        self.record(HostCall::SetError(message.to_string()))
    }

    async fn clear_error(&self) -> Result<(), HostError> {
        self.record(HostCall::ClearError)
    }
}

impl IdentityService for ScriptedHost {
    fn current_user_id(&self) -> Option<String> {
        self.user_id.clone()
    }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> HostError {
    HostError("scripted host state poisoned".to_string())
}
