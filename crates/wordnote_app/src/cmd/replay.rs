use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use wordnote_core::WidgetViewModel;
use wordnote_engine::{Contribution, JsonFileDocumentStore, NoteStore};
use wordnote_logging::wn_info;

use crate::scripted_host::{HostCall, ReplayScript, ScriptEvent, ScriptedHost};

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Directory of the JSON document store.
    #[arg(long, value_name = "DIR")]
    pub store: PathBuf,

    /// RON script describing the host session.
    pub script: PathBuf,
}

#[derive(Debug, Serialize)]
struct ReplayReport {
    calls: Vec<HostCall>,
    view: WidgetViewModel,
}

pub async fn run(args: &ReplayArgs) -> anyhow::Result<ExitCode> {
    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read {}", args.script.display()))?;
    let script: ReplayScript = ron::from_str(&text)
        .with_context(|| format!("failed to parse {}", args.script.display()))?;

    let store = JsonFileDocumentStore::open(&args.store)
        .with_context(|| format!("failed to open store {}", args.store.display()))?;
    let notes = NoteStore::new(Arc::new(store));
    let mut widget = Contribution::new(ScriptedHost::new(&script), notes);

    for event in &script.events {
        wn_info!("Replaying {:?}", event);
        match event {
            ScriptEvent::Loaded => widget.on_loaded(&script.inputs).await?,
            ScriptEvent::Unloaded => widget.on_unloaded().await,
            ScriptEvent::SetField { name, value } => {
                widget.host().set_field(name, value.clone())?;
            }
            ScriptEvent::FieldChanged => widget.on_field_changed().await,
            ScriptEvent::EditNote(text) => widget.edit_note(text.clone()).await,
            ScriptEvent::SetPersonal(personal) => widget.set_personal(*personal).await,
            ScriptEvent::Save => widget.save_note().await,
        }
    }

    let report = ReplayReport {
        calls: widget.host().calls()?,
        view: widget.view(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(ExitCode::SUCCESS)
}
