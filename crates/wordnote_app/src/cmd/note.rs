use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Subcommand};
use wordnote_core::{derive_key, ScopeKey, WorkItemId};
use wordnote_engine::{JsonFileDocumentStore, NoteStore, SaveOutcome};

#[derive(Args, Debug)]
pub struct ScopeArgs {
    /// Directory of the JSON document store.
    #[arg(long, value_name = "DIR")]
    pub store: PathBuf,

    /// Work item the note belongs to.
    #[arg(long)]
    pub work_item: WorkItemId,

    /// Use the note private to `--user` instead of the shared one.
    #[arg(long, requires = "user")]
    pub personal: bool,

    /// Current user id.
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Print the note (empty when none was saved).
    Get {
        #[command(flatten)]
        scope: ScopeArgs,
    },
    /// Create or overwrite the note.
    Set {
        #[command(flatten)]
        scope: ScopeArgs,
        text: String,
    },
}

pub async fn run(command: NoteCommand) -> anyhow::Result<ExitCode> {
    match command {
        NoteCommand::Get { scope } => {
            let (notes, key) = open(&scope)?;
            let text = notes
                .load(&key)
                .await
                .with_context(|| format!("failed to load note {key}"))?;
            println!("{text}");
        }
        NoteCommand::Set { scope, text } => {
            let (notes, key) = open(&scope)?;
            let outcome = notes
                .save(&key, &text)
                .await
                .with_context(|| format!("failed to save note {key}"))?;
            match outcome {
                SaveOutcome::Created => println!("Created note {key}"),
                SaveOutcome::Updated => println!("Updated note {key}"),
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn open(scope: &ScopeArgs) -> anyhow::Result<(NoteStore, ScopeKey)> {
    let key = derive_key(scope.work_item, scope.personal, scope.user.as_deref())?;
    let store = JsonFileDocumentStore::open(&scope.store)
        .with_context(|| format!("failed to open store {}", scope.store.display()))?;
    Ok((NoteStore::new(Arc::new(store)), key))
}
