#![forbid(unsafe_code)]

mod cmd;
mod scripted_host;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use wordnote_logging::LogDestination;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "wordnote: word-count limits and notes for work item descriptions",
    long_about = None
)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Count the words of a (possibly HTML) field value and check the limit.
    Count(cmd::count::CountArgs),
    /// Read or write the note stored for a work item.
    #[command(subcommand)]
    Note(cmd::note::NoteCommand),
    /// Replay a scripted host session against a note store.
    Replay(cmd::replay::ReplayArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let destination = match cli.log_file {
        Some(path) => LogDestination::Both(path),
        None => LogDestination::Terminal,
    };
    wordnote_logging::initialize(destination, level);

    match cli.command {
        Commands::Count(args) => cmd::count::run(&args),
        Commands::Note(command) => cmd::note::run(command).await,
        Commands::Replay(args) => cmd::replay::run(&args).await,
    }
}
