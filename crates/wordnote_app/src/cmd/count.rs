use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use wordnote_core::evaluate;

#[derive(Args, Debug)]
pub struct CountArgs {
    /// Maximum number of words allowed.
    #[arg(long, default_value_t = 250)]
    pub max: u32,

    /// Emit the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// File holding the field value; stdin when omitted.
    pub file: Option<PathBuf>,
}

/// Exits with code 1 when the limit is exceeded.
pub fn run(args: &CountArgs) -> anyhow::Result<ExitCode> {
    let raw = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let result = evaluate(Some(raw.as_str()), args.max);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Max word count: {}", result.limit);
        println!("Current word count: {}", result.count);
        if let Some(message) = result.message() {
            println!("{message}");
        }
    }

    Ok(if result.exceeded {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
