//! QuoteCraft CLI - calculator editor command-line interface.
//!
//! Commands:
//! - `quotecraft kinds`: List field kinds and their starting labels
//! - `quotecraft slug <label>`: Print the variable name derived from a label
//! - `quotecraft apply <doc> --script <script>`: Replay editor commands and save
//! - `quotecraft check <doc>`: Report field problems
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error
//! - 2: The document has field problems

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use quotecraft::{commands, Cli, Commands};
use quotecraft_editor::EditorConfig;

/// Exit code returned when a document has field problems.
const PROBLEMS_EXIT_CODE: i32 = 2;

/// Log filter for `--debug`: every crate in the workspace at debug level.
const DEBUG_FILTER: &str =
    "quotecraft=debug,quotecraft_editor=debug,quotecraft_fields=debug,quotecraft_reorder=debug";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match dispatch(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };
    std::process::exit(exit_code);
}

async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let config = EditorConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let mut out = io::stdout().lock();

    match cli.command {
        Commands::Kinds => commands::run_kinds(&config, &mut out)?,
        Commands::Slug { label } => commands::run_slug(&label, &mut out)?,
        Commands::Apply { doc, script, out: target } => {
            let summary =
                commands::run_apply(&doc, &script, target.as_deref(), &config, &mut out)
                    .await
                    .with_context(|| format!("applying {}", script.display()))?;
            if summary.problems > 0 {
                return Ok(PROBLEMS_EXIT_CODE);
            }
        }
        Commands::Check { doc } => {
            let problems = commands::run_check(&doc, &config, &mut out)
                .await
                .with_context(|| format!("checking {}", doc.display()))?;
            if problems > 0 {
                return Ok(PROBLEMS_EXIT_CODE);
            }
        }
    }
    Ok(0)
}
