//! CLI definition for the `quotecraft` command-line interface.
//!
//! Only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// QuoteCraft calculator editor
///
/// Builds and checks calculator field lists from scripted editor commands.
#[derive(Parser, Debug)]
#[command(name = "quotecraft")]
#[command(version)]
#[command(about = "QuoteCraft calculator editor")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file (.yaml, .yml, .toml or .json)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the field kinds and the label each new field starts with
    Kinds,
    /// Print the variable name derived from a label
    Slug {
        /// Label to derive from
        label: String,
    },
    /// Replay an editor script against a calculator document and save it
    Apply {
        /// Calculator document; created if it does not exist
        doc: PathBuf,
        /// YAML or JSON list of editor commands
        #[arg(short, long)]
        script: PathBuf,
        /// Write the result here instead of back to DOC
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Report problems in a calculator document's fields
    Check {
        /// Calculator document
        doc: PathBuf,
    },
}
