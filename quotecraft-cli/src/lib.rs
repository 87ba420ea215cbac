//! QuoteCraft command-line driver.
//!
//! Exposes the CLI definition and subcommand implementations so they can be
//! tested without spawning the binary.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
