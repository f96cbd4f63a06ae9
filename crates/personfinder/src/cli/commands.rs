//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::error::{Error, Result};

/// Bind command arguments.
#[derive(Debug, Args)]
pub struct BindCommand {
    /// A request parameter, repeatable (e.g. `-p role=PROVIDE`)
    #[arg(short, long = "param", value_name = "NAME=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Join command arguments.
#[derive(Debug, Args)]
pub struct JoinCommand {
    /// JSON file holding the person record
    #[arg(long, value_name = "FILE")]
    pub person: PathBuf,

    /// JSON file holding the note record
    #[arg(long, value_name = "FILE")]
    pub note: Option<PathBuf>,

    /// Redact sensitive fields from the joined record
    #[arg(short, long)]
    pub filter: bool,
}

/// Filter command arguments.
#[derive(Debug, Args)]
pub struct FilterCommand {
    /// JSON file holding an array of records (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Fuzzify-age command arguments.
#[derive(Debug, Args)]
pub struct FuzzifyAgeCommand {
    /// An age or age range, e.g. `22` or `40-48`
    pub value: String,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Parse a `NAME=VALUE` pair. The value may itself contain `=`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when there is no `=` or the name is empty.
pub fn parse_param(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(Error::invalid_argument(format!(
            "expected NAME=VALUE, got {arg:?}"
        ))),
    }
}
