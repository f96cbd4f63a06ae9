//! Command-line interface for personfinder.
//!
//! This module provides the CLI structure for the `pfcheck` binary, which
//! runs the binder, joiner and filter over ad-hoc input.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    parse_param, BindCommand, ConfigCommand, FilterCommand, FuzzifyAgeCommand, JoinCommand,
};

/// pfcheck - Validate person finder parameters and redact records
///
/// Binds request parameters the way a page handler would, and joins or
/// filters person and note records before they leave the trust boundary.
#[derive(Debug, Parser)]
#[command(name = "pfcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Bind parameters against the standard schema
    Bind(BindCommand),

    /// Join a person record with an optional note
    Join(JoinCommand),

    /// Redact sensitive fields from records
    Filter(FilterCommand),

    /// Show the display bucket for an age
    FuzzifyAge(FuzzifyAgeCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
