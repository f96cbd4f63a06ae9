//! `pfcheck` - CLI for personfinder
//!
//! This binary binds request parameters and joins or filters records from the
//! command line, printing JSON on stdout.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::info;

use personfinder::cli::{BindCommand, Cli, Command, ConfigCommand, FilterCommand, JoinCommand};
use personfinder::{
    fuzzify_age, init_logging, join, Config, ParameterBinder, RawInput, Record, RecordFilter,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Bind(cmd) => handle_bind(&config, &cmd),
        Command::Join(cmd) => handle_join(&config, &cmd),
        Command::Filter(cmd) => handle_filter(&config, &cmd),
        Command::FuzzifyAge(cmd) => {
            match fuzzify_age(Some(cmd.value.as_str())) {
                Some(bucket) => println!("{bucket}"),
                None => anyhow::bail!("not an age or age range"),
            }
            Ok(())
        }
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

fn read_record(path: &Path) -> anyhow::Result<Record> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn handle_bind(config: &Config, cmd: &BindCommand) -> anyhow::Result<()> {
    let binder = ParameterBinder::standard(&config.params);
    let input = RawInput::from_pairs(cmd.params.iter().cloned());
    let params = binder.bind(&input)?;
    print_json(&params, cmd.pretty)
}

fn handle_join(config: &Config, cmd: &JoinCommand) -> anyhow::Result<()> {
    let person = read_record(&cmd.person)?;
    let note = cmd.note.as_deref().map(read_record).transpose()?;

    let mut joined = [join(&person, note.as_ref())];
    if cmd.filter {
        RecordFilter::from_config(&config.privacy).filter(&mut joined);
    }
    print_json(&joined[0], true)
}

fn handle_filter(config: &Config, cmd: &FilterCommand) -> anyhow::Result<()> {
    let text = match &cmd.file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };
    let mut records: Vec<Record> = serde_json::from_str(&text).context("parsing records")?;

    let redacted = RecordFilter::from_config(&config.privacy).filter(&mut records);
    info!(records = records.len(), redacted, "Filtered records");
    print_json(&records, cmd.pretty)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                print_json(config, true)?;
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Params]");
                println!(
                    "  Default schema version: {}",
                    config.params.default_schema_version
                );
                println!(
                    "  Referrer allow-list:    {}",
                    config.params.referrer_allow_list.join(", ")
                );
                println!();
                println!("[Privacy]");
                println!(
                    "  Extra sensitive fields: {}",
                    config.privacy.extra_sensitive_fields.join(", ")
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
