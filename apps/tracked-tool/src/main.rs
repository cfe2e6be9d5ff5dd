//! CLI tool for staging and inspecting changes to a JSON record.
//!
//! Loads a record file, stages field writes through a change-tracking
//! overlay, prints the resulting change set, and optionally commits it
//! back to disk.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use serde_json::{json, Value as JsonValue};
use tracing_subscriber::EnvFilter;
use tracked_core::json::{json_to_value, map_to_json_object, value_to_json};
use tracked_core::{ObjectMap, Tracked, TrackerConfig};

/// Command-line arguments for the record tool.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding the record (must contain an object)
    record: PathBuf,

    /// Field write, as `field=<json>`; non-JSON values are taken as strings
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    sets: Vec<String>,

    /// Field to delete
    #[arg(long = "delete", value_name = "FIELD")]
    deletes: Vec<String>,

    /// Write the committed record back to the file
    #[arg(long, conflicts_with = "rollback")]
    commit: bool,

    /// Discard staged writes after reporting them
    #[arg(long)]
    rollback: bool,

    /// JSON tracker configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level filter (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// `--set` and `--delete` in command-line order
    #[arg(skip)]
    operations: Vec<Operation>,
}

/// A single field operation requested on the command line.
#[derive(Debug, Clone, PartialEq)]
enum Operation {
    Set(String),
    Delete(String),
}

impl Args {
    /// Parses arguments, keeping field operations in the order given.
    fn try_from_argv<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(argv)?;
        let mut args = Self::from_arg_matches(&matches)?;
        args.operations = ordered_operations(&matches);
        Ok(args)
    }
}

fn ordered_operations(matches: &ArgMatches) -> Vec<Operation> {
    let mut indexed: Vec<(usize, Operation)> = Vec::new();
    if let (Some(indices), Some(values)) =
        (matches.indices_of("sets"), matches.get_many::<String>("sets"))
    {
        indexed.extend(indices.zip(values).map(|(i, v)| (i, Operation::Set(v.clone()))));
    }
    if let (Some(indices), Some(values)) = (
        matches.indices_of("deletes"),
        matches.get_many::<String>("deletes"),
    ) {
        indexed.extend(indices.zip(values).map(|(i, v)| (i, Operation::Delete(v.clone()))));
    }
    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, op)| op).collect()
}

fn main() -> anyhow::Result<()> {
    let args = Args::try_from_argv(std::env::args_os()).unwrap_or_else(|e| e.exit());

    let filter = match &args.log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let report = run(&args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Applies the requested operations and returns the report to print.
fn run(args: &Args) -> anyhow::Result<JsonValue> {
    let config = match &args.config {
        Some(path) => TrackerConfig::from_file(path)?,
        None => TrackerConfig::default(),
    };
    let mut tracked = load_record(&args.record, config)?;

    tracing::debug!(
        "Applying {} write(s) and {} deletion(s)",
        args.sets.len(),
        args.deletes.len()
    );
    let mut deleted = Vec::new();
    for operation in &args.operations {
        match operation {
            Operation::Set(assignment) => {
                let (field, value) = parse_assignment(assignment)?;
                tracked.set(field, json_to_value(value));
            }
            Operation::Delete(field) => {
                if tracked.has(field) {
                    tracked.delete(field);
                    deleted.push(field.clone());
                } else {
                    tracing::warn!("Field '{}' not present in record", field);
                }
            }
        }
    }

    let mut changes = Vec::new();
    for change in tracked.change_set() {
        let old = match &change.old {
            Some(value) => value_to_json(value)?,
            None => JsonValue::Null,
        };
        changes.push(json!({
            "field": change.field,
            "old": old,
            "new": value_to_json(&change.new)?,
            "added": change.is_addition(),
        }));
    }

    let mut committed = false;
    let mut rolled_back = 0;
    if args.commit {
        let count = tracked.commit();
        save_record(&args.record, tracked.source())?;
        tracing::info!(
            "Wrote {} field(s) and {} deletion(s) to {}",
            count,
            deleted.len(),
            args.record.display()
        );
        committed = true;
    } else if args.rollback {
        rolled_back = tracked.rollback();
    }

    Ok(json!({
        "changes": changes,
        "deleted": deleted,
        "committed": committed,
        "rolled_back": rolled_back,
    }))
}

fn load_record(path: &Path, config: TrackerConfig) -> anyhow::Result<Tracked<ObjectMap>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read record file {}", path.display()))?;
    let json: JsonValue = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse record file {}", path.display()))?;
    Ok(Tracked::from_json(json, config)?)
}

fn save_record(path: &Path, record: &ObjectMap) -> anyhow::Result<()> {
    let object = JsonValue::Object(map_to_json_object(record)?);
    let content = serde_json::to_string_pretty(&object)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write record file {}", path.display()))?;
    Ok(())
}

/// Splits `field=value`, parsing the value as JSON when possible.
fn parse_assignment(assignment: &str) -> anyhow::Result<(String, JsonValue)> {
    let Some((field, raw)) = assignment.split_once('=') else {
        bail!("Expected FIELD=VALUE, got '{}'", assignment);
    };
    let field = field.trim();
    if field.is_empty() {
        bail!("Empty field name in '{}'", assignment);
    }
    let value =
        serde_json::from_str(raw).unwrap_or_else(|_| JsonValue::String(raw.to_string()));
    Ok((field.to_string(), value))
}
