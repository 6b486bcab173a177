use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use lupine_engine::{ExecutionEngine, ProcessOutcome, RunOutcome};
use lupine_parser::{AddParser, DEFAULT_OUTPUT_FILENAME, Settings};
use lupine_process::{
  ExitCode, InputMapping, OutputMapping, ProcessDescriptor, ProcessFailure, ProcessOutput,
  Resolved, resolve,
};
use lupine_repository::{EntryKind, FsStore, Store};

/// Lupine - a single-unit process execution core
#[derive(Parser)]
#[command(name = "lupine")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run the arithmetic-add process through the engine
  Run {
    a: i64,
    b: i64,

    /// Reject a negative sum instead of returning it
    #[arg(long)]
    no_negative: bool,

    /// Submit without blocking, report the handle, then resolve
    #[arg(long)]
    detach: bool,
  },

  /// Parse a retrieved output folder into a result or an exit code
  Parse {
    /// Path to the retrieved output folder
    #[arg(long)]
    retrieved: PathBuf,

    /// Name of the captured stdout file inside the folder
    #[arg(long, default_value = DEFAULT_OUTPUT_FILENAME)]
    output_file: String,

    /// Reject a negative sum instead of returning it
    #[arg(long)]
    no_negative: bool,
  },

  /// List the contents of a retrieved output folder
  Ls {
    /// Path to the retrieved output folder
    #[arg(long)]
    retrieved: PathBuf,

    /// Directory path inside the folder (defaults to the root)
    #[arg(default_value = "")]
    path: String,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let rt = tokio::runtime::Runtime::new()?;

  match cli.command {
    Some(Commands::Run {
      a,
      b,
      no_negative,
      detach,
    }) => {
      rt.block_on(run_add(a, b, no_negative, detach))?;
    }
    Some(Commands::Parse {
      retrieved,
      output_file,
      no_negative,
    }) => {
      rt.block_on(parse_retrieved(retrieved, output_file, no_negative))?;
    }
    Some(Commands::Ls { retrieved, path }) => {
      rt.block_on(list_retrieved(retrieved, path))?;
    }
    None => {
      println!("lupine - use --help to see available commands");
    }
  }

  Ok(())
}

/// Descriptor for the built-in arithmetic-add process.
fn add_descriptor(allow_negative: bool) -> ProcessDescriptor {
  ProcessDescriptor::build("add", &["a", "b"], move |inputs| {
    let (Some(a), Some(b)) = (
      inputs.get("a").and_then(Value::as_i64),
      inputs.get("b").and_then(Value::as_i64),
    ) else {
      return ProcessOutput::Failure(ProcessFailure::new(
        ExitCode::InvalidOutput,
        "inputs 'a' and 'b' must be integers",
      ));
    };

    let sum = a + b;
    if !allow_negative && sum < 0 {
      return ProcessOutput::Failure(ProcessFailure::new(
        ExitCode::NegativeNumber,
        format!("negative sum {} rejected", sum),
      ));
    }

    ProcessOutput::Value(json!(sum))
  })
}

async fn run_add(a: i64, b: i64, no_negative: bool, detach: bool) -> Result<()> {
  let engine = ExecutionEngine::new();
  let descriptor = add_descriptor(!no_negative);
  let args = [json!(a), json!(b)];

  if detach {
    let inputs = descriptor.bind(&args, &InputMapping::new())?;
    let handle = engine.submit(descriptor.clone(), inputs);

    eprintln!("submitted process {}", handle.process_id());
    eprintln!("state after submit: {:?}", handle.state());

    match handle.wait().await? {
      ProcessOutcome::Resolved(outputs) => match resolve(&descriptor, outputs) {
        Resolved::Value(value) => print_value(&value)?,
        Resolved::Mapping(outputs) => print_mapping(&outputs)?,
      },
      ProcessOutcome::Failed(failure) => print_failure(&failure)?,
    }

    return Ok(());
  }

  match engine.run(descriptor, &args, &InputMapping::new()).await? {
    RunOutcome::Value(value) => print_value(&value)?,
    RunOutcome::Mapping(outputs) => print_mapping(&outputs)?,
    RunOutcome::Failed(failure) => print_failure(&failure)?,
  }

  Ok(())
}

async fn parse_retrieved(retrieved: PathBuf, output_file: String, no_negative: bool) -> Result<()> {
  let mut parser = AddParser::new(output_file);
  if no_negative {
    let mut values = serde_json::Map::new();
    values.insert("allow_negative".to_string(), json!(false));
    parser = parser.with_settings(Settings::new(values));
  }

  // A missing folder maps to the retrieved-folder exit code rather than
  // an open error on the first file.
  let store = FsStore::new(&retrieved);
  let folder_exists = tokio::fs::try_exists(&retrieved).await.unwrap_or(false);
  let store_ref: Option<&dyn Store> = if folder_exists { Some(&store) } else { None };

  match parser.parse(store_ref).await {
    Ok(outputs) => print_mapping(&outputs)?,
    Err(failure) => print_failure(&failure)?,
  }

  Ok(())
}

async fn list_retrieved(retrieved: PathBuf, path: String) -> Result<()> {
  let store = FsStore::new(&retrieved);
  let entries = store
    .list(&path)
    .await
    .with_context(|| format!("failed to list '{}' in {}", path, retrieved.display()))?;

  for entry in entries {
    // Directories are bold, everything gets the repository color.
    let styled = if entry.kind == EntryKind::Directory {
      entry.name.bold().blue()
    } else {
      entry.name.blue()
    };
    println!("{}", styled);
  }

  Ok(())
}

fn print_value(value: &Value) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

fn print_mapping(outputs: &OutputMapping) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(outputs)?);
  Ok(())
}

fn print_failure(failure: &ProcessFailure) -> Result<()> {
  let report = json!({
    "exit_code": failure.code.label(),
    "status": failure.code.status(),
    "message": failure.message,
  });
  println!("{}", serde_json::to_string_pretty(&report)?);
  Ok(())
}
