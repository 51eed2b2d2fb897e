//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvDirectoryAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::engine::FactEngine;
use crate::domain::error::FactsError;
use crate::domain::settings::{resolve_data_dir, EngineSettings};
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "fundfacts", about = "Grounded facts for questions about fund datasets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where datasets and settings come from.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Directory of CSV datasets
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
    /// INI configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute facts for a question
    Facts {
        #[arg(short, long)]
        question: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the schema sample of every dataset
    Schema {
        #[arg(short, long)]
        rows: Option<usize>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Check that at least one valid dataset loads
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// List the known fund and portfolio names
    Entities {
        #[command(flatten)]
        source: SourceArgs,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Facts { question, source } => run_facts(&question, &source),
        Command::Schema { rows, source } => run_schema(rows, &source),
        Command::Validate { source } => run_validate(&source),
        Command::Entities { source } => run_entities(&source),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    let adapter = FileConfigAdapter::from_file(path).map_err(|err| {
        tracing::error!("{err}");
        ExitCode::from(&err)
    })?;
    tracing::debug!(origin = adapter.origin(), "settings loaded");
    Ok(adapter)
}

/// Resolve settings and data directory, then load every dataset.
pub fn build_engine(source: &SourceArgs) -> Result<FactEngine, ExitCode> {
    let config = match source.config.as_ref() {
        Some(path) => Some(load_config(path)?),
        None => None,
    };
    let config_port = config.as_ref().map(|c| c as &dyn ConfigPort);

    let settings = match config_port {
        Some(c) => EngineSettings::from_config(c).map_err(|e| {
            tracing::error!("{e}");
            ExitCode::from(&e)
        })?,
        None => EngineSettings::default(),
    };

    let data_dir = resolve_data_dir(source.data_dir.as_ref(), config_port);
    tracing::info!("Loading datasets from {}", data_dir.display());
    let adapter = CsvDirectoryAdapter::new(data_dir);
    Ok(FactEngine::from_port(&adapter, settings))
}

fn run_facts(question: &str, source: &SourceArgs) -> ExitCode {
    let engine = match build_engine(source) {
        Ok(e) => e,
        Err(code) => return code,
    };
    println!("{}", engine.facts_for(question).render());
    ExitCode::SUCCESS
}

fn run_schema(rows: Option<usize>, source: &SourceArgs) -> ExitCode {
    let engine = match build_engine(source) {
        Ok(e) => e,
        Err(code) => return code,
    };
    let sample = match rows {
        Some(n) => engine.registry().schema_sample(n),
        None => engine.schema_sample(),
    };
    print!("{sample}");
    ExitCode::SUCCESS
}

fn run_validate(source: &SourceArgs) -> ExitCode {
    let engine = match build_engine(source) {
        Ok(e) => e,
        Err(code) => return code,
    };
    if !engine.is_valid() {
        let err = FactsError::EmptyRegistry;
        eprintln!("error: {err}");
        return (&err).into();
    }

    println!("{} datasets loaded", engine.registry().len());
    for table in engine.registry().tables() {
        println!(
            "  {}: {} rows, {} columns",
            table.source,
            table.row_count(),
            table.column_count()
        );
    }
    ExitCode::SUCCESS
}

fn run_entities(source: &SourceArgs) -> ExitCode {
    let engine = match build_engine(source) {
        Ok(e) => e,
        Err(code) => return code,
    };
    for entity in engine.known_entities() {
        println!("{entity}");
    }
    ExitCode::SUCCESS
}
