//! GastosETL CLI — build the consolidated direct-expenditure dataset.
//!
//! Usage:
//! ```bash
//! gastosetl run                      # zips from ., outputs to .
//! gastosetl run --dir data --output out --orgao "UNIVERSIDADE FEDERAL DO CEARA"
//! gastosetl info
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gastosetl_core::{manifest, Pipeline, PipelineConfig, RowFilter};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Institution kept by the default include filter.
const DEFAULT_ORGAO: &str = "UNIVERSIDADE FEDERAL DO CEARA";

#[derive(Parser)]
#[command(
    name = "gastosetl",
    about = "Extract, filter, and normalize zipped direct-expenditure records",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Defaults to `run` with no flags when omitted.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline
    Run {
        /// Directory containing the *.zip inputs
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Directory receiving dataset.csv and the encoder tables
        #[arg(long, default_value = ".")]
        output: PathBuf,
        /// Keep only rows whose 'Nome Órgao' equals this institution
        #[arg(long, default_value = DEFAULT_ORGAO)]
        orgao: String,
        /// Keep every row instead of filtering by institution
        #[arg(long, conflicts_with = "orgao")]
        no_filter: bool,
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show pipeline configuration info
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Bare `gastosetl` reproduces the reference invocation: zips from
    // the working directory, default institution filter.
    let command = cli.command.unwrap_or(Commands::Run {
        dir: PathBuf::from("."),
        output: PathBuf::from("."),
        orgao: DEFAULT_ORGAO.to_string(),
        no_filter: false,
        json: false,
    });

    match command {
        Commands::Run {
            dir,
            output,
            orgao,
            no_filter,
            json,
        } => cmd_run(dir, output, orgao, no_filter, json),
        Commands::Info => {
            cmd_info();
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn cmd_run(
    dir: PathBuf,
    output: PathBuf,
    orgao: String,
    no_filter: bool,
    json: bool,
) -> Result<()> {
    let filter = if no_filter {
        RowFilter::keep_all()
    } else {
        RowFilter::column_equals("Nome Órgao", orgao)
    };

    let config = PipelineConfig {
        input_dir: dir,
        output_dir: output,
        ..PipelineConfig::default()
    };

    let report = Pipeline::new(config, filter)
        .run()
        .context("pipeline failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Done: {} archive(s), {} row(s) scanned, {} row(s) kept",
            report.archives, report.rows_scanned, report.rows_kept
        );
    }
    Ok(())
}

fn cmd_info() {
    println!("GastosETL v{}", env!("CARGO_PKG_VERSION"));
    println!("  Chunk size: {} rows", manifest::DEFAULT_CHUNK_SIZE);
    println!("  Sentinel for missing values: {}", manifest::SENTINEL);
    println!("  Default institution filter: {DEFAULT_ORGAO}");
    println!("  Projected columns:");
    for column in &manifest::COLUMNS {
        println!(
            "    {:<22} -> {} ({:?})",
            column.source,
            column.public_name(),
            column.kind
        );
    }
}
