//! # voltrec Converter
//!
//! A command-line tool for converting chemical-contaminant reference tables
//! (CSV) into per-voltage peak records embedded as data literals.
//!
//! ## Usage
//!
//! ```bash
//! # Process the built-in reference tables into output_data.py
//! voltrec convert
//!
//! # Enumerate sources from a config file
//! voltrec convert --config voltrec.toml --output output_data.py
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

use voltrec::artifact::Artifact;
use voltrec::config::{Config, SourceSpec};
use voltrec::expand::expand;
use voltrec::table::SourceTable;

/// voltrec - Contaminant Reference Table Converter
#[derive(Parser)]
#[command(name = "voltrec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert reference tables to per-voltage record literals
    Convert {
        /// TOML config enumerating source tables (defaults to the built-in mapping)
        #[arg(short = 'C', long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Output artifact path
        #[arg(short, long, default_value = "output_data.py")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Convert { config, output } => run_convert(config, output),
    }
}

/// Convert all configured source tables into a single output artifact
fn run_convert(config: Option<PathBuf>, output: PathBuf) -> Result<()> {
    let (sources, output) = resolve_sources(config, output)?;

    info!("voltrec Converter - CSV to per-voltage records");
    info!("==============================================");
    info!("Sources: {}", sources.len());
    info!("Output:  {}", output.display());

    let mut artifact = Artifact::new();

    for source in &sources {
        info!("Processing {} -> {}", source.path.display(), source.name);

        if !source.path.exists() {
            anyhow::bail!("Source table does not exist: {}", source.path.display());
        }

        let table = SourceTable::from_path(&source.path)
            .with_context(|| format!("Failed to load {}", source.path.display()))?;
        let records = expand(&table)
            .with_context(|| format!("Failed to expand {}", source.path.display()))?;

        info!("  {} rows -> {} records", table.len(), records.len());

        artifact
            .push(&source.name, &records)
            .with_context(|| format!("Failed to serialize records for '{}'", source.name))?;
    }

    // Single overwrite-mode write; re-running never duplicates blocks.
    artifact
        .write_to(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    print_completion(&output);
    Ok(())
}

/// Resolve the source enumeration and output path from config or defaults
fn resolve_sources(
    config: Option<PathBuf>,
    cli_output: PathBuf,
) -> Result<(Vec<SourceSpec>, PathBuf)> {
    let (sources, output) = match config {
        Some(path) => {
            let config = Config::from_file(&path)?;
            let output = config.output.unwrap_or(cli_output);
            (config.sources, output)
        }
        None => (Config::default_sources(), cli_output),
    };

    if sources.is_empty() {
        anyhow::bail!("No source tables configured");
    }

    Ok((sources, output))
}

#[cfg(feature = "colorized_output")]
fn print_completion(output: &Path) {
    use console::style;
    println!(
        "{} The results have been saved to '{}' with appropriate variable names.",
        style("✓").green().bold(),
        output.display()
    );
}

#[cfg(not(feature = "colorized_output"))]
fn print_completion(output: &Path) {
    println!(
        "The results have been saved to '{}' with appropriate variable names.",
        output.display()
    );
}
