//! # tabella-cli
//!
//! Command-line interface for converting PDF tables to xlsx.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tabella_convert::{convert_file, ConvertOptions, SheetLayout, Strategy};
use tracing_subscriber::EnvFilter;

/// tabella - extract tables from PDF files into xlsx workbooks
#[derive(Parser)]
#[command(name = "tabella")]
#[command(author, version, about = "Convert PDF tables to xlsx", long_about = None)]
struct Cli {
    /// PDF file to convert
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output xlsx path (defaults to the input name with an .xlsx extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Table detection strategy
    #[arg(short, long, default_value = "lattice")]
    strategy: Strategy,

    /// Write all tables into a single worksheet instead of one per table
    #[arg(short, long)]
    merged: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("xlsx"));

    let options = ConvertOptions {
        strategy: cli.strategy,
        layout: if cli.merged {
            SheetLayout::Merged
        } else {
            SheetLayout::PerTable
        },
    };

    let summary = convert_file(&cli.input, &output, &options)
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

    println!(
        "Wrote {} ({} tables, {} sheets)",
        output.display(),
        summary.tables_found,
        summary.sheets_written
    );

    Ok(())
}
