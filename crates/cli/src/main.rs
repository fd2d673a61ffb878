//! # planilla-cli
//!
//! Command-line interface for the mensualizados post-processor and the
//! signature annex generator.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use planilla_annex::{AnnexInput, AnnexOptions, AnnexRequest};
use planilla_mensualizados::{Area, MensualizadosOptions, MensualizadosRequest};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// planilla - spreadsheet utilities for personnel records
#[derive(Parser)]
#[command(name = "planilla")]
#[command(author, version, about = "Mensualizados post-processing and signature annexes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON file overriding the processing options
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List the areas accepted by `mensualizados`
    Areas,

    /// Clean a mensualizados spreadsheet, splitting it per office when the area requires it
    Mensualizados {
        /// Area the spreadsheet belongs to
        #[arg(short, long)]
        area: Option<String>,

        /// Spreadsheet to process
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Directory for the generated files
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Build a landscape annex document from one or more spreadsheets
    Anexos {
        /// Spreadsheets to include, in order
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Document title, also used as the file name
        #[arg(short, long, default_value = "")]
        title: String,

        /// Directory for the generated document
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

/// Options file layout; every section is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    mensualizados: MensualizadosOptions,
    annex: AnnexOptions,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Areas => {
            print_areas();
            Ok(())
        }
        Command::Mensualizados {
            area,
            file,
            out_dir,
        } => run_mensualizados(
            area.as_deref().unwrap_or_default(),
            &file,
            &out_dir,
            &config.mensualizados,
        ),
        Command::Anexos {
            files,
            title,
            out_dir,
        } => run_anexos(&files, &title, &out_dir, &config.annex),
    }
}

/// Read the options file, or fall back to defaults when none is given.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    serde_json::from_str(&source)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

fn print_areas() {
    for area in Area::ALL {
        if area.splits_by_office() {
            println!("{} {}", area.label(), "(one file per office)".dimmed());
        } else {
            println!("{}", area.label());
        }
    }
}

fn run_mensualizados(
    area: &str,
    file: &Path,
    out_dir: &Path,
    options: &MensualizadosOptions,
) -> Result<()> {
    let area: Area = area.parse()?;
    let bytes = std::fs::read(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let request = MensualizadosRequest::read(area, &bytes)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let outputs = planilla_mensualizados::process(&request, options)
        .with_context(|| format!("Failed to process {}", file.display()))?;

    for output in &outputs {
        let path = write_output(out_dir, &output.file_name, &output.bytes)?;
        println!("{} {}", output.label.cyan(), path.display());
    }
    println!(
        "{} {} file(s) for {}",
        "Done:".green().bold(),
        outputs.len(),
        request.area
    );
    Ok(())
}

fn run_anexos(files: &[PathBuf], title: &str, out_dir: &Path, options: &AnnexOptions) -> Result<()> {
    let inputs = files
        .iter()
        .map(AnnexInput::from_path)
        .collect::<Result<Vec<_>, _>>()?;
    let request = AnnexRequest::new(title, inputs);
    let output = planilla_annex::build(&request, options)?;

    let path = write_output(out_dir, &output.file_name, &output.bytes)?;
    println!("{} {}", "Done:".green().bold(), path.display());
    Ok(())
}

/// Write one generated file under `out_dir`, creating the directory if needed.
fn write_output(out_dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create directory: {}", out_dir.display()))?;
    let path = out_dir.join(file_name);
    std::fs::write(&path, bytes)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(path)
}
