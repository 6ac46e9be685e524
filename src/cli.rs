//! The command line interface for the pathway generator.
use crate::config::PathwayFile;
use crate::log;
use crate::model::Model;
use crate::output::{create_output_directory, get_output_dir, write_tables};
use ::log::{info, warn};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// The command line interface for the pathway generator.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Options for the generate command
#[derive(Args)]
pub struct GenerateOpts {
    /// Directory for output files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Whether to overwrite the output directory if it already exists
    #[arg(long)]
    pub overwrite: bool,
}

/// The available commands.
#[derive(Subcommand)]
enum Commands {
    /// Generate the pathway tables for a model.
    Generate {
        /// The folder containing the model's input files.
        model_dir: PathBuf,
        /// Other generate options
        #[command(flatten)]
        opts: GenerateOpts,
    },
    /// Validate a model's configuration and input data.
    Validate {
        /// The folder containing the model's input files.
        model_dir: PathBuf,
    },
}

impl Commands {
    /// Run the selected subcommand
    fn execute(self) -> Result<()> {
        match self {
            Self::Generate { model_dir, opts } => handle_generate_command(&model_dir, &opts),
            Self::Validate { model_dir } => handle_validate_command(&model_dir),
        }
    }
}

/// Parse CLI arguments and run the requested command
pub fn run_cli() -> Result<()> {
    Cli::parse().command.execute()
}

/// Handle the `generate` command.
pub fn handle_generate_command(model_path: &Path, opts: &GenerateOpts) -> Result<()> {
    let config = PathwayFile::from_path(model_path)?;

    let output_path = match &opts.output_dir {
        Some(path) => path.clone(),
        None => get_output_dir(model_path)?,
    };
    let overwritten = create_output_directory(&output_path, opts.overwrite).with_context(|| {
        format!(
            "Could not create output directory {}",
            output_path.display()
        )
    })?;

    log::init(config.log_level.as_deref(), Some(&output_path))
        .context("Failed to initialise logging.")?;

    // The warning can only be logged once the logger exists
    if overwritten {
        warn!("Replacing existing output folder");
    }

    let model = Model::from_config(model_path, config).context("Failed to load model.")?;
    info!("Model loaded from {}", model_path.display());
    info!("Output folder: {}", output_path.display());

    let tables = model.generate()?;
    write_tables(&tables, &model.capacity, &output_path)?;
    info!("Pathway tables written successfully!");

    Ok(())
}

/// Handle the `validate` command.
pub fn handle_validate_command(model_path: &Path) -> Result<()> {
    let config = PathwayFile::from_path(model_path)?;

    // We won't save a log file when running the validate command
    log::init(config.log_level.as_deref(), None).context("Failed to initialise logging.")?;

    Model::from_config(model_path, config).context("Failed to validate model.")?;
    info!("Model input data is valid");

    Ok(())
}
