use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use petrdf::config::{Config, ReaderConfig};

mod check;
mod demo;
mod info;
mod probe;

/// GE RDF9 PET raw data inspector
#[derive(Parser)]
#[command(name = "petrdf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML configuration file (see petrdf.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// File kind written by `petrdf demo`
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum DemoKind {
    /// List-mode file with 1000 singles samples
    #[default]
    List,
    /// Sinogram file with two views
    Sino,
    /// Geometric correction file
    Geo,
    /// Normalisation file
    Norm,
}

#[derive(Subcommand)]
enum Commands {
    /// Print classification, scanner, exam and geometry of an RDF file
    Info {
        /// RDF file (HDF5, or a JSON container dump)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Inspect an RDF file stage by stage
    Check {
        /// RDF file (HDF5, or a JSON container dump)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the findings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Exit with status 0 if FILE carries the GE signature, 1 otherwise
    Probe {
        /// File to probe
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write a synthetic RDF9 container as a JSON dump
    Demo {
        /// Output JSON path
        #[arg(value_name = "OUTPUT", default_value = "demo_rdf9.json")]
        output: PathBuf,

        /// File kind to generate
        #[arg(short, long, default_value = "list", value_enum)]
        kind: DemoKind,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// Reader settings from `--config`, or the defaults
fn load_config(path: Option<&Path>) -> Result<ReaderConfig> {
    match path {
        Some(path) => {
            let config = Config::from_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?;
            log::info!("Loaded configuration from {}", path.display());
            Ok(config.reader)
        }
        None => Ok(ReaderConfig::default()),
    }
}

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info { file, json } => info::run(file, config, json),
        Commands::Check { file, json } => check::run(file, config, json),
        Commands::Probe { file } => probe::run(file),
        Commands::Demo { output, kind } => demo::run(output, kind),
    }
}
