//! Command-line interface for rollup
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;

mod cycles;
mod percentages;
mod stats;
mod validate;

/// rollup - task completion rollup
///
/// Loads a flat list of task records with parent links, checks the
/// hierarchy for cycles, and reports how much of each task's subtree
/// is closed.
#[derive(Parser, Debug)]
#[command(name = "rollup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a config file (defaults to ./.rollup.toml)
    #[arg(long, global = true, env = "ROLLUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Completion percentage for every task
    Percentages {
        /// JSON file of task records ("-" for stdin)
        file: PathBuf,

        /// Skip the cycle check before computing stats
        #[arg(long)]
        no_validate: bool,
    },

    /// Check the hierarchy for cycles
    Validate {
        /// JSON file of task records ("-" for stdin)
        file: PathBuf,
    },

    /// List every cycle in the hierarchy
    Cycles {
        /// JSON file of task records ("-" for stdin)
        file: PathBuf,
    },

    /// Subtree counts for one task or all tasks
    Stats {
        /// JSON file of task records ("-" for stdin)
        file: PathBuf,

        /// Task id (all tasks when omitted)
        task: Option<String>,

        /// Skip the cycle check before computing stats
        #[arg(long)]
        no_validate: bool,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let config = resolve_config(self.config.as_deref())?;
        let output = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command {
            Commands::Percentages { file, no_validate } => {
                percentages::run(percentages::PercentagesOptions {
                    validate: config.analysis.validate && !no_validate,
                    precision: config.output.precision,
                    file,
                    output,
                })
            }
            Commands::Validate { file } => validate::run(validate::ValidateOptions { file, output }),
            Commands::Cycles { file } => cycles::run(cycles::CyclesOptions { file, output }),
            Commands::Stats {
                file,
                task,
                no_validate,
            } => stats::run(stats::StatsOptions {
                validate: config.analysis.validate && !no_validate,
                precision: config.output.precision,
                file,
                task,
                output,
            }),
        }
    }
}

/// An explicit config path must load; otherwise fall back to the working
/// directory, then defaults.
fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Ok(Config::load_from_dir(&cwd))
        }
    }
}
