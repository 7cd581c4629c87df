//! Command-line interface wiring for trendscope.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod analyze;
pub mod report;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Content trend and sentiment explorer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Analyze(args) => analyze::run(args, settings),
            Commands::Report(args) => report::run(args, settings),
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the analysis pipeline over a collected item store.
    Analyze(analyze::Args),
    /// Print summary tables from an enriched store.
    Report(report::Args),
}
