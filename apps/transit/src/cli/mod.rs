//! # Transit CLI Module
//!
//! This module implements the CLI interface for the transit query tool.
//!
//! ## Available Commands
//!
//! - `process` - Answer the stat requests of a document (default)
//! - `status` - Summarise the network a document describes

mod commands;

use crate::{AppConfig, CliError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Transit - bus network statistics and journey planning
///
/// Reads a JSON document of stops, buses and stat requests and answers
/// every request.
#[derive(Parser, Debug)]
#[command(name = "transit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Answer the stat requests of a document
    Process {
        /// Input document (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a summary of the described network
    Status {
        /// Input document (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if cli.pretty {
        config.output.pretty = true;
    }

    match cli.command {
        Some(Commands::Process { input, output }) => {
            cmd_process(&config, input.as_deref(), output.as_deref())
        }
        Some(Commands::Status { input, json }) => cmd_status(&config, input.as_deref(), json),
        None => cmd_process(&config, None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["transit", "status", "-i", "doc.json", "--json", "--pretty"])
            .expect("parse");
        assert!(cli.pretty);
        match cli.command {
            Some(Commands::Status { input, json }) => {
                assert_eq!(input, Some(PathBuf::from("doc.json")));
                assert!(json);
            }
            other => unreachable!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn command_is_optional() {
        let cli = Cli::try_parse_from(["transit"]).expect("parse");
        assert!(cli.command.is_none());
    }
}
