// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MXC - Structured commit pipeline for Mendix projects
///
/// Transforms raw commit exports into enriched structured commit records.
#[derive(Parser, Debug)]
#[command(name = "mxc")]
#[command(author = "Eshan Roy")]
#[command(version)]
#[command(about = "Structured commit pipeline for Mendix projects", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format for machine-readable output
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Output format for CI and scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text output (default)
    Text,
    /// JSON output for machine parsing
    Json,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Transform a raw export into a structured commit record
    Process(ProcessArgs),

    /// Print commit-message suggestions for a raw export
    Suggest(SuggestArgs),

    /// Print version information
    Version,

    /// Initialize mxc configuration
    Init(InitArgs),
}

/// Arguments for the process command.
#[derive(Parser, Debug, Default, Clone)]
pub struct ProcessArgs {
    /// Path to the raw export file
    pub input: PathBuf,

    /// Output directory (defaults to the configured structured folder)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print the record to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for the suggest command.
#[derive(Parser, Debug, Default, Clone)]
pub struct SuggestArgs {
    /// Path to the raw export file
    pub input: PathBuf,
}

/// Arguments for the init command.
#[derive(Parser, Debug, Default, Clone)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,
}
