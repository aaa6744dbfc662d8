//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Fabula CLI - Solve qualitative chronologies into linear layouts.
#[derive(Debug, Parser)]
#[command(name = "fabula")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one `event start end` line per position)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve a scene file into display positions
    Solve(SolveArgs),

    /// Scan a scene file for contradictions without repairing them
    Conflicts(ConflictsArgs),

    /// List the Allen relation vocabulary
    Relations,
}

/// Arguments for the solve command.
#[derive(Debug, Parser)]
pub struct SolveArgs {
    /// Scene file (JSON with `events` and `assertions` lists)
    pub scene: String,

    /// Solver configuration file (TOML); defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<String>,
}

/// Arguments for the conflicts command.
#[derive(Debug, Parser)]
pub struct ConflictsArgs {
    /// Scene file (JSON with `events` and `assertions` lists)
    pub scene: String,

    /// Solver configuration file (TOML); defaults apply when omitted
    #[arg(short, long)]
    pub config: Option<String>,
}
