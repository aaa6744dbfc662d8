//! Fabula CLI library - command definitions, formatting and execution.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat, Command};
pub use error::{CliError, Result};
pub use output::{Formatter, OutputFormat};
