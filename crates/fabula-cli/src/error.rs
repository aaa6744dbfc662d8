//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Scene file parsing error
    #[error("Scene parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Solver rejected the scene
    #[error("Solver error: {0}")]
    Solver(#[from] fabula_solver::SolverError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
