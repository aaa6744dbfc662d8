//! Error types for worker operations

use thiserror::Error;

/// Errors that can occur while driving the solver worker.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The worker's channels closed unexpectedly
    #[error("Worker channel closed")]
    ChannelClosed,

    /// The worker task died while a request was outstanding
    #[error("Solver worker crashed: {0}")]
    WorkerCrashed(String),

    /// Crash-recovery retries were exhausted
    #[error("Solver worker failed after {attempts} attempts")]
    RetriesExhausted {
        /// How many times the request was attempted
        attempts: usize,
    },

    /// Configuration error
    #[error("Worker configuration error: {0}")]
    Config(String),

    /// I/O error on the stdio transport
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The solver rejected the request as malformed
    #[error("Solver rejected request: {0}")]
    Rejected(String),
}
