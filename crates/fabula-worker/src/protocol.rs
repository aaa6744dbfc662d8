//! Wire messages between host and worker
//!
//! The protocol is deliberately tiny: the host sends tagged solve requests,
//! the worker answers with tagged results or errors, plus a single ready
//! signal on startup. The host matches answers to requests by id and drops
//! anything stale, so the worker never needs to know about cancellation.

use fabula_domain::{SolveRequest, SolveResponse};
use serde::{Deserialize, Serialize};

/// Messages the host sends to the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    /// Run the solver over `input` and answer with the same `request_id`.
    Solve {
        /// Id the answer must echo.
        request_id: u64,
        /// The scene to solve.
        input: SolveRequest,
    },
}

/// Messages the worker sends to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkerMessage {
    /// Emitted once when the worker loop starts.
    Ready,

    /// A completed solve.
    Result {
        /// Id of the request this answers.
        request_id: u64,
        /// The solver's response.
        result: SolveResponse,
    },

    /// A failed solve: the solver rejected the input or panicked.
    Error {
        /// Id of the request this answers.
        request_id: u64,
        /// Human-readable failure description.
        error_message: String,
    },
}

impl WorkerMessage {
    /// The request id this message answers, if any.
    pub fn request_id(&self) -> Option<u64> {
        match self {
            WorkerMessage::Ready => None,
            WorkerMessage::Result { request_id, .. } => Some(*request_id),
            WorkerMessage::Error { request_id, .. } => Some(*request_id),
        }
    }
}
