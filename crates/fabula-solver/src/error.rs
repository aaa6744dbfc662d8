//! Error types for solver operations

use fabula_domain::{AssertionId, EventId};
use thiserror::Error;

/// Errors that can occur while preparing a solve.
///
/// These all mark malformed caller input (the programmer-error category);
/// contradictions between well-formed assertions are never errors and
/// surface through the solve response instead.
#[derive(Error, Debug)]
pub enum SolverError {
    /// Configuration failed validation
    #[error("Invalid solver configuration: {0}")]
    InvalidConfig(String),

    /// An assertion references an event absent from the request
    #[error("Assertion {assertion_id} references unknown event {event_id}")]
    UnknownEvent {
        /// The offending assertion
        assertion_id: AssertionId,
        /// The id that matched no event
        event_id: EventId,
    },

    /// Two events share one id
    #[error("Duplicate event id: {0}")]
    DuplicateEvent(EventId),

    /// Two assertions share one id
    #[error("Duplicate assertion id: {0}")]
    DuplicateAssertion(AssertionId),
}
