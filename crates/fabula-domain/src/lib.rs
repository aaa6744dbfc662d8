//! Fabula Domain Layer
//!
//! This crate contains the core domain model for fabula, a chronology solver
//! that places qualitatively-ordered events on a linear axis. It defines the
//! fundamental concepts and wire types that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Event**: a named entity on the timeline, either an instant (zero
//!   width) or an interval (nonzero width)
//! - **Allen Relation**: one of the thirteen qualitative relations between
//!   two intervals (before, meets, overlaps, during, ...)
//! - **Assertion**: a directed claim that one event stands in an Allen
//!   relation to another, tagged with a confidence tier
//! - **Confidence**: ordinal trust level (explicit → inferred → speculation)
//!   controlling which assertions are sacrificed first when they conflict
//! - **Solve request/response**: the wire contract between the editor, the
//!   solver, and the renderer
//!
//! ## Architecture
//!
//! This crate holds pure data and type-level invariants only. The solving
//! pipeline lives in `fabula-solver`; the execution host lives in
//! `fabula-worker`. Nothing here performs I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assertion;
pub mod confidence;
pub mod event;
pub mod relation;
pub mod solve;

// Re-exports for convenience
pub use assertion::{Assertion, AssertionId};
pub use confidence::{Confidence, Severity};
pub use event::{DurationKind, Event, EventId};
pub use relation::AllenRelation;
pub use solve::{Conflict, Position, SolveRequest, SolveResponse, SolveStatus, Violation};
