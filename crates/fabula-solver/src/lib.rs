//! Fabula Solver
//!
//! Turns qualitative temporal assertions into a concrete one-dimensional
//! layout. Assertions use Allen's interval algebra; the solver compiles
//! them into a simple temporal network, checks it for consistency, repairs
//! contradictions by confidence-weighted priority and maps the resulting
//! distances onto a display axis.
//!
//! # Pipeline
//!
//! ```text
//! Events + Assertions
//!       → compile (Allen relations → difference constraints)
//!       → graph   (weighted multigraph, provenance-tagged edges)
//!       → propagate (Bellman-Ford, negative-cycle witnesses)
//!       → relax   (discard weakest assertion per witness, rebuild, retry)
//!       → place   (distances → padded display coordinates)
//! ```
//!
//! # Key properties
//!
//! - **Pure and synchronous**: one call in, one response out; no I/O, no
//!   logging, no state shared between calls.
//! - **Deterministic**: identical inputs produce identical layouts,
//!   violations and conflicts.
//! - **Greedy repair**: each conflict loses its weakest member; the result
//!   is predictable, not globally minimal, by design.
//!
//! # Example
//!
//! ```
//! use fabula_domain::{AllenRelation, Assertion, Confidence, Event, SolveRequest, SolveStatus};
//! use fabula_solver::Solver;
//!
//! let solver = Solver::default_config();
//! let response = solver
//!     .solve(&SolveRequest {
//!         events: vec![Event::interval("war"), Event::instant("treaty")],
//!         assertions: vec![Assertion::new(
//!             "r1",
//!             "treaty",
//!             "war",
//!             AllenRelation::After,
//!             Confidence::Explicit,
//!         )],
//!     })
//!     .unwrap();
//!
//! assert_eq!(response.status, SolveStatus::Satisfiable);
//! let war = response.position(&"war".into()).unwrap();
//! let treaty = response.position(&"treaty".into()).unwrap();
//! assert!(war.end < treaty.start);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compile;
pub mod config;
pub mod conflicts;
pub mod error;
pub mod graph;
pub mod place;
pub mod propagate;
pub mod relax;
pub mod solver;

// Re-exports for convenience
pub use config::SolverConfig;
pub use conflicts::find_all_conflicts;
pub use error::SolverError;
pub use solver::Solver;
