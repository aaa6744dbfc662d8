//! Fabula Worker
//!
//! Background execution host for the fabula solver. The solver itself is a
//! plain synchronous function; this crate keeps it off the caller's loop
//! and supplies the bookkeeping an interactive editor needs around it.
//!
//! # Overview
//!
//! - **Worker**: one tokio task owning one solver, answering requests one
//!   at a time on the blocking pool
//! - **Protocol**: tagged `solve` / `result` / `error` messages plus one
//!   `ready` signal on startup
//! - **Host**: issues request ids, drops answers superseded by a newer
//!   request, respawns a crashed worker and retries within a bounded budget
//! - **Metrics**: counters for requests, stale discards, crashes, respawns
//! - **Stdio transport**: the same protocol as newline-delimited JSON over
//!   stdin/stdout, for hosts that keep the solver in a separate process
//!   (`fabula-worker` binary)
//!
//! Cancellation is discard-on-return: the solver is never interrupted
//! mid-computation; an obsolete answer is simply dropped when it arrives.
//!
//! # Usage
//!
//! ```no_run
//! use fabula_domain::SolveRequest;
//! use fabula_solver::SolverConfig;
//! use fabula_worker::{SolverHost, WorkerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fabula_worker::WorkerError> {
//!     let mut host = SolverHost::start(SolverConfig::default(), WorkerConfig::default()).await?;
//!
//!     let response = host.solve(SolveRequest::default()).await?;
//!     println!("status: {:?}", response.status);
//!     println!("{}", host.metrics().summary());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod host;
mod metrics;
mod protocol;
mod stdio;
mod worker;

pub use config::WorkerConfig;
pub use error::WorkerError;
pub use host::SolverHost;
pub use metrics::HostMetrics;
pub use protocol::{HostMessage, WorkerMessage};
pub use stdio::StdioServer;
pub use worker::{SolverWorker, WorkerHandle};
