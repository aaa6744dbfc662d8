//! The solver worker task
//!
//! One tokio task owning one solver. Requests arrive on a channel, run on
//! the blocking pool so the async runtime never stalls on a long solve, and
//! answers go back in completion order. A panicking solve is caught at the
//! task-join boundary and answered as an error; the worker itself stays up.

use crate::config::WorkerConfig;
use crate::protocol::{HostMessage, WorkerMessage};
use fabula_solver::{Solver, SolverConfig};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Channels and task handle of a running worker.
pub struct WorkerHandle {
    /// Send solve requests here.
    pub requests: mpsc::Sender<HostMessage>,

    /// Receive ready/result/error messages here.
    pub responses: mpsc::Receiver<WorkerMessage>,

    /// The worker task itself.
    pub task: JoinHandle<()>,
}

/// Factory for solver worker tasks.
///
/// Holds the configurations a worker is built from, so a crashed worker can
/// be respawned identically.
///
/// # Examples
///
/// ```no_run
/// use fabula_domain::SolveRequest;
/// use fabula_worker::{HostMessage, SolverWorker, WorkerMessage};
///
/// # async fn example() {
/// let mut handle = SolverWorker::default_config().spawn();
///
/// // First message is always Ready.
/// assert_eq!(handle.responses.recv().await, Some(WorkerMessage::Ready));
///
/// handle
///     .requests
///     .send(HostMessage::Solve {
///         request_id: 1,
///         input: SolveRequest::default(),
///     })
///     .await
///     .unwrap();
/// let answer = handle.responses.recv().await.unwrap();
/// assert_eq!(answer.request_id(), Some(1));
/// # }
/// ```
pub struct SolverWorker {
    solver_config: SolverConfig,
    config: WorkerConfig,
}

impl SolverWorker {
    /// Create a worker factory with the given configurations.
    pub fn new(solver_config: SolverConfig, config: WorkerConfig) -> Self {
        Self {
            solver_config,
            config,
        }
    }

    /// Create a worker factory with default configurations.
    pub fn default_config() -> Self {
        Self::new(SolverConfig::default(), WorkerConfig::default())
    }

    /// Spawn a fresh worker task.
    pub fn spawn(&self) -> WorkerHandle {
        let (request_tx, request_rx) = mpsc::channel(self.config.channel_capacity);
        let (response_tx, response_rx) = mpsc::channel(self.config.channel_capacity);
        let solver = Arc::new(Solver::new(self.solver_config.clone()));

        let task = tokio::spawn(run(solver, request_rx, response_tx));

        WorkerHandle {
            requests: request_tx,
            responses: response_rx,
            task,
        }
    }
}

/// The worker loop: announce readiness, then answer requests one at a time
/// until the host hangs up.
async fn run(
    solver: Arc<Solver>,
    mut requests: mpsc::Receiver<HostMessage>,
    responses: mpsc::Sender<WorkerMessage>,
) {
    if responses.send(WorkerMessage::Ready).await.is_err() {
        return;
    }
    tracing::info!("solver worker ready");

    while let Some(HostMessage::Solve { request_id, input }) = requests.recv().await {
        tracing::debug!(request_id, events = input.events.len(), "solve request");

        let worker_solver = Arc::clone(&solver);
        let outcome = tokio::task::spawn_blocking(move || worker_solver.solve(&input)).await;

        let answer = match outcome {
            Ok(Ok(result)) => {
                tracing::debug!(request_id, elapsed_ms = result.elapsed_ms, "solve complete");
                WorkerMessage::Result { request_id, result }
            }
            Ok(Err(error)) => {
                tracing::warn!(request_id, %error, "solver rejected request");
                WorkerMessage::Error {
                    request_id,
                    error_message: error.to_string(),
                }
            }
            Err(join_error) => {
                let error_message = if join_error.is_panic() {
                    "solver worker crashed".to_string()
                } else {
                    "solver task was cancelled".to_string()
                };
                tracing::error!(request_id, %error_message, "solve failed");
                WorkerMessage::Error {
                    request_id,
                    error_message,
                }
            }
        };

        if responses.send(answer).await.is_err() {
            // Host is gone; nothing left to do.
            break;
        }
    }

    tracing::info!("solver worker stopped");
}
