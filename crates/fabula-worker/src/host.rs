//! The solver host
//!
//! Owns a worker, tags every request with a fresh id and treats the newest
//! id as the only one that matters: answers to any other id are counted and
//! dropped on arrival. A worker that dies mid-request is replaced and the
//! request retried a bounded number of times.

use crate::config::WorkerConfig;
use crate::error::WorkerError;
use crate::metrics::HostMetrics;
use crate::protocol::{HostMessage, WorkerMessage};
use crate::worker::{SolverWorker, WorkerHandle};
use fabula_domain::{SolveRequest, SolveResponse};
use fabula_solver::SolverConfig;

/// Front door for callers that want solves off their own loop.
///
/// # Examples
///
/// ```no_run
/// use fabula_domain::SolveRequest;
/// use fabula_solver::SolverConfig;
/// use fabula_worker::{SolverHost, WorkerConfig};
///
/// # async fn example() -> Result<(), fabula_worker::WorkerError> {
/// let mut host = SolverHost::start(SolverConfig::default(), WorkerConfig::default()).await?;
/// let response = host.solve(SolveRequest::default()).await?;
/// println!("solved in {} ms", response.elapsed_ms);
/// # Ok(())
/// # }
/// ```
pub struct SolverHost {
    worker: SolverWorker,
    handle: WorkerHandle,
    config: WorkerConfig,
    next_request_id: u64,
    metrics: HostMetrics,
}

impl SolverHost {
    /// Spawn a worker and wait for its ready signal.
    pub async fn start(
        solver_config: SolverConfig,
        config: WorkerConfig,
    ) -> Result<Self, WorkerError> {
        config.validate()?;
        let worker = SolverWorker::new(solver_config, config.clone());
        let mut handle = worker.spawn();
        wait_ready(&mut handle).await?;

        Ok(Self {
            worker,
            handle,
            config,
            next_request_id: 0,
            metrics: HostMetrics::new(),
        })
    }

    /// Solve one request on the worker.
    ///
    /// The request supersedes any earlier one: an answer still in flight
    /// for an older id is discarded when it arrives. If the worker dies
    /// mid-request it is respawned and the request retried, up to the
    /// configured limit.
    pub async fn solve(&mut self, input: SolveRequest) -> Result<SolveResponse, WorkerError> {
        self.next_request_id += 1;
        let request_id = self.next_request_id;

        let max_attempts = self.config.max_crash_retries + 1;
        for _attempt in 0..max_attempts {
            if self
                .handle
                .requests
                .send(HostMessage::Solve {
                    request_id,
                    input: input.clone(),
                })
                .await
                .is_err()
            {
                // Worker already dead; replace it and try again.
                self.metrics.record_crash();
                self.respawn().await?;
                continue;
            }
            self.metrics.record_request();

            match self.await_answer(request_id).await? {
                Some(answer) => return answer,
                // Worker died before answering; replace it and retry.
                None => {
                    self.metrics.record_crash();
                    self.respawn().await?;
                }
            }
        }

        Err(WorkerError::RetriesExhausted {
            attempts: max_attempts,
        })
    }

    /// The host's operation counters.
    pub fn metrics(&self) -> &HostMetrics {
        &self.metrics
    }

    /// Reset the host's operation counters.
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Receive until the outstanding id answers or the worker dies.
    ///
    /// Returns `Ok(None)` when the channel closed with the request
    /// unanswered.
    async fn await_answer(
        &mut self,
        request_id: u64,
    ) -> Result<Option<Result<SolveResponse, WorkerError>>, WorkerError> {
        loop {
            let Some(message) = self.handle.responses.recv().await else {
                return Ok(None);
            };
            match message {
                WorkerMessage::Ready => continue,
                WorkerMessage::Result {
                    request_id: answered,
                    result,
                } => {
                    if answered == request_id {
                        self.metrics.record_result();
                        return Ok(Some(Ok(result)));
                    }
                    self.metrics.record_stale();
                    tracing::debug!(answered, outstanding = request_id, "stale result dropped");
                }
                WorkerMessage::Error {
                    request_id: answered,
                    error_message,
                } => {
                    if answered == request_id {
                        self.metrics.record_error();
                        return Ok(Some(Err(WorkerError::Rejected(error_message))));
                    }
                    self.metrics.record_stale();
                    tracing::debug!(answered, outstanding = request_id, "stale error dropped");
                }
            }
        }
    }

    async fn respawn(&mut self) -> Result<(), WorkerError> {
        self.metrics.record_respawn();
        tracing::warn!("respawning solver worker");
        self.handle = self.worker.spawn();
        wait_ready(&mut self.handle).await
    }
}

async fn wait_ready(handle: &mut WorkerHandle) -> Result<(), WorkerError> {
    loop {
        match handle.responses.recv().await {
            Some(WorkerMessage::Ready) => return Ok(()),
            Some(_) => continue,
            None => return Err(WorkerError::ChannelClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_domain::{AllenRelation, Assertion, Confidence, Event, SolveStatus};

    fn scene() -> SolveRequest {
        SolveRequest {
            events: vec![Event::instant("a"), Event::interval("b")],
            assertions: vec![Assertion::new(
                "r1",
                "a",
                "b",
                AllenRelation::Before,
                Confidence::Explicit,
            )],
        }
    }

    async fn host() -> SolverHost {
        SolverHost::start(SolverConfig::default(), WorkerConfig::default())
            .await
            .expect("host starts")
    }

    #[tokio::test]
    async fn test_solve_round_trip() {
        let mut host = host().await;
        let response = host.solve(scene()).await.unwrap();

        assert_eq!(response.status, SolveStatus::Satisfiable);
        assert_eq!(response.positions.len(), 2);
        assert_eq!(host.metrics().results_delivered, 1);
        assert_eq!(host.metrics().stale_discarded, 0);
    }

    #[tokio::test]
    async fn test_request_ids_increase() {
        let mut host = host().await;
        host.solve(scene()).await.unwrap();
        host.solve(scene()).await.unwrap();
        assert_eq!(host.next_request_id, 2);
        assert_eq!(host.metrics().requests_issued, 2);
    }

    #[tokio::test]
    async fn test_malformed_request_is_rejected_not_fatal() {
        let mut host = host().await;

        let mut bad = scene();
        bad.assertions[0].source_id = "missing".into();
        let error = host.solve(bad).await.unwrap_err();
        assert!(matches!(error, WorkerError::Rejected(_)));

        // The worker survives a rejection.
        let response = host.solve(scene()).await.unwrap();
        assert_eq!(response.status, SolveStatus::Satisfiable);
    }

    #[tokio::test]
    async fn test_stale_answers_are_discarded() {
        let mut host = host().await;

        // Inject a request the host never issued; its answer must be
        // dropped while waiting for the real one.
        host.handle
            .requests
            .send(HostMessage::Solve {
                request_id: 999,
                input: scene(),
            })
            .await
            .unwrap();

        let response = host.solve(scene()).await.unwrap();
        assert_eq!(response.status, SolveStatus::Satisfiable);
        assert_eq!(host.metrics().stale_discarded, 1);
        assert_eq!(host.metrics().results_delivered, 1);
    }

    #[tokio::test]
    async fn test_crashed_worker_is_respawned() {
        let mut host = host().await;
        host.solve(scene()).await.unwrap();

        // Kill the worker task outright; the next solve must recover.
        host.handle.task.abort();
        let response = host.solve(scene()).await.unwrap();

        assert_eq!(response.status, SolveStatus::Satisfiable);
        assert!(host.metrics().worker_crashes >= 1);
        assert!(host.metrics().respawns >= 1);
    }
}
