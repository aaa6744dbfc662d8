//! The solver front door
//!
//! Validates a request, routes the trivial cases, drives the pipeline and
//! assembles the response record. This is the only entry point the worker
//! and the CLI call; everything behind it is deterministic given the input,
//! and nothing here logs or retries.

use crate::config::SolverConfig;
use crate::error::SolverError;
use crate::place::{fallback_placement, place};
use crate::propagate::Propagation;
use crate::relax::relax;
use fabula_domain::{
    Assertion, Conflict, Event, SolveRequest, SolveResponse, SolveStatus, Violation,
};
use std::collections::HashSet;
use std::time::Instant;

/// The temporal constraint solver.
///
/// One instance holds only tuning constants and may be reused across any
/// number of solves; each call is pure and allocates its own working state.
///
/// # Examples
///
/// ```
/// use fabula_domain::{AllenRelation, Assertion, Confidence, Event, SolveRequest, SolveStatus};
/// use fabula_solver::Solver;
///
/// let solver = Solver::default_config();
/// let request = SolveRequest {
///     events: vec![Event::instant("dawn"), Event::interval("battle")],
///     assertions: vec![Assertion::new(
///         "r1",
///         "dawn",
///         "battle",
///         AllenRelation::Before,
///         Confidence::Explicit,
///     )],
/// };
///
/// let response = solver.solve(&request).unwrap();
/// assert_eq!(response.status, SolveStatus::Satisfiable);
/// assert_eq!(response.positions.len(), 2);
/// ```
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Create a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn default_config() -> Self {
        Self::new(SolverConfig::default())
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve one request.
    ///
    /// Contradictions between assertions are never errors; they surface in
    /// the response's status, violations and conflicts. `Err` marks
    /// malformed input only: a broken configuration, duplicate ids, or an
    /// assertion naming an event the request never mentions.
    pub fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolverError> {
        let started = Instant::now();
        self.config.validate()?;

        let events: Vec<Event> = request.events.iter().filter(|e| e.enabled).cloned().collect();
        let assertions = self.usable_assertions(request, &events)?;

        if events.is_empty() {
            return Ok(self.respond(SolveStatus::Satisfiable, vec![], vec![], vec![], started));
        }
        if assertions.is_empty() {
            let positions = fallback_placement(&events, &self.config);
            return Ok(self.respond(SolveStatus::Satisfiable, positions, vec![], vec![], started));
        }

        let outcome = relax(&events, &assertions, &self.config);

        let violations: Vec<Violation> = outcome
            .discarded
            .iter()
            .map(|id| {
                let assertion = assertions
                    .iter()
                    .find(|a| &a.id == id)
                    .expect("discarded id came from the input set");
                Violation {
                    assertion_id: id.clone(),
                    severity: assertion.confidence.severity(),
                    message: format!(
                        "'{}' ({}) was set aside to restore a consistent timeline",
                        assertion.describe(),
                        assertion.confidence.as_str()
                    ),
                }
            })
            .collect();

        let response = match outcome.propagation {
            Propagation::Feasible { distances } => {
                let positions = place(&events, &distances, &self.config);
                let status = if violations.is_empty() {
                    SolveStatus::Satisfiable
                } else {
                    SolveStatus::Relaxed
                };
                self.respond(status, positions, violations, vec![], started)
            }
            Propagation::Infeasible { witness } => {
                let conflicts = vec![Conflict {
                    assertion_ids: witness.assertion_ids.clone(),
                    description: witness.describe(),
                }];
                let positions = fallback_placement(&events, &self.config);
                self.respond(
                    SolveStatus::Unsatisfiable,
                    positions,
                    violations,
                    conflicts,
                    started,
                )
            }
        };

        Ok(response)
    }

    /// Enabled assertions whose endpoints exist among the enabled events.
    ///
    /// An assertion naming a disabled event is silently skipped (the editor
    /// kept it around for later); one naming an event absent from the
    /// request entirely is malformed input.
    fn usable_assertions(
        &self,
        request: &SolveRequest,
        enabled_events: &[Event],
    ) -> Result<Vec<Assertion>, SolverError> {
        let mut event_ids = HashSet::new();
        for event in &request.events {
            if !event_ids.insert(&event.id) {
                return Err(SolverError::DuplicateEvent(event.id.clone()));
            }
        }
        let enabled_ids: HashSet<_> = enabled_events.iter().map(|e| &e.id).collect();

        let mut assertion_ids = HashSet::new();
        let mut usable = Vec::new();
        for assertion in request.assertions.iter().filter(|a| a.enabled) {
            if !assertion_ids.insert(&assertion.id) {
                return Err(SolverError::DuplicateAssertion(assertion.id.clone()));
            }
            for endpoint in [&assertion.source_id, &assertion.target_id] {
                if !event_ids.contains(endpoint) {
                    return Err(SolverError::UnknownEvent {
                        assertion_id: assertion.id.clone(),
                        event_id: endpoint.clone(),
                    });
                }
            }
            if enabled_ids.contains(&assertion.source_id)
                && enabled_ids.contains(&assertion.target_id)
            {
                usable.push(assertion.clone());
            }
        }
        Ok(usable)
    }

    fn respond(
        &self,
        status: SolveStatus,
        positions: Vec<fabula_domain::Position>,
        violations: Vec<Violation>,
        conflicts: Vec<Conflict>,
        started: Instant,
    ) -> SolveResponse {
        SolveResponse {
            status,
            positions,
            violations,
            conflicts,
            elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}
