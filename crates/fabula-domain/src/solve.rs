//! Solve module - the wire contract between editor, solver and renderer

use crate::assertion::{Assertion, AssertionId};
use crate::confidence::Severity;
use crate::event::{Event, EventId};
use serde::{Deserialize, Serialize};

/// Input to one solver invocation.
///
/// The editor forwards only what the solver consults: ids, duration kinds,
/// relations, confidence tiers and enabled bits. Names, descriptions, colors
/// and timestamps stay behind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Events to place, in editor order.
    pub events: Vec<Event>,

    /// Assertions between the events, in editor order.
    pub assertions: Vec<Assertion>,
}

/// Overall outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Every enabled assertion is honored by the returned layout.
    Satisfiable,

    /// A consistent layout was found after discarding some assertions;
    /// the discards are listed as violations.
    Relaxed,

    /// No consistent layout exists even with every removable assertion
    /// discarded; the surviving conflict is reported and positions fall
    /// back to even spacing.
    Unsatisfiable,
}

impl SolveStatus {
    /// True when the returned positions honor the surviving assertion set.
    pub fn is_feasible(&self) -> bool {
        !matches!(self, SolveStatus::Unsatisfiable)
    }
}

/// Display coordinates for one event.
///
/// Instants satisfy `start == end`; intervals keep `end - start` at or above
/// the configured minimum display width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// The event being placed.
    pub event_id: EventId,

    /// Left coordinate on the display axis.
    pub start: f64,

    /// Right coordinate on the display axis.
    pub end: f64,
}

impl Position {
    /// Create a position.
    ///
    /// # Panics
    /// Panics if `start > end`; the pipeline never produces such a pair.
    pub fn new(event_id: EventId, start: f64, end: f64) -> Self {
        assert!(start <= end, "Position start must not exceed end");
        Self {
            event_id,
            start,
            end,
        }
    }

    /// Width of the placed event on the display axis.
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// An assertion the solver had to discard to restore consistency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// The discarded assertion.
    pub assertion_id: AssertionId,

    /// Soft for speculation-tier discards, hard otherwise.
    pub severity: Severity,

    /// Human-readable explanation naming the relation that was given up.
    pub message: String,
}

/// A set of assertions that cannot hold simultaneously.
///
/// Present only on the unsatisfiable branch, where even full relaxation
/// could not break the cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    /// Assertions participating in the surviving negative cycle.
    pub assertion_ids: Vec<AssertionId>,

    /// Human-readable description of the conflict.
    pub description: String,
}

/// Output of one solver invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    /// Overall outcome.
    pub status: SolveStatus,

    /// One entry per placed event; an event is omitted only in the
    /// pathological case where no finite distance reached its endpoints.
    pub positions: Vec<Position>,

    /// Discarded assertions, in the order they were removed.
    pub violations: Vec<Violation>,

    /// Surviving conflict witnesses; empty unless unsatisfiable.
    pub conflicts: Vec<Conflict>,

    /// Wall-clock solve time in milliseconds.
    pub elapsed_ms: u64,
}

impl SolveResponse {
    /// Look up the position of an event by id.
    pub fn position(&self, id: &EventId) -> Option<&Position> {
        self.positions.iter().find(|p| &p.event_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::Confidence;
    use crate::relation::AllenRelation;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&SolveStatus::Unsatisfiable).unwrap(),
            r#""unsatisfiable""#
        );
        assert!(SolveStatus::Relaxed.is_feasible());
        assert!(!SolveStatus::Unsatisfiable.is_feasible());
    }

    #[test]
    #[should_panic]
    fn test_position_rejects_inverted_bounds() {
        Position::new(EventId::new("x"), 10.0, 5.0);
    }

    #[test]
    fn test_position_width() {
        let p = Position::new(EventId::new("x"), 100.0, 140.0);
        assert_eq!(p.width(), 40.0);
    }

    #[test]
    fn test_request_roundtrip() {
        let request = SolveRequest {
            events: vec![Event::instant("a"), Event::interval("b")],
            assertions: vec![Assertion::new(
                "r1",
                "a",
                "b",
                AllenRelation::Before,
                Confidence::Explicit,
            )],
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: SolveRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }

    #[test]
    fn test_response_position_lookup() {
        let response = SolveResponse {
            status: SolveStatus::Satisfiable,
            positions: vec![
                Position::new(EventId::new("a"), 50.0, 50.0),
                Position::new(EventId::new("b"), 100.0, 200.0),
            ],
            violations: vec![],
            conflicts: vec![],
            elapsed_ms: 0,
        };
        assert_eq!(response.position(&EventId::new("b")).unwrap().start, 100.0);
        assert!(response.position(&EventId::new("zzz")).is_none());
    }
}
