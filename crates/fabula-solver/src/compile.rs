//! Compilation of Allen relations into difference constraints
//!
//! Each qualitative relation between two events decomposes into a handful
//! of bounds over their four endpoint variables. Strict inequalities take a
//! small negative slack on the bound; equalities become a pair of opposite
//! zero bounds. The bounds land directly on graph edges: the constraint
//! `value(to) - value(from) <= bound` is the edge `from -> to` with weight
//! `bound`, so shortest-path distances from the virtual source satisfy the
//! whole conjunction whenever no negative cycle exists.

use crate::config::SolverConfig;
use crate::graph::{ConstraintGraph, ConstraintOrigin};
use fabula_domain::{AllenRelation, Assertion, DurationKind, Event};

/// A bound `value(to) - value(from) <= bound` over two endpoint variables.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceConstraint {
    /// Variable subtracted (edge origin).
    pub from: String,

    /// Variable bounded (edge target).
    pub to: String,

    /// Upper bound on the difference.
    pub bound: f64,
}

/// `x < y`, encoded as `x - y <= -epsilon`.
fn strictly_before(x: String, y: String, epsilon: f64) -> DifferenceConstraint {
    DifferenceConstraint {
        from: y,
        to: x,
        bound: -epsilon,
    }
}

/// `x = y`, encoded as two opposite zero bounds.
fn equal(x: String, y: String) -> [DifferenceConstraint; 2] {
    [
        DifferenceConstraint {
            from: y.clone(),
            to: x.clone(),
            bound: 0.0,
        },
        DifferenceConstraint {
            from: x,
            to: y,
            bound: 0.0,
        },
    ]
}

/// Compile one assertion into its difference constraints.
pub fn compile_assertion(assertion: &Assertion, config: &SolverConfig) -> Vec<DifferenceConstraint> {
    let eps = config.epsilon;
    let a_start = assertion.source_id.start_variable();
    let a_end = assertion.source_id.end_variable();
    let b_start = assertion.target_id.start_variable();
    let b_end = assertion.target_id.end_variable();

    match assertion.relation {
        AllenRelation::Before => vec![strictly_before(a_end, b_start, eps)],
        AllenRelation::After => vec![strictly_before(b_end, a_start, eps)],
        AllenRelation::Meets => equal(a_end, b_start).to_vec(),
        AllenRelation::MetBy => equal(a_start, b_end).to_vec(),
        AllenRelation::Overlaps => vec![
            strictly_before(a_start.clone(), b_start.clone(), eps),
            strictly_before(b_start, a_end.clone(), eps),
            strictly_before(a_end, b_end, eps),
        ],
        AllenRelation::OverlappedBy => vec![
            strictly_before(b_start.clone(), a_start.clone(), eps),
            strictly_before(a_start, b_end.clone(), eps),
            strictly_before(b_end, a_end, eps),
        ],
        AllenRelation::Starts => {
            let mut constraints = equal(a_start, b_start).to_vec();
            constraints.push(strictly_before(a_end, b_end, eps));
            constraints
        }
        AllenRelation::StartedBy => {
            let mut constraints = equal(a_start, b_start).to_vec();
            constraints.push(strictly_before(b_end, a_end, eps));
            constraints
        }
        AllenRelation::Finishes => {
            let mut constraints = vec![strictly_before(b_start, a_start, eps)];
            constraints.extend(equal(a_end, b_end));
            constraints
        }
        AllenRelation::FinishedBy => {
            let mut constraints = vec![strictly_before(a_start, b_start, eps)];
            constraints.extend(equal(a_end, b_end));
            constraints
        }
        AllenRelation::During => vec![
            strictly_before(b_start, a_start, eps),
            strictly_before(a_end, b_end, eps),
        ],
        AllenRelation::Contains => vec![
            strictly_before(a_start, b_start, eps),
            strictly_before(b_end, a_end, eps),
        ],
        AllenRelation::Equals => {
            let mut constraints = equal(a_start, b_start).to_vec();
            constraints.extend(equal(a_end, b_end));
            constraints
        }
    }
}

/// Compile one event's internal constraints.
///
/// Instants pin their endpoints together; intervals keep their end a
/// minimum duration after their start so they never collapse.
pub fn compile_event(event: &Event, config: &SolverConfig) -> Vec<DifferenceConstraint> {
    let start = event.id.start_variable();
    let end = event.id.end_variable();

    match event.duration_type {
        DurationKind::Instant => equal(start, end).to_vec(),
        DurationKind::Interval => vec![DifferenceConstraint {
            from: end,
            to: start,
            bound: -config.min_duration,
        }],
    }
}

/// Build the full constraint graph for a set of events and assertions.
///
/// Every event contributes its two endpoint vertices and internal
/// constraints; every assertion contributes its compiled bounds tagged with
/// its id. The virtual source is NOT injected here; callers do that after
/// the graph is complete.
pub fn build_network(
    events: &[Event],
    assertions: &[Assertion],
    config: &SolverConfig,
) -> ConstraintGraph {
    let mut graph = ConstraintGraph::new();

    for event in events {
        graph.add_vertex(&event.id.start_variable());
        graph.add_vertex(&event.id.end_variable());
        for constraint in compile_event(event, config) {
            graph.add_edge(
                &constraint.from,
                &constraint.to,
                constraint.bound,
                ConstraintOrigin::Internal(event.id.clone()),
            );
        }
    }

    for assertion in assertions {
        for constraint in compile_assertion(assertion, config) {
            graph.add_edge(
                &constraint.from,
                &constraint.to,
                constraint.bound,
                ConstraintOrigin::Assertion(assertion.id.clone()),
            );
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_domain::Confidence;

    fn config() -> SolverConfig {
        SolverConfig::default()
    }

    fn assert_between(
        constraints: &[DifferenceConstraint],
        from: &str,
        to: &str,
        bound: f64,
    ) {
        assert!(
            constraints
                .iter()
                .any(|c| c.from == from && c.to == to && c.bound == bound),
            "missing constraint {} -> {} ({}): got {:?}",
            from,
            to,
            bound,
            constraints
        );
    }

    #[test]
    fn test_before_is_one_strict_bound() {
        let a = Assertion::new("r", "a", "b", AllenRelation::Before, Confidence::Explicit);
        let constraints = compile_assertion(&a, &config());
        assert_eq!(constraints.len(), 1);
        // a_end < b_start  =>  a_end - b_start <= -eps
        assert_between(&constraints, "b_start", "a_end", -config().epsilon);
    }

    #[test]
    fn test_meets_is_two_zero_bounds() {
        let a = Assertion::new("r", "a", "b", AllenRelation::Meets, Confidence::Explicit);
        let constraints = compile_assertion(&a, &config());
        assert_eq!(constraints.len(), 2);
        assert_between(&constraints, "b_start", "a_end", 0.0);
        assert_between(&constraints, "a_end", "b_start", 0.0);
    }

    #[test]
    fn test_overlaps_is_three_strict_bounds() {
        let a = Assertion::new("r", "a", "b", AllenRelation::Overlaps, Confidence::Explicit);
        let constraints = compile_assertion(&a, &config());
        let eps = config().epsilon;
        assert_eq!(constraints.len(), 3);
        assert_between(&constraints, "b_start", "a_start", -eps);
        assert_between(&constraints, "a_end", "b_start", -eps);
        assert_between(&constraints, "b_end", "a_end", -eps);
    }

    #[test]
    fn test_during_bounds_both_sides() {
        let a = Assertion::new("r", "a", "b", AllenRelation::During, Confidence::Explicit);
        let constraints = compile_assertion(&a, &config());
        let eps = config().epsilon;
        assert_eq!(constraints.len(), 2);
        assert_between(&constraints, "a_start", "b_start", -eps);
        assert_between(&constraints, "b_end", "a_end", -eps);
    }

    #[test]
    fn test_equals_is_four_zero_bounds() {
        let a = Assertion::new("r", "a", "b", AllenRelation::Equals, Confidence::Explicit);
        let constraints = compile_assertion(&a, &config());
        assert_eq!(constraints.len(), 4);
        assert!(constraints.iter().all(|c| c.bound == 0.0));
    }

    #[test]
    fn test_instant_pins_endpoints_together() {
        let constraints = compile_event(&Event::instant("a"), &config());
        assert_eq!(constraints.len(), 2);
        assert_between(&constraints, "a_start", "a_end", 0.0);
        assert_between(&constraints, "a_end", "a_start", 0.0);
    }

    #[test]
    fn test_interval_enforces_minimum_duration() {
        let constraints = compile_event(&Event::interval("a"), &config());
        assert_eq!(constraints.len(), 1);
        // end - start >= min_duration  =>  start - end <= -min_duration
        assert_between(&constraints, "a_end", "a_start", -config().min_duration);
    }

    #[test]
    fn test_build_network_counts() {
        let events = vec![Event::instant("a"), Event::interval("b")];
        let assertions = vec![Assertion::new(
            "r1",
            "a",
            "b",
            AllenRelation::Before,
            Confidence::Explicit,
        )];
        let graph = build_network(&events, &assertions, &config());

        // Two vertices per event; 2 instant edges + 1 interval edge + 1
        // assertion edge.
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 4);
    }

    #[test]
    fn test_inverse_relations_compile_to_mirrored_bounds() {
        let forward = Assertion::new("r", "a", "b", AllenRelation::During, Confidence::Explicit);
        let backward = Assertion::new("r", "b", "a", AllenRelation::Contains, Confidence::Explicit);

        let mut fwd = compile_assertion(&forward, &config());
        let mut bwd = compile_assertion(&backward, &config());
        let key = |c: &DifferenceConstraint| (c.from.clone(), c.to.clone());
        fwd.sort_by_key(key);
        bwd.sort_by_key(key);
        assert_eq!(fwd, bwd);
    }
}
