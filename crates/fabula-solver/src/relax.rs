//! Confidence-priority relaxation of an inconsistent assertion set
//!
//! While the network is infeasible, the weakest surviving assertion in the
//! reported witness is removed and the network rebuilt from scratch for the
//! next round. Propagation dominates the cost of a round; the in-place
//! removal path belongs to the exploratory conflict scan, not this loop.

use crate::compile::build_network;
use crate::config::SolverConfig;
use crate::graph::{ConstraintGraph, VIRTUAL_SOURCE};
use crate::propagate::{propagate, Propagation};
use fabula_domain::{Assertion, AssertionId, Event};
use std::collections::HashMap;

/// Result of driving the relaxation loop to completion.
#[derive(Debug)]
pub struct RelaxationOutcome {
    /// The final constraint graph, virtual source included.
    pub graph: ConstraintGraph,

    /// The final propagation; feasible unless no removable assertion was
    /// left in the last witness.
    pub propagation: Propagation,

    /// Assertions removed, in removal order.
    pub discarded: Vec<AssertionId>,

    /// Assertions still standing, in input order.
    pub surviving: Vec<AssertionId>,

    /// Number of propagation rounds run.
    pub iterations: usize,
}

/// Relax `assertions` over `events` until the network is feasible or no
/// removable assertion remains.
///
/// Removal priority is ascending confidence weight; between two assertions
/// of equal confidence the later one in input order yields first, so
/// earlier statements take precedence over later contradicting ones.
pub fn relax(
    events: &[Event],
    assertions: &[Assertion],
    config: &SolverConfig,
) -> RelaxationOutcome {
    // Removal preference, computed once: weakest tier first, later input
    // order first within a tier.
    let mut removal_order: Vec<usize> = (0..assertions.len()).collect();
    removal_order.sort_by_key(|&i| (assertions[i].confidence.weight(), std::cmp::Reverse(i)));

    let index_of: HashMap<&AssertionId, usize> = assertions
        .iter()
        .enumerate()
        .map(|(i, a)| (&a.id, i))
        .collect();

    let mut alive = vec![true; assertions.len()];
    let mut discarded = Vec::new();
    let mut iterations = 0;

    let cap = config.max_relaxation_rounds.min(assertions.len() + 1).max(1);

    loop {
        let surviving_set: Vec<Assertion> = assertions
            .iter()
            .enumerate()
            .filter(|(i, _)| alive[*i])
            .map(|(_, a)| a.clone())
            .collect();

        let mut graph = build_network(events, &surviving_set, config);
        graph.inject_source();
        let propagation = propagate(&graph, VIRTUAL_SOURCE);
        iterations += 1;

        let witness = match &propagation {
            Propagation::Feasible { .. } => {
                return RelaxationOutcome {
                    graph,
                    propagation,
                    discarded,
                    surviving: surviving_ids(assertions, &alive),
                    iterations,
                };
            }
            Propagation::Infeasible { witness } => witness,
        };

        // Weakest surviving assertion inside the witness, if any.
        let candidate = removal_order.iter().copied().find(|&i| {
            alive[i]
                && witness
                    .assertion_ids
                    .iter()
                    .any(|id| index_of.get(id) == Some(&i))
        });

        match candidate {
            Some(i) if iterations < cap => {
                alive[i] = false;
                discarded.push(assertions[i].id.clone());
            }
            // Only internal constraints left in the witness, or the round
            // budget ran out: the conflict is intrinsic.
            _ => {
                return RelaxationOutcome {
                    graph,
                    propagation,
                    discarded,
                    surviving: surviving_ids(assertions, &alive),
                    iterations,
                };
            }
        }
    }
}

fn surviving_ids(assertions: &[Assertion], alive: &[bool]) -> Vec<AssertionId> {
    assertions
        .iter()
        .enumerate()
        .filter(|(i, _)| alive[*i])
        .map(|(_, a)| a.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fabula_domain::{AllenRelation, Confidence};

    fn instants(ids: &[&str]) -> Vec<Event> {
        ids.iter().map(|id| Event::instant(*id)).collect()
    }

    fn before(id: &str, source: &str, target: &str, confidence: Confidence) -> Assertion {
        Assertion::new(id, source, target, AllenRelation::Before, confidence)
    }

    #[test]
    fn test_consistent_set_survives_untouched() {
        let events = instants(&["a", "b", "c"]);
        let assertions = vec![
            before("r1", "a", "b", Confidence::Explicit),
            before("r2", "b", "c", Confidence::Explicit),
        ];

        let outcome = relax(&events, &assertions, &SolverConfig::default());
        assert!(outcome.propagation.is_feasible());
        assert!(outcome.discarded.is_empty());
        assert_eq!(outcome.surviving.len(), 2);
        assert_eq!(outcome.iterations, 1);
    }

    #[test]
    fn test_weakest_tier_in_cycle_is_sacrificed() {
        let events = instants(&["a", "b", "c"]);
        let assertions = vec![
            before("r1", "a", "b", Confidence::Speculation),
            before("r2", "b", "c", Confidence::Inferred),
            before("r3", "c", "a", Confidence::Explicit),
        ];

        let outcome = relax(&events, &assertions, &SolverConfig::default());
        assert!(outcome.propagation.is_feasible());
        assert_eq!(outcome.discarded, vec![AssertionId::new("r1")]);
        assert_eq!(
            outcome.surviving,
            vec![AssertionId::new("r2"), AssertionId::new("r3")]
        );
        assert_eq!(outcome.iterations, 2);
    }

    #[test]
    fn test_equal_tier_tie_breaks_to_later_input() {
        let events = instants(&["a", "b"]);
        let assertions = vec![
            Assertion::new("r1", "a", "b", AllenRelation::Equals, Confidence::Explicit),
            before("r2", "a", "b", Confidence::Explicit),
        ];

        let outcome = relax(&events, &assertions, &SolverConfig::default());
        assert!(outcome.propagation.is_feasible());
        assert_eq!(outcome.discarded, vec![AssertionId::new("r2")]);
        assert_eq!(outcome.surviving, vec![AssertionId::new("r1")]);
    }

    #[test]
    fn test_multiple_rounds_peel_nested_cycles() {
        let events = instants(&["a", "b", "c"]);
        // Two independent two-cycles sharing no assertion.
        let assertions = vec![
            before("r1", "a", "b", Confidence::Explicit),
            before("r2", "b", "a", Confidence::Speculation),
            before("r3", "b", "c", Confidence::Explicit),
            before("r4", "c", "b", Confidence::Speculation),
        ];

        let outcome = relax(&events, &assertions, &SolverConfig::default());
        assert!(outcome.propagation.is_feasible());
        assert_eq!(outcome.discarded.len(), 2);
        assert!(outcome.discarded.contains(&AssertionId::new("r2")));
        assert!(outcome.discarded.contains(&AssertionId::new("r4")));
        assert_eq!(outcome.iterations, 3);
    }

    #[test]
    fn test_higher_tier_never_lost_while_lower_remains() {
        let events = instants(&["a", "b"]);
        let assertions = vec![
            before("r1", "a", "b", Confidence::Explicit),
            before("r2", "b", "a", Confidence::Inferred),
            Assertion::new("r3", "a", "b", AllenRelation::Equals, Confidence::Speculation),
        ];

        let outcome = relax(&events, &assertions, &SolverConfig::default());
        assert!(outcome.propagation.is_feasible());
        // The explicit r1 must survive every round.
        assert!(outcome.surviving.contains(&AssertionId::new("r1")));
        assert!(!outcome.discarded.contains(&AssertionId::new("r1")));
    }

    #[test]
    fn test_no_assertions_is_trivially_feasible() {
        let events = instants(&["a"]);
        let outcome = relax(&events, &[], &SolverConfig::default());
        assert!(outcome.propagation.is_feasible());
        assert_eq!(outcome.iterations, 1);
    }
}
