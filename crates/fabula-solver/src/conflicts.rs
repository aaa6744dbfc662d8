//! Exploratory scan for every conflict in an assertion set
//!
//! Unlike the relaxer, which surgically removes one assertion per round and
//! rebuilds, this scan keeps one graph and strips ALL assertions of each
//! witness from it in place, so a single pass enumerates every independent
//! contradiction. The editor uses this to annotate the assertion list
//! without committing to a repair.

use crate::compile::build_network;
use crate::config::SolverConfig;
use crate::graph::VIRTUAL_SOURCE;
use crate::propagate::{propagate, Propagation};
use fabula_domain::{Assertion, Conflict, Event};

/// Find every independent conflict among the enabled assertions.
///
/// Each returned entry is one negative-cycle witness; the assertions it
/// names are removed from the working graph before the next scan, so later
/// entries never repeat earlier ones.
pub fn find_all_conflicts(
    events: &[Event],
    assertions: &[Assertion],
    config: &SolverConfig,
) -> Vec<Conflict> {
    let enabled_events: Vec<Event> = events.iter().filter(|e| e.enabled).cloned().collect();
    let enabled_assertions: Vec<Assertion> =
        assertions.iter().filter(|a| a.enabled).cloned().collect();

    let mut graph = build_network(&enabled_events, &enabled_assertions, config);
    graph.inject_source();

    let mut conflicts = Vec::new();

    // Each round removes at least one assertion's edges, so the scan ends
    // within |assertions| rounds.
    for _ in 0..=enabled_assertions.len() {
        let witness = match propagate(&graph, VIRTUAL_SOURCE) {
            Propagation::Feasible { .. } => break,
            Propagation::Infeasible { witness } => witness,
        };

        let description = witness.describe();
        conflicts.push(Conflict {
            assertion_ids: witness.assertion_ids.clone(),
            description,
        });

        if witness.assertion_ids.is_empty() {
            // Intrinsic to the events themselves; nothing left to strip.
            break;
        }
        let mut removed = 0;
        for id in &witness.assertion_ids {
            removed += graph.remove_origin(id);
        }
        if removed == 0 {
            break;
        }
    }

    conflicts
}
