//! Shortest-path propagation and negative-cycle witness extraction
//!
//! Classical Bellman-Ford from the virtual source. A full pass with no
//! relaxation ends early; a relaxation still possible after `|V| - 1`
//! passes certifies a negative cycle, and walking predecessors pins down
//! one concrete cycle together with the assertions that built it.

use crate::graph::{ConstraintGraph, ConstraintOrigin};
use fabula_domain::AssertionId;
use std::collections::HashMap;

/// One edge of a reported negative cycle, with vertex names resolved.
#[derive(Debug, Clone)]
pub struct WitnessEdge {
    /// Origin vertex name.
    pub from: String,

    /// Target vertex name.
    pub to: String,

    /// Edge weight.
    pub weight: f64,

    /// Which input produced the edge.
    pub origin: ConstraintOrigin,
}

/// A concrete certificate of infeasibility.
///
/// The cycle edges are in traversal order and sum to a strictly negative
/// total. The assertion set is minimal within this cycle, not necessarily
/// across all cycles in the graph.
#[derive(Debug, Clone)]
pub struct ConflictWitness {
    /// The negative cycle, edge by edge.
    pub cycle: Vec<WitnessEdge>,

    /// Distinct assertions contributing edges to the cycle, in encounter
    /// order. Empty when only event-internal constraints are involved.
    pub assertion_ids: Vec<AssertionId>,
}

impl ConflictWitness {
    /// Total weight of the cycle; strictly negative by construction.
    pub fn total_weight(&self) -> f64 {
        self.cycle.iter().map(|e| e.weight).sum()
    }

    /// Human-readable description of the conflict.
    pub fn describe(&self) -> String {
        if self.assertion_ids.is_empty() {
            "the events' own duration constraints form an impossible cycle".to_string()
        } else {
            let ids: Vec<&str> = self.assertion_ids.iter().map(|id| id.as_str()).collect();
            format!(
                "assertions {} cannot all hold at once; their constraints close a negative cycle",
                ids.join(", ")
            )
        }
    }
}

/// Outcome of one propagation over the constraint graph.
#[derive(Debug, Clone)]
pub enum Propagation {
    /// The network is consistent; `distances` maps every reachable variable
    /// to its shortest-path distance from the source.
    Feasible {
        /// Distance per vertex name.
        distances: HashMap<String, f64>,
    },

    /// The network is inconsistent; `witness` certifies why.
    Infeasible {
        /// One extracted negative cycle.
        witness: ConflictWitness,
    },
}

impl Propagation {
    /// True when the network was consistent.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Propagation::Feasible { .. })
    }
}

/// Run Bellman-Ford from `source` over the graph.
pub fn propagate(graph: &ConstraintGraph, source: &str) -> Propagation {
    let n = graph.vertex_count();
    let Some(source_idx) = graph.vertex_index(source) else {
        return Propagation::Feasible {
            distances: HashMap::new(),
        };
    };

    let mut dist = vec![f64::INFINITY; n];
    // Predecessor edge of each vertex on its current shortest path.
    let mut pred: Vec<Option<(usize, usize)>> = vec![None; n];
    dist[source_idx] = 0.0;

    // |V| - 1 relaxation passes plus one detection pass, with early exit
    // once a pass changes nothing. A vertex still updated in the detection
    // pass sits on or downstream of a negative cycle; applying that pass's
    // updates keeps its predecessor chain walkable into the cycle.
    // Additions through +inf never relax.
    let mut witness_vertex = None;
    for pass in 0..n {
        let mut changed = false;
        for u in 0..n {
            if !dist[u].is_finite() {
                continue;
            }
            for (edge_idx, edge) in graph.outgoing(u).iter().enumerate() {
                let candidate = dist[u] + edge.weight;
                if candidate < dist[edge.to] {
                    dist[edge.to] = candidate;
                    pred[edge.to] = Some((u, edge_idx));
                    changed = true;
                    if pass == n - 1 {
                        witness_vertex = Some(edge.to);
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    match witness_vertex {
        Some(vertex) => Propagation::Infeasible {
            witness: extract_cycle(graph, &pred, vertex),
        },
        None => Propagation::Feasible {
            distances: collect_distances(graph, &dist),
        },
    }
}

fn collect_distances(graph: &ConstraintGraph, dist: &[f64]) -> HashMap<String, f64> {
    dist.iter()
        .enumerate()
        .filter(|(_, d)| d.is_finite())
        .map(|(idx, d)| (graph.vertex_name(idx).to_string(), *d))
        .collect()
}

/// Walk predecessors from a vertex known to be on or downstream of a
/// negative cycle, land strictly inside the cycle, then read it off.
fn extract_cycle(
    graph: &ConstraintGraph,
    pred: &[Option<(usize, usize)>],
    witness_vertex: usize,
) -> ConflictWitness {
    let n = graph.vertex_count();

    // |V| predecessor hops guarantee we are inside the cycle, not merely
    // reachable from it.
    let mut inside = witness_vertex;
    for _ in 0..n {
        let (prev, _) = pred[inside].expect("predecessor chain broken during cycle extraction");
        inside = prev;
    }

    // Read edges back to the landing vertex; the walk goes against edge
    // direction, so reverse at the end.
    let mut cycle = Vec::new();
    let mut current = inside;
    loop {
        let (prev, edge_idx) = pred[current].expect("predecessor chain broken inside cycle");
        let edge = &graph.outgoing(prev)[edge_idx];
        cycle.push(WitnessEdge {
            from: graph.vertex_name(edge.from).to_string(),
            to: graph.vertex_name(edge.to).to_string(),
            weight: edge.weight,
            origin: edge.origin.clone(),
        });
        current = prev;
        if current == inside {
            break;
        }
    }
    cycle.reverse();

    let mut assertion_ids: Vec<AssertionId> = Vec::new();
    for edge in &cycle {
        if let Some(id) = edge.origin.assertion_id() {
            if !assertion_ids.contains(id) {
                assertion_ids.push(id.clone());
            }
        }
    }

    ConflictWitness {
        cycle,
        assertion_ids,
    }
}
