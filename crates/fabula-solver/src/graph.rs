//! Difference-constraint graph with provenance-tagged edges
//!
//! Vertices are endpoint variable names; an edge `u -> v` with weight `w`
//! encodes the bound `value(v) - value(u) <= w`. The network is consistent
//! exactly when the graph has no negative-weight cycle.

use fabula_domain::{AssertionId, EventId};
use std::collections::HashMap;

/// Name of the injected virtual source vertex.
///
/// Reserved; no event id may collide with it in practice because endpoint
/// variables always carry a `_start`/`_end` suffix.
pub const VIRTUAL_SOURCE: &str = "__source__";

/// Where a constraint edge came from.
///
/// Provenance lets a negative-cycle witness name the assertions involved,
/// and lets the exploratory conflict scan delete an assertion's edges in
/// bulk without recompiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintOrigin {
    /// Compiled from a user assertion.
    Assertion(AssertionId),

    /// Event-internal constraint (instant equality or minimum duration).
    Internal(EventId),

    /// Zero-weight fan-out edge from the virtual source.
    SourceFanOut,
}

impl ConstraintOrigin {
    /// The assertion id, when this edge came from an assertion.
    pub fn assertion_id(&self) -> Option<&AssertionId> {
        match self {
            ConstraintOrigin::Assertion(id) => Some(id),
            _ => None,
        }
    }
}

/// One directed weighted edge of the constraint graph.
#[derive(Debug, Clone)]
pub struct ConstraintEdge {
    /// Index of the origin vertex.
    pub from: usize,

    /// Index of the target vertex.
    pub to: usize,

    /// Bound on `value(to) - value(from)`.
    pub weight: f64,

    /// Which input produced this edge.
    pub origin: ConstraintOrigin,
}

/// In-memory directed weighted graph keyed by variable name.
///
/// Vertices keep insertion order and every enumeration follows it, so a
/// given input always produces the same propagation schedule and the same
/// witness. At most one edge is stored per ordered vertex pair; inserting a
/// second bound on the same pair keeps the tighter of the two.
#[derive(Debug, Clone, Default)]
pub struct ConstraintGraph {
    vertices: Vec<String>,
    index: HashMap<String, usize>,
    outgoing: Vec<Vec<ConstraintEdge>>,
    edge_count: usize,
}

impl ConstraintGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex, returning its index. Adding an existing name is a
    /// no-op returning the existing index.
    pub fn add_vertex(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.vertices.len();
        self.vertices.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        self.outgoing.push(Vec::new());
        idx
    }

    /// Look up a vertex index by name.
    pub fn vertex_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Name of the vertex at `idx`.
    pub fn vertex_name(&self, idx: usize) -> &str {
        &self.vertices[idx]
    }

    /// Number of vertices, including the virtual source once injected.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of stored edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Insert the bound `value(to) - value(from) <= weight`.
    ///
    /// If an edge already exists for the pair, the tighter (smaller) weight
    /// wins and provenance follows the winning edge: two bounds on the same
    /// difference are together equivalent to their minimum.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64, origin: ConstraintOrigin) {
        let from_idx = self.add_vertex(from);
        let to_idx = self.add_vertex(to);

        if let Some(existing) = self.outgoing[from_idx].iter_mut().find(|e| e.to == to_idx) {
            if existing.weight > weight {
                existing.weight = weight;
                existing.origin = origin;
            }
            return;
        }

        self.outgoing[from_idx].push(ConstraintEdge {
            from: from_idx,
            to: to_idx,
            weight,
            origin,
        });
        self.edge_count += 1;
    }

    /// Outgoing edges of the vertex at `idx`.
    pub fn outgoing(&self, idx: usize) -> &[ConstraintEdge] {
        &self.outgoing[idx]
    }

    /// Enumerate every edge in vertex insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &ConstraintEdge> {
        self.outgoing.iter().flatten()
    }

    /// Remove every edge that came from the given assertion.
    ///
    /// Returns the number of edges removed. Vertices stay in place; a
    /// vertex left without edges is harmless to propagation.
    pub fn remove_origin(&mut self, id: &AssertionId) -> usize {
        let mut removed = 0;
        for edges in &mut self.outgoing {
            let before = edges.len();
            edges.retain(|e| e.origin.assertion_id() != Some(id));
            removed += before - edges.len();
        }
        self.edge_count -= removed;
        removed
    }

    /// Add the virtual source vertex and one zero-weight edge from it to
    /// every other vertex, making the whole graph reachable from a single
    /// starting point. Call once, after all constraint edges are in.
    pub fn inject_source(&mut self) -> usize {
        let targets: Vec<String> = self
            .vertices
            .iter()
            .filter(|name| name.as_str() != VIRTUAL_SOURCE)
            .cloned()
            .collect();
        let source = self.add_vertex(VIRTUAL_SOURCE);
        for target in targets {
            self.add_edge(VIRTUAL_SOURCE, &target, 0.0, ConstraintOrigin::SourceFanOut);
        }
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assertion(id: &str) -> ConstraintOrigin {
        ConstraintOrigin::Assertion(AssertionId::new(id))
    }

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut graph = ConstraintGraph::new();
        let a = graph.add_vertex("a_start");
        let b = graph.add_vertex("a_end");
        assert_eq!(graph.add_vertex("a_start"), a);
        assert_ne!(a, b);
        assert_eq!(graph.vertex_count(), 2);
    }

    #[test]
    fn test_tightening_keeps_minimum_weight() {
        let mut graph = ConstraintGraph::new();
        graph.add_edge("u", "v", 5.0, assertion("r1"));
        graph.add_edge("u", "v", 2.0, assertion("r2"));
        graph.add_edge("u", "v", 7.0, assertion("r3"));

        assert_eq!(graph.edge_count(), 1);
        let edge = graph.edges().next().unwrap();
        assert_eq!(edge.weight, 2.0);
        assert_eq!(edge.origin, assertion("r2"));
    }

    #[test]
    fn test_opposite_directions_are_distinct_edges() {
        let mut graph = ConstraintGraph::new();
        graph.add_edge("u", "v", 0.0, assertion("r1"));
        graph.add_edge("v", "u", 0.0, assertion("r1"));
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_remove_origin() {
        let mut graph = ConstraintGraph::new();
        graph.add_edge("u", "v", 1.0, assertion("r1"));
        graph.add_edge("v", "w", 1.0, assertion("r2"));
        graph.add_edge("w", "u", 1.0, assertion("r2"));

        assert_eq!(graph.remove_origin(&AssertionId::new("r2")), 2);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.remove_origin(&AssertionId::new("r2")), 0);
    }

    #[test]
    fn test_remove_origin_leaves_internal_edges() {
        let mut graph = ConstraintGraph::new();
        graph.add_edge(
            "a_end",
            "a_start",
            -1.0,
            ConstraintOrigin::Internal(EventId::new("a")),
        );
        graph.add_edge("a_start", "b_start", 0.0, assertion("r1"));

        graph.remove_origin(&AssertionId::new("r1"));
        assert_eq!(graph.edge_count(), 1);
        assert!(matches!(
            graph.edges().next().unwrap().origin,
            ConstraintOrigin::Internal(_)
        ));
    }

    #[test]
    fn test_inject_source_reaches_every_vertex() {
        let mut graph = ConstraintGraph::new();
        graph.add_edge("u", "v", 1.0, assertion("r1"));
        graph.add_edge("v", "w", 1.0, assertion("r1"));

        let source = graph.inject_source();
        assert_eq!(graph.vertex_count(), 4);
        let fan_out = graph.outgoing(source);
        assert_eq!(fan_out.len(), 3);
        assert!(fan_out
            .iter()
            .all(|e| e.weight == 0.0 && e.origin == ConstraintOrigin::SourceFanOut));
    }

    #[test]
    fn test_clone_is_structural() {
        let mut graph = ConstraintGraph::new();
        graph.add_edge("u", "v", 1.0, assertion("r1"));
        let mut copy = graph.clone();
        copy.add_edge("v", "u", 1.0, assertion("r2"));

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(copy.edge_count(), 2);
    }
}
