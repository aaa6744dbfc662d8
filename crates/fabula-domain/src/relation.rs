//! Allen relation module - the qualitative vocabulary between two events

use crate::solve::Position;
use serde::{Deserialize, Serialize};

/// One of the thirteen Allen interval relations.
///
/// The thirteen relations are jointly exhaustive and pairwise disjoint: any
/// two intervals on the line stand in exactly one of them. Fabula uses them
/// as the assertion vocabulary; the solver compiles each into difference
/// constraints over the two events' endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllenRelation {
    /// Source ends before the target starts.
    Before,
    /// Source starts after the target ends.
    After,
    /// Source ends exactly where the target starts.
    Meets,
    /// Source starts exactly where the target ends.
    MetBy,
    /// Source starts first and ends inside the target.
    Overlaps,
    /// Target starts first and ends inside the source.
    OverlappedBy,
    /// Source and target start together; source ends first.
    Starts,
    /// Source and target start together; target ends first.
    StartedBy,
    /// Source and target end together; target starts first.
    Finishes,
    /// Source and target end together; source starts first.
    FinishedBy,
    /// Source lies strictly inside the target.
    During,
    /// Target lies strictly inside the source.
    Contains,
    /// Source and target coincide.
    Equals,
}

impl AllenRelation {
    /// The full vocabulary, in canonical order.
    pub const ALL: [AllenRelation; 13] = [
        AllenRelation::Before,
        AllenRelation::After,
        AllenRelation::Meets,
        AllenRelation::MetBy,
        AllenRelation::Overlaps,
        AllenRelation::OverlappedBy,
        AllenRelation::Starts,
        AllenRelation::StartedBy,
        AllenRelation::Finishes,
        AllenRelation::FinishedBy,
        AllenRelation::During,
        AllenRelation::Contains,
        AllenRelation::Equals,
    ];

    /// Get the relation name as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            AllenRelation::Before => "before",
            AllenRelation::After => "after",
            AllenRelation::Meets => "meets",
            AllenRelation::MetBy => "met-by",
            AllenRelation::Overlaps => "overlaps",
            AllenRelation::OverlappedBy => "overlapped-by",
            AllenRelation::Starts => "starts",
            AllenRelation::StartedBy => "started-by",
            AllenRelation::Finishes => "finishes",
            AllenRelation::FinishedBy => "finished-by",
            AllenRelation::During => "during",
            AllenRelation::Contains => "contains",
            AllenRelation::Equals => "equals",
        }
    }

    /// Parse a relation from its wire name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "before" => Some(AllenRelation::Before),
            "after" => Some(AllenRelation::After),
            "meets" => Some(AllenRelation::Meets),
            "met-by" => Some(AllenRelation::MetBy),
            "overlaps" => Some(AllenRelation::Overlaps),
            "overlapped-by" => Some(AllenRelation::OverlappedBy),
            "starts" => Some(AllenRelation::Starts),
            "started-by" => Some(AllenRelation::StartedBy),
            "finishes" => Some(AllenRelation::Finishes),
            "finished-by" => Some(AllenRelation::FinishedBy),
            "during" => Some(AllenRelation::During),
            "contains" => Some(AllenRelation::Contains),
            "equals" => Some(AllenRelation::Equals),
            _ => None,
        }
    }

    /// The converse relation: if `A r B` then `B r.inverse() A`.
    pub fn inverse(&self) -> Self {
        match self {
            AllenRelation::Before => AllenRelation::After,
            AllenRelation::After => AllenRelation::Before,
            AllenRelation::Meets => AllenRelation::MetBy,
            AllenRelation::MetBy => AllenRelation::Meets,
            AllenRelation::Overlaps => AllenRelation::OverlappedBy,
            AllenRelation::OverlappedBy => AllenRelation::Overlaps,
            AllenRelation::Starts => AllenRelation::StartedBy,
            AllenRelation::StartedBy => AllenRelation::Starts,
            AllenRelation::Finishes => AllenRelation::FinishedBy,
            AllenRelation::FinishedBy => AllenRelation::Finishes,
            AllenRelation::During => AllenRelation::Contains,
            AllenRelation::Contains => AllenRelation::During,
            AllenRelation::Equals => AllenRelation::Equals,
        }
    }

    /// Human-readable phrase for violation messages: "X <phrase> Y".
    pub fn describe(&self) -> &'static str {
        match self {
            AllenRelation::Before => "ends before",
            AllenRelation::After => "begins after",
            AllenRelation::Meets => "meets",
            AllenRelation::MetBy => "is met by",
            AllenRelation::Overlaps => "overlaps",
            AllenRelation::OverlappedBy => "is overlapped by",
            AllenRelation::Starts => "starts together with",
            AllenRelation::StartedBy => "is started by",
            AllenRelation::Finishes => "finishes together with",
            AllenRelation::FinishedBy => "is finished by",
            AllenRelation::During => "occurs during",
            AllenRelation::Contains => "contains",
            AllenRelation::Equals => "coincides with",
        }
    }

    /// Evaluate the relation's semantics on two placed positions, allowing
    /// `epsilon` of slack on every comparison.
    ///
    /// Useful to consumers that highlight which assertions the final layout
    /// honors, and to tests checking solver soundness.
    pub fn satisfied_by(&self, source: &Position, target: &Position, epsilon: f64) -> bool {
        let lt = |a: f64, b: f64| a < b + epsilon;
        let eq = |a: f64, b: f64| (a - b).abs() <= epsilon;
        let (a, b) = (source, target);

        match self {
            AllenRelation::Before => lt(a.end, b.start),
            AllenRelation::After => lt(b.end, a.start),
            AllenRelation::Meets => eq(a.end, b.start),
            AllenRelation::MetBy => eq(a.start, b.end),
            AllenRelation::Overlaps => {
                lt(a.start, b.start) && lt(b.start, a.end) && lt(a.end, b.end)
            }
            AllenRelation::OverlappedBy => {
                lt(b.start, a.start) && lt(a.start, b.end) && lt(b.end, a.end)
            }
            AllenRelation::Starts => eq(a.start, b.start) && lt(a.end, b.end),
            AllenRelation::StartedBy => eq(a.start, b.start) && lt(b.end, a.end),
            AllenRelation::Finishes => lt(b.start, a.start) && eq(a.end, b.end),
            AllenRelation::FinishedBy => lt(a.start, b.start) && eq(a.end, b.end),
            AllenRelation::During => lt(b.start, a.start) && lt(a.end, b.end),
            AllenRelation::Contains => lt(a.start, b.start) && lt(b.end, a.end),
            AllenRelation::Equals => eq(a.start, b.start) && eq(a.end, b.end),
        }
    }
}

impl std::str::FromStr for AllenRelation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid Allen relation: {}", s))
    }
}

impl std::fmt::Display for AllenRelation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;

    fn pos(start: f64, end: f64) -> Position {
        Position::new(EventId::new("x"), start, end)
    }

    #[test]
    fn test_parse_covers_all_wire_names() {
        for relation in AllenRelation::ALL {
            assert_eq!(AllenRelation::parse(relation.as_str()), Some(relation));
        }
        assert_eq!(AllenRelation::parse("precedes"), None);
    }

    #[test]
    fn test_wire_format_is_kebab_case() {
        let json = serde_json::to_string(&AllenRelation::OverlappedBy).unwrap();
        assert_eq!(json, r#""overlapped-by""#);
        let back: AllenRelation = serde_json::from_str(r#""met-by""#).unwrap();
        assert_eq!(back, AllenRelation::MetBy);
    }

    #[test]
    fn test_before_semantics() {
        assert!(AllenRelation::Before.satisfied_by(&pos(0.0, 10.0), &pos(20.0, 30.0), 1e-6));
        assert!(!AllenRelation::Before.satisfied_by(&pos(0.0, 25.0), &pos(20.0, 30.0), 1e-6));
    }

    #[test]
    fn test_during_semantics() {
        assert!(AllenRelation::During.satisfied_by(&pos(10.0, 20.0), &pos(0.0, 30.0), 1e-6));
        assert!(!AllenRelation::During.satisfied_by(&pos(0.0, 30.0), &pos(10.0, 20.0), 1e-6));
    }

    #[test]
    fn test_meets_allows_epsilon_slack() {
        assert!(AllenRelation::Meets.satisfied_by(&pos(0.0, 10.0), &pos(10.0005, 20.0), 0.001));
        assert!(!AllenRelation::Meets.satisfied_by(&pos(0.0, 10.0), &pos(12.0, 20.0), 0.001));
    }
}
