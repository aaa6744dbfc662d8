//! Event module - the entities placed on the timeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for an event, assigned by the editor.
///
/// Event ids are opaque strings; the solver only requires that they are
/// unique within one solve request. Each event contributes two endpoint
/// variables to the constraint graph, named canonically from its id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Create an event id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical name of this event's start endpoint variable.
    pub fn start_variable(&self) -> String {
        format!("{}_start", self.0)
    }

    /// Canonical name of this event's end endpoint variable.
    pub fn end_variable(&self) -> String {
        format!("{}_end", self.0)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EventId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Whether an event occupies a point or a span on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationKind {
    /// Zero-width event; its start and end coincide.
    Instant,

    /// Nonzero-width event; its end is held a minimum duration after its
    /// start so it stays visible.
    Interval,
}

impl DurationKind {
    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DurationKind::Instant => "instant",
            DurationKind::Interval => "interval",
        }
    }

    /// Parse a kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "instant" => Some(DurationKind::Instant),
            "interval" => Some(DurationKind::Interval),
            _ => None,
        }
    }

    /// True for zero-width events.
    pub fn is_instant(&self) -> bool {
        matches!(self, DurationKind::Instant)
    }
}

impl std::str::FromStr for DurationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid duration kind: {}", s))
    }
}

fn default_enabled() -> bool {
    true
}

/// An event on the timeline.
///
/// The editor attaches names, descriptions and styling to events; none of
/// that reaches the solver. Only the id, the duration kind and the enabled
/// bit are consulted. Disabled events are excluded before compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Stable identifier.
    pub id: EventId,

    /// Instant or interval.
    pub duration_type: DurationKind,

    /// Disabled events do not participate in the solve.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Event {
    /// Create an enabled instant event.
    pub fn instant(id: impl Into<EventId>) -> Self {
        Self {
            id: id.into(),
            duration_type: DurationKind::Instant,
            enabled: true,
        }
    }

    /// Create an enabled interval event.
    pub fn interval(id: impl Into<EventId>) -> Self {
        Self {
            id: id.into(),
            duration_type: DurationKind::Interval,
            enabled: true,
        }
    }
}
