//! Assertion module - directed temporal claims between two events

use crate::confidence::Confidence;
use crate::event::EventId;
use crate::relation::AllenRelation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for an assertion, assigned by the editor.
///
/// Assertion ids are threaded through the whole pipeline as edge provenance,
/// so a conflict witness can name exactly which user statements collided.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssertionId(String);

impl AssertionId {
    /// Create an assertion id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssertionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssertionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssertionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A qualitative temporal claim: `source relation target`.
///
/// Assertions are directed; `A before B` and `B after A` express the same
/// fact from opposite sides. The confidence tier decides which assertions
/// are sacrificed first when the set as a whole is contradictory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
    /// Stable identifier.
    pub id: AssertionId,

    /// Event on the left-hand side of the relation.
    pub source_id: EventId,

    /// Event on the right-hand side of the relation.
    pub target_id: EventId,

    /// The Allen relation asserted to hold.
    pub relation: AllenRelation,

    /// Ordinal trust tier.
    pub confidence: Confidence,

    /// Disabled assertions do not participate in the solve.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Assertion {
    /// Create an enabled assertion.
    pub fn new(
        id: impl Into<AssertionId>,
        source_id: impl Into<EventId>,
        target_id: impl Into<EventId>,
        relation: AllenRelation,
        confidence: Confidence,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            relation,
            confidence,
            enabled: true,
        }
    }

    /// Render the claim as a short human-readable phrase.
    pub fn describe(&self) -> String {
        format!(
            "{} {} {}",
            self.source_id,
            self.relation.describe(),
            self.target_id
        )
    }
}
