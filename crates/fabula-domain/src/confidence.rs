//! Confidence module - ordinal trust tiers for assertions

use serde::{Deserialize, Serialize};

/// Trust tier of an assertion.
///
/// Confidence is an ordinal priority, not a probability. When assertions
/// contradict each other, the relaxer sacrifices the lowest tier present in
/// the conflict first, so speculation yields to inference and inference
/// yields to explicit statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Directly stated by the source material.
    Explicit,

    /// Deduced from other statements.
    Inferred,

    /// A guess worth recording but cheap to give up.
    Speculation,
}

impl Confidence {
    /// Priority weight of this tier. Only the total order of the weights
    /// matters; the absolute values are immaterial.
    pub fn weight(&self) -> u32 {
        match self {
            Confidence::Explicit => 1000,
            Confidence::Inferred => 100,
            Confidence::Speculation => 10,
        }
    }

    /// Severity of discarding an assertion at this tier.
    pub fn severity(&self) -> Severity {
        match self {
            Confidence::Speculation => Severity::Soft,
            Confidence::Explicit | Confidence::Inferred => Severity::Hard,
        }
    }

    /// Get the tier name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Explicit => "explicit",
            Confidence::Inferred => "inferred",
            Confidence::Speculation => "speculation",
        }
    }

    /// Parse a tier from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "explicit" => Some(Confidence::Explicit),
            "inferred" => Some(Confidence::Inferred),
            "speculation" => Some(Confidence::Speculation),
            _ => None,
        }
    }
}

impl std::str::FromStr for Confidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid confidence tier: {}", s))
    }
}

/// How serious the loss of a discarded assertion is for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// A speculation was dropped; the layout barely suffers.
    Soft,

    /// An inferred or explicit assertion was dropped; the layout disagrees
    /// with something the user actually stated.
    Hard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_strictly_decrease() {
        assert!(Confidence::Explicit.weight() > Confidence::Inferred.weight());
        assert!(Confidence::Inferred.weight() > Confidence::Speculation.weight());
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(Confidence::Speculation.severity(), Severity::Soft);
        assert_eq!(Confidence::Inferred.severity(), Severity::Hard);
        assert_eq!(Confidence::Explicit.severity(), Severity::Hard);
    }

    #[test]
    fn test_parse_roundtrip() {
        for tier in [
            Confidence::Explicit,
            Confidence::Inferred,
            Confidence::Speculation,
        ] {
            assert_eq!(Confidence::parse(tier.as_str()), Some(tier));
        }
        assert_eq!(Confidence::parse("certain"), None);
    }

    #[test]
    fn test_wire_format_is_snake_case() {
        let json = serde_json::to_string(&Confidence::Speculation).unwrap();
        assert_eq!(json, r#""speculation""#);
    }
}
