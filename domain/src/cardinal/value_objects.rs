//! Value objects for the cardinal subdomain

use serde::{Deserialize, Serialize};

/// Unique identifier of a cardinal within one conclave run.
///
/// Ids are assigned in roster order and provide the deterministic total
/// order used for tie-breaking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardinalId(u32);

impl CardinalId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardinalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ideological leaning on a conservative ↔ liberal scale.
///
/// The score is clamped to [-1.0, 1.0]: -1.0 is very conservative,
/// 1.0 is very liberal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaning(f64);

impl Leaning {
    pub fn new(score: f64) -> Self {
        Self(score.clamp(-1.0, 1.0))
    }

    pub fn score(&self) -> f64 {
        self.0
    }

    /// Categorical label derived from the score.
    pub fn label(&self) -> &'static str {
        match self.0 {
            s if s <= -0.6 => "very conservative",
            s if s <= -0.2 => "conservative",
            s if s < 0.2 => "moderate",
            s if s < 0.6 => "liberal",
            _ => "very liberal",
        }
    }
}

impl std::fmt::Display for Leaning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({:+.2})", self.label(), self.0)
    }
}

/// One entry in a cardinal's personal voting history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    /// Round the vote was cast in (1-indexed).
    pub round: u32,
    /// The candidate this cardinal voted for.
    pub candidate: CardinalId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_ordering() {
        assert!(CardinalId::new(1) < CardinalId::new(2));
        assert_eq!(CardinalId::new(7).to_string(), "#7");
    }

    #[test]
    fn test_leaning_clamps() {
        assert_eq!(Leaning::new(3.0).score(), 1.0);
        assert_eq!(Leaning::new(-3.0).score(), -1.0);
    }

    #[test]
    fn test_leaning_labels() {
        assert_eq!(Leaning::new(-0.9).label(), "very conservative");
        assert_eq!(Leaning::new(-0.4).label(), "conservative");
        assert_eq!(Leaning::new(0.0).label(), "moderate");
        assert_eq!(Leaning::new(0.4).label(), "liberal");
        assert_eq!(Leaning::new(0.9).label(), "very liberal");
    }

    #[test]
    fn test_leaning_display() {
        assert_eq!(Leaning::new(0.0).to_string(), "moderate (+0.00)");
    }
}
