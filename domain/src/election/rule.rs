//! Majority rules for winner determination
//!
//! A rule is a fraction of the ballots cast plus a strictness flag. All
//! comparisons use integer arithmetic, so identical tallies always produce
//! identical outcomes regardless of field size.

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Threshold a candidate's vote count must clear, relative to ballots cast.
///
/// The default is the historical conclave convention: strictly more than
/// two thirds of the ballots cast.
///
/// # Example
///
/// ```
/// use conclave_domain::election::MajorityRule;
///
/// let rule = MajorityRule::two_thirds();
/// assert!(!rule.is_satisfied(2, 3)); // exactly 2/3 is not enough
/// assert!(rule.is_satisfied(3, 3));
///
/// let simple: MajorityRule = "1/2".parse().unwrap();
/// assert!(simple.is_satisfied(2, 3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorityRule {
    numerator: u32,
    denominator: u32,
    /// When true the count must strictly exceed the fraction; when false
    /// reaching it exactly suffices.
    strict: bool,
}

impl MajorityRule {
    pub fn new(numerator: u32, denominator: u32, strict: bool) -> Result<Self, ConfigError> {
        let rule = Self {
            numerator,
            denominator,
            strict,
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Strictly more than two thirds of ballots cast.
    pub fn two_thirds() -> Self {
        Self {
            numerator: 2,
            denominator: 3,
            strict: true,
        }
    }

    /// Strictly more than half of ballots cast.
    pub fn simple_majority() -> Self {
        Self {
            numerator: 1,
            denominator: 2,
            strict: true,
        }
    }

    /// Every ballot cast for the same candidate.
    pub fn unanimous() -> Self {
        Self {
            numerator: 1,
            denominator: 1,
            strict: false,
        }
    }

    /// Re-check invariants. Needed for rules that arrive via deserialization
    /// rather than [`MajorityRule::new`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.denominator == 0 || self.numerator > self.denominator {
            return Err(ConfigError::InvalidThreshold {
                numerator: self.numerator,
                denominator: self.denominator,
            });
        }
        Ok(())
    }

    /// Check whether `count` votes out of `cast` ballots satisfy the rule.
    ///
    /// Zero ballots cast never elects anyone.
    pub fn is_satisfied(&self, count: usize, cast: usize) -> bool {
        if cast == 0 {
            return false;
        }
        let lhs = count as u64 * self.denominator as u64;
        let rhs = cast as u64 * self.numerator as u64;
        if self.strict { lhs > rhs } else { lhs >= rhs }
    }

    /// Minimum vote count that satisfies the rule for `cast` ballots.
    pub fn min_votes_needed(&self, cast: usize) -> usize {
        let num = cast as u64 * self.numerator as u64;
        let den = self.denominator as u64;
        let count = if self.strict {
            num / den + 1
        } else {
            num.div_ceil(den)
        };
        count as usize
    }

    pub fn description(&self) -> String {
        let bound = if self.strict { "more than" } else { "at least" };
        format!(
            "{} {}/{} of ballots cast",
            bound, self.numerator, self.denominator
        )
    }
}

impl Default for MajorityRule {
    fn default() -> Self {
        Self::two_thirds()
    }
}

impl std::fmt::Display for MajorityRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for MajorityRule {
    type Err = String;

    /// Accepted forms: `two-thirds`, `majority`, `unanimous`, `N/D`
    /// (strict), or `at-least:N/D` (non-strict).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "two-thirds" | "two_thirds" => return Ok(Self::two_thirds()),
            "majority" | "half" => return Ok(Self::simple_majority()),
            "unanimous" => return Ok(Self::unanimous()),
            _ => {}
        }

        let (strict, body) = match s.strip_prefix("at-least:").or_else(|| s.strip_prefix("at_least:")) {
            Some(rest) => (false, rest),
            None => (true, s.as_str()),
        };

        let (num, den) = body
            .split_once('/')
            .ok_or_else(|| format!("Unknown majority rule: {s}. Valid: two-thirds, majority, unanimous, N/D, at-least:N/D"))?;
        let numerator: u32 = num
            .trim()
            .parse()
            .map_err(|_| format!("Invalid numerator in rule: {s}"))?;
        let denominator: u32 = den
            .trim()
            .parse()
            .map_err(|_| format!("Invalid denominator in rule: {s}"))?;

        Self::new(numerator, denominator, strict).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_thirds_is_strict() {
        let rule = MajorityRule::two_thirds();

        // 3 cast: 2 votes is exactly 2/3, not strictly more
        assert!(!rule.is_satisfied(2, 3));
        assert!(rule.is_satisfied(3, 3));

        // 9 cast: need strictly more than 6
        assert!(!rule.is_satisfied(6, 9));
        assert!(rule.is_satisfied(7, 9));
    }

    #[test]
    fn test_non_strict_boundary() {
        let rule = MajorityRule::new(2, 3, false).unwrap();

        // Exactly at the threshold elects under a non-strict rule
        assert!(rule.is_satisfied(2, 3));
        assert!(!rule.is_satisfied(1, 3));
    }

    #[test]
    fn test_zero_cast_never_elects() {
        assert!(!MajorityRule::two_thirds().is_satisfied(0, 0));
        assert!(!MajorityRule::unanimous().is_satisfied(0, 0));
    }

    #[test]
    fn test_min_votes_needed() {
        assert_eq!(MajorityRule::two_thirds().min_votes_needed(3), 3);
        assert_eq!(MajorityRule::two_thirds().min_votes_needed(9), 7);
        assert_eq!(MajorityRule::simple_majority().min_votes_needed(4), 3);
        assert_eq!(MajorityRule::new(2, 3, false).unwrap().min_votes_needed(3), 2);
        assert_eq!(MajorityRule::unanimous().min_votes_needed(5), 5);
    }

    #[test]
    fn test_invalid_thresholds() {
        assert!(MajorityRule::new(1, 0, true).is_err());
        assert!(MajorityRule::new(4, 3, true).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "two-thirds".parse::<MajorityRule>().unwrap(),
            MajorityRule::two_thirds()
        );
        assert_eq!(
            "majority".parse::<MajorityRule>().unwrap(),
            MajorityRule::simple_majority()
        );
        assert_eq!(
            "3/4".parse::<MajorityRule>().unwrap(),
            MajorityRule::new(3, 4, true).unwrap()
        );
        assert_eq!(
            "at-least:2/3".parse::<MajorityRule>().unwrap(),
            MajorityRule::new(2, 3, false).unwrap()
        );
        assert!("".parse::<MajorityRule>().is_err());
        assert!("7/0".parse::<MajorityRule>().is_err());
    }

    #[test]
    fn test_description() {
        assert_eq!(
            MajorityRule::two_thirds().description(),
            "more than 2/3 of ballots cast"
        );
        assert_eq!(
            MajorityRule::unanimous().description(),
            "at least 1/1 of ballots cast"
        );
    }

    #[test]
    fn test_default_is_two_thirds() {
        assert_eq!(MajorityRule::default(), MajorityRule::two_thirds());
    }
}
