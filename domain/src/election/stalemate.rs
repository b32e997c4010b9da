//! Stalemate handling between rounds
//!
//! When a round elects nobody, the policy decides what the next round's
//! field looks like. `Unchanged` is the classic conclave: the same field
//! votes again. `Elimination` narrows the field by dropping candidates
//! below a vote-count floor; an eliminated cardinal never re-enters.

use super::tally::Tally;
use crate::cardinal::CardinalId;
use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A narrowing step that would leave no eligible cardinals.
///
/// Surfaced to the orchestrator, which ends the run as no-quorum rather
/// than voting over an empty field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("elimination would leave the field empty")]
pub struct FieldExhausted;

/// How the eligible field evolves after a round without an election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum StalematePolicy {
    /// The field is identical next round; every stalemated round is a
    /// straight re-vote.
    #[default]
    Unchanged,

    /// Cardinals polling fewer than `min_votes` votes leave the field.
    Elimination { min_votes: usize },
}

impl StalematePolicy {
    /// Reject configurations that are guaranteed to fail.
    ///
    /// A floor above the field size empties the field on the first
    /// stalemate no matter how the votes split, so it is refused up front.
    /// Floors that merely *can* empty the field are legal; that case is
    /// detected per-round by [`StalematePolicy::narrow`].
    pub fn validate(&self, field_size: usize) -> Result<(), ConfigError> {
        if let StalematePolicy::Elimination { min_votes } = self
            && *min_votes > field_size
        {
            return Err(ConfigError::ImpossibleElimination {
                min_votes: *min_votes,
                field_size,
            });
        }
        Ok(())
    }

    /// Compute the next round's field from this round's tally.
    ///
    /// The result is always a subset of `eligible`: the field is
    /// monotonically non-increasing and nobody is ever re-admitted.
    pub fn narrow(
        &self,
        tally: &Tally,
        eligible: &[CardinalId],
    ) -> Result<Vec<CardinalId>, FieldExhausted> {
        match self {
            StalematePolicy::Unchanged => Ok(eligible.to_vec()),
            StalematePolicy::Elimination { min_votes } => {
                let survivors: Vec<CardinalId> = eligible
                    .iter()
                    .copied()
                    .filter(|id| tally.count_for(*id) >= *min_votes)
                    .collect();
                if survivors.is_empty() {
                    Err(FieldExhausted)
                } else {
                    Ok(survivors)
                }
            }
        }
    }
}

impl std::fmt::Display for StalematePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StalematePolicy::Unchanged => write!(f, "unchanged field"),
            StalematePolicy::Elimination { min_votes } => {
                write!(f, "eliminate below {min_votes} votes")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::election::ballot::{Ballot, CastVote};

    fn id(n: u32) -> CardinalId {
        CardinalId::new(n)
    }

    fn tally(votes: &[(u32, u32)]) -> Tally {
        let mut ballot = Ballot::new();
        for (voter, candidate) in votes {
            ballot.record(id(*voter), CastVote::direct(id(*candidate)));
        }
        Tally::from_ballot(&ballot)
    }

    #[test]
    fn test_unchanged_keeps_the_field() {
        let eligible = vec![id(1), id(2), id(3)];
        let next = StalematePolicy::Unchanged
            .narrow(&tally(&[(1, 2), (2, 2), (3, 1)]), &eligible)
            .unwrap();
        assert_eq!(next, eligible);
    }

    #[test]
    fn test_elimination_drops_below_floor() {
        let eligible = vec![id(1), id(2), id(3)];
        // #2 polls 2, #1 polls 1, #3 polls 0
        let next = StalematePolicy::Elimination { min_votes: 1 }
            .narrow(&tally(&[(1, 2), (2, 2), (3, 1)]), &eligible)
            .unwrap();
        assert_eq!(next, vec![id(1), id(2)]);
    }

    #[test]
    fn test_elimination_is_non_increasing() {
        let eligible = vec![id(1), id(2)];
        let next = StalematePolicy::Elimination { min_votes: 1 }
            .narrow(&tally(&[(1, 2), (2, 2)]), &eligible)
            .unwrap();
        // #1 polls 0 now and leaves; the field never regrows
        assert_eq!(next, vec![id(2)]);
        assert!(next.iter().all(|id| eligible.contains(id)));
    }

    #[test]
    fn test_elimination_can_exhaust_the_field() {
        let eligible = vec![id(1), id(2), id(3)];
        let result = StalematePolicy::Elimination { min_votes: 2 }
            .narrow(&tally(&[(1, 2), (2, 3), (3, 1)]), &eligible);
        assert_eq!(result, Err(FieldExhausted));
    }

    #[test]
    fn test_validate_rejects_impossible_floor() {
        let policy = StalematePolicy::Elimination { min_votes: 5 };
        assert!(matches!(
            policy.validate(3),
            Err(ConfigError::ImpossibleElimination {
                min_votes: 5,
                field_size: 3
            })
        ));
        assert!(policy.validate(5).is_ok());
        assert!(StalematePolicy::Unchanged.validate(0).is_ok());
    }
}
