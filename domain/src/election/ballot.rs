//! Ballot types
//!
//! A ballot is one round's complete mapping from voter to chosen candidate.
//! Every vote carries its provenance so the round record can show which
//! electors fell back to the deterministic policy and why.

use crate::cardinal::CardinalId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Why a vote was produced by the fallback policy instead of the
/// collaborator's own choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// The collaborator kept failing (transport error, timeout).
    CollaboratorError,
    /// Responses never contained a recognizable candidate name.
    UnparseableResponse,
    /// The collaborator kept naming someone outside the eligible field
    /// (or itself, when self-votes are disallowed).
    IneligibleCandidate,
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FallbackReason::CollaboratorError => "collaborator error",
            FallbackReason::UnparseableResponse => "unparseable response",
            FallbackReason::IneligibleCandidate => "ineligible candidate",
        };
        write!(f, "{s}")
    }
}

/// Where a cast vote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteProvenance {
    /// The collaborator named this candidate itself.
    Direct,
    /// The deterministic fallback policy chose after retries were exhausted.
    Fallback(FallbackReason),
}

impl VoteProvenance {
    pub fn is_fallback(&self) -> bool {
        matches!(self, VoteProvenance::Fallback(_))
    }
}

/// A single vote as it appears in a ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastVote {
    pub candidate: CardinalId,
    pub provenance: VoteProvenance,
}

impl CastVote {
    pub fn direct(candidate: CardinalId) -> Self {
        Self {
            candidate,
            provenance: VoteProvenance::Direct,
        }
    }

    pub fn fallback(candidate: CardinalId, reason: FallbackReason) -> Self {
        Self {
            candidate,
            provenance: VoteProvenance::Fallback(reason),
        }
    }
}

/// One round's votes, keyed by voter.
///
/// The ordered map gives a deterministic iteration order however the
/// votes arrived (they are collected concurrently). One entry per voter:
/// recording a second vote for the same voter is a defect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    votes: BTreeMap<CardinalId, CastVote>,
}

impl Ballot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, voter: CardinalId, vote: CastVote) {
        let previous = self.votes.insert(voter, vote);
        assert!(previous.is_none(), "voter {voter} already cast a ballot");
    }

    pub fn get(&self, voter: CardinalId) -> Option<&CastVote> {
        self.votes.get(&voter)
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// Votes in ascending voter-id order.
    pub fn iter(&self) -> impl Iterator<Item = (CardinalId, &CastVote)> {
        self.votes.iter().map(|(voter, vote)| (*voter, vote))
    }

    /// Voters whose vote came from the fallback policy.
    pub fn fallbacks(&self) -> impl Iterator<Item = (CardinalId, FallbackReason)> + '_ {
        self.votes.iter().filter_map(|(voter, vote)| match vote.provenance {
            VoteProvenance::Fallback(reason) => Some((*voter, reason)),
            VoteProvenance::Direct => None,
        })
    }

    /// Whether every eligible voter in `voters` has an entry.
    pub fn covers(&self, voters: &[CardinalId]) -> bool {
        voters.iter().all(|v| self.votes.contains_key(v))
    }
}
