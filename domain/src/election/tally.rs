//! Vote tallying
//!
//! A [`Tally`] is derived from a [`Ballot`] and never persisted on its own.
//! Counting, winner determination and frontrunner extraction are all pure:
//! the same ballot and rule always produce the same outcome.

use super::ballot::Ballot;
use super::rule::MajorityRule;
use crate::cardinal::CardinalId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-candidate vote counts for one round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    counts: BTreeMap<CardinalId, usize>,
    cast: usize,
}

impl Tally {
    pub fn from_ballot(ballot: &Ballot) -> Self {
        let mut counts: BTreeMap<CardinalId, usize> = BTreeMap::new();
        for (_, vote) in ballot.iter() {
            *counts.entry(vote.candidate).or_default() += 1;
        }
        Self {
            counts,
            cast: ballot.len(),
        }
    }

    /// Number of ballots cast this round. Always equals the sum of the
    /// per-candidate counts.
    pub fn cast(&self) -> usize {
        self.cast
    }

    pub fn count_for(&self, candidate: CardinalId) -> usize {
        self.counts.get(&candidate).copied().unwrap_or(0)
    }

    /// `(candidate, count)` pairs in ascending candidate-id order.
    pub fn counts(&self) -> impl Iterator<Item = (CardinalId, usize)> + '_ {
        self.counts.iter().map(|(id, count)| (*id, *count))
    }

    /// `(candidate, count)` sorted by descending count, ascending id.
    pub fn standings(&self) -> Vec<(CardinalId, usize)> {
        let mut standings: Vec<_> = self.counts().collect();
        standings.sort_by(|(id_a, count_a), (id_b, count_b)| {
            count_b.cmp(count_a).then(id_a.cmp(id_b))
        });
        standings
    }

    /// The winner under `rule`, if any.
    ///
    /// When several candidates satisfy the rule at once (possible under
    /// loose thresholds) the tie is broken by highest count, then lowest
    /// id. An empty ballot produces no winner.
    pub fn winner(&self, rule: &MajorityRule) -> Option<CardinalId> {
        self.counts()
            .filter(|(_, count)| rule.is_satisfied(*count, self.cast))
            .max_by_key(|(id, count)| (*count, std::cmp::Reverse(*id)))
            .map(|(id, _)| id)
    }

    /// Candidate with the most votes (lowest id on ties), elected or not.
    pub fn leader(&self) -> Option<CardinalId> {
        self.counts()
            .max_by_key(|(id, count)| (*count, std::cmp::Reverse(*id)))
            .map(|(id, _)| id)
    }

    /// Support ratio per candidate, descending, id ascending on ties.
    pub fn support_ratios(&self) -> Vec<(CardinalId, f64)> {
        if self.cast == 0 {
            return Vec::new();
        }
        self.standings()
            .into_iter()
            .map(|(id, count)| (id, count as f64 / self.cast as f64))
            .collect()
    }

    /// Candidates whose support strictly exceeds `cutoff`, strongest first.
    pub fn frontrunners(&self, cutoff: f64) -> Vec<(CardinalId, f64)> {
        self.support_ratios()
            .into_iter()
            .filter(|(_, ratio)| *ratio > cutoff)
            .collect()
    }
}
