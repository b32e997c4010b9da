//! Round records and the run report
//!
//! The report is the single immutable account of a run: one record per
//! round, appended by the orchestrator (the only writer) and sealed into
//! an [`ElectionResult`] at termination.

use super::ballot::Ballot;
use super::tally::Tally;
use crate::cardinal::CardinalId;
use serde::{Deserialize, Serialize};

/// Immutable snapshot of one completed round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Round number (1-indexed).
    pub round: u32,
    pub ballot: Ballot,
    pub tally: Tally,
    /// The elected candidate, if this round produced one.
    pub elected: Option<CardinalId>,
    /// Milliseconds since epoch, for auditing.
    pub timestamp: u64,
}

impl RoundRecord {
    pub fn new(round: u32, ballot: Ballot, tally: Tally, elected: Option<CardinalId>) -> Self {
        Self {
            round,
            ballot,
            tally,
            elected,
            timestamp: current_timestamp(),
        }
    }

    pub fn is_decisive(&self) -> bool {
        self.elected.is_some()
    }
}

/// Append-only sequence of round records.
///
/// Round numbers are contiguous from 1; pushing out of order is a defect.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    rounds: Vec<RoundRecord>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: RoundRecord) {
        assert_eq!(
            record.round as usize,
            self.rounds.len() + 1,
            "round records must be appended in order without gaps"
        );
        self.rounds.push(record);
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    pub fn last(&self) -> Option<&RoundRecord> {
        self.rounds.last()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

/// Why a run ended without an election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoQuorumReason {
    /// The configured round cap was exhausted.
    RoundCapReached,
    /// Elimination left no viable field for another round.
    FieldExhausted,
    /// The run was cancelled between rounds.
    Cancelled,
}

impl std::fmt::Display for NoQuorumReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NoQuorumReason::RoundCapReached => "round cap reached",
            NoQuorumReason::FieldExhausted => "field exhausted",
            NoQuorumReason::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Terminal outcome of a conclave run.
///
/// No-quorum is a valid result, not an error: the machinery worked, the
/// electors simply never converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ElectionResult {
    Elected { cardinal: CardinalId, round: u32 },
    NoQuorum { rounds: u32, reason: NoQuorumReason },
}

impl ElectionResult {
    pub fn is_elected(&self) -> bool {
        matches!(self, ElectionResult::Elected { .. })
    }

    pub fn elected(&self) -> Option<CardinalId> {
        match self {
            ElectionResult::Elected { cardinal, .. } => Some(*cardinal),
            ElectionResult::NoQuorum { .. } => None,
        }
    }

    /// The last round that ran before termination.
    pub fn final_round(&self) -> u32 {
        match self {
            ElectionResult::Elected { round, .. } => *round,
            ElectionResult::NoQuorum { rounds, .. } => *rounds,
        }
    }
}

fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
