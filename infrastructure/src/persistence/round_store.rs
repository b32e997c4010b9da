//! Per-round JSON result files

use conclave_domain::{ElectionResult, RoundRecord};
use std::io;
use std::path::{Path, PathBuf};

/// Writes round records and the final result under one directory.
pub struct RoundStore {
    dir: PathBuf,
}

impl RoundStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn round_path(&self, round: u32) -> PathBuf {
        self.dir.join(format!("round_{round}_results.json"))
    }

    pub fn save_round(&self, record: &RoundRecord) -> io::Result<()> {
        let json = serde_json::to_string_pretty(record).map_err(io::Error::other)?;
        std::fs::write(self.round_path(record.round), json)
    }

    pub fn save_result(&self, result: &ElectionResult) -> io::Result<()> {
        let json = serde_json::to_string_pretty(result).map_err(io::Error::other)?;
        std::fs::write(self.dir.join("final_result.json"), json)
    }

    /// Read back one round's record, if it was saved.
    pub fn load_round(&self, round: u32) -> io::Result<Option<RoundRecord>> {
        let path = self.round_path(round);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw).map(Some).map_err(io::Error::other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conclave_domain::{Ballot, CardinalId, CastVote, MajorityRule, NoQuorumReason, Tally};

    fn record(round: u32) -> RoundRecord {
        let mut ballot = Ballot::new();
        ballot.record(CardinalId::new(1), CastVote::direct(CardinalId::new(2)));
        ballot.record(CardinalId::new(2), CastVote::direct(CardinalId::new(2)));
        let tally = Tally::from_ballot(&ballot);
        let elected = tally.winner(&MajorityRule::two_thirds());
        RoundRecord::new(round, ballot, tally, elected)
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoundStore::new(dir.path().join("round_results")).unwrap();

        let original = record(1);
        store.save_round(&original).unwrap();

        let loaded = store.load_round(1).unwrap().unwrap();
        assert_eq!(loaded.round, 1);
        assert_eq!(loaded.tally, original.tally);
        assert_eq!(loaded.elected, original.elected);

        assert!(store.load_round(2).unwrap().is_none());
    }

    #[test]
    fn test_save_result() {
        let dir = tempfile::tempdir().unwrap();
        let store = RoundStore::new(dir.path()).unwrap();

        store
            .save_result(&ElectionResult::NoQuorum {
                rounds: 5,
                reason: NoQuorumReason::RoundCapReached,
            })
            .unwrap();

        let raw = std::fs::read_to_string(dir.path().join("final_result.json")).unwrap();
        assert!(raw.contains("no_quorum"));
    }
}
