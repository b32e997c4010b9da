//! Cardinal entity and validated roster

use super::value_objects::{CardinalId, Leaning, VoteRecord};
use crate::core::error::ConfigError;
use crate::election::parsing::normalize_name;
use serde::{Deserialize, Serialize};

/// A simulated elector: fixed identity plus per-run mutable state.
///
/// The voting history is append-only and owned exclusively by this record;
/// the orchestrator appends one entry per completed round. Eligibility
/// flips to `false` at most once (elimination) and never back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cardinal {
    id: CardinalId,
    name: String,
    biography: String,
    leaning: Leaning,
    voting_history: Vec<VoteRecord>,
    eligible: bool,
}

impl Cardinal {
    pub fn new(
        id: CardinalId,
        name: impl Into<String>,
        biography: impl Into<String>,
        leaning: Leaning,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            biography: biography.into(),
            leaning,
            voting_history: Vec::new(),
            eligible: true,
        }
    }

    pub fn id(&self) -> CardinalId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn biography(&self) -> &str {
        &self.biography
    }

    pub fn leaning(&self) -> Leaning {
        self.leaning
    }

    pub fn is_eligible(&self) -> bool {
        self.eligible
    }

    /// Full voting history, oldest first.
    pub fn voting_history(&self) -> &[VoteRecord] {
        &self.voting_history
    }

    /// The most recent vote this cardinal cast, if any.
    pub fn last_vote(&self) -> Option<VoteRecord> {
        self.voting_history.last().copied()
    }

    /// Append one round's vote. Called by the orchestrator after the round
    /// completes; rounds must arrive in increasing order.
    pub fn record_vote(&mut self, record: VoteRecord) {
        if let Some(last) = self.voting_history.last() {
            assert!(
                record.round > last.round,
                "vote history must grow in round order"
            );
        }
        self.voting_history.push(record);
    }

    /// Remove this cardinal from the field. Irreversible.
    pub fn mark_eliminated(&mut self) {
        self.eligible = false;
    }
}

/// The validated set of cardinals for one conclave run.
///
/// Construction enforces the pre-run invariants: non-empty, unique ids,
/// unique names after normalization (two cardinals whose names fold to the
/// same string would make vote matching ambiguous).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    cardinals: Vec<Cardinal>,
}

impl Roster {
    pub fn new(cardinals: Vec<Cardinal>) -> Result<Self, ConfigError> {
        if cardinals.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }

        let mut seen_ids = std::collections::BTreeSet::new();
        let mut seen_names = std::collections::BTreeSet::new();
        for cardinal in &cardinals {
            if !seen_ids.insert(cardinal.id()) {
                return Err(ConfigError::DuplicateId(cardinal.id().value()));
            }
            if !seen_names.insert(normalize_name(cardinal.name())) {
                return Err(ConfigError::DuplicateName(cardinal.name().to_string()));
            }
        }

        Ok(Self { cardinals })
    }

    pub fn len(&self) -> usize {
        self.cardinals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cardinals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cardinal> {
        self.cardinals.iter()
    }

    pub fn get(&self, id: CardinalId) -> Option<&Cardinal> {
        self.cardinals.iter().find(|c| c.id() == id)
    }

    pub fn get_mut(&mut self, id: CardinalId) -> Option<&mut Cardinal> {
        self.cardinals.iter_mut().find(|c| c.id() == id)
    }

    pub fn name_of(&self, id: CardinalId) -> Option<&str> {
        self.get(id).map(|c| c.name())
    }

    /// Cardinals still in the field.
    pub fn eligible(&self) -> impl Iterator<Item = &Cardinal> {
        self.cardinals.iter().filter(|c| c.is_eligible())
    }

    /// Ids of eligible cardinals, in ascending id order.
    pub fn eligible_ids(&self) -> Vec<CardinalId> {
        let mut ids: Vec<CardinalId> = self.eligible().map(|c| c.id()).collect();
        ids.sort();
        ids
    }

    pub fn eligible_count(&self) -> usize {
        self.eligible().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cardinal(id: u32, name: &str) -> Cardinal {
        Cardinal::new(CardinalId::new(id), name, "bio", Leaning::new(0.0))
    }

    #[test]
    fn test_roster_rejects_empty() {
        assert_eq!(Roster::new(vec![]).unwrap_err(), ConfigError::EmptyRoster);
    }

    #[test]
    fn test_roster_rejects_duplicate_id() {
        let err = Roster::new(vec![cardinal(1, "Alba"), cardinal(1, "Bruno")]).unwrap_err();
        assert_eq!(err, ConfigError::DuplicateId(1));
    }

    #[test]
    fn test_roster_rejects_names_that_fold_together() {
        let err = Roster::new(vec![cardinal(1, "José Alba"), cardinal(2, "jose  alba")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName(_)));
    }

    #[test]
    fn test_eligible_shrinks_after_elimination() {
        let mut roster =
            Roster::new(vec![cardinal(1, "Alba"), cardinal(2, "Bruno")]).unwrap();
        assert_eq!(roster.eligible_count(), 2);

        roster.get_mut(CardinalId::new(2)).unwrap().mark_eliminated();
        assert_eq!(roster.eligible_count(), 1);
        assert_eq!(roster.eligible_ids(), vec![CardinalId::new(1)]);
    }

    #[test]
    fn test_vote_history_appends_in_order() {
        let mut c = cardinal(1, "Alba");
        c.record_vote(VoteRecord {
            round: 1,
            candidate: CardinalId::new(2),
        });
        c.record_vote(VoteRecord {
            round: 2,
            candidate: CardinalId::new(2),
        });

        assert_eq!(c.voting_history().len(), 2);
        assert_eq!(c.last_vote().unwrap().round, 2);
    }

    #[test]
    #[should_panic]
    fn test_vote_history_rejects_out_of_order_round() {
        let mut c = cardinal(1, "Alba");
        c.record_vote(VoteRecord {
            round: 2,
            candidate: CardinalId::new(2),
        });
        c.record_vote(VoteRecord {
            round: 1,
            candidate: CardinalId::new(2),
        });
    }
}
