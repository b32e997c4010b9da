//! Run configuration for a conclave

use conclave_domain::{ConfigError, MajorityRule, StalematePolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything the orchestrator needs to know besides the roster.
///
/// Validated once, before the first round; a configuration the run cannot
/// honor is rejected up front rather than failing mid-election.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConclaveConfig {
    /// Majority rule applied to every round's tally.
    pub rule: MajorityRule,
    /// How the field evolves after a stalemated round.
    pub stalemate: StalematePolicy,
    /// Hard cap on rounds before the run ends as no-quorum.
    pub max_rounds: u32,
    /// Collaborator retries per vote after the first attempt.
    pub vote_retries: u32,
    /// Per-vote collaborator timeout, in seconds.
    pub vote_timeout_secs: u64,
    /// Whether a cardinal may vote for themselves.
    pub allow_self_vote: bool,
    /// Support ratio a candidate must strictly exceed to count as a
    /// frontrunner in the next round's prompts.
    pub frontrunner_cutoff: f64,
}

impl Default for ConclaveConfig {
    fn default() -> Self {
        Self {
            rule: MajorityRule::two_thirds(),
            stalemate: StalematePolicy::Unchanged,
            max_rounds: 30,
            vote_retries: 2,
            vote_timeout_secs: 60,
            allow_self_vote: true,
            frontrunner_cutoff: 0.15,
        }
    }
}

impl ConclaveConfig {
    /// Per-vote timeout as a [`Duration`].
    pub fn vote_timeout(&self) -> Duration {
        Duration::from_secs(self.vote_timeout_secs)
    }

    /// Check the configuration against a roster of `field_size` cardinals.
    ///
    /// Covers the fatal pre-run cases: invalid threshold (possible when
    /// the rule arrived via deserialization), a zero round cap, a cutoff
    /// outside [0, 1), and an elimination floor no field could satisfy.
    pub fn validate(&self, field_size: usize) -> Result<(), ConfigError> {
        self.rule.validate()?;
        if self.max_rounds == 0 {
            return Err(ConfigError::ZeroRoundCap);
        }
        if !(0.0..1.0).contains(&self.frontrunner_cutoff) {
            return Err(ConfigError::InvalidFrontrunnerCutoff(
                self.frontrunner_cutoff,
            ));
        }
        self.stalemate.validate(field_size)?;
        Ok(())
    }
}
