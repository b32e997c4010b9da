//! On-disk configuration schema
//!
//! The TOML shape users write (`conclave.toml`), kept separate from the
//! application's [`ConclaveConfig`]: strings like `rule = "two-thirds"` are
//! parsed into domain types when the run is assembled, so a typo fails at
//! startup with a readable message.

use conclave_application::ConclaveConfig;
use conclave_domain::{MajorityRule, StalematePolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub election: ElectionSection,
    pub provider: ProviderSection,
    pub output: OutputSection,
}

/// `[election]` — the rules of the conclave itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElectionSection {
    /// Roster file; the CLI positional argument overrides this.
    pub roster: Option<PathBuf>,
    /// `two-thirds`, `majority`, `unanimous`, `N/D`, or `at-least:N/D`.
    pub rule: String,
    /// `unchanged` or `eliminate:<min-votes>`.
    pub stalemate: String,
    pub max_rounds: u32,
    pub vote_retries: u32,
    pub vote_timeout_secs: u64,
    pub allow_self_vote: bool,
    pub frontrunner_cutoff: f64,
}

impl Default for ElectionSection {
    fn default() -> Self {
        let defaults = ConclaveConfig::default();
        Self {
            roster: None,
            rule: "two-thirds".to_string(),
            stalemate: "unchanged".to_string(),
            max_rounds: defaults.max_rounds,
            vote_retries: defaults.vote_retries,
            vote_timeout_secs: defaults.vote_timeout_secs,
            allow_self_vote: defaults.allow_self_vote,
            frontrunner_cutoff: defaults.frontrunner_cutoff,
        }
    }
}

impl ElectionSection {
    /// Parse the stringly-typed fields into a [`ConclaveConfig`].
    pub fn to_config(&self) -> Result<ConclaveConfig, String> {
        let rule: MajorityRule = self.rule.parse()?;
        let stalemate = parse_stalemate(&self.stalemate)?;
        Ok(ConclaveConfig {
            rule,
            stalemate,
            max_rounds: self.max_rounds,
            vote_retries: self.vote_retries,
            vote_timeout_secs: self.vote_timeout_secs,
            allow_self_vote: self.allow_self_vote,
            frontrunner_cutoff: self.frontrunner_cutoff,
        })
    }
}

fn parse_stalemate(s: &str) -> Result<StalematePolicy, String> {
    let s = s.trim().to_lowercase();
    if s == "unchanged" {
        return Ok(StalematePolicy::Unchanged);
    }
    if let Some(floor) = s.strip_prefix("eliminate:") {
        let min_votes: usize = floor
            .trim()
            .parse()
            .map_err(|_| format!("Invalid elimination floor: {s}"))?;
        return Ok(StalematePolicy::Elimination { min_votes });
    }
    Err(format!(
        "Unknown stalemate policy: {s}. Valid: unchanged, eliminate:<min-votes>"
    ))
}

/// `[provider]` — where votes come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    /// OpenAI-compatible endpoint base URL.
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub request_timeout_secs: u64,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4-turbo-preview".to_string(),
            temperature: 0.4,
            api_key_env: "OPENAI_API_KEY".to_string(),
            request_timeout_secs: 120,
        }
    }
}

/// `[output]` — optional run artifacts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Directory for per-round result files; omit to skip persistence.
    pub round_results_dir: Option<PathBuf>,
    /// JSONL event log path; omit to disable.
    pub events_log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse_cleanly() {
        let config = FileConfig::default().election.to_config().unwrap();
        assert_eq!(config, ConclaveConfig::default());
    }

    #[test]
    fn test_elimination_policy_parses() {
        let section = ElectionSection {
            stalemate: "eliminate:2".to_string(),
            ..Default::default()
        };
        let config = section.to_config().unwrap();
        assert_eq!(
            config.stalemate,
            StalematePolicy::Elimination { min_votes: 2 }
        );
    }

    #[test]
    fn test_bad_rule_is_an_error() {
        let section = ElectionSection {
            rule: "most-of-them".to_string(),
            ..Default::default()
        };
        assert!(section.to_config().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_src = r#"
            [election]
            rule = "at-least:2/3"
            stalemate = "eliminate:1"
            max_rounds = 10

            [provider]
            base_url = "http://127.0.0.1:1234"
            model = "local-model"
        "#;
        let file: FileConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(file.election.max_rounds, 10);
        assert_eq!(file.provider.base_url, "http://127.0.0.1:1234");
        // Unspecified fields keep their defaults
        assert_eq!(file.election.vote_retries, 2);
        assert!(file.output.round_results_dir.is_none());

        let config = file.election.to_config().unwrap();
        assert_eq!(config.rule, MajorityRule::new(2, 3, false).unwrap());
    }
}
