//! Run Conclave use case
//!
//! The round state machine: `Initialized → RoundInProgress →
//! {RoundComplete → RoundInProgress | Elected | NoQuorum}`. Rounds are
//! strictly sequential — a round's tally and history updates complete
//! before the next round opens — and the report has exactly one writer.

use crate::config::ConclaveConfig;
use crate::ports::event_logger::{EventLogger, NoEventLogger, RunEvent};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::collect_ballot::BallotCollector;
use conclave_domain::{
    CardinalId, ConfigError, ElectionResult, NoQuorumReason, RoundRecord, Roster, RunReport,
    Tally, VoteRecord,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Sealed account of a finished run: the full report plus the terminal
/// result.
#[derive(Debug, Clone)]
pub struct ConclaveOutcome {
    pub report: RunReport,
    pub result: ElectionResult,
}

/// Use case driving a conclave to a terminal result.
pub struct RunConclaveUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    config: ConclaveConfig,
}

impl<G: LlmGateway + 'static> RunConclaveUseCase<G> {
    pub fn new(gateway: Arc<G>, config: ConclaveConfig) -> Self {
        Self { gateway, config }
    }

    pub fn config(&self) -> &ConclaveConfig {
        &self.config
    }

    /// Execute with no progress reporting, logging, or cancellation.
    pub async fn execute(&self, roster: Roster) -> Result<ConclaveOutcome, ConfigError> {
        self.execute_with(roster, &NoProgress, &NoEventLogger, CancellationToken::new())
            .await
    }

    /// Execute the full run.
    ///
    /// Consumes the roster: vote histories and eligibility evolve over the
    /// run and the final state is not handed back. Configuration problems
    /// surface here, before any round executes; afterwards every round
    /// completes and the only outcomes are the modeled terminal results.
    pub async fn execute_with(
        &self,
        mut roster: Roster,
        progress: &dyn ProgressNotifier,
        logger: &dyn EventLogger,
        cancel: CancellationToken,
    ) -> Result<ConclaveOutcome, ConfigError> {
        self.config.validate(roster.len())?;
        if !self.config.allow_self_vote && roster.len() < 2 {
            return Err(ConfigError::FieldTooSmall {
                field_size: roster.len(),
            });
        }

        info!(
            electors = roster.len(),
            rule = %self.config.rule,
            stalemate = %self.config.stalemate,
            max_rounds = self.config.max_rounds,
            "conclave opened"
        );

        let collector = BallotCollector::new(Arc::clone(&self.gateway), &self.config);
        let mut report = RunReport::new();
        let mut round = 0u32;

        let result = loop {
            // Cancellation is honored between rounds; a round in flight
            // always finishes and is recorded.
            if cancel.is_cancelled() {
                warn!(rounds = round, "conclave cancelled");
                break ElectionResult::NoQuorum {
                    rounds: round,
                    reason: NoQuorumReason::Cancelled,
                };
            }

            round += 1;
            info!(round, electors = roster.eligible_count(), "round opened");
            progress.on_round_start(round, roster.eligible_count());

            let ballot = collector
                .collect(round, &roster, report.last(), progress, logger)
                .await;
            let tally = Tally::from_ballot(&ballot);
            let elected = tally.winner(&self.config.rule);

            log_round(logger, round, &roster, &tally, elected);
            progress.on_round_complete(
                round,
                elected.and_then(|id| roster.name_of(id)),
            );

            // Histories grow only here, one entry per voter per round.
            for (voter, vote) in ballot.iter() {
                if let Some(cardinal) = roster.get_mut(voter) {
                    cardinal.record_vote(VoteRecord {
                        round,
                        candidate: vote.candidate,
                    });
                }
            }

            report.push(RoundRecord::new(round, ballot, tally.clone(), elected));

            if let Some(winner) = elected {
                info!(round, winner = %winner, "habemus papam");
                break ElectionResult::Elected {
                    cardinal: winner,
                    round,
                };
            }

            if round >= self.config.max_rounds {
                info!(round, "round cap reached without election");
                break ElectionResult::NoQuorum {
                    rounds: round,
                    reason: NoQuorumReason::RoundCapReached,
                };
            }

            let eligible = roster.eligible_ids();
            match self.config.stalemate.narrow(&tally, &eligible) {
                Ok(survivors) => {
                    for id in &eligible {
                        if !survivors.contains(id) {
                            if let Some(cardinal) = roster.get_mut(*id) {
                                info!(round, eliminated = %cardinal.name(), "left the field");
                                cardinal.mark_eliminated();
                            }
                        }
                    }
                    // With self-votes disallowed, a field of one has no
                    // legal ballot left.
                    if !self.config.allow_self_vote && survivors.len() < 2 {
                        warn!(round, "field too small to continue");
                        break ElectionResult::NoQuorum {
                            rounds: round,
                            reason: NoQuorumReason::FieldExhausted,
                        };
                    }
                }
                Err(_) => {
                    warn!(round, "elimination left the field empty");
                    break ElectionResult::NoQuorum {
                        rounds: round,
                        reason: NoQuorumReason::FieldExhausted,
                    };
                }
            }
        };

        logger.log(RunEvent::new(
            "conclave_result",
            serde_json::json!({
                "result": result,
                "elected": result.elected().and_then(|id| roster.name_of(id)),
                "rounds": report.len(),
            }),
        ));

        Ok(ConclaveOutcome { report, result })
    }
}

fn log_round(
    logger: &dyn EventLogger,
    round: u32,
    roster: &Roster,
    tally: &Tally,
    elected: Option<CardinalId>,
) {
    let standings: Vec<serde_json::Value> = tally
        .standings()
        .into_iter()
        .map(|(id, votes)| {
            serde_json::json!({
                "candidate": roster.name_of(id),
                "candidate_id": id.value(),
                "votes": votes,
            })
        })
        .collect();

    for (id, votes) in tally.standings() {
        let share = if tally.cast() == 0 {
            0.0
        } else {
            votes as f64 / tally.cast() as f64 * 100.0
        };
        info!(
            round,
            candidate = roster.name_of(id).unwrap_or("?"),
            votes,
            "standing at {share:.1}%"
        );
    }

    logger.log(RunEvent::new(
        "round_result",
        serde_json::json!({
            "round": round,
            "cast": tally.cast(),
            "standings": standings,
            "elected": elected.and_then(|id| roster.name_of(id)),
        }),
    ));
}
