//! Ballot collection use case
//!
//! For one round, solicits exactly one vote from every eligible cardinal
//! through the LLM gateway. Solicitations run concurrently (no vote in a
//! round depends on another), but the ballot is only assembled once every
//! task has finished, so the tally never sees a partial round.
//!
//! The collector never mutates cardinal records; history updates belong to
//! the orchestrator.

use crate::config::ConclaveConfig;
use crate::ports::event_logger::{EventLogger, RunEvent};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressNotifier;
use conclave_domain::{
    Ballot, CardinalId, CastVote, FallbackReason, PromptTemplate, RoundRecord, Roster,
    VoteContext, parse_vote_response,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// One voter's prepared solicitation: everything the gateway task needs,
/// assembled up front so the fan-out owns no shared state.
struct Solicitation {
    voter: CardinalId,
    voter_name: String,
    prompt: String,
    /// Candidates this voter may legally choose.
    candidates: Vec<(CardinalId, String)>,
    /// Every name in the roster, for telling "named someone ineligible"
    /// apart from "named nobody at all".
    roster_names: Vec<(CardinalId, String)>,
    /// Precomputed deterministic fallback candidate.
    fallback_candidate: CardinalId,
}

/// Collects one complete ballot per round.
pub struct BallotCollector<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    retries: u32,
    timeout: Duration,
    allow_self_vote: bool,
    frontrunner_cutoff: f64,
}

impl<G: LlmGateway + 'static> BallotCollector<G> {
    pub fn new(gateway: Arc<G>, config: &ConclaveConfig) -> Self {
        Self {
            gateway,
            retries: config.vote_retries,
            timeout: config.vote_timeout(),
            allow_self_vote: config.allow_self_vote,
            frontrunner_cutoff: config.frontrunner_cutoff,
        }
    }

    /// Produce the round's ballot.
    ///
    /// Guarantees one entry per eligible cardinal: a voter whose
    /// collaborator exhausts its retries gets a vote from the fallback
    /// chain (own previous vote → leading frontrunner → self → lowest id),
    /// recorded with its reason.
    pub async fn collect(
        &self,
        round: u32,
        roster: &Roster,
        previous: Option<&RoundRecord>,
        progress: &dyn ProgressNotifier,
        logger: &dyn EventLogger,
    ) -> Ballot {
        let solicitations = self.prepare(round, roster, previous);

        // Track what each spawned task owes us so a lost task can still be
        // filled in from its fallback.
        let mut pending: BTreeMap<CardinalId, (String, CardinalId)> = solicitations
            .iter()
            .map(|s| (s.voter, (s.voter_name.clone(), s.fallback_candidate)))
            .collect();

        let mut join_set = JoinSet::new();
        for solicitation in solicitations {
            let gateway = Arc::clone(&self.gateway);
            let retries = self.retries;
            let timeout = self.timeout;

            join_set.spawn(async move {
                let outcome = solicit(gateway.as_ref(), &solicitation, retries, timeout).await;
                (solicitation, outcome)
            });
        }

        let mut ballot = Ballot::new();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((solicitation, Ok(candidate))) => {
                    pending.remove(&solicitation.voter);
                    debug!(
                        voter = %solicitation.voter_name,
                        candidate = %candidate,
                        "vote received"
                    );
                    progress.on_vote_cast(round, &solicitation.voter_name, false);
                    logger.log(RunEvent::new(
                        "vote_cast",
                        serde_json::json!({
                            "round": round,
                            "voter": solicitation.voter_name,
                            "voter_id": solicitation.voter.value(),
                            "candidate": roster.name_of(candidate),
                            "candidate_id": candidate.value(),
                        }),
                    ));
                    ballot.record(solicitation.voter, CastVote::direct(candidate));
                }
                Ok((solicitation, Err(reason))) => {
                    pending.remove(&solicitation.voter);
                    let candidate = solicitation.fallback_candidate;
                    warn!(
                        voter = %solicitation.voter_name,
                        %reason,
                        fallback = %candidate,
                        "vote fell back after exhausting retries"
                    );
                    progress.on_vote_cast(round, &solicitation.voter_name, true);
                    logger.log(RunEvent::new(
                        "vote_fallback",
                        serde_json::json!({
                            "round": round,
                            "voter": solicitation.voter_name,
                            "voter_id": solicitation.voter.value(),
                            "candidate": roster.name_of(candidate),
                            "candidate_id": candidate.value(),
                            "reason": reason.to_string(),
                        }),
                    ));
                    ballot.record(solicitation.voter, CastVote::fallback(candidate, reason));
                }
                Err(join_error) => {
                    // A lost task is a defect, but the round must still
                    // produce a complete ballot; the voter is filled in
                    // from `pending` below.
                    warn!("vote task failed to join: {join_error}");
                }
            }
        }

        for (voter, (voter_name, fallback_candidate)) in pending {
            progress.on_vote_cast(round, &voter_name, true);
            ballot.record(
                voter,
                CastVote::fallback(fallback_candidate, FallbackReason::CollaboratorError),
            );
        }

        ballot
    }

    /// Build one solicitation per eligible voter. Pure.
    fn prepare(
        &self,
        round: u32,
        roster: &Roster,
        previous: Option<&RoundRecord>,
    ) -> Vec<Solicitation> {
        let eligible: Vec<(CardinalId, String)> = roster
            .eligible()
            .map(|c| (c.id(), c.name().to_string()))
            .collect();
        let roster_names: Vec<(CardinalId, String)> = roster
            .iter()
            .map(|c| (c.id(), c.name().to_string()))
            .collect();

        let frontrunners: Vec<(CardinalId, f64)> = previous
            .map(|record| record.tally.frontrunners(self.frontrunner_cutoff))
            .unwrap_or_default();
        let frontrunner_names: Vec<(String, f64)> = frontrunners
            .iter()
            .filter_map(|(id, ratio)| roster.name_of(*id).map(|n| (n.to_string(), *ratio)))
            .collect();
        let previous_standings: Option<Vec<(String, usize)>> = previous.map(|record| {
            record
                .tally
                .standings()
                .into_iter()
                .filter_map(|(id, votes)| roster.name_of(id).map(|n| (n.to_string(), votes)))
                .collect()
        });

        roster
            .eligible()
            .map(|voter| {
                let candidates: Vec<(CardinalId, String)> = eligible
                    .iter()
                    .filter(|(id, _)| self.allow_self_vote || *id != voter.id())
                    .cloned()
                    .collect();
                assert!(
                    !candidates.is_empty(),
                    "voter {} has no legal candidates",
                    voter.id()
                );

                let candidate_names: Vec<String> =
                    candidates.iter().map(|(_, name)| name.clone()).collect();
                let own_previous_vote = voter
                    .last_vote()
                    .and_then(|record| roster.name_of(record.candidate));

                let prompt = PromptTemplate::voting_prompt(&VoteContext {
                    voter_name: voter.name(),
                    biography: voter.biography(),
                    leaning: voter.leaning(),
                    round,
                    frontrunners: &frontrunner_names,
                    previous_standings: previous_standings.as_deref(),
                    own_previous_vote,
                    candidates: &candidate_names,
                });

                let fallback_candidate = pick_fallback(
                    voter.id(),
                    &candidates,
                    voter.last_vote().map(|r| r.candidate),
                    &frontrunners,
                );

                Solicitation {
                    voter: voter.id(),
                    voter_name: voter.name().to_string(),
                    prompt,
                    candidates,
                    roster_names: roster_names.clone(),
                    fallback_candidate,
                }
            })
            .collect()
    }
}

/// Deterministic fallback chain: own previous vote if still legal, then
/// the strongest frontrunner, then self, then the lowest-id candidate.
fn pick_fallback(
    voter: CardinalId,
    candidates: &[(CardinalId, String)],
    previous_vote: Option<CardinalId>,
    frontrunners: &[(CardinalId, f64)],
) -> CardinalId {
    let legal = |id: CardinalId| candidates.iter().any(|(c, _)| *c == id);

    if let Some(previous) = previous_vote
        && legal(previous)
    {
        return previous;
    }
    if let Some((leader, _)) = frontrunners.iter().find(|(id, _)| legal(*id)) {
        return *leader;
    }
    if legal(voter) {
        return voter;
    }
    // Candidates are in ascending id order; prepare() guarantees at least one.
    candidates[0].0
}

/// Run one voter's solicitation with bounded retries and a per-attempt
/// timeout. Returns the chosen candidate or the reason the last attempt
/// failed.
async fn solicit<G: LlmGateway>(
    gateway: &G,
    solicitation: &Solicitation,
    retries: u32,
    timeout: Duration,
) -> Result<CardinalId, FallbackReason> {
    let candidate_refs: Vec<(CardinalId, &str)> = solicitation
        .candidates
        .iter()
        .map(|(id, name)| (*id, name.as_str()))
        .collect();
    let roster_refs: Vec<(CardinalId, &str)> = solicitation
        .roster_names
        .iter()
        .map(|(id, name)| (*id, name.as_str()))
        .collect();

    let mut last_failure = FallbackReason::CollaboratorError;
    for attempt in 0..=retries {
        let request = gateway.complete(PromptTemplate::voting_system(), &solicitation.prompt);
        match tokio::time::timeout(timeout, request).await {
            Err(_) => {
                warn!(voter = %solicitation.voter_name, attempt, "vote solicitation timed out");
                last_failure = FallbackReason::CollaboratorError;
            }
            Ok(Err(error)) => {
                warn!(voter = %solicitation.voter_name, attempt, %error, "vote solicitation failed");
                last_failure = FallbackReason::CollaboratorError;
            }
            Ok(Ok(response)) => match parse_vote_response(&response, &candidate_refs) {
                Some(candidate) => return Ok(candidate),
                None => {
                    // Named someone real but illegal, or nobody at all?
                    last_failure = if parse_vote_response(&response, &roster_refs).is_some() {
                        FallbackReason::IneligibleCandidate
                    } else {
                        FallbackReason::UnparseableResponse
                    };
                    debug!(
                        voter = %solicitation.voter_name,
                        attempt,
                        response = %response.chars().take(120).collect::<String>(),
                        "vote response did not name a legal candidate"
                    );
                }
            },
        }
    }

    Err(last_failure)
}
