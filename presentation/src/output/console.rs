//! Console output formatter for conclave results

use colored::Colorize;
use conclave_application::ConclaveOutcome;
use conclave_domain::{ElectionResult, RoundRecord, Roster};

/// Formats run reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete run, round by round
    pub fn format(outcome: &ConclaveOutcome, roster: &Roster) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Conclave Report"));

        for record in outcome.report.rounds() {
            output.push_str(&Self::round_section(record, roster));
        }

        output.push_str(&Self::result_section(&outcome.result, roster));
        output
    }

    /// Format the final result plus the last round's standings
    pub fn format_summary(outcome: &ConclaveOutcome, roster: &Roster) -> String {
        let mut output = String::new();

        if let Some(record) = outcome.report.last() {
            output.push_str(&Self::round_section(record, roster));
        }
        output.push_str(&Self::result_section(&outcome.result, roster));
        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &ConclaveOutcome, roster: &Roster) -> String {
        let cardinals: Vec<serde_json::Value> = roster
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id().value(),
                    "name": c.name(),
                    "leaning": c.leaning().score(),
                })
            })
            .collect();

        let value = serde_json::json!({
            "cardinals": cardinals,
            "rounds": outcome.report.rounds(),
            "result": outcome.result,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn round_section(record: &RoundRecord, roster: &Roster) -> String {
        let mut section = format!(
            "\n{}\n",
            format!("── Round {} ──", record.round).yellow().bold()
        );

        for (id, votes) in record.tally.standings() {
            let name = roster.name_of(id).unwrap_or("?");
            let share = votes as f64 / record.tally.cast().max(1) as f64 * 100.0;
            section.push_str(&format!("  {name}: {votes} votes ({share:.1}%)\n"));
        }

        let fallbacks: Vec<String> = record
            .ballot
            .fallbacks()
            .map(|(voter, reason)| {
                format!("{} ({reason})", roster.name_of(voter).unwrap_or("?"))
            })
            .collect();
        if !fallbacks.is_empty() {
            section.push_str(&format!(
                "  {} {}\n",
                "fallback votes:".dimmed(),
                fallbacks.join(", ").dimmed()
            ));
        }

        section
    }

    fn result_section(result: &ElectionResult, roster: &Roster) -> String {
        match result {
            ElectionResult::Elected { cardinal, round } => {
                let name = roster.name_of(*cardinal).unwrap_or("?");
                format!(
                    "\n{}\n{}\n",
                    "Habemus Papam!".green().bold(),
                    format!("Cardinal {name} elected in round {round}.")
                )
            }
            ElectionResult::NoQuorum { rounds, reason } => {
                format!(
                    "\n{}\n{}\n",
                    "No pope elected.".red().bold(),
                    format!("Conclave closed after {rounds} round(s): {reason}.")
                )
            }
        }
    }

    fn header(title: &str) -> String {
        format!("\n{}\n", format!("=== {title} ===").cyan().bold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conclave_application::ConclaveOutcome;
    use conclave_domain::{
        Ballot, Cardinal, CardinalId, CastVote, ElectionResult, Leaning, MajorityRule,
        RunReport, Tally,
    };

    fn id(n: u32) -> CardinalId {
        CardinalId::new(n)
    }

    fn fixture() -> (ConclaveOutcome, Roster) {
        let roster = Roster::new(vec![
            Cardinal::new(id(1), "Aldo", "bio", Leaning::new(0.0)),
            Cardinal::new(id(2), "Bruno", "bio", Leaning::new(0.0)),
            Cardinal::new(id(3), "Carlo", "bio", Leaning::new(0.0)),
        ])
        .unwrap();

        let mut ballot = Ballot::new();
        ballot.record(id(1), CastVote::direct(id(2)));
        ballot.record(id(2), CastVote::direct(id(2)));
        ballot.record(id(3), CastVote::direct(id(2)));
        let tally = Tally::from_ballot(&ballot);
        let elected = tally.winner(&MajorityRule::two_thirds());

        let mut report = RunReport::new();
        report.push(RoundRecord::new(1, ballot, tally, elected));

        (
            ConclaveOutcome {
                report,
                result: ElectionResult::Elected {
                    cardinal: id(2),
                    round: 1,
                },
            },
            roster,
        )
    }

    #[test]
    fn test_full_format_names_the_winner() {
        let (outcome, roster) = fixture();
        let text = ConsoleFormatter::format(&outcome, &roster);
        assert!(text.contains("Round 1"));
        assert!(text.contains("Bruno: 3 votes"));
        assert!(text.contains("Cardinal Bruno elected in round 1."));
    }

    #[test]
    fn test_json_format_is_parseable() {
        let (outcome, roster) = fixture();
        let json = ConsoleFormatter::format_json(&outcome, &roster);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["result"]["outcome"], "elected");
        assert_eq!(value["rounds"].as_array().unwrap().len(), 1);
        assert_eq!(value["cardinals"][1]["name"], "Bruno");
    }
}
