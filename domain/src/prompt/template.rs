//! Prompt templates for soliciting a vote

use crate::cardinal::Leaning;

/// Everything one cardinal's voting prompt is built from.
///
/// Names are pre-resolved by the caller so the template stays a pure
/// formatting concern.
#[derive(Debug, Clone)]
pub struct VoteContext<'a> {
    pub voter_name: &'a str,
    pub biography: &'a str,
    pub leaning: Leaning,
    /// Current round (1-indexed).
    pub round: u32,
    /// `(name, support ratio)` from the previous round, strongest first.
    pub frontrunners: &'a [(String, f64)],
    /// `(name, votes)` standings from the previous round, if any.
    pub previous_standings: Option<&'a [(String, usize)]>,
    /// The candidate this voter chose last round, if any.
    pub own_previous_vote: Option<&'a str>,
    /// Names the voter may legally choose this round.
    pub candidates: &'a [String],
}

/// Templates for the vote solicitation exchange
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt framing the collaborator's role.
    pub fn voting_system() -> &'static str {
        "You are simulating a cardinal taking part in a papal conclave. \
         Stay in character and answer exactly as instructed."
    }

    /// User prompt asking for one vote.
    pub fn voting_prompt(ctx: &VoteContext<'_>) -> String {
        let mut prompt = format!(
            "You are Cardinal {name}, voting in round {round} of the conclave.\n\n\
             Your biography and stance:\n{bio}\n\n\
             Ideological leaning: {leaning}\n",
            name = ctx.voter_name,
            round = ctx.round,
            bio = ctx.biography,
            leaning = ctx.leaning,
        );

        prompt.push_str("\nFrontrunners from the previous round:\n");
        if ctx.frontrunners.is_empty() {
            prompt.push_str("  * No clear frontrunners yet\n");
        } else {
            for (name, support) in ctx.frontrunners {
                prompt.push_str(&format!("  * {}: {:.1}% support\n", name, support * 100.0));
            }
        }

        if let Some(standings) = ctx.previous_standings {
            prompt.push_str("\nPrevious round results:\n");
            for (name, votes) in standings {
                prompt.push_str(&format!("  * {name}: {votes} votes\n"));
            }
        }

        if let Some(previous) = ctx.own_previous_vote {
            prompt.push_str(&format!("\nYou previously voted for: {previous}\n"));
        }

        prompt.push_str("\nEligible cardinals to vote for:\n");
        for name in ctx.candidates {
            prompt.push_str(&format!("- {name}\n"));
        }

        prompt.push_str(
            "\nWeigh your own leaning and background, the frontrunners, the \
             previous results, your previous vote, and the Church's need for \
             an effective leader. Favor cardinals who share your region, \
             language, or outlook; avoid those too old, too young, or touched \
             by scandal.\n\n\
             Which cardinal do you vote for? Respond with ONLY the name, \
             exactly as it appears in the eligible list, without the word \
             Cardinal and without any other text.",
        );

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_ctx<'a>(
        frontrunners: &'a [(String, f64)],
        candidates: &'a [String],
    ) -> VoteContext<'a> {
        VoteContext {
            voter_name: "Pietro Rossi",
            biography: "Archbishop of Milan.",
            leaning: Leaning::new(-0.4),
            round: 1,
            frontrunners,
            previous_standings: None,
            own_previous_vote: None,
            candidates,
        }
    }

    #[test]
    fn test_first_round_prompt() {
        let candidates = vec!["Pietro Rossi".to_string(), "Jean-Luc Moreau".to_string()];
        let prompt = PromptTemplate::voting_prompt(&base_ctx(&[], &candidates));

        assert!(prompt.contains("You are Cardinal Pietro Rossi"));
        assert!(prompt.contains("round 1"));
        assert!(prompt.contains("No clear frontrunners yet"));
        assert!(prompt.contains("- Jean-Luc Moreau"));
        assert!(prompt.contains("ONLY the name"));
        assert!(!prompt.contains("You previously voted for"));
    }

    #[test]
    fn test_later_round_prompt_includes_history() {
        let frontrunners = vec![("Jean-Luc Moreau".to_string(), 0.4)];
        let candidates = vec!["Pietro Rossi".to_string(), "Jean-Luc Moreau".to_string()];
        let standings = vec![("Jean-Luc Moreau".to_string(), 4usize)];
        let mut ctx = base_ctx(&frontrunners, &candidates);
        ctx.round = 3;
        ctx.previous_standings = Some(&standings);
        ctx.own_previous_vote = Some("Jean-Luc Moreau");

        let prompt = PromptTemplate::voting_prompt(&ctx);
        assert!(prompt.contains("round 3"));
        assert!(prompt.contains("Jean-Luc Moreau: 40.0% support"));
        assert!(prompt.contains("Jean-Luc Moreau: 4 votes"));
        assert!(prompt.contains("You previously voted for: Jean-Luc Moreau"));
    }
}
