//! Use cases orchestrating the domain through the ports

pub mod collect_ballot;
pub mod run_conclave;

pub use collect_ballot::BallotCollector;
pub use run_conclave::{ConclaveOutcome, RunConclaveUseCase};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::ports::llm_gateway::{GatewayError, LlmGateway};
    use async_trait::async_trait;

    /// Gateway backed by a closure over the prompts, so tests can script
    /// each cardinal's behavior by reading the voter name and round out of
    /// the prompt text.
    pub struct ScriptedGateway<F>(pub F);

    #[async_trait]
    impl<F> LlmGateway for ScriptedGateway<F>
    where
        F: Fn(&str) -> Result<String, GatewayError> + Send + Sync,
    {
        async fn complete(
            &self,
            _system_prompt: &str,
            user_prompt: &str,
        ) -> Result<String, GatewayError> {
            (self.0)(user_prompt)
        }
    }

    /// Extract `You are Cardinal <name>,` from a voting prompt.
    pub fn voter_of(prompt: &str) -> String {
        let start = prompt
            .find("You are Cardinal ")
            .map(|i| i + "You are Cardinal ".len())
            .unwrap_or(0);
        prompt[start..]
            .split(',')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Extract `round N` from a voting prompt.
    pub fn round_of(prompt: &str) -> u32 {
        prompt
            .split("voting in round ")
            .nth(1)
            .and_then(|rest| rest.split_whitespace().next())
            .and_then(|n| n.parse().ok())
            .unwrap_or(0)
    }
}
