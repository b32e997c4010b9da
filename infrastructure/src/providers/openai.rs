//! OpenAI-compatible chat-completions gateway
//!
//! Works against api.openai.com or any local endpoint speaking the same
//! protocol (LM Studio, llama.cpp server, vLLM). One adapter covers both:
//! only the base URL and credentials differ.

use async_trait::async_trait;
use conclave_application::ports::llm_gateway::{GatewayError, LlmGateway};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Connection settings for the gateway.
#[derive(Debug, Clone)]
pub struct ChatGatewayConfig {
    pub base_url: String,
    /// Bearer token; local endpoints usually need none.
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f64,
    pub request_timeout: Duration,
}

impl Default for ChatGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: OPENAI_BASE_URL.to_string(),
            api_key: None,
            model: "gpt-4-turbo-preview".to_string(),
            temperature: 0.4,
            request_timeout: Duration::from_secs(120),
        }
    }
}

/// [`LlmGateway`] adapter over an OpenAI-style `/v1/chat/completions`
/// endpoint.
pub struct OpenAiGateway {
    client: reqwest::Client,
    config: ChatGatewayConfig,
}

impl OpenAiGateway {
    pub fn new(config: ChatGatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Pull the assistant text out of a completion response.
fn extract_content(response: ChatResponse) -> Result<String, GatewayError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| GatewayError::MalformedResponse("completion had no content".to_string()))
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.config.temperature,
            stream: false,
        };

        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        debug!(model = %self.config.model, "requesting completion");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else if e.is_connect() {
                GatewayError::Connection(e.to_string())
            } else {
                GatewayError::RequestFailed(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(GatewayError::RequestFailed(format!("HTTP {status}: {snippet}")));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;
        extract_content(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_tolerates_trailing_slash() {
        let gateway = OpenAiGateway::new(ChatGatewayConfig {
            base_url: "http://127.0.0.1:1234/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(gateway.endpoint(), "http://127.0.0.1:1234/v1/chat/completions");
    }

    #[test]
    fn test_extract_content() {
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Pietro Rossi \n"}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_content(body).unwrap(), "Pietro Rossi");
    }

    #[test]
    fn test_extract_content_rejects_empty() {
        let no_choices: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            extract_content(no_choices),
            Err(GatewayError::MalformedResponse(_))
        ));

        let null_content: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(matches!(
            extract_content(null_content),
            Err(GatewayError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_default_config() {
        let config = ChatGatewayConfig::default();
        assert_eq!(config.base_url, OPENAI_BASE_URL);
        assert_eq!(config.temperature, 0.4);
        assert!(config.api_key.is_none());
    }
}
