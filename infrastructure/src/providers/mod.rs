//! Decision collaborator adapters

pub mod openai;

pub use openai::{ChatGatewayConfig, OPENAI_BASE_URL, OpenAiGateway};
