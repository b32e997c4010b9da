//! Infrastructure layer for conclave-sim
//!
//! Adapters implementing the application ports against the outside world:
//! the chat-completions gateway, roster and configuration loading, and
//! run-artifact persistence.

pub mod config;
pub mod logging;
pub mod persistence;
pub mod providers;
pub mod roster;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlEventLogger;
pub use persistence::RoundStore;
pub use providers::{ChatGatewayConfig, OpenAiGateway};
pub use roster::{RosterError, RosterLoader};
