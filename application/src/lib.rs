//! Application layer for conclave-sim
//!
//! Use cases and ports. This crate depends only on the domain layer and
//! defines the interfaces (ports) that infrastructure and presentation
//! implement.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ConclaveConfig;
pub use ports::event_logger::{EventLogger, NoEventLogger, RunEvent};
pub use ports::llm_gateway::{GatewayError, LlmGateway};
pub use ports::progress::{NoProgress, ProgressNotifier};
pub use use_cases::{BallotCollector, ConclaveOutcome, RunConclaveUseCase};
