//! Prompt construction for the voting flow
//!
//! Write-only toward the collaborator: nothing in the engine ever parses
//! prompt text back.

pub mod template;

pub use template::{PromptTemplate, VoteContext};
