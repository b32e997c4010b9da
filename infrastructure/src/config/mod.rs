//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{ElectionSection, FileConfig, OutputSection, ProviderSection};
pub use loader::ConfigLoader;
