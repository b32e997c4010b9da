//! Core domain concepts shared across all subdomains.
//!
//! - [`error::ConfigError`] — fatal pre-run configuration errors

pub mod error;
