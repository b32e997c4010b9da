//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the run report
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Every round's standings plus the final result
    Full,
    /// Only the final result and last standings
    Summary,
    /// JSON output
    Json,
}

/// CLI arguments for conclave-sim
#[derive(Parser, Debug)]
#[command(name = "conclave")]
#[command(author, version, about = "Papal conclave simulation driven by an LLM")]
#[command(long_about = r#"
Simulates a papal conclave: each cardinal on the roster votes every round,
with the vote produced by a language model conditioned on the cardinal's
biography, leaning, the previous round's results, and their own voting
history. Rounds repeat until a candidate clears the majority threshold or
the round cap is reached.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./conclave.toml     Project-level config
3. ~/.config/conclave-sim/config.toml   Global config

Example:
  conclave data/cardinals.json
  conclave data/cardinals.json --rounds 10 --rule majority
  conclave data/cardinals.json --local --url http://127.0.0.1:1234
"#)]
pub struct Cli {
    /// Path to the roster file (cardinals.json)
    pub roster: Option<PathBuf>,

    /// Maximum number of voting rounds
    #[arg(short, long, value_name = "N")]
    pub rounds: Option<u32>,

    /// Majority rule (two-thirds, majority, unanimous, N/D, at-least:N/D)
    #[arg(long, value_name = "RULE")]
    pub rule: Option<String>,

    /// Eliminate cardinals polling fewer than N votes after each stalemate
    #[arg(long, value_name = "N")]
    pub eliminate_below: Option<usize>,

    /// Forbid cardinals from voting for themselves
    #[arg(long)]
    pub no_self_vote: bool,

    /// Use a local OpenAI-compatible endpoint instead of OpenAI
    #[arg(long)]
    pub local: bool,

    /// Endpoint URL for --local
    #[arg(long, value_name = "URL", default_value = "http://127.0.0.1:1234")]
    pub url: String,

    /// Model to request from the provider
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(short, long, value_name = "T")]
    pub temperature: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
