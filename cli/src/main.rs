//! CLI entrypoint for conclave-sim
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use conclave_application::ports::event_logger::{EventLogger, NoEventLogger};
use conclave_application::ports::progress::{NoProgress, ProgressNotifier};
use conclave_application::RunConclaveUseCase;
use conclave_infrastructure::{
    ChatGatewayConfig, ConfigLoader, JsonlEventLogger, OpenAiGateway, RosterLoader, RoundStore,
};
use conclave_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting conclave-sim");

    // Load file config, then let CLI flags override it
    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?
    };

    let mut config = file_config
        .election
        .to_config()
        .map_err(anyhow::Error::msg)?;
    if let Some(rounds) = cli.rounds {
        config.max_rounds = rounds;
    }
    if let Some(rule) = &cli.rule {
        config.rule = rule.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(min_votes) = cli.eliminate_below {
        config.stalemate = conclave_domain::StalematePolicy::Elimination { min_votes };
    }
    if cli.no_self_vote {
        config.allow_self_vote = false;
    }

    // Roster
    let roster_path: PathBuf = cli
        .roster
        .clone()
        .or_else(|| file_config.election.roster.clone())
        .unwrap_or_else(|| PathBuf::from("data/cardinals.json"));
    let roster = RosterLoader::load(&roster_path)
        .with_context(|| format!("failed to load roster from {}", roster_path.display()))?;
    // The run consumes the roster; keep a copy for formatting the report.
    let display_roster = roster.clone();

    // === Dependency Injection ===
    let provider = &file_config.provider;
    let gateway_config = ChatGatewayConfig {
        base_url: if cli.local {
            cli.url.clone()
        } else {
            provider.base_url.clone()
        },
        api_key: std::env::var(&provider.api_key_env).ok(),
        model: cli.model.clone().unwrap_or_else(|| provider.model.clone()),
        temperature: cli.temperature.unwrap_or(provider.temperature),
        request_timeout: Duration::from_secs(provider.request_timeout_secs),
    };
    let gateway = Arc::new(OpenAiGateway::new(gateway_config)?);

    let logger: Box<dyn EventLogger> = file_config
        .output
        .events_log
        .as_ref()
        .and_then(JsonlEventLogger::new)
        .map(|l| Box::new(l) as Box<dyn EventLogger>)
        .unwrap_or_else(|| Box::new(NoEventLogger));

    let progress: Box<dyn ProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    // Ctrl-C ends the run cleanly between rounds
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|                 Conclave Simulation                        |");
        println!("+============================================================+");
        println!();
        println!("Electors: {}", display_roster.len());
        println!("Rule:     {}", config.rule);
        println!("Rounds:   up to {}", config.max_rounds);
        println!();
    }

    let use_case = RunConclaveUseCase::new(gateway, config);
    let outcome = use_case
        .execute_with(roster, progress.as_ref(), logger.as_ref(), cancel)
        .await?;

    // Persist round results when configured
    if let Some(dir) = &file_config.output.round_results_dir {
        let store = RoundStore::new(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        for record in outcome.report.rounds() {
            store.save_round(record)?;
        }
        store.save_result(&outcome.result)?;
        info!(dir = %dir.display(), "round results saved");
    }

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&outcome, &display_roster),
        OutputFormat::Summary => ConsoleFormatter::format_summary(&outcome, &display_roster),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome, &display_roster),
    };

    println!("{}", output);

    Ok(())
}
