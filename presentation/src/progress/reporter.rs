//! Progress reporting for conclave rounds

use colored::Colorize;
use conclave_application::ports::progress::ProgressNotifier;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports per-round progress with a progress bar
pub struct ProgressReporter {
    multi: MultiProgress,
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            round_bar: Mutex::new(None),
        }
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_round_start(&self, round: u32, electors: usize) {
        let pb = self.multi.add(ProgressBar::new(electors as u64));
        pb.set_style(Self::round_style());
        pb.set_prefix(format!("Round {round}"));
        pb.set_message("Voting...");

        *self.round_bar.lock().unwrap() = Some(pb);
    }

    fn on_vote_cast(&self, _round: u32, voter: &str, fallback: bool) {
        if let Some(pb) = self.round_bar.lock().unwrap().as_ref() {
            let status = if fallback {
                format!("{} {} (fallback)", "!".yellow(), voter)
            } else {
                format!("{} {}", "v".green(), voter)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_round_complete(&self, round: u32, elected: Option<&str>) {
        if let Some(pb) = self.round_bar.lock().unwrap().take() {
            let message = match elected {
                Some(name) => format!("Round {round}: {} elected!", name.green().bold()),
                None => format!("Round {round}: no election"),
            };
            pb.finish_with_message(message);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_round_start(&self, round: u32, electors: usize) {
        println!("{} Round {round} ({electors} electors)", "->".cyan());
    }

    fn on_vote_cast(&self, _round: u32, voter: &str, fallback: bool) {
        if fallback {
            println!("  {} {voter} (fallback)", "!".yellow());
        } else {
            println!("  {} {voter}", "v".green());
        }
    }

    fn on_round_complete(&self, round: u32, elected: Option<&str>) {
        match elected {
            Some(name) => println!("Round {round}: {} elected", name.bold()),
            None => println!("Round {round}: no election\n"),
        }
    }
}
