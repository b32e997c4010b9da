//! Progress notification port
//!
//! Defines the interface for reporting progress during a conclave run.
//! Implementations live in the presentation layer and can display
//! progress in various ways (console, progress bars, etc.)

/// Callback for progress updates during a run
pub trait ProgressNotifier: Send + Sync {
    /// Called when a round opens, before any votes are solicited.
    fn on_round_start(&self, round: u32, electors: usize);

    /// Called as each elector's vote lands. `fallback` is true when the
    /// vote came from the fallback policy rather than the collaborator.
    fn on_vote_cast(&self, round: u32, voter: &str, fallback: bool);

    /// Called when a round's tally is complete.
    fn on_round_complete(&self, round: u32, elected: Option<&str>);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_round_start(&self, _round: u32, _electors: usize) {}
    fn on_vote_cast(&self, _round: u32, _voter: &str, _fallback: bool) {}
    fn on_round_complete(&self, _round: u32, _elected: Option<&str>) {}
}
