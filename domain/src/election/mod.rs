//! Election subdomain
//!
//! Everything that turns a round of individual choices into an outcome:
//!
//! - [`ballot`] — one round's complete set of votes, with provenance
//! - [`tally`] — pure vote counting, winner and frontrunner derivation
//! - [`rule`] — configurable majority thresholds
//! - [`stalemate`] — how the field narrows (or doesn't) between rounds
//! - [`report`] — immutable per-round records and the terminal result
//! - [`parsing`] — extracting a candidate choice from free-form text

pub mod ballot;
pub mod parsing;
pub mod report;
pub mod rule;
pub mod stalemate;
pub mod tally;

pub use ballot::{Ballot, CastVote, FallbackReason, VoteProvenance};
pub use report::{ElectionResult, NoQuorumReason, RoundRecord, RunReport};
pub use rule::MajorityRule;
pub use stalemate::{FieldExhausted, StalematePolicy};
pub use tally::Tally;
