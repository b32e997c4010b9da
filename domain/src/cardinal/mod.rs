//! Cardinal subdomain
//!
//! A cardinal is both a voter and a potential candidate. Identity and
//! biography are fixed at roster construction; the voting history and the
//! eligibility flag are the only state that changes over a run, and only
//! the orchestrator changes them.

pub mod entities;
pub mod value_objects;

pub use entities::{Cardinal, Roster};
pub use value_objects::{CardinalId, Leaning, VoteRecord};
