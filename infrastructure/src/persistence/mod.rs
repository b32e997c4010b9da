//! On-disk persistence of round results
//!
//! Each round is written as its own pretty-printed JSON file, plus a
//! `final_result.json` once the run terminates. Purely an output concern:
//! the engine never reads these back during a run.

pub mod round_store;

pub use round_store::RoundStore;
