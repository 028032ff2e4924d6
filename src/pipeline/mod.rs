//! Pipeline stages for the aggregation engine.
//!
//! - `classify`: role/experience heuristics over posting text
//! - `filter`: location allow/block predicate
//! - `cycle`: the fetch → filter → dedup → publish orchestrator

pub mod classify;
pub mod cycle;
pub mod filter;

pub use classify::classify;
pub use cycle::{CycleRunner, CycleSummary};
pub use filter::LocationFilter;
