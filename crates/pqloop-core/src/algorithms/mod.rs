//! Probabilistic procedures built from gates and measurement.
//!
//! Both are heuristics. The search is a plain random restart and the
//! classifier's verdict depends only on the final randomization, so neither
//! should be read as a faithful quantum algorithm.

mod classify;
mod search;

pub use classify::OracleKind;
pub use search::SearchOutcome;
