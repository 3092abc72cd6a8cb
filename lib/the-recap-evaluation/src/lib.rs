//! End-of-match evaluation: metrics, AFK detection, standouts, tags and the
//! assembled [`MatchSummary`].

pub mod afk;
pub mod clutch;
pub mod evaluator;
pub mod format;
pub mod label;
pub mod metrics;
pub mod role;
pub mod standout;
pub mod summary;

pub use evaluator::MatchEvaluator;
pub use summary::MatchSummary;
