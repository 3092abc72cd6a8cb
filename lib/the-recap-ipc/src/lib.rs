//! Hand-off of finished match summaries to the narrative workflow.
//!
//! The recap service pushes one [`MatchSummaryNotice`] per summarized game;
//! a single consumer pulls them in order. Messages are bincode frames over an
//! nng push/pull pair.

use serde::{Deserialize, Serialize};

pub mod error;
pub mod r#pub;
pub mod sub;

pub const IPC_MATCH_SUMMARY_PATH: &str = "ipc:///tmp/recap.ipc";

/// A finished match summary on its way to the narrative workflow. The summary
/// travels as JSON text so consumers are free to read it without sharing
/// Rust types.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MatchSummaryNotice {
    pub game_id: Option<String>,
    pub summary_json: String,
}
