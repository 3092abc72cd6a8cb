use crate::label::Tag;
use crate::summary::{ClutchSummary, MatchSummary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

pub const CLUTCH_SAVIOR_LIVES: u32 = 5;
pub const CRITICAL_SAVIOR_SAVES: u32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClutchEvent {
    /// The saved champion was under critical health
    pub was_critical: bool,
}

/// One champion's record from the live game monitor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClutchStats {
    pub lives_saved: u32,
    pub times_saved: u32,
    pub events: Vec<ClutchEvent>,
}

impl ClutchStats {
    pub fn critical_saves(&self) -> u32 {
        self.events.iter().filter(|e| e.was_critical).count() as u32
    }
}

/// Merge live monitor records keyed by champion name into a finished
/// summary. Players without a record are left alone; AFK players get the
/// counts but never the tags.
pub fn integrate_clutch_stats(summary: &mut MatchSummary, clutch: &BTreeMap<String, ClutchStats>) {
    for player in &mut summary.players {
        let Some(stats) = clutch.get(&player.participant.champion_name) else {
            continue;
        };
        player.clutch = ClutchSummary {
            lives_saved: stats.lives_saved,
            times_saved: stats.times_saved,
            critical_saves: stats.critical_saves(),
        };
        debug!(
            "Merged clutch stats for {}: {:?}",
            player.participant.champion_name, player.clutch
        );

        if player.afk {
            continue;
        }
        if player.clutch.lives_saved >= CLUTCH_SAVIOR_LIVES {
            player.tags.push(Tag::ClutchSavior);
        }
        if player.clutch.critical_saves >= CRITICAL_SAVIOR_SAVES {
            player.tags.push(Tag::CriticalSavior);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitor_record_shape() {
        let stats: ClutchStats = serde_json::from_value(serde_json::json!({
            "champion": "Lulu",
            "livesSaved": 6,
            "timesSaved": 1,
            "healsGiven": 3,
            "events": [
                { "wasCritical": true, "target": "Jinx" },
                { "wasCritical": false },
                { "wasCritical": true },
                {}
            ]
        }))
        .unwrap();

        assert_eq!(stats.lives_saved, 6);
        assert_eq!(stats.times_saved, 1);
        assert_eq!(stats.critical_saves(), 2);
    }
}
