use crate::metrics::{DerivedMatch, DerivedPlayer};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Limits for the inactivity heuristic. A player is only flagged when every
/// limit is undercut in a game long enough to judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AfkThresholds {
    pub min_game_minutes: f64,
    pub max_cs_per_min: f64,
    pub max_damage_to_champions: u32,
    pub max_gold_earned: u32,
}

impl Default for AfkThresholds {
    fn default() -> Self {
        Self {
            min_game_minutes: 10.0,
            max_cs_per_min: 0.5,
            max_damage_to_champions: 1500,
            max_gold_earned: 4000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfkReason {
    /// The payload's own leaver flag was set
    LeaverFlag,
    /// No meaningful activity under [`AfkThresholds`]
    Inactive,
}

impl AfkThresholds {
    pub fn detect(&self, player: &DerivedPlayer, game_minutes: f64) -> Option<AfkReason> {
        let p = player.participant;
        if p.is_leaver {
            return Some(AfkReason::LeaverFlag);
        }
        if game_minutes < self.min_game_minutes {
            return None;
        }

        let inactive = player.metrics.cs_per_min < self.max_cs_per_min
            && p.damage_to_champions < self.max_damage_to_champions
            && p.gold_earned < self.max_gold_earned
            && p.kills == 0
            && p.assists == 0;
        inactive.then_some(AfkReason::Inactive)
    }
}

/// AFK verdicts for every player of a match, indexed like its participants.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AfkReport(Vec<Option<AfkReason>>);

impl AfkReport {
    pub fn new(derived: &DerivedMatch, thresholds: &AfkThresholds) -> Self {
        let game_minutes = derived.game_minutes();
        let verdicts = derived
            .players
            .iter()
            .map(|player| {
                let verdict = thresholds.detect(player, game_minutes);
                if let Some(reason) = verdict {
                    debug!(
                        "Marking {} as AFK ({reason:?})",
                        player.participant.display_name
                    );
                }
                verdict
            })
            .collect();
        Self(verdicts)
    }

    pub fn is_afk(&self, index: usize) -> bool {
        self.reason(index).is_some()
    }

    pub fn reason(&self, index: usize) -> Option<AfkReason> {
        self.0.get(index).copied().flatten()
    }
}
