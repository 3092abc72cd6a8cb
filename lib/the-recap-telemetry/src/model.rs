use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TeamId(pub i64);

impl TeamId {
    pub const BLUE: TeamId = TeamId(100);
    pub const RED: TeamId = TeamId(200);

    pub fn side(self) -> Side {
        match self {
            Self::BLUE => Side::Blue,
            Self::RED => Side::Red,
            _ => Side::Unknown,
        }
    }

    /// The canonical team on the other side of the map. Unrecognized ids are
    /// treated as red, so their opponent is blue.
    pub fn opponent(self) -> TeamId {
        if self == Self::BLUE {
            Self::RED
        } else {
            Self::BLUE
        }
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Blue,
    Red,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Top,
    Jungle,
    Middle,
    Bottom,
    Support,
}

impl TryFrom<&str> for Role {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Covers both the client's position labels and the match-v5 ones
        match value.to_lowercase().as_str() {
            "top" => Ok(Role::Top),
            "jungle" => Ok(Role::Jungle),
            "middle" | "mid" => Ok(Role::Middle),
            "bottom" | "bot" | "adc" => Ok(Role::Bottom),
            "support" | "utility" => Ok(Role::Support),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamObjectives {
    pub dragon_count: u32,
    pub baron_count: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRecord {
    pub display_name: String,
    pub champion_name: String,
    pub team_id: TeamId,
    pub won: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
    pub minion_kills: u32,
    pub neutral_minion_kills: u32,
    pub gold_earned: u32,
    pub damage_to_champions: u32,
    pub damage_taken: u32,
    pub vision_score: u32,
    pub time_ccing_others: u32,
    pub healing_on_teammates: u32,
    pub shielding_on_teammates: u32,
    pub damage_self_mitigated: u32,
    pub declared_role: Option<Role>,
    pub is_leaver: bool,
}

impl ParticipantRecord {
    pub fn cs_total(&self) -> u32 {
        self.minion_kills.saturating_add(self.neutral_minion_kills)
    }

    pub fn heal_shield_total(&self) -> u32 {
        self.healing_on_teammates
            .saturating_add(self.shielding_on_teammates)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub duration_seconds: u32,
    pub game_mode: String,
    pub queue_type: String,
    pub game_type: String,
    pub participants: Vec<ParticipantRecord>,
    pub team_objectives: BTreeMap<TeamId, TeamObjectives>,
}

impl MatchRecord {
    /// Unfloored match length in minutes.
    pub fn game_minutes(&self) -> f64 {
        f64::from(self.duration_seconds) / 60.0
    }

    /// Distinct team ids, ascending.
    pub fn team_ids(&self) -> BTreeSet<TeamId> {
        self.participants.iter().map(|p| p.team_id).collect()
    }

    /// Objective counts for a team, zero-valued when the payload had none.
    pub fn objectives(&self, team_id: TeamId) -> TeamObjectives {
        self.team_objectives
            .get(&team_id)
            .copied()
            .unwrap_or_default()
    }

    /// A valid match has exactly two distinct teams.
    pub fn check_team_structure(&self) -> Result<(), Error> {
        let teams = self.team_ids();
        if teams.len() == 2 {
            Ok(())
        } else {
            Err(Error::AmbiguousTeamStructure(teams.into_iter().collect()))
        }
    }

    /// First participant whose resolved display name matches the viewer.
    pub fn find_viewer(&self, viewer: &str) -> Option<&ParticipantRecord> {
        self.participants.iter().find(|p| p.display_name == viewer)
    }
}
