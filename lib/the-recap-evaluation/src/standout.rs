//! Superlative performances at game and team scope.
//!
//! Flags are not exclusive: every player tied at a maximum gets the flag.
//! Each named achievement, however, goes to exactly one player, the first in
//! participant order holding the flag at the recorded maximum.

use crate::afk::AfkReport;
use crate::metrics::DerivedMatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use the_recap_telemetry::model::TeamId;

/// The best tank must have soaked more than this per death.
pub const MIN_TANKING_SCORE: f64 = 1000.0;
/// The best tank can't have died more than this.
pub const MAX_TANK_DEATHS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandoutFlags {
    pub highest_damage_in_game: bool,
    pub highest_damage_on_team: bool,
    pub most_healing_in_game: bool,
    pub most_shielding_in_game: bool,
    pub most_healing_shielding: bool,
    pub highest_vision_in_game: bool,
    pub highest_vision_on_team: bool,
    pub most_cc_in_game: bool,
    pub most_cc_on_team: bool,
    pub most_tanking_in_game: bool,
}

impl StandoutFlags {
    pub fn any(&self) -> bool {
        *self != Self::default()
    }
}

/// Champion names of the canonical holder per category. Team scope is the
/// viewer's team.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievements {
    pub highest_damage_in_game: Option<String>,
    pub highest_damage_on_my_team: Option<String>,
    pub most_healing_shielding: Option<String>,
    pub highest_vision_in_game: Option<String>,
    pub highest_vision_on_my_team: Option<String>,
    pub most_cc_in_game: Option<String>,
    pub most_cc_on_my_team: Option<String>,
    pub most_tanking_in_game: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Standouts {
    /// Indexed like the match's participants. AFK players keep all-false flags.
    pub flags: Vec<StandoutFlags>,
    pub achievements: Achievements,
}

#[derive(Debug, Clone, Copy, Default)]
struct GameMaxima {
    damage: u32,
    healing: u32,
    shielding: u32,
    heal_shield: u32,
    vision: u32,
    cc: u32,
    tanking: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct TeamMaxima {
    damage: u32,
    vision: u32,
    cc: u32,
}

/// Zero never counts as a standout.
fn at_max(value: u32, max: u32) -> bool {
    max > 0 && value == max
}

pub fn compute_standouts(
    derived: &DerivedMatch,
    afk: &AfkReport,
    my_team: Option<TeamId>,
) -> Standouts {
    let active = || {
        derived
            .players
            .iter()
            .enumerate()
            .filter(|(i, _)| !afk.is_afk(*i))
    };

    let mut game = GameMaxima::default();
    let mut teams: BTreeMap<TeamId, TeamMaxima> = BTreeMap::new();
    for (_, player) in active() {
        let p = player.participant;
        game.damage = game.damage.max(p.damage_to_champions);
        game.healing = game.healing.max(p.healing_on_teammates);
        game.shielding = game.shielding.max(p.shielding_on_teammates);
        game.heal_shield = game.heal_shield.max(p.heal_shield_total());
        game.vision = game.vision.max(p.vision_score);
        game.cc = game.cc.max(p.time_ccing_others);
        game.tanking = game.tanking.max(player.metrics.tanking_score);

        let team = teams.entry(p.team_id).or_default();
        team.damage = team.damage.max(p.damage_to_champions);
        team.vision = team.vision.max(p.vision_score);
        team.cc = team.cc.max(p.time_ccing_others);
    }

    let mut flags = vec![StandoutFlags::default(); derived.players.len()];
    for (i, player) in active() {
        let p = player.participant;
        let team = teams.get(&p.team_id).copied().unwrap_or_default();
        flags[i] = StandoutFlags {
            highest_damage_in_game: at_max(p.damage_to_champions, game.damage),
            highest_damage_on_team: at_max(p.damage_to_champions, team.damage),
            most_healing_in_game: at_max(p.healing_on_teammates, game.healing),
            most_shielding_in_game: at_max(p.shielding_on_teammates, game.shielding),
            most_healing_shielding: at_max(p.heal_shield_total(), game.heal_shield),
            highest_vision_in_game: at_max(p.vision_score, game.vision),
            highest_vision_on_team: at_max(p.vision_score, team.vision),
            most_cc_in_game: at_max(p.time_ccing_others, game.cc),
            most_cc_on_team: at_max(p.time_ccing_others, team.cc),
            most_tanking_in_game: player.metrics.tanking_score == game.tanking
                && game.tanking > MIN_TANKING_SCORE
                && p.deaths <= MAX_TANK_DEATHS,
        };
    }

    let holder = |flagged: fn(&StandoutFlags) -> bool, mine_only: bool| -> Option<String> {
        active()
            .filter(|(_, player)| !mine_only || Some(player.participant.team_id) == my_team)
            .find(|(i, _)| flagged(&flags[*i]))
            .map(|(_, player)| player.participant.champion_name.clone())
    };
    let achievements = Achievements {
        highest_damage_in_game: holder(|f| f.highest_damage_in_game, false),
        highest_damage_on_my_team: holder(|f| f.highest_damage_on_team, true),
        most_healing_shielding: holder(|f| f.most_healing_shielding, false),
        highest_vision_in_game: holder(|f| f.highest_vision_in_game, false),
        highest_vision_on_my_team: holder(|f| f.highest_vision_on_team, true),
        most_cc_in_game: holder(|f| f.most_cc_in_game, false),
        most_cc_on_my_team: holder(|f| f.most_cc_on_team, true),
        most_tanking_in_game: holder(|f| f.most_tanking_in_game, false),
    };

    Standouts {
        flags,
        achievements,
    }
}
