use crate::afk::AfkReason;
use crate::format::format_number;
use crate::label::Tag;
use crate::metrics::{DerivedPlayer, PlayerMetrics};
use crate::standout::{Achievements, StandoutFlags};
use serde::{Deserialize, Serialize};
use the_recap_telemetry::model::{ParticipantRecord, Side};

/// Stat totals rendered for prose, see [`format_number`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedTotals {
    pub damage: String,
    pub healing: String,
    pub shielding: String,
    pub cc: String,
    pub damage_mitigated: String,
}

impl FormattedTotals {
    pub fn new(p: &ParticipantRecord) -> Self {
        let format = |n: u32| format_number(u64::from(n));
        Self {
            damage: format(p.damage_to_champions),
            healing: format(p.healing_on_teammates),
            shielding: format(p.shielding_on_teammates),
            cc: format(p.time_ccing_others),
            damage_mitigated: format(p.damage_self_mitigated),
        }
    }
}

/// Save counts reported by the live game monitor, zero when none were merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClutchSummary {
    pub lives_saved: u32,
    pub times_saved: u32,
    pub critical_saves: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub participant: ParticipantRecord,
    pub team: Side,
    pub afk: bool,
    pub afk_reason: Option<AfkReason>,
    pub metrics: PlayerMetrics,
    pub standouts: StandoutFlags,
    pub tags: Vec<Tag>,
    pub formatted: FormattedTotals,
    pub clutch: ClutchSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CarryPerformance {
    /// Three or more high damage share players
    Distributed,
    /// One or two
    Focused,
    #[default]
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeamComposition {
    DamageHeavy,
    UtilityHeavy,
    #[default]
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamworkHighlight {
    ExceptionalTeamCoordination,
    StrongTeamSynergy,
    WellRoundedTeam,
    OutstandingSupportPlay,
    HighTeamParticipation,
}

pub const HIGH_KP: f64 = 0.60;
pub const HIGH_DAMAGE_SHARE: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInsights {
    #[serde(rename = "averageKP")]
    pub average_kp: f64,
    #[serde(rename = "highKPCount")]
    pub high_kp_count: u32,
    /// Healing plus shielding on teammates.
    pub total_utility: u64,
    pub total_vision: u64,
    pub well_rounded_players: u32,
    pub synergy_score: f64,
    pub carry_performance: CarryPerformance,
    pub team_composition: TeamComposition,
    pub total_utility_formatted: String,
    pub total_vision_formatted: String,
}

impl TeamInsights {
    /// Aggregate a side's non-AFK players. `None` when the side has nobody
    /// left to judge.
    pub fn new(players: &[&DerivedPlayer]) -> Option<Self> {
        if players.is_empty() {
            return None;
        }
        let count = players.len() as f64;

        let mut insights = Self::default();
        let mut total_kp = 0.0;
        let mut total_synergy = 0.0;
        let mut total_damage = 0u64;
        let mut high_damage = 0;
        for player in players {
            let m = &player.metrics;
            let p = player.participant;

            total_kp += m.kill_participation;
            if m.kill_participation >= HIGH_KP {
                insights.high_kp_count += 1;
            }
            insights.total_utility += u64::from(p.heal_shield_total());
            insights.total_vision += u64::from(p.vision_score);
            total_damage += u64::from(p.damage_to_champions);
            if m.damage_share >= HIGH_DAMAGE_SHARE {
                high_damage += 1;
            }

            let strengths = [
                m.damage_share >= HIGH_DAMAGE_SHARE,
                m.vision_per_min >= 1.5,
                m.kill_participation >= HIGH_KP,
                m.utility_score >= 5.0,
                m.cs_per_min >= 6.0,
            ];
            if strengths.into_iter().filter(|&s| s).count() >= 2 {
                insights.well_rounded_players += 1;
            }

            let mut synergy = m.kill_participation * 0.6;
            if m.utility_score > 0.0 {
                synergy += (m.utility_score / 10.0) * 0.4;
            }
            total_synergy += synergy;
        }

        insights.average_kp = total_kp / count;
        insights.synergy_score = total_synergy / count;
        insights.carry_performance = match high_damage {
            0 => CarryPerformance::Balanced,
            1..=2 => CarryPerformance::Focused,
            _ => CarryPerformance::Distributed,
        };
        let average_damage = total_damage as f64 / count;
        insights.team_composition = if average_damage >= 50000.0 && insights.total_utility < 20000
        {
            TeamComposition::DamageHeavy
        } else if insights.total_utility >= 30000 {
            TeamComposition::UtilityHeavy
        } else {
            TeamComposition::Balanced
        };
        insights.total_utility_formatted = format_number(insights.total_utility);
        insights.total_vision_formatted = format_number(insights.total_vision);
        Some(insights)
    }

    /// The first teamwork trait this side qualifies for, strongest first.
    pub fn highlight(&self) -> Option<TeamworkHighlight> {
        if self.high_kp_count >= 4 {
            Some(TeamworkHighlight::ExceptionalTeamCoordination)
        } else if self.synergy_score >= 0.7 {
            Some(TeamworkHighlight::StrongTeamSynergy)
        } else if self.well_rounded_players >= 3 {
            Some(TeamworkHighlight::WellRoundedTeam)
        } else if self.total_utility >= 30000 {
            Some(TeamworkHighlight::OutstandingSupportPlay)
        } else if self.average_kp >= 0.65 {
            Some(TeamworkHighlight::HighTeamParticipation)
        } else {
            None
        }
    }
}

/// Non-AFK sums for one side of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SideTotals {
    pub kills: u64,
    pub deaths: u64,
    pub gold: u64,
    pub damage: u64,
}

impl SideTotals {
    pub fn add(&mut self, p: &ParticipantRecord) {
        self.kills += u64::from(p.kills);
        self.deaths += u64::from(p.deaths);
        self.gold += u64::from(p.gold_earned);
        self.damage += u64::from(p.damage_to_champions);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchIndicators {
    pub total_kills: u64,
    pub kill_difference: u64,
    pub gold_difference: u64,
    pub damage_difference: u64,
    pub is_intense_match: bool,
    pub is_comeback: bool,
    pub was_stomp: bool,
    pub was_close: bool,
    pub had_clutch_moments: bool,
}

/// Points toward calling a win a comeback. Only meaningful for the winner.
pub fn comeback_score(mine: &SideTotals, theirs: &SideTotals, game_minutes: f64) -> u32 {
    let total_kills = mine.kills + theirs.kills;
    let kill_diff = mine.kills.abs_diff(theirs.kills);

    let mut score = 0;
    if kill_diff <= 8 && total_kills >= 50 {
        score += 2;
    }
    if game_minutes >= 35.0 {
        score += 1;
    }
    if kill_diff <= 5 && total_kills >= 60 {
        score += 2;
    }
    if mine.deaths > theirs.deaths && total_kills >= 50 {
        score += 1;
    }
    score
}

pub fn match_indicators(
    mine: &SideTotals,
    theirs: &SideTotals,
    game_minutes: f64,
    did_win: bool,
) -> MatchIndicators {
    let total_kills = mine.kills + theirs.kills;
    let kill_difference = mine.kills.abs_diff(theirs.kills);
    let gold_difference = mine.gold.abs_diff(theirs.gold);
    let damage_difference = mine.damage.abs_diff(theirs.damage);

    let is_comeback = did_win && {
        let score = comeback_score(mine, theirs, game_minutes);
        score >= 3 || (score >= 2 && game_minutes >= 30.0)
    };
    let is_intense_match = is_comeback
        || game_minutes >= 30.0
        || (kill_difference <= 10 && total_kills >= 40)
        || total_kills >= 60
        || (damage_difference <= 10000 && mine.damage + theirs.damage >= 200000);

    MatchIndicators {
        total_kills,
        kill_difference,
        gold_difference,
        damage_difference,
        is_intense_match,
        is_comeback,
        was_stomp: kill_difference >= 20 || gold_difference >= 15000,
        was_close: kill_difference <= 5 && total_kills >= 40,
        had_clutch_moments: is_comeback || (kill_difference <= 3 && total_kills >= 50),
    }
}

/// The end-of-match summary handed to the narrative workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub game_duration_minutes: f64,
    pub winning_team: Side,
    pub my_summoner_name: String,
    pub my_team: Side,
    pub game_mode: String,
    pub queue_type: String,
    pub game_type: String,
    pub players: Vec<PlayerSummary>,
    pub afk_on_my_team: bool,
    pub afk_on_enemy_team: bool,
    #[serde(flatten)]
    pub indicators: MatchIndicators,
    pub my_team_insights: Option<TeamInsights>,
    pub enemy_team_insights: Option<TeamInsights>,
    pub teamwork_highlight: Option<TeamworkHighlight>,
    pub achievements: Achievements,
}
