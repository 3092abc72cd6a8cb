use crate::role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use the_recap_telemetry::model::{MatchRecord, ParticipantRecord, Role, TeamId};

/// Smallest denominator used by every ratio, in units or minutes.
pub const MIN_DENOMINATOR: f64 = 1.0;

fn ratio(numerator: impl Into<f64>, denominator: impl Into<f64>) -> f64 {
    numerator.into() / denominator.into().max(MIN_DENOMINATOR)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamTotals {
    pub kills: u32,
    pub damage_to_champions: u32,
    pub gold: u32,
    pub damage_taken: u32,
}

/// Sum the share denominators over every participant, grouped by team.
pub fn team_totals(record: &MatchRecord) -> BTreeMap<TeamId, TeamTotals> {
    let mut totals: BTreeMap<TeamId, TeamTotals> = BTreeMap::new();
    for p in &record.participants {
        let team = totals.entry(p.team_id).or_default();
        team.kills = team.kills.saturating_add(p.kills);
        team.damage_to_champions = team
            .damage_to_champions
            .saturating_add(p.damage_to_champions);
        team.gold = team.gold.saturating_add(p.gold_earned);
        team.damage_taken = team.damage_taken.saturating_add(p.damage_taken);
    }
    totals
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMetrics {
    pub kda: f64,
    pub kill_participation: f64,
    pub damage_share: f64,
    pub gold_share: f64,
    pub damage_taken_share: f64,
    pub cs_total: u32,
    pub cs_per_min: f64,
    pub damage_per_min: f64,
    pub vision_per_min: f64,
    pub damage_taken_per_min: f64,
    pub cc_per_min: f64,
    pub team_kills: u32,
    pub team_damage: u32,
    pub team_gold: u32,
    pub team_damage_taken: u32,
    pub game_minutes: f64,
    /// Damage taken per death, deaths floored at one.
    pub tanking_score: f64,
    /// Heal and shield output in thousands plus CC per minute.
    pub utility_score: f64,
    /// Damage dealt to champions per gold earned.
    pub gold_efficiency: f64,
    /// Declared role, or the inferred one when the payload had none.
    pub role: Option<Role>,
}

impl PlayerMetrics {
    pub fn new(p: &ParticipantRecord, team: &TeamTotals, game_minutes: f64) -> Self {
        let takedowns = p.kills.saturating_add(p.assists);
        let cs_total = p.cs_total();
        let cs_per_min = ratio(cs_total, game_minutes);
        let damage_share = ratio(p.damage_to_champions, team.damage_to_champions);
        let cc_per_min = ratio(p.time_ccing_others, game_minutes);
        let role = p.declared_role.or_else(|| {
            role::infer(&role::RoleSignals {
                neutral_minion_kills: p.neutral_minion_kills,
                vision_score: p.vision_score,
                heal_shield_total: p.heal_shield_total(),
                cs_per_min,
                damage_share,
                game_minutes,
            })
        });

        Self {
            kda: ratio(takedowns, p.deaths),
            kill_participation: ratio(takedowns, team.kills),
            damage_share,
            gold_share: ratio(p.gold_earned, team.gold),
            damage_taken_share: ratio(p.damage_taken, team.damage_taken),
            cs_total,
            cs_per_min,
            damage_per_min: ratio(p.damage_to_champions, game_minutes),
            vision_per_min: ratio(p.vision_score, game_minutes),
            damage_taken_per_min: ratio(p.damage_taken, game_minutes),
            cc_per_min,
            team_kills: team.kills,
            team_damage: team.damage_to_champions,
            team_gold: team.gold,
            team_damage_taken: team.damage_taken,
            game_minutes,
            tanking_score: ratio(p.damage_taken, p.deaths),
            utility_score: f64::from(p.heal_shield_total()) / 1000.0 + cc_per_min,
            gold_efficiency: ratio(p.damage_to_champions, p.gold_earned),
            role,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DerivedPlayer<'a> {
    pub participant: &'a ParticipantRecord,
    pub metrics: PlayerMetrics,
}

/// A match record with metrics attached to every participant, in input order.
#[derive(Debug, Clone)]
pub struct DerivedMatch<'a> {
    pub record: &'a MatchRecord,
    pub team_totals: BTreeMap<TeamId, TeamTotals>,
    pub players: Vec<DerivedPlayer<'a>>,
}

impl DerivedMatch<'_> {
    pub fn game_minutes(&self) -> f64 {
        self.record.game_minutes()
    }
}

/// Attach [`PlayerMetrics`] to every participant. Team totals are computed in
/// full before any share is taken from them.
pub fn derive(record: &MatchRecord) -> DerivedMatch<'_> {
    let team_totals = team_totals(record);
    let game_minutes = record.game_minutes();
    let players = record
        .participants
        .iter()
        .map(|participant| {
            let team = team_totals
                .get(&participant.team_id)
                .copied()
                .unwrap_or_default();
            DerivedPlayer {
                participant,
                metrics: PlayerMetrics::new(participant, &team, game_minutes),
            }
        })
        .collect();

    DerivedMatch {
        record,
        team_totals,
        players,
    }
}
