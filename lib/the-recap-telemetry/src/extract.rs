//! Schema-tolerant field extraction for a single player object.
//!
//! Every canonical field maps to a priority-ordered list of candidate
//! locations. A candidate is a key looked up either in the player's nested
//! `stats` object or on the player object itself. The first candidate holding
//! a non-zero value wins; a missing or mistyped value is skipped rather than
//! treated as an error.

use crate::model::{ParticipantRecord, Role, TeamId};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Nested,
    TopLevel,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    source: Source,
    key: &'static str,
}

const fn nested(key: &'static str) -> Candidate {
    Candidate {
        source: Source::Nested,
        key,
    }
}

const fn top(key: &'static str) -> Candidate {
    Candidate {
        source: Source::TopLevel,
        key,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Counter {
    Kills,
    Deaths,
    Assists,
    MinionKills,
    NeutralMinionKills,
    GoldEarned,
    DamageToChampions,
    DamageTaken,
    VisionScore,
    TimeCcingOthers,
    HealingOnTeammates,
    ShieldingOnTeammates,
    DamageSelfMitigated,
}

const KILLS: &[Candidate] = &[nested("kills"), nested("CHAMPIONS_KILLED"), top("kills")];
const DEATHS: &[Candidate] = &[nested("deaths"), nested("NUM_DEATHS"), top("deaths")];
const ASSISTS: &[Candidate] = &[nested("assists"), nested("ASSISTS"), top("assists")];
const MINION_KILLS: &[Candidate] = &[
    nested("totalMinionsKilled"),
    nested("MINIONS_KILLED"),
    top("totalMinionsKilled"),
];
const NEUTRAL_MINION_KILLS: &[Candidate] = &[
    nested("neutralMinionsKilled"),
    nested("NEUTRAL_MINIONS_KILLED"),
    top("neutralMinionsKilled"),
];
const GOLD_EARNED: &[Candidate] = &[
    nested("goldEarned"),
    nested("GOLD_EARNED"),
    top("goldEarned"),
];
const DAMAGE_TO_CHAMPIONS: &[Candidate] = &[
    nested("totalDamageDealtToChampions"),
    nested("TOTAL_DAMAGE_DEALT_TO_CHAMPIONS"),
    top("totalDamageDealtToChampions"),
];
const DAMAGE_TAKEN: &[Candidate] = &[
    nested("totalDamageTaken"),
    nested("TOTAL_DAMAGE_TAKEN"),
    top("totalDamageTaken"),
];
const VISION_SCORE: &[Candidate] = &[
    nested("visionScore"),
    nested("VISION_SCORE"),
    top("visionScore"),
];
const TIME_CCING_OTHERS: &[Candidate] = &[
    nested("timeCCingOthers"),
    nested("TIME_CCING_OTHERS"),
    top("timeCCingOthers"),
];
const HEALING_ON_TEAMMATES: &[Candidate] = &[
    nested("totalHealsOnTeammates"),
    nested("TOTAL_HEAL_ON_TEAMMATES"),
    top("totalHealsOnTeammates"),
];
const SHIELDING_ON_TEAMMATES: &[Candidate] = &[
    nested("totalDamageShieldedOnTeammates"),
    nested("TOTAL_DAMAGE_SHIELDED_ON_TEAMMATES"),
    top("totalDamageShieldedOnTeammates"),
];
const DAMAGE_SELF_MITIGATED: &[Candidate] = &[
    nested("totalDamageSelfMitigated"),
    nested("TOTAL_DAMAGE_SELF_MITIGATED"),
    top("totalDamageSelfMitigated"),
];

impl Counter {
    fn candidates(self) -> &'static [Candidate] {
        match self {
            Counter::Kills => KILLS,
            Counter::Deaths => DEATHS,
            Counter::Assists => ASSISTS,
            Counter::MinionKills => MINION_KILLS,
            Counter::NeutralMinionKills => NEUTRAL_MINION_KILLS,
            Counter::GoldEarned => GOLD_EARNED,
            Counter::DamageToChampions => DAMAGE_TO_CHAMPIONS,
            Counter::DamageTaken => DAMAGE_TAKEN,
            Counter::VisionScore => VISION_SCORE,
            Counter::TimeCcingOthers => TIME_CCING_OTHERS,
            Counter::HealingOnTeammates => HEALING_ON_TEAMMATES,
            Counter::ShieldingOnTeammates => SHIELDING_ON_TEAMMATES,
            Counter::DamageSelfMitigated => DAMAGE_SELF_MITIGATED,
        }
    }
}

const WIN: &[Candidate] = &[nested("win"), nested("WIN"), top("win")];
const LEAVER: &[Candidate] = &[nested("leaver"), nested("WAS_AFK"), top("leaver")];
const ROLE: &[Candidate] = &[top("role"), top("teamPosition"), nested("role")];

/// Read a JSON number as a non-negative counter. Negative numbers clamp to
/// zero, anything that isn't a number yields `None`.
pub(crate) fn as_count(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return Some(u32::try_from(n).unwrap_or(u32::MAX));
    }
    if value.as_i64().is_some() {
        return Some(0);
    }
    let n = value.as_f64()?;
    if !n.is_finite() || n <= 0.0 {
        return Some(0);
    }
    Some(n.min(f64::from(u32::MAX)) as u32)
}

/// Read a team id from a number or a numeric string. Zero means "no team".
pub(crate) fn as_team_id(value: &Value) -> Option<TeamId> {
    let id = match value {
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(|n| as_count(&Value::from(n))),
        other => as_count(other),
    }?;
    (id != 0).then_some(TeamId(i64::from(id)))
}

pub(crate) fn non_empty_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct PlayerView<'a> {
    top: &'a Map<String, Value>,
    nested: Option<&'a Map<String, Value>>,
}

impl<'a> PlayerView<'a> {
    pub fn new(top: &'a Map<String, Value>) -> Self {
        let nested = top.get("stats").and_then(Value::as_object);
        Self { top, nested }
    }

    fn lookup(&self, candidate: &Candidate) -> Option<&'a Value> {
        match candidate.source {
            Source::Nested => self.nested?.get(candidate.key),
            Source::TopLevel => self.top.get(candidate.key),
        }
    }

    pub fn counter(&self, counter: Counter) -> u32 {
        counter
            .candidates()
            .iter()
            .filter_map(|c| self.lookup(c).and_then(as_count))
            .find(|&n| n > 0)
            .unwrap_or(0)
    }

    fn flag(&self, candidates: &[Candidate]) -> bool {
        candidates
            .iter()
            .any(|c| self.lookup(c).and_then(Value::as_bool).unwrap_or(false))
    }

    /// Summoner name, then `gameName#tag`, then display name.
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = non_empty_str(self.top, "summonerName") {
            return Some(name.to_string());
        }
        if let Some(game_name) = non_empty_str(self.top, "riotIdGameName") {
            let tag = non_empty_str(self.top, "riotIdTagline")
                .or_else(|| non_empty_str(self.top, "riotIdTagLine"));
            return Some(match tag {
                Some(tag) => format!("{game_name}#{tag}"),
                None => game_name.to_string(),
            });
        }
        non_empty_str(self.top, "displayName").map(str::to_string)
    }

    pub fn champion_name(&self) -> String {
        if let Some(name) = non_empty_str(self.top, "championName") {
            return name.to_string();
        }
        match self.top.get("championId").and_then(as_count) {
            Some(id) if id > 0 => format!("Champion{id}"),
            _ => "Unknown".to_string(),
        }
    }

    pub fn team_id(&self) -> Option<TeamId> {
        self.top.get("teamId").and_then(as_team_id)
    }

    pub fn role(&self) -> Option<Role> {
        ROLE.iter()
            .filter_map(|c| self.lookup(c).and_then(Value::as_str))
            .find_map(|label| Role::try_from(label).ok())
    }

    /// Build the canonical record. The enclosing team's id is used when the
    /// player object doesn't carry its own.
    pub fn to_record(&self, team_fallback: Option<TeamId>) -> ParticipantRecord {
        ParticipantRecord {
            display_name: self
                .display_name()
                .unwrap_or_else(|| "Unknown".to_string()),
            champion_name: self.champion_name(),
            team_id: self.team_id().or(team_fallback).unwrap_or_default(),
            won: self.flag(WIN),
            kills: self.counter(Counter::Kills),
            deaths: self.counter(Counter::Deaths),
            assists: self.counter(Counter::Assists),
            minion_kills: self.counter(Counter::MinionKills),
            neutral_minion_kills: self.counter(Counter::NeutralMinionKills),
            gold_earned: self.counter(Counter::GoldEarned),
            damage_to_champions: self.counter(Counter::DamageToChampions),
            damage_taken: self.counter(Counter::DamageTaken),
            vision_score: self.counter(Counter::VisionScore),
            time_ccing_others: self.counter(Counter::TimeCcingOthers),
            healing_on_teammates: self.counter(Counter::HealingOnTeammates),
            shielding_on_teammates: self.counter(Counter::ShieldingOnTeammates),
            damage_self_mitigated: self.counter(Counter::DamageSelfMitigated),
            declared_role: self.role(),
            is_leaver: self.flag(LEAVER),
        }
    }
}
