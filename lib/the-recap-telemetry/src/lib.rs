use error::Error;
use extract::{as_count, as_team_id, non_empty_str, PlayerView};
use model::{MatchRecord, ParticipantRecord, TeamId, TeamObjectives};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub mod error;
mod extract;
pub mod model;

/// Where the participant list was found in an end-of-match payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `teams[].players`
    TeamPlayers,
    /// Top-level `participants`
    Participants,
    /// `statsBlock.participants`
    StatsBlock,
    /// The whole document parsed as a record
    Direct,
}

/// Decode raw bytes and [`normalize`] them.
pub fn normalize_slice(bytes: &[u8]) -> Result<MatchRecord, Error> {
    let payload: Value =
        serde_json::from_slice(bytes).map_err(|e| Error::MalformedPayload(e.to_string()))?;
    normalize(&payload)
}

/// Turn an end-of-match payload of any known shape into a [`MatchRecord`].
///
/// Strategies are attempted in [`Strategy`] order and the first one yielding a
/// participant with a resolvable name wins. Individual fields never fail the
/// parse; only a payload with no discoverable participant list does.
pub fn normalize(payload: &Value) -> Result<MatchRecord, Error> {
    let root = payload
        .as_object()
        .ok_or_else(|| Error::MalformedPayload("payload is not an object".to_string()))?;
    let stats_block = root.get("statsBlock").and_then(Value::as_object);

    let (strategy, participants) = from_team_players(root)
        .map(|p| (Strategy::TeamPlayers, p))
        .or_else(|| from_list(root.get("participants")).map(|p| (Strategy::Participants, p)))
        .or_else(|| {
            from_list(stats_block.and_then(|block| block.get("participants")))
                .map(|p| (Strategy::StatsBlock, p))
        })
        .map(Ok)
        .unwrap_or_else(|| from_direct(payload).map(|p| (Strategy::Direct, p)))?;
    debug!(
        "Normalized {} participants via {strategy:?}",
        participants.len()
    );

    if participants.is_empty() {
        return Err(Error::EmptyMatch);
    }

    let record = MatchRecord {
        duration_seconds: duration(root, stats_block),
        game_mode: label(root, stats_block, "gameMode"),
        queue_type: label(root, stats_block, "queueType"),
        game_type: label(root, stats_block, "gameType"),
        participants,
        team_objectives: team_objectives(root, stats_block),
    };
    if let Err(e) = record.check_team_structure() {
        warn!("Continuing with best-effort summary: {e}");
    }
    Ok(record)
}

/// The payload's game identifier, whether it arrives as a string or a number.
pub fn game_id(payload: &Value) -> Option<String> {
    match payload.get("gameId")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn from_team_players(root: &Map<String, Value>) -> Option<Vec<ParticipantRecord>> {
    let mut participants = Vec::new();
    for team in root.get("teams")?.as_array()?.iter().filter_map(Value::as_object) {
        let team_id = team.get("teamId").and_then(as_team_id);
        let players = team
            .get("players")
            .or_else(|| team.get("participants"))
            .and_then(Value::as_array);
        for player in players.into_iter().flatten().filter_map(Value::as_object) {
            let view = PlayerView::new(player);
            // Unnamed entries in this shape are placeholders, not players
            if view.display_name().is_some() {
                participants.push(view.to_record(team_id));
            }
        }
    }
    (!participants.is_empty()).then_some(participants)
}

fn from_list(list: Option<&Value>) -> Option<Vec<ParticipantRecord>> {
    let players: Vec<_> = list?
        .as_array()?
        .iter()
        .filter_map(Value::as_object)
        .map(PlayerView::new)
        .collect();
    if !players.iter().any(|view| view.display_name().is_some()) {
        return None;
    }
    Some(players.iter().map(|view| view.to_record(None)).collect())
}

#[derive(Debug, Deserialize)]
struct DirectRecord {
    #[serde(default)]
    participants: Vec<Value>,
}

fn from_direct(payload: &Value) -> Result<Vec<ParticipantRecord>, Error> {
    let direct = DirectRecord::deserialize(payload)
        .map_err(|e| Error::MalformedPayload(format!("no participant list found: {e}")))?;
    Ok(direct
        .participants
        .iter()
        .filter_map(Value::as_object)
        .map(|player| PlayerView::new(player).to_record(None))
        .collect())
}

fn duration(root: &Map<String, Value>, stats_block: Option<&Map<String, Value>>) -> u32 {
    let top_level = ["gameLength", "gameDuration"].map(|key| (Some(root), key));
    let nested = ["gameDuration", "gameLength"].map(|key| (stats_block, key));
    top_level
        .into_iter()
        .chain(nested)
        .filter_map(|(map, key)| map?.get(key).and_then(as_count))
        .find(|&n| n > 0)
        .unwrap_or(0)
}

fn label(
    root: &Map<String, Value>,
    stats_block: Option<&Map<String, Value>>,
    key: &str,
) -> String {
    non_empty_str(root, key)
        .or_else(|| stats_block.and_then(|block| non_empty_str(block, key)))
        .unwrap_or_default()
        .to_string()
}

fn team_objectives(
    root: &Map<String, Value>,
    stats_block: Option<&Map<String, Value>>,
) -> BTreeMap<TeamId, TeamObjectives> {
    let mut objectives: BTreeMap<TeamId, TeamObjectives> = BTreeMap::new();
    for (team, count) in team_counts(object(root, stats_block, "teamDragons")) {
        objectives.entry(team).or_default().dragon_count = count;
    }
    for (team, count) in team_counts(object(root, stats_block, "teamBarons")) {
        objectives.entry(team).or_default().baron_count = count;
    }
    objectives
}

fn object<'a>(
    root: &'a Map<String, Value>,
    stats_block: Option<&'a Map<String, Value>>,
    key: &str,
) -> Option<&'a Map<String, Value>> {
    root.get(key)
        .and_then(Value::as_object)
        .or_else(|| stats_block?.get(key).and_then(Value::as_object))
}

fn team_counts(map: Option<&Map<String, Value>>) -> impl Iterator<Item = (TeamId, u32)> + '_ {
    map.into_iter().flatten().filter_map(|(team, count)| {
        let team = team.parse().ok().map(TeamId)?;
        Some((team, as_count(count)?))
    })
}
