use crate::afk::{AfkReport, AfkThresholds};
use crate::label::assign_tags;
use crate::metrics::{derive, DerivedPlayer};
use crate::standout::compute_standouts;
use crate::summary::{
    match_indicators, ClutchSummary, FormattedTotals, MatchSummary, PlayerSummary, SideTotals,
    TeamInsights,
};
use serde::Deserialize;
use serde_json::Value;
use the_recap_telemetry::error::Error;
use the_recap_telemetry::model::{MatchRecord, TeamId};
use tracing::{debug, info, warn};

/// Runs the whole end-of-match pipeline. Holds nothing but configuration, so
/// one evaluator can serve every match.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MatchEvaluator {
    #[serde(default)]
    afk_thresholds: AfkThresholds,
}

impl MatchEvaluator {
    pub fn new(afk_thresholds: AfkThresholds) -> Self {
        Self { afk_thresholds }
    }

    pub fn afk_thresholds(&self) -> &AfkThresholds {
        &self.afk_thresholds
    }

    /// Summarize a raw payload from the perspective of `viewer`. A payload
    /// with no participants yields `Ok(None)`.
    pub fn evaluate(&self, payload: &Value, viewer: &str) -> Result<Option<MatchSummary>, Error> {
        let record = match the_recap_telemetry::normalize(payload) {
            Ok(record) => record,
            Err(Error::EmptyMatch) => {
                info!("Nothing to summarize, match has no participants");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        Ok(Some(self.evaluate_record(&record, viewer)))
    }

    pub fn evaluate_record(&self, record: &MatchRecord, viewer: &str) -> MatchSummary {
        let derived = derive(record);
        let afk = AfkReport::new(&derived, &self.afk_thresholds);

        let my_team = record.find_viewer(viewer).map(|p| p.team_id);
        if my_team.is_none() {
            warn!("Viewer {viewer} not found, team-relative fields will be empty");
        }
        let winning_team = record
            .participants
            .iter()
            .find(|p| p.won)
            .map(|p| p.team_id);
        let did_win = my_team.is_some() && winning_team == my_team;

        let standouts = compute_standouts(&derived, &afk, my_team);
        let tags = assign_tags(&derived, &afk);

        let is_mine = |team_id: TeamId| Some(team_id) == my_team;
        let mut mine = SideTotals::default();
        let mut theirs = SideTotals::default();
        let mut my_players: Vec<&DerivedPlayer> = Vec::new();
        let mut their_players: Vec<&DerivedPlayer> = Vec::new();
        let mut afk_on_my_team = false;
        let mut afk_on_enemy_team = false;
        for (i, player) in derived.players.iter().enumerate() {
            let team_id = player.participant.team_id;
            if afk.is_afk(i) {
                if is_mine(team_id) {
                    afk_on_my_team = true;
                } else if my_team.is_some() {
                    afk_on_enemy_team = true;
                }
            } else if is_mine(team_id) {
                mine.add(player.participant);
                my_players.push(player);
            } else {
                theirs.add(player.participant);
                their_players.push(player);
            }
        }

        let game_minutes = derived.game_minutes();
        let indicators = match_indicators(&mine, &theirs, game_minutes, did_win);
        debug!("Match indicators: {indicators:?}");
        let my_team_insights = TeamInsights::new(&my_players);
        let enemy_team_insights = TeamInsights::new(&their_players);
        let teamwork_highlight = my_team_insights
            .as_ref()
            .and_then(TeamInsights::highlight);

        let players = derived
            .players
            .iter()
            .zip(standouts.flags)
            .zip(tags)
            .enumerate()
            .map(|(i, ((player, standouts), tags))| PlayerSummary {
                participant: player.participant.clone(),
                team: player.participant.team_id.side(),
                afk: afk.is_afk(i),
                afk_reason: afk.reason(i),
                metrics: player.metrics.clone(),
                standouts,
                tags,
                formatted: FormattedTotals::new(player.participant),
                clutch: ClutchSummary::default(),
            })
            .collect();

        MatchSummary {
            game_duration_minutes: game_minutes,
            winning_team: winning_team.map(TeamId::side).unwrap_or_default(),
            my_summoner_name: viewer.to_string(),
            my_team: my_team.map(TeamId::side).unwrap_or_default(),
            game_mode: record.game_mode.clone(),
            queue_type: record.queue_type.clone(),
            game_type: record.game_type.clone(),
            players,
            afk_on_my_team,
            afk_on_enemy_team,
            indicators,
            my_team_insights,
            enemy_team_insights,
            teamwork_highlight,
            achievements: standouts.achievements,
        }
    }
}
