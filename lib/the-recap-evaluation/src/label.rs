use crate::afk::AfkReport;
use crate::metrics::{DerivedMatch, DerivedPlayer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use the_recap_telemetry::model::{Role, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Tag {
    /// Large damage share, in most fights, and not dying for it
    HardCarry,
    /// Soaked damage and locked enemies down without feeding
    FrontlineRock,
    /// Best vision per minute on the team
    VisionMvp,
    /// Team-leading heals/shields or CC with lots of assists
    UtilityMvp,
    /// Jungler or support present for fights on a team that won the objectives
    ObjectiveBrain,
    /// Starved of gold but stayed alive and useful
    WeaksideWarrior,
    /// Any of the four headline tags on the losing side of a long game
    HeroicInLoss,
    /// Saved teammates often during the live game
    ClutchSavior,
    /// Saved teammates at critical health several times
    CriticalSavior,
}

impl Tag {
    /// Tags that make a loss heroic.
    const HEADLINE: [Tag; 4] = [
        Tag::HardCarry,
        Tag::FrontlineRock,
        Tag::VisionMvp,
        Tag::UtilityMvp,
    ];
}

/// `value` is at least every value in `values`, and positive.
fn is_highest(value: f64, values: &[f64]) -> bool {
    let Some(max) = values.iter().copied().reduce(f64::max) else {
        return false;
    };
    value >= max && value > 0.0
}

/// `value` reaches the `n`th largest of `values`, and is positive. Ties with
/// the cutoff all qualify.
fn is_top_n(value: f64, values: &[f64], n: usize) -> bool {
    if values.is_empty() || n == 0 {
        return false;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    let cutoff = sorted[n.min(sorted.len()) - 1];
    value >= cutoff && value > 0.0
}

struct Teammates<'m, 'a> {
    members: Vec<&'m DerivedPlayer<'a>>,
}

impl Teammates<'_, '_> {
    fn values(&self, f: impl Fn(&DerivedPlayer) -> f64) -> Vec<f64> {
        self.members.iter().map(|player| f(*player)).collect()
    }
}

fn heal_shield(player: &DerivedPlayer) -> f64 {
    f64::from(player.participant.heal_shield_total())
}

/// Apply the tag rules to every non-AFK player. Team comparisons only look at
/// non-AFK teammates. Rules are independent and a player can collect several.
pub fn assign_tags(derived: &DerivedMatch, afk: &AfkReport) -> Vec<Vec<Tag>> {
    let mut teams: BTreeMap<TeamId, Teammates> = BTreeMap::new();
    for (i, player) in derived.players.iter().enumerate() {
        if !afk.is_afk(i) {
            teams
                .entry(player.participant.team_id)
                .or_insert_with(|| Teammates {
                    members: Vec::new(),
                })
                .members
                .push(player);
        }
    }

    let game_minutes = derived.game_minutes();
    derived
        .players
        .iter()
        .enumerate()
        .map(|(i, player)| {
            if afk.is_afk(i) {
                return Vec::new();
            }
            let team_id = player.participant.team_id;
            let Some(team) = teams.get(&team_id) else {
                return Vec::new();
            };
            let mut tags = Vec::new();
            let p = player.participant;
            let m = &player.metrics;

            if m.damage_share >= 0.30
                && m.kill_participation >= 0.60
                && (m.kda >= 2.0 || p.kills.saturating_add(p.assists) >= 10)
            {
                tags.push(Tag::HardCarry);
            }

            if m.damage_taken_share >= 0.30
                && p.deaths <= 8
                && is_top_n(m.cc_per_min, &team.values(|t| t.metrics.cc_per_min), 2)
            {
                tags.push(Tag::FrontlineRock);
            }

            if m.vision_per_min >= 1.5
                && is_highest(m.vision_per_min, &team.values(|t| t.metrics.vision_per_min))
            {
                tags.push(Tag::VisionMvp);
            }

            if p.assists >= 10
                && (is_highest(heal_shield(player), &team.values(heal_shield))
                    || is_highest(m.cc_per_min, &team.values(|t| t.metrics.cc_per_min)))
            {
                tags.push(Tag::UtilityMvp);
            }

            if matches!(m.role, Some(Role::Jungle | Role::Support)) && m.kill_participation >= 0.60
            {
                let ours = derived.record.objectives(team_id);
                let theirs = derived.record.objectives(team_id.opponent());
                if ours.dragon_count >= theirs.dragon_count && ours.baron_count >= theirs.baron_count
                {
                    tags.push(Tag::ObjectiveBrain);
                }
            }

            if m.gold_share <= 0.18
                && p.deaths <= 5
                && (m.kill_participation >= 0.40 || p.assists >= 8)
            {
                tags.push(Tag::WeaksideWarrior);
            }

            if !p.won
                && game_minutes >= 25.0
                && tags.iter().any(|tag| Tag::HEADLINE.contains(tag))
            {
                tags.push(Tag::HeroicInLoss);
            }

            tags
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::afk::AfkThresholds;
    use crate::metrics::derive;
    use the_recap_telemetry::model::{MatchRecord, ParticipantRecord, TeamObjectives};

    fn tags_for(record: &MatchRecord) -> Vec<Vec<Tag>> {
        let derived = derive(record);
        let afk = AfkReport::new(&derived, &AfkThresholds::default());
        assign_tags(&derived, &afk)
    }

    fn filler(team_id: TeamId) -> ParticipantRecord {
        ParticipantRecord {
            team_id,
            kills: 1,
            deaths: 6,
            assists: 1,
            gold_earned: 10000,
            damage_to_champions: 10000,
            damage_taken: 10000,
            vision_score: 10,
            ..Default::default()
        }
    }

    fn record(minutes: u32, participants: Vec<ParticipantRecord>) -> MatchRecord {
        MatchRecord {
            duration_seconds: minutes * 60,
            participants,
            ..Default::default()
        }
    }

    #[test]
    fn helpers() {
        assert!(is_highest(3.0, &[1.0, 3.0, 3.0]));
        assert!(!is_highest(0.0, &[0.0, 0.0]));
        assert!(!is_highest(1.0, &[]));
        assert!(is_top_n(2.0, &[3.0, 2.0, 2.0, 1.0], 2));
        assert!(!is_top_n(1.0, &[3.0, 2.0, 2.0, 1.0], 2));
        assert!(is_top_n(1.0, &[1.0], 2));
        assert!(!is_top_n(0.0, &[0.0], 2));
    }

    #[test]
    fn hard_carry_and_heroic_loss() {
        let carry = ParticipantRecord {
            team_id: TeamId::BLUE,
            kills: 8,
            deaths: 5,
            assists: 4,
            damage_to_champions: 40000,
            ..filler(TeamId::BLUE)
        };
        let mut participants = vec![carry];
        participants.extend((0..4).map(|_| filler(TeamId::BLUE)));
        participants.extend((0..5).map(|_| filler(TeamId::RED)));

        // Team kills 12, KP 1.0, share 0.5, KDA 2.4
        let tags = tags_for(&record(30, participants.clone()));
        assert!(tags[0].contains(&Tag::HardCarry));
        assert!(tags[0].contains(&Tag::HeroicInLoss));

        let tags = tags_for(&record(24, participants));
        assert!(tags[0].contains(&Tag::HardCarry));
        assert!(!tags[0].contains(&Tag::HeroicInLoss));
    }

    #[test]
    fn frontline_rock_counts_ties() {
        let tank = |cc| ParticipantRecord {
            damage_taken: 40000,
            time_ccing_others: cc,
            ..filler(TeamId::BLUE)
        };
        let mut participants = vec![tank(60), tank(60)];
        participants.push(ParticipantRecord {
            time_ccing_others: 90,
            ..filler(TeamId::BLUE)
        });
        participants.push(filler(TeamId::RED));

        let tags = tags_for(&record(30, participants));
        // Damage taken share 40000 / 90000 for each tank, CC tied for second
        assert!(tags[0].contains(&Tag::FrontlineRock));
        assert!(tags[1].contains(&Tag::FrontlineRock));
        assert!(!tags[2].contains(&Tag::FrontlineRock));
    }

    #[test]
    fn vision_mvp_needs_rate() {
        let warder = |vision| ParticipantRecord {
            vision_score: vision,
            ..filler(TeamId::BLUE)
        };
        let tags = tags_for(&record(20, vec![warder(30), filler(TeamId::BLUE)]));
        assert!(tags[0].contains(&Tag::VisionMvp));

        let tags = tags_for(&record(20, vec![warder(29), filler(TeamId::BLUE)]));
        assert!(!tags[0].contains(&Tag::VisionMvp));
    }

    #[test]
    fn vision_mvp_shared_on_tie() {
        let warder = |team_id, vision| ParticipantRecord {
            vision_score: vision,
            ..filler(team_id)
        };
        let tags = tags_for(&record(
            20,
            vec![
                warder(TeamId::BLUE, 40),
                warder(TeamId::BLUE, 40),
                warder(TeamId::BLUE, 39),
                warder(TeamId::RED, 35),
            ],
        ));
        assert!(tags[0].contains(&Tag::VisionMvp));
        assert!(tags[1].contains(&Tag::VisionMvp));
        assert!(!tags[2].contains(&Tag::VisionMvp));
        // Compared within the team only
        assert!(tags[3].contains(&Tag::VisionMvp));
    }

    #[test]
    fn utility_mvp() {
        let enchanter = ParticipantRecord {
            assists: 10,
            healing_on_teammates: 3000,
            ..filler(TeamId::BLUE)
        };
        let tags = tags_for(&record(30, vec![enchanter.clone(), filler(TeamId::BLUE)]));
        assert!(tags[0].contains(&Tag::UtilityMvp));

        let quiet = ParticipantRecord {
            assists: 9,
            ..enchanter
        };
        let tags = tags_for(&record(30, vec![quiet, filler(TeamId::BLUE)]));
        assert!(!tags[0].contains(&Tag::UtilityMvp));
    }

    #[test]
    fn objective_brain_compares_against_opponent() {
        let jungler = ParticipantRecord {
            kills: 5,
            assists: 5,
            declared_role: Some(Role::Jungle),
            ..filler(TeamId::BLUE)
        };
        let mut record = record(30, vec![jungler, filler(TeamId::BLUE), filler(TeamId::RED)]);
        record.team_objectives.insert(
            TeamId::BLUE,
            TeamObjectives {
                dragon_count: 2,
                baron_count: 1,
            },
        );
        record.team_objectives.insert(
            TeamId::RED,
            TeamObjectives {
                dragon_count: 2,
                baron_count: 0,
            },
        );
        assert!(tags_for(&record)[0].contains(&Tag::ObjectiveBrain));

        record.team_objectives.get_mut(&TeamId::RED).unwrap().dragon_count = 3;
        assert!(!tags_for(&record)[0].contains(&Tag::ObjectiveBrain));
    }

    #[test]
    fn weakside_warrior() {
        let weakside = ParticipantRecord {
            gold_earned: 5000,
            deaths: 5,
            assists: 8,
            ..filler(TeamId::BLUE)
        };
        let mut participants = vec![weakside];
        participants.extend((0..4).map(|_| filler(TeamId::BLUE)));
        // Gold share 5000 / 45000
        let tags = tags_for(&record(30, participants));
        assert!(tags[0].contains(&Tag::WeaksideWarrior));
    }

    #[test]
    fn afk_players_get_nothing() {
        let leaver = ParticipantRecord {
            is_leaver: true,
            vision_score: 300,
            assists: 20,
            healing_on_teammates: 9000,
            ..filler(TeamId::BLUE)
        };
        let tags = tags_for(&record(30, vec![leaver, filler(TeamId::BLUE)]));
        assert!(tags[0].is_empty());
    }
}
