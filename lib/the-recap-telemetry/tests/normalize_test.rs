use serde_json::json;
use the_recap_telemetry::error::Error;
use the_recap_telemetry::model::{Role, TeamId};
use the_recap_telemetry::{game_id, normalize, normalize_slice};

#[test]
fn test_team_players_shape() {
    let payload = json!({
        "gameId": 7012345678u64,
        "gameLength": 1800,
        "gameMode": "CLASSIC",
        "queueType": "RANKED_SOLO_5x5",
        "teams": [
            {
                "teamId": 100,
                "players": [
                    {
                        "summonerName": "Blue Top",
                        "championName": "Garen",
                        "stats": {
                            "CHAMPIONS_KILLED": 10,
                            "NUM_DEATHS": 2,
                            "ASSISTS": 5,
                            "TOTAL_DAMAGE_DEALT_TO_CHAMPIONS": 25000,
                            "WIN": true
                        }
                    },
                    { "championName": "Nameless" }
                ]
            },
            {
                "teamId": 200,
                "players": [
                    {
                        "riotIdGameName": "Red Mid",
                        "riotIdTagline": "EUW",
                        "championId": 103,
                        "teamId": 200,
                        "kills": 4,
                        "stats": { "kills": 0 }
                    }
                ]
            }
        ]
    });

    let record = normalize(&payload).unwrap();
    assert_eq!(record.duration_seconds, 1800);
    assert_eq!(record.game_mode, "CLASSIC");
    assert_eq!(record.queue_type, "RANKED_SOLO_5x5");
    assert_eq!(record.game_type, "");
    assert_eq!(record.participants.len(), 2);

    let top = &record.participants[0];
    assert_eq!(top.display_name, "Blue Top");
    assert_eq!(top.team_id, TeamId::BLUE);
    assert_eq!((top.kills, top.deaths, top.assists), (10, 2, 5));
    assert_eq!(top.damage_to_champions, 25000);
    assert!(top.won);

    let mid = &record.participants[1];
    assert_eq!(mid.display_name, "Red Mid#EUW");
    assert_eq!(mid.champion_name, "Champion103");
    assert_eq!(mid.team_id, TeamId::RED);
    assert_eq!(mid.kills, 4);
    assert!(!mid.won);

    assert_eq!(game_id(&payload).as_deref(), Some("7012345678"));
}

#[test]
fn test_flat_participants_shape() {
    let payload = json!({
        "gameDuration": 1500,
        "gameLength": 0,
        "participants": [
            { "summonerName": "A", "teamId": 100, "kills": 3, "role": "JUNGLE", "leaver": true },
            { "teamId": 200, "deaths": -2, "goldEarned": "9000" }
        ]
    });

    let record = normalize(&payload).unwrap();
    assert_eq!(record.duration_seconds, 1500);
    assert_eq!(record.participants.len(), 2);
    assert_eq!(record.participants[0].declared_role, Some(Role::Jungle));
    assert!(record.participants[0].is_leaver);
    assert_eq!(record.participants[1].display_name, "Unknown");
    assert_eq!(record.participants[1].deaths, 0);
    assert_eq!(record.participants[1].gold_earned, 0);
}

#[test]
fn test_stats_block_shape() {
    let payload = json!({
        "gameId": "NA1-42",
        "teams": [{ "teamId": 100, "players": [] }],
        "statsBlock": {
            "gameDuration": 2100,
            "gameMode": "ARAM",
            "teamDragons": { "100": 3, "200": 1 },
            "teamBarons": { "200": 1 },
            "participants": [
                { "displayName": "Blue", "teamId": 100 },
                { "displayName": "Red", "teamId": 200 }
            ]
        }
    });

    let record = normalize(&payload).unwrap();
    assert_eq!(record.duration_seconds, 2100);
    assert_eq!(record.game_mode, "ARAM");
    assert_eq!(record.participants.len(), 2);
    assert_eq!(record.objectives(TeamId::BLUE).dragon_count, 3);
    assert_eq!(record.objectives(TeamId::BLUE).baron_count, 0);
    assert_eq!(record.objectives(TeamId::RED).baron_count, 1);
    assert_eq!(record.objectives(TeamId(300)).dragon_count, 0);
    assert_eq!(game_id(&payload).as_deref(), Some("NA1-42"));
}

#[test]
fn test_earlier_strategy_wins() {
    let payload = json!({
        "teams": [{ "teamId": 100, "players": [{ "summonerName": "From Teams" }] }],
        "participants": [{ "summonerName": "From List" }]
    });

    let record = normalize(&payload).unwrap();
    assert_eq!(record.participants.len(), 1);
    assert_eq!(record.participants[0].display_name, "From Teams");
}

#[test]
fn test_direct_parse_keeps_unnamed_participants() {
    let payload = json!({ "participants": [{ "teamId": 100, "kills": 2 }] });

    let record = normalize(&payload).unwrap();
    assert_eq!(record.participants.len(), 1);
    assert_eq!(record.participants[0].display_name, "Unknown");
    assert_eq!(record.participants[0].kills, 2);
}

#[test]
fn test_empty_match() {
    assert_eq!(normalize(&json!({})), Err(Error::EmptyMatch));
    assert_eq!(
        normalize(&json!({ "participants": [], "gameLength": 900 })),
        Err(Error::EmptyMatch)
    );
}

#[test]
fn test_malformed_payload() {
    assert!(matches!(
        normalize(&json!([1, 2, 3])),
        Err(Error::MalformedPayload(_))
    ));
    assert!(matches!(
        normalize(&json!({ "participants": "nope" })),
        Err(Error::MalformedPayload(_))
    ));
    assert!(matches!(
        normalize_slice(b"{ not json"),
        Err(Error::MalformedPayload(_))
    ));
}

#[test]
fn test_single_team_is_not_fatal() {
    let payload = json!({ "participants": [{ "summonerName": "Solo", "teamId": 100 }] });

    let record = normalize(&payload).unwrap();
    assert!(matches!(
        record.check_team_structure(),
        Err(Error::AmbiguousTeamStructure(_))
    ));
}

#[test]
fn test_loosely_encoded_team_ids() {
    let payload = json!({
        "teams": [
            { "teamId": "100", "players": [{ "summonerName": "Blue Jungle" }] },
            { "teamId": 200.0, "players": [{ "summonerName": "Red Mid", "teamId": "" }] }
        ]
    });

    let record = normalize(&payload).unwrap();
    assert_eq!(record.participants[0].team_id, TeamId::BLUE);
    assert_eq!(record.participants[1].team_id, TeamId::RED);
    assert!(record.check_team_structure().is_ok());
}
