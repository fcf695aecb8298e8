use chrono::{NaiveDate, TimeZone, Utc};
use moneyball_lambda_rust::error::MappingError;
use moneyball_lambda_rust::mastered::MasterContext;
use moneyball_lambda_rust::model::nba_cms::SportsEvent;
use moneyball_lambda_rust::nba::{
    decode_cms, decode_schedule, decode_stats, map_cms_boxscore, map_player_movement, map_schedule,
};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{name}")).expect("fixture")
}

#[test]
fn schedule_maps_every_game() {
    let doc = decode_schedule(&fixture("nba_schedule.json")).expect("decode");
    let events = map_schedule(&doc, &MasterContext::default())
        .into_result()
        .expect("map");
    assert_eq!(events.len(), 2);

    let opener = &events[0];
    assert_eq!(opener.entity_id.id, "2019-10-22:NOP:TOR");
    assert_eq!(opener.game_id, "0021900001");
    assert_eq!(opener.league, "NBA");
    assert_eq!(opener.season.year, 2019);
    assert_eq!(opener.season.stage, 2);

    let detail = opener.game_detail.as_ref().expect("detail");
    assert_eq!(detail.start_time, Some(Utc.with_ymd_and_hms(2019, 10, 22, 23, 30, 0).unwrap()));
    assert_eq!(detail.start_date_eastern, "2019-10-22");
    assert_eq!(detail.start_time_eastern, "19:30:00");
    assert_eq!(detail.game_duration_minutes, 169);
    assert_eq!(detail.attendance, 0, "feed attendance is reported as zero, was: {}", detail.attendance);
    assert_eq!(detail.period.map(|p| p.current), Some(5));

    assert_eq!(opener.home_team.score, 130);
    assert_eq!(opener.home_team.record.win, 1);
    assert_eq!(opener.visit_team.line_score.len(), 5);
    let home_team = opener.home_team.team.as_ref().expect("team");
    assert_eq!(home_team.nba_team_id, "1610612761");
    assert_eq!(home_team.entity_id.id, "TOR:2019:2");

    let venue = opener.venue.as_ref().expect("venue");
    assert_eq!(venue.full_name, "Scotiabank Arena");
    assert_eq!(venue.address.as_ref().map(|a| a.country.as_str()), Some("Canada"));
}

#[test]
fn schedule_game_with_empty_fields_still_maps() {
    let doc = decode_schedule(&fixture("nba_schedule.json")).expect("decode");
    let events = map_schedule(&doc, &MasterContext::default())
        .into_result()
        .expect("map");
    let late = &events[1];

    assert_eq!(late.entity_id.id, "2019-10-22:LAL:LAC", "10pm Eastern stays on the 22nd");
    let detail = late.game_detail.as_ref().expect("detail");
    assert_eq!(detail.game_duration_minutes, 0, "empty duration parts clamp to zero");
    assert_eq!(late.home_team.score, -1);
    assert!(late.venue.is_none());
}

#[test]
fn schedule_stops_at_game_without_tricode() {
    let mut doc = decode_schedule(&fixture("nba_schedule.json")).expect("decode");
    doc.league.games[1].visiting_team.tri_code.clear();

    let batch = map_schedule(&doc, &MasterContext::default());
    assert_eq!(batch.items.len(), 1);
    assert!(
        matches!(&batch.error, Some(MappingError::MissingAbbreviation { event_id, side: "visit" }) if event_id == "0021900002"),
        "error was: {:?}",
        batch.error
    );
}

#[test]
fn cms_boxscore_converts_eastern_wall_clock() {
    let doc = decode_cms(&fixture("nba_boxscore_cms.json")).expect("decode");
    let ev = map_cms_boxscore(&doc, &MasterContext::default()).expect("map");

    let detail = ev.game_detail.as_ref().expect("detail");
    assert_eq!(detail.start_time, Some(Utc.with_ymd_and_hms(2017, 2, 2, 0, 30, 0).unwrap()));
    assert_eq!(detail.start_date_eastern, "2017-02-01");
    assert_eq!(detail.start_time_eastern, "19:30:00");
    assert_eq!(detail.attendance, 19600);

    // home abbreviation is blank; the team key stands in
    assert_eq!(ev.entity_id.id, "2017-02-01:CHI:MIA");
    assert_eq!(ev.season.year, 2016);
    assert_eq!(ev.season.stage, 2);
    assert_eq!(ev.home_team.score, 100);
    assert_eq!(ev.home_team.name, "Heat");

    let bulls = ev.visit_team.team.as_ref().expect("team");
    assert_eq!(bulls.entity_id.id, "CHI:2016:2");
    let roster = &bulls.rosters[0].roster;
    assert_eq!(roster[0].full_name, "Jimmy Butler");
    assert_eq!(roster[0].jersey, "21");
    assert_eq!(roster[0].id_nba, "202710");
    let jerseys: Vec<&str> = roster.iter().map(|p| p.jersey.as_str()).collect();
    assert_eq!(jerseys, vec!["21", "8", "00", "6"], "jerseys were: {:?}", jerseys);

    let status = ev.status.as_ref().expect("status");
    assert_eq!(status.state, "Final");
    assert_eq!(status.period, 4);
}

#[test]
fn cms_document_without_game_is_rejected() {
    let err = map_cms_boxscore(&SportsEvent::default(), &MasterContext::default()).unwrap_err();
    assert!(matches!(err, MappingError::NoGame), "error was: {:?}", err);
}

#[test]
fn cms_game_with_bad_time_is_rejected() {
    let mut doc = decode_cms(&fixture("nba_boxscore_cms.json")).expect("decode");
    if let Some(game) = doc.content.game.as_mut() {
        game.time = "7:30 PM".to_string();
    }
    let err = map_cms_boxscore(&doc, &MasterContext::default()).unwrap_err();
    assert!(
        matches!(&err, MappingError::InvalidStartTime { game_id, .. } if game_id == "0021600741"),
        "error was: {:?}",
        err
    );
}

#[test]
fn player_movement_becomes_assignments() {
    let tln = decode_stats(&fixture("player_movement.json")).expect("decode");
    let players = map_player_movement(&tln).into_result().expect("map");
    assert_eq!(players.len(), 2);

    let signed = &players[0];
    assert_eq!(signed.id_nba, "1629735");
    assert_eq!(signed.team.as_ref().map(|t| t.nba_team_id.as_str()), Some("1610612748"));
    let history = &signed.history[0];
    assert_eq!(history.league, "NBA");
    assert_eq!(history.start, NaiveDate::from_ymd_opt(2019, 10, 21));
    assert!(history.end.is_none());

    let waived = &players[1];
    assert!(waived.team.is_none());
    assert_eq!(waived.history[0].end, NaiveDate::from_ymd_opt(2019, 10, 19));
    assert!(waived.history[0].start.is_none());
}

#[test]
fn player_movement_row_without_player_stops() {
    let tln = decode_stats(r#"{"NBA_Player_Movement": {"rows": [{"PLAYER_ID": 1.0}, {"TEAM_ID": 2}]}}"#)
        .expect("decode");
    let batch = map_player_movement(&tln);
    assert_eq!(batch.items.len(), 1);
    assert!(
        matches!(&batch.error, Some(MappingError::MissingField { index: 1, field: "PLAYER_ID", .. })),
        "error was: {:?}",
        batch.error
    );
}
