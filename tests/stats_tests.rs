use moneyball_lambda_rust::error::DecodeError;
use moneyball_lambda_rust::model::nba_stats::StatsTln;
use serde_json::json;

#[test]
fn player_movement_keeps_group_name_and_every_field() {
    let body = std::fs::read_to_string("tests/fixtures/player_movement.json").expect("fixture");
    let tln = StatsTln::from_json(&body).expect("decode");

    assert_eq!(tln.stat_group_name, "NBA_Player_Movement");
    assert_eq!(tln.stat_group.len(), 2, "rows was: {}", tln.stat_group.len());

    let first = &tln.stat_group[0];
    assert_eq!(first.len(), 9, "all columns should survive, was: {:?}", first.keys().collect::<Vec<_>>());
    assert_eq!(first["Transaction_Type"], json!("Signing"));
    assert_eq!(first["TEAM_ID"], json!(1610612748));
    assert_eq!(tln.stat_group[1]["GroupSort"], json!("Waive 2"));
}

#[test]
fn empty_document_gives_empty_group() {
    let tln = StatsTln::from_json("{}").expect("decode");
    assert!(tln.stat_group_name.is_empty());
    assert!(tln.stat_group.is_empty());
}

#[test]
fn already_named_document_is_accepted() {
    let value = json!({
        "statGroupName": "NBA_Player_Movement",
        "statGroup": [{"PLAYER_ID": 1.0}]
    });
    let tln = StatsTln::from_value(value).expect("decode");
    assert_eq!(tln.stat_group_name, "NBA_Player_Movement");
    assert_eq!(tln.stat_group.len(), 1);
}

#[test]
fn group_without_rows_is_malformed() {
    let err = StatsTln::from_json(r#"{"NBA_Player_Movement": {"columns": []}}"#).unwrap_err();
    assert!(
        matches!(&err, DecodeError::MalformedStatGroup { group } if group == "NBA_Player_Movement"),
        "error was: {:?}",
        err
    );
}

#[test]
fn non_object_row_is_malformed() {
    let err = StatsTln::from_json(r#"{"G": {"rows": [{"A": 1}, 7]}}"#).unwrap_err();
    assert!(
        matches!(&err, DecodeError::MalformedStatRow { index: 1, .. }),
        "error was: {:?}",
        err
    );
}

#[test]
fn invalid_json_is_a_decode_error() {
    let err = StatsTln::from_json("{\"G\": ").unwrap_err();
    assert!(matches!(err, DecodeError::Json(_)), "error was: {:?}", err);
}
