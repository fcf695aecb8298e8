use moneyball_lambda_rust::handler::{Mode, Request, Workflow};

#[test]
fn serde_mode_and_workflow_lowercase() {
    let m: Mode = serde_json::from_str("\"test\"").unwrap();
    assert!(matches!(m, Mode::Test));
    let m2: Mode = serde_json::from_str("\"production\"").unwrap();
    assert!(matches!(m2, Mode::Production));

    let w: Workflow = serde_json::from_str("\"playermovement\"").unwrap();
    assert_eq!(w, Workflow::PlayerMovement);
    let w2: Workflow = serde_json::from_str("\"scoreboard\"").unwrap();
    assert_eq!(w2, Workflow::Scoreboard);
    assert!(serde_json::from_str::<Workflow>("\"standings\"").is_err());
}

#[test]
fn request_deserializes_and_defaults() {
    let json = serde_json::json!({
        "mode": "test",
        "loader_url": "https://loader.example.invalid",
        "test_loader_url": "https://test-loader.example.invalid"
    });
    let req: Request = serde_json::from_value(json).unwrap();
    assert!(req.workflows.is_empty(), "workflows should default to empty vec");
    assert_eq!(req.league, "nba");
    assert!(req.season_year.is_none());
    assert!(req.geocoder_api_key.is_none());

    let json2 = serde_json::json!({
        "mode": "production",
        "loader_url": "https://loader.example.invalid",
        "test_loader_url": "https://test-loader.example.invalid",
        "league": "wnba",
        "season_year": 2019,
        "game_date": "20191022",
        "game_id": "0021900001",
        "workflows": ["schedule", "boxscore", "teams"]
    });
    let req2: Request = serde_json::from_value(json2).unwrap();
    assert_eq!(req2.league, "wnba");
    assert_eq!(req2.season_year, Some(2019));
    assert_eq!(req2.workflows, vec![Workflow::Schedule, Workflow::Boxscore, Workflow::Teams]);
}
