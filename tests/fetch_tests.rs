use std::collections::HashMap;

use moneyball_lambda_rust::error::FetchError;
use moneyball_lambda_rust::espn::SCOREBOARD_PATH;
use moneyball_lambda_rust::fetch::{SourceConfig, path_with_params};
use moneyball_lambda_rust::nba::{BOXSCORE_PATH, PLAYER_MOVEMENT_PATH, SCHEDULE_PATH};

#[test]
fn templates_resolve_with_their_params() {
    let path = path_with_params(SCHEDULE_PATH, &HashMap::from([("year", "2019".to_string())])).unwrap();
    assert_eq!(path, "prod/v2/2019/schedule.json");

    let params = HashMap::from([
        ("gameDate", "20191022".to_string()),
        ("gameId", "0021900001".to_string()),
    ]);
    let path = path_with_params(BOXSCORE_PATH, &params).unwrap();
    assert_eq!(path, "prod/v1/20191022/0021900001_boxscore.json");

    let path = path_with_params(PLAYER_MOVEMENT_PATH, &HashMap::new()).unwrap();
    assert_eq!(path, PLAYER_MOVEMENT_PATH);
}

#[test]
fn missing_param_is_an_error() {
    let err = path_with_params(SCOREBOARD_PATH, &HashMap::from([("year", "2019".to_string())])).unwrap_err();
    assert!(
        matches!(&err, FetchError::UnresolvedPath(p) if p.contains("{league}")),
        "error was: {:?}",
        err
    );
}

#[test]
fn source_config_defaults() {
    let espn = SourceConfig::espn().with_user_agent(Some("moneyball/0.1".to_string()));
    assert_eq!(espn.timeout_secs, 30);
    assert_eq!(espn.user_agent.as_deref(), Some("moneyball/0.1"));
    assert_eq!(
        espn.url_for("apis/site/v2/sports/basketball/nba/scoreboard"),
        "https://site.api.espn.com/apis/site/v2/sports/basketball/nba/scoreboard"
    );

    let parsed: SourceConfig = serde_json::from_str(r#"{"base_url": "http://localhost:8080"}"#).unwrap();
    assert_eq!(parsed.timeout_secs, 30);
    assert!(parsed.user_agent.is_none());
}
