//! data.nba.net `prod` documents: the v2 season schedule and the v1 game box score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flex::FlexInt;

/// `prod/v2/{year}/schedule.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleDocument {
    #[serde(rename = "_internal", default)]
    pub internal: Internal,
    pub league: LeagueSchedule,
}

/// `prod/v1/{gamedate}/{gameid}_boxscore.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxScoreDocument {
    #[serde(rename = "_internal", default)]
    pub internal: Internal,
    #[serde(rename = "basicGameData")]
    pub game: ScheduledGame,
    #[serde(rename = "previousMatchup", default)]
    pub previous_matchup: Option<GamePointer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internal {
    #[serde(default)]
    pub pub_date_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueSchedule {
    #[serde(rename = "standard", default)]
    pub games: Vec<ScheduledGame>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GamePointer {
    #[serde(rename = "gameId")]
    pub game_id: String,
    #[serde(rename = "gameDate", default)]
    pub start_date_eastern: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    pub game_id: String,
    #[serde(default)]
    pub season_stage_id: i64,
    #[serde(default)]
    pub season_year: FlexInt,
    #[serde(default)]
    pub arena: Option<Arena>,
    #[serde(default)]
    pub is_game_activated: bool,
    #[serde(default)]
    pub game_url_code: String,
    #[serde(default)]
    pub status_num: i64,
    #[serde(rename = "extendedStatusNum", default)]
    pub ext_status_num: i64,
    #[serde(rename = "isStartTimeTBD", default)]
    pub is_start_time_tbd: bool,
    #[serde(rename = "startTimeUTC")]
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub start_date_eastern: String,
    #[serde(default)]
    pub start_time_eastern: String,
    #[serde(default)]
    pub is_buzzer_beater: bool,
    #[serde(default)]
    pub period: GamePeriod,
    #[serde(default)]
    pub attendance: String,
    #[serde(default)]
    pub game_duration: Option<GameDuration>,
    #[serde(rename = "hTeam")]
    pub home_team: GameTeam,
    #[serde(rename = "vTeam")]
    pub visiting_team: GameTeam,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GameDuration {
    #[serde(default)]
    pub hours: FlexInt,
    #[serde(default)]
    pub minutes: FlexInt,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePeriod {
    #[serde(default)]
    pub current: i64,
    #[serde(rename = "type", default)]
    pub period_type: i64,
    #[serde(default)]
    pub max_regular: i64,
    #[serde(default)]
    pub is_halftime: bool,
    #[serde(default)]
    pub is_end_of_period: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTeam {
    pub team_id: String,
    #[serde(default)]
    pub tri_code: String,
    #[serde(default)]
    pub score: FlexInt,
    #[serde(default)]
    pub win: FlexInt,
    #[serde(default)]
    pub loss: FlexInt,
    #[serde(default)]
    pub series_win: FlexInt,
    #[serde(default)]
    pub series_loss: FlexInt,
    #[serde(default)]
    pub linescore: Vec<PeriodScore>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PeriodScore {
    pub score: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arena {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_domestic: bool,
    #[serde(default)]
    pub city: String,
    #[serde(rename = "stateAbbr", default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
}
