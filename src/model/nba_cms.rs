//! Legacy data.nba.net `json/cms` documents wrapped in `sports_content`.
//! Most numbers here arrive as strings in some seasons and as numbers in others.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::flex::FlexInt;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SportsEvent {
    #[serde(rename = "sports_content")]
    pub content: SportsContent,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SportsContent {
    #[serde(rename = "sports_meta", default)]
    pub meta: SportsMeta,
    #[serde(default)]
    pub game: Option<SportsGame>,
    #[serde(default)]
    pub schedule: Option<SportsSchedule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SportsMeta {
    #[serde(default)]
    pub date_time: String,
    #[serde(default)]
    pub season_meta: SeasonMeta,
    #[serde(default)]
    pub next: Option<CmsTarget>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CmsTarget {
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonMeta {
    pub calendar_date: FlexInt,
    pub season_year: FlexInt,
    pub stats_season_year: FlexInt,
    pub stats_season_id: FlexInt,
    pub stats_season_stage: FlexInt,
    pub roster_season_year: FlexInt,
    pub schedule_season_year: FlexInt,
    pub standings_season_year: FlexInt,
    pub season_id: FlexInt,
    pub display_year: String,
    pub display_season: String,
    pub season_stage: FlexInt,
    pub league_id: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SportsSchedule {
    #[serde(rename = "game", default)]
    pub games: Vec<ScheduledGame>,
}

/// Row of `league/nba_games.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduledGame {
    #[serde(rename = "h_abrv", default)]
    pub home_abbreviation: String,
    #[serde(rename = "v_abrv", default)]
    pub visitor_abbreviation: String,
    #[serde(rename = "id")]
    pub game_id: FlexInt,
    #[serde(rename = "dt", default)]
    pub date_time: String,
    #[serde(default)]
    pub is_lp: bool,
    #[serde(default)]
    pub sg: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SportsGame {
    #[serde(rename = "id")]
    pub game_id: String,
    #[serde(default)]
    pub game_url: String,
    #[serde(default)]
    pub season_id: String,
    /// Eastern date, `YYYYMMDD`.
    pub date: String,
    /// Eastern wall clock, `HHMM`.
    pub time: String,
    #[serde(default)]
    pub arena: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub attendance: FlexInt,
    #[serde(default)]
    pub officials: Vec<Person>,
    #[serde(default)]
    pub period_time: Option<TimePeriod>,
    pub visitor: WorkingTeam,
    pub home: WorkingTeam,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimePeriod {
    pub period_value: FlexInt,
    pub period_status: String,
    pub game_status: FlexInt,
    pub game_clock: String,
    pub total_periods: FlexInt,
    pub period_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkingTeam {
    #[serde(rename = "id")]
    pub team_id: String,
    #[serde(default)]
    pub team_key: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub url_name: String,
    #[serde(default)]
    pub score: FlexInt,
    #[serde(default)]
    pub linescores: Linescore,
    #[serde(default)]
    pub players: PlayerList,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Linescore {
    #[serde(default)]
    pub period: Vec<PeriodicScore>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodicScore {
    #[serde(default)]
    pub period_value: String,
    #[serde(default)]
    pub period_name: String,
    pub score: FlexInt,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerList {
    #[serde(rename = "player", default)]
    pub players: Vec<Person>,
}

/// Player or official as listed in a box score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    /// Kept as text so `"00"` and `"0"` stay distinct.
    #[serde(deserialize_with = "jersey_text")]
    pub jersey_number: String,
    pub person_id: String,
    pub position_short: String,
    pub position_full: String,
    pub minutes: FlexInt,
    pub seconds: FlexInt,
    pub points: FlexInt,
    pub starting_position: String,
}

/// Jerseys arrive as strings, as bare numbers in some seasons, or as null.
fn jersey_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format_args!("unexpected jersey number {other}"))),
    }
}
