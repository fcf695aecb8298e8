//! The mastered schema every source is translated into.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod master;

pub use master::{MasterContext, Masterable, Mastered};

/// Identity shared by every masterable entity. `id` stays empty until mastering assigns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityId {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "extract_time", default, skip_serializing_if = "Option::is_none")]
    pub extracted: Option<DateTime<Utc>>,
    #[serde(rename = "extract_src", default, skip_serializing_if = "String::is_empty")]
    pub extracted_src: String,
}

impl EntityId {
    pub fn extracted_from(src: impl Into<String>, at: DateTime<Utc>) -> Self {
        EntityId {
            id: String::new(),
            extracted: Some(at),
            extracted_src: src.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    #[serde(rename = "seasonYear", default)]
    pub year: i64,
    #[serde(rename = "seasonStageId", default)]
    pub stage: i64,
}

/// One game. Key: `<StartDateEastern>:<VisitorAbbreviation>:<HomeAbbreviation>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(flatten)]
    pub entity_id: EntityId,
    #[serde(rename = "gameId")]
    pub game_id: String,
    pub league: String,
    pub season: Season,
    #[serde(rename = "homeTeam")]
    pub home_team: Competitor,
    #[serde(rename = "visitTeam")]
    pub visit_team: Competitor,
    #[serde(rename = "location", default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GameStatus>,
    #[serde(rename = "link", default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(rename = "gameDetail", default, skip_serializing_if = "Option::is_none")]
    pub game_detail: Option<GameDetail>,
}

/// A team's participation in one event. Key: `<Abbreviation>:<event key>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    #[serde(flatten)]
    pub entity_id: EntityId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub abbreviation: String,
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(default)]
    pub record: Record,
    #[serde(default)]
    pub score: i64,
    #[serde(rename = "linescore", default, skip_serializing_if = "Vec::is_empty")]
    pub line_score: Vec<Score>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub alternate_color: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_all_star: bool,
    #[serde(rename = "logos", default)]
    pub links: Vec<Link>,
}

/// Points scored in one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub score: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub win: i64,
    pub loss: i64,
    #[serde(default)]
    pub items: Vec<RecordItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordItem {
    pub summary: String,
    #[serde(default)]
    pub stats: Vec<RecordStat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordStat {
    pub name: String,
    pub value: f64,
}

/// A physical arena. Key: plus-code of its geocoded address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(flatten)]
    pub entity_id: EntityId,
    #[serde(default)]
    pub local_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default)]
    pub capacity: i64,
    #[serde(rename = "indoor", default)]
    pub is_indoor: bool,
}

impl Venue {
    /// Single-line address handed to the geocoder.
    pub fn formatted_address(&self) -> String {
        let empty = Address::default();
        let a = self.address.as_ref().unwrap_or(&empty);
        format!(
            "{},{}, {}, {}, {}",
            self.full_name, a.street, a.city, a.state, a.country
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub street: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub country: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub geoloc: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStatus {
    pub clock: f32,
    pub period: i64,
    #[serde(rename = "description", default, skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub href: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rel: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alt: String,
    #[serde(rename = "dimensions", default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<LinkDimensions>,
    #[serde(default)]
    pub is_logo: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDimensions {
    pub width: i64,
    pub height: i64,
}

/// Start time, attendance and duration of a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetail {
    #[serde(rename = "startTimeUTC", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub start_date_eastern: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub start_time_eastern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<GamePeriod>,
    #[serde(default)]
    pub attendance: i64,
    #[serde(rename = "gameDuration", default)]
    pub game_duration_minutes: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePeriod {
    pub current: i64,
    #[serde(rename = "type")]
    pub period_type: i64,
    pub max_regular: i64,
    pub is_halftime: bool,
    pub is_end_of_period: bool,
}

/// A franchise. Key is season scoped: `<Abbreviation>:<SeasonYear>:<SeasonStage>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    #[serde(flatten)]
    pub entity_id: EntityId,
    #[serde(rename = "teamIdNBA", default, skip_serializing_if = "String::is_empty")]
    pub nba_team_id: String,
    #[serde(rename = "teamIdESPN", default, skip_serializing_if = "String::is_empty")]
    pub espn_team_id: String,
    pub abbreviation: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logos: Vec<Link>,
    #[serde(default)]
    pub records: Vec<TeamSeasonRecords>,
    #[serde(default)]
    pub rosters: Vec<TeamSeasonRoster>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonRecords {
    pub season: Season,
    #[serde(rename = "teamStat", default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    pub key: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonRoster {
    pub season: Season,
    pub roster: Vec<Player>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    #[serde(flatten)]
    pub entity_id: EntityId,
    #[serde(rename = "idESPN", default, skip_serializing_if = "String::is_empty")]
    pub id_espn: String,
    #[serde(rename = "idNBA", default, skip_serializing_if = "String::is_empty")]
    pub id_nba: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_name: String,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub jersey: String,
    #[serde(default)]
    pub headshot: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default)]
    pub team: Option<Team>,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<PlayerAssignment>,
}

/// Something like C(enter) or P(oint) G(uard).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub name: String,
    pub abbreviation: String,
}

/// One stint of a player with a team or program. Order in a history is not guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAssignment {
    pub league: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<Team>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default)]
    pub injured: bool,
    #[serde(default)]
    pub simultaneous: bool,
}
