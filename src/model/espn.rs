//! ESPN site API documents: `.../{league}/scoreboard` and `.../{league}/teams`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::flex::{FlexFloat, FlexInt};

/// Parse an ESPN timestamp. ESPN drops the seconds (`2019-09-28T07:00Z`).
pub fn parse_espn_time(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ")
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
}

fn espn_time<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(raw) => parse_espn_time(raw).map(Some).map_err(de::Error::custom),
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBoard {
    #[serde(default)]
    pub leagues: Vec<League>,
    #[serde(default)]
    pub season: SeasonShort,
    #[serde(default)]
    pub day: Option<Day>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Day {
    pub date: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SeasonShort {
    #[serde(default)]
    pub year: i64,
    #[serde(rename = "type", default)]
    pub season_type: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct League {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub season: Option<SeasonDef>,
    #[serde(default)]
    pub calendar_type: String,
    #[serde(default)]
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonDef {
    #[serde(default)]
    pub year: i64,
    #[serde(default, deserialize_with = "espn_time")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "espn_time")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(rename = "type", default)]
    pub season_type: Option<SeasonType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeasonType {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub season_type: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "extract_time", default)]
    pub extracted: Option<DateTime<Utc>>,
    #[serde(rename = "extract_src", default)]
    pub extracted_src: String,
    pub id: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default, deserialize_with = "espn_time")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub season: SeasonShort,
    #[serde(default)]
    pub competitions: Vec<Competition>,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub status: GameStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    #[serde(default)]
    pub clock: f32,
    #[serde(default)]
    pub display_clock: String,
    #[serde(default)]
    pub period: i64,
    #[serde(rename = "type", default)]
    pub status_type: GameStatusType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatusType {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub short_detail: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default, deserialize_with = "espn_time")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub attendance: FlexInt,
    #[serde(default)]
    pub time_valid: bool,
    #[serde(default)]
    pub neutral_site: bool,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub competitors: Vec<Competitor>,
    #[serde(default)]
    pub broadcasts: Vec<Broadcast>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Broadcast {
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub address: Option<Address>,
    #[serde(default)]
    pub capacity: FlexInt,
    #[serde(rename = "indoor", default)]
    pub is_indoor: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub uid: String,
    #[serde(rename = "type", default)]
    pub competitor_type: String,
    #[serde(default)]
    pub order: i64,
    /// `"home"` or `"away"`.
    #[serde(default)]
    pub home_away: String,
    #[serde(default)]
    pub winner: bool,
    pub team: Team,
    #[serde(default)]
    pub score: FlexInt,
    #[serde(default)]
    pub linescores: Vec<Linescore>,
    #[serde(default)]
    pub statistics: Vec<Statistic>,
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub leaders: Vec<StatLeader>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Linescore {
    pub value: FlexFloat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistic {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub display_value: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
    /// `"W-L"`, e.g. `"7-27"`.
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub short_display_name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub alternate_color: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_all_star: bool,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub logos: Vec<Link>,
    /// Single logo URL used by the scoreboard instead of `logos`.
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub record: Option<TeamRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamRecord {
    #[serde(default)]
    pub items: Vec<RecordItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordItem {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub stats: Vec<TeamStatistic>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamStatistic {
    pub name: String,
    pub value: FlexFloat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub rel: Vec<String>,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub alt: String,
    /// Set on logo links; replaces `href`.
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub is_external: bool,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatLeader {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub abbreviation: String,
    #[serde(default)]
    pub leaders: Vec<AthleteLeader>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteLeader {
    #[serde(default)]
    pub display_value: String,
    #[serde(default)]
    pub value: FlexFloat,
    pub athlete: Athlete,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    pub id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub jersey: String,
    #[serde(default)]
    pub headshot: String,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub team: Option<TeamRef>,
    #[serde(default)]
    pub active: bool,
}

/// Team reference on an athlete; only the id is reliable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: String,
}

/// `.../{league}/teams`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamSport {
    #[serde(rename = "sports", default)]
    pub sports: Vec<Sport>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sport {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub leagues: Vec<League>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamEntry {
    pub team: Team,
}
