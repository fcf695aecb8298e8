use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::eastern::{eastern_date_time, utc_from_eastern};
use crate::error::{DecodeError, MappedBatch, MappingError, SourceError};
use crate::fetch::{HttpFetcher, SourceConfig, path_with_params};
use crate::mastered::{
    self, Address, Competitor, EntityId, GameDetail, GamePeriod, MasterContext, Masterable,
    Player, PlayerAssignment, Position, Record, Score, Season, Team, TeamSeasonRoster, Venue,
};
use crate::model::nba_cms::{self, SportsEvent, WorkingTeam};
use crate::model::nba_prod::{self, Arena, BoxScoreDocument, GameTeam, ScheduleDocument, ScheduledGame};
use crate::model::nba_stats::{StatsRow, StatsTln};

pub const LEAGUE: &str = "NBA";

pub const SCHEDULE_PATH: &str = "prod/v2/{year}/schedule.json";
pub const BOXSCORE_PATH: &str = "prod/v1/{gamedate}/{gameid}_boxscore.json";
pub const CMS_BOXSCORE_PATH: &str = "json/cms/noseason/game/{gamedate}/{gameid}/boxscore.json";
pub const PLAYER_MOVEMENT_PATH: &str = "js/data/playermovement/NBA_Player_Movement.json";

/// stats.nba.com rejects requests that do not look like they come from nba.com.
const STATS_HEADERS: [(&str, &str); 2] = [("Referer", "https://www.nba.com/"), ("Accept", "application/json")];

/// Client for data.nba.net schedule and box score documents.
#[derive(Debug, Clone)]
pub struct NbaData {
    fetcher: HttpFetcher,
}

impl NbaData {
    pub fn new(config: SourceConfig) -> Self {
        NbaData {
            fetcher: HttpFetcher::new(config),
        }
    }

    #[instrument(level = "info", skip(self))]
    pub fn schedule(&self, year: i64) -> Result<ScheduleDocument, SourceError> {
        let path = path_with_params(SCHEDULE_PATH, &HashMap::from([("year", year.to_string())]))?;
        let body = self.fetcher.fetch(&path, &[])?;
        let doc = decode_schedule(&body)?;
        info!(games = doc.league.games.len(), "decoded NBA schedule");
        Ok(doc)
    }

    /// `game_date` is the Eastern date as `YYYYMMDD`.
    #[instrument(level = "info", skip(self))]
    pub fn boxscore(&self, game_date: &str, game_id: &str) -> Result<BoxScoreDocument, SourceError> {
        let path = path_with_params(BOXSCORE_PATH, &game_params(game_date, game_id))?;
        let body = self.fetcher.fetch(&path, &[])?;
        Ok(decode_boxscore(&body)?)
    }

    #[instrument(level = "info", skip(self))]
    pub fn cms_boxscore(&self, game_date: &str, game_id: &str) -> Result<SportsEvent, SourceError> {
        let path = path_with_params(CMS_BOXSCORE_PATH, &game_params(game_date, game_id))?;
        let body = self.fetcher.fetch(&path, &[])?;
        Ok(decode_cms(&body)?)
    }
}

fn game_params(game_date: &str, game_id: &str) -> HashMap<&'static str, String> {
    HashMap::from([
        ("gamedate", game_date.to_string()),
        ("gameid", game_id.to_string()),
    ])
}

/// Client for stats.nba.com `js/data` documents.
#[derive(Debug, Clone)]
pub struct NbaStats {
    fetcher: HttpFetcher,
}

impl NbaStats {
    pub fn new(config: SourceConfig) -> Self {
        NbaStats {
            fetcher: HttpFetcher::new(config),
        }
    }

    #[instrument(level = "info", skip(self))]
    pub fn player_movement(&self) -> Result<StatsTln, SourceError> {
        let body = self.fetcher.fetch(PLAYER_MOVEMENT_PATH, &STATS_HEADERS)?;
        let tln = decode_stats(&body)?;
        info!(group = %tln.stat_group_name, rows = tln.stat_group.len(), "decoded stat group");
        Ok(tln)
    }
}

#[instrument(level = "info", skip(body), fields(bytes = body.len()))]
pub fn decode_schedule(body: &str) -> Result<ScheduleDocument, DecodeError> {
    Ok(serde_json::from_str(body)?)
}

#[instrument(level = "info", skip(body), fields(bytes = body.len()))]
pub fn decode_boxscore(body: &str) -> Result<BoxScoreDocument, DecodeError> {
    Ok(serde_json::from_str(body)?)
}

#[instrument(level = "info", skip(body), fields(bytes = body.len()))]
pub fn decode_cms(body: &str) -> Result<SportsEvent, DecodeError> {
    Ok(serde_json::from_str(body)?)
}

#[instrument(level = "info", skip(body), fields(bytes = body.len()))]
pub fn decode_stats(body: &str) -> Result<StatsTln, DecodeError> {
    StatsTln::from_json(body)
}

/// Map every game of a season schedule, stopping at the first one that cannot be mapped.
pub fn map_schedule(doc: &ScheduleDocument, ctx: &MasterContext) -> MappedBatch<mastered::Event> {
    MappedBatch::collect(&doc.league.games, |_, game| map_game(game, ctx))
}

pub fn map_boxscore(doc: &BoxScoreDocument, ctx: &MasterContext) -> Result<mastered::Event, MappingError> {
    map_game(&doc.game, ctx)
}

/// Map one scheduled game and master it.
pub fn map_game(game: &ScheduledGame, ctx: &MasterContext) -> Result<mastered::Event, MappingError> {
    let home_team = map_game_team(&game.home_team, &game.game_id, "home")?;
    let visit_team = map_game_team(&game.visiting_team, &game.game_id, "visit")?;

    let mut venue = game.arena.as_ref().map(map_arena);
    if let Some(v) = venue.as_mut() {
        ctx.try_master_venue(v);
    }

    let mut event = mastered::Event {
        entity_id: EntityId::default(),
        game_id: game.game_id.clone(),
        league: LEAGUE.to_string(),
        season: Season {
            year: game.season_year.get(),
            stage: game.season_stage_id,
        },
        home_team,
        visit_team,
        venue,
        status: None,
        links: Vec::new(),
        game_detail: Some(map_game_detail(game)),
    };
    ctx.master(Masterable::Event(&mut event))?;
    Ok(event)
}

fn map_game_detail(game: &ScheduledGame) -> GameDetail {
    let (start_date_eastern, start_time_eastern) = eastern_date_time(game.start_time);

    // Attendance from this feed is checked but always reported as zero.
    if !game.attendance.is_empty() {
        if let Err(e) = game.attendance.parse::<i64>() {
            warn!(game = %game.game_id, attendance = %game.attendance, error = %e, "unreadable attendance");
        }
    }

    let nba_prod::GamePeriod {
        current,
        period_type,
        max_regular,
        is_halftime,
        is_end_of_period,
    } = game.period;

    GameDetail {
        start_time: Some(game.start_time),
        start_date_eastern,
        start_time_eastern,
        period: Some(GamePeriod {
            current,
            period_type,
            max_regular,
            is_halftime,
            is_end_of_period,
        }),
        attendance: 0,
        game_duration_minutes: game
            .game_duration
            .map(|d| d.hours.get().max(0) * 60 + d.minutes.get().max(0))
            .unwrap_or_default(),
    }
}

fn map_game_team(team: &GameTeam, game_id: &str, side: &'static str) -> Result<Competitor, MappingError> {
    if team.tri_code.is_empty() {
        return Err(MappingError::MissingAbbreviation {
            event_id: game_id.to_string(),
            side,
        });
    }
    Ok(Competitor {
        abbreviation: team.tri_code.clone(),
        team: Some(Team {
            nba_team_id: team.team_id.clone(),
            abbreviation: team.tri_code.clone(),
            ..Default::default()
        }),
        record: Record {
            win: team.win.get(),
            loss: team.loss.get(),
            items: Vec::new(),
        },
        score: team.score.get(),
        line_score: team
            .linescore
            .iter()
            .map(|p| Score {
                score: p.score.get() as f32,
            })
            .collect(),
        ..Default::default()
    })
}

fn map_arena(arena: &Arena) -> Venue {
    Venue {
        full_name: arena.name.clone(),
        address: Some(Address {
            city: arena.city.clone(),
            state: arena.state.clone(),
            country: arena.country.clone(),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Map a legacy cms box score. Its date and time are Eastern wall clock.
pub fn map_cms_boxscore(doc: &SportsEvent, ctx: &MasterContext) -> Result<mastered::Event, MappingError> {
    let game = doc.content.game.as_ref().ok_or(MappingError::NoGame)?;
    let start = utc_from_eastern(&game.date, &game.time).ok_or_else(|| MappingError::InvalidStartTime {
        game_id: game.game_id.clone(),
        value: format!("{} {}", game.date, game.time),
    })?;
    let (start_date_eastern, start_time_eastern) = eastern_date_time(start);

    let meta = &doc.content.meta.season_meta;
    let season = Season {
        year: meta.season_year.get(),
        stage: meta.season_stage.get(),
    };

    let home_team = map_working_team(&game.home, season, &game.game_id, "home")?;
    let visit_team = map_working_team(&game.visitor, season, &game.game_id, "visit")?;

    let mut venue = Venue {
        full_name: game.arena.clone(),
        address: Some(Address {
            city: game.city.clone(),
            state: game.state.clone(),
            country: game.country.clone(),
            ..Default::default()
        }),
        ..Default::default()
    };
    ctx.try_master_venue(&mut venue);

    let period_time = game.period_time.clone().unwrap_or_default();
    let mut event = mastered::Event {
        entity_id: EntityId::default(),
        game_id: game.game_id.clone(),
        league: LEAGUE.to_string(),
        season,
        home_team,
        visit_team,
        venue: Some(venue),
        status: Some(mastered::GameStatus {
            clock: 0.0,
            period: period_time.period_value.get(),
            state: period_time.period_status.clone(),
            detail: period_time.game_clock.clone(),
        }),
        links: Vec::new(),
        game_detail: Some(GameDetail {
            start_time: Some(start),
            start_date_eastern,
            start_time_eastern,
            period: Some(GamePeriod {
                current: period_time.period_value.get(),
                max_regular: period_time.total_periods.get(),
                ..Default::default()
            }),
            attendance: game.attendance.get(),
            game_duration_minutes: 0,
        }),
    };
    ctx.master(Masterable::Event(&mut event))?;
    Ok(event)
}

fn map_working_team(
    team: &WorkingTeam,
    season: Season,
    game_id: &str,
    side: &'static str,
) -> Result<Competitor, MappingError> {
    let abbreviation = if team.abbreviation.is_empty() {
        team.team_key.clone()
    } else {
        team.abbreviation.clone()
    };
    if abbreviation.is_empty() {
        return Err(MappingError::MissingAbbreviation {
            event_id: game_id.to_string(),
            side,
        });
    }

    let roster: Vec<Player> = team.players.players.iter().map(map_person).collect();
    let rosters = if roster.is_empty() {
        Vec::new()
    } else {
        vec![TeamSeasonRoster { season, roster }]
    };

    Ok(Competitor {
        name: team.nickname.clone(),
        abbreviation: abbreviation.clone(),
        team: Some(Team {
            nba_team_id: team.team_id.clone(),
            abbreviation,
            name: team.nickname.clone(),
            location: team.city.clone(),
            rosters,
            ..Default::default()
        }),
        score: team.score.get(),
        line_score: team
            .linescores
            .period
            .iter()
            .map(|p| Score {
                score: p.score.get() as f32,
            })
            .collect(),
        location: team.city.clone(),
        ..Default::default()
    })
}

fn map_person(person: &nba_cms::Person) -> Player {
    let full_name = format!("{} {}", person.first_name, person.last_name)
        .trim()
        .to_string();
    let position = (!person.position_full.is_empty() || !person.position_short.is_empty()).then(|| Position {
        name: person.position_full.clone(),
        abbreviation: person.position_short.clone(),
    });
    Player {
        id_nba: person.person_id.clone(),
        display_name: full_name.clone(),
        full_name,
        jersey: person.jersey_number.clone(),
        position,
        active: true,
        ..Default::default()
    }
}

/// Map player movement rows to players with a single assignment each.
pub fn map_player_movement(tln: &StatsTln) -> MappedBatch<Player> {
    MappedBatch::collect(&tln.stat_group, |index, row| {
        map_transaction(row).ok_or_else(|| MappingError::MissingField {
            group: tln.stat_group_name.clone(),
            index,
            field: "PLAYER_ID",
        })
    })
}

fn map_transaction(row: &StatsRow) -> Option<Player> {
    let player_id = id_field(row, "PLAYER_ID")?;
    let team = id_field(row, "TEAM_ID").map(|id| Team {
        nba_team_id: id,
        ..Default::default()
    });
    let date = row
        .get("TRANSACTION_DATE")
        .and_then(Value::as_str)
        .and_then(transaction_date);
    let waived = row
        .get("Transaction_Type")
        .and_then(Value::as_str)
        .is_some_and(|t| t.eq_ignore_ascii_case("waive"));

    let assignment = PlayerAssignment {
        league: LEAGUE.to_string(),
        start: if waived { None } else { date },
        end: if waived { date } else { None },
        team: team.clone(),
        ..Default::default()
    };
    Some(Player {
        id_nba: player_id,
        team: if waived { None } else { team },
        history: vec![assignment],
        ..Default::default()
    })
}

/// Stats ids arrive as floats (`1629598.0`) or strings.
fn id_field(row: &StatsRow, name: &str) -> Option<String> {
    match row.get(name)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .map(|id| id.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn transaction_date(raw: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
}
