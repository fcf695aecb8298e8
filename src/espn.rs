use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::eastern::eastern_date_time;
use crate::error::{DecodeError, MappedBatch, MappingError, SourceError};
use crate::fetch::{HttpFetcher, SourceConfig, path_with_params};
use crate::mastered::{
    self, EntityId, GameDetail, Link, LinkDimensions, MasterContext, Masterable, Player,
    Position, Record, RecordItem, Score, Season, Stat, Team, TeamSeasonRecords,
    TeamSeasonRoster,
};
use crate::model::espn;

pub const SCOREBOARD_PATH: &str = "apis/site/v2/sports/basketball/{league}/scoreboard";
pub const TEAMS_PATH: &str = "apis/site/v2/sports/basketball/{league}/teams";

/// Client for the ESPN site API.
#[derive(Debug, Clone)]
pub struct Espn {
    fetcher: HttpFetcher,
}

impl Espn {
    pub fn new(config: SourceConfig) -> Self {
        Espn {
            fetcher: HttpFetcher::new(config),
        }
    }

    /// Fetch today's scoreboard for `league` (e.g. `nba`, `wnba`) and stamp extraction provenance.
    #[instrument(level = "info", skip(self))]
    pub fn scoreboard(&self, league: &str) -> Result<espn::ScoreBoard, SourceError> {
        let path = path_with_params(SCOREBOARD_PATH, &league_param(league))?;
        let body = self.fetcher.fetch(&path, &[])?;
        let mut board = decode_scoreboard(&body)?;

        let source = self.fetcher.config().url_for(&path);
        let now = Utc::now();
        for event in board.events.iter_mut().filter(|e| e.extracted.is_none()) {
            event.extracted = Some(now);
            event.extracted_src = source.clone();
        }
        info!(events = board.events.len(), "decoded ESPN scoreboard");
        Ok(board)
    }

    #[instrument(level = "info", skip(self))]
    pub fn teams(&self, league: &str) -> Result<espn::TeamSport, SourceError> {
        let path = path_with_params(TEAMS_PATH, &league_param(league))?;
        let body = self.fetcher.fetch(&path, &[])?;
        Ok(decode_teams(&body)?)
    }
}

fn league_param(league: &str) -> HashMap<&'static str, String> {
    HashMap::from([("league", league.to_lowercase())])
}

#[instrument(level = "info", skip(body), fields(bytes = body.len()))]
pub fn decode_scoreboard(body: &str) -> Result<espn::ScoreBoard, DecodeError> {
    Ok(serde_json::from_str(body)?)
}

#[instrument(level = "info", skip(body), fields(bytes = body.len()))]
pub fn decode_teams(body: &str) -> Result<espn::TeamSport, DecodeError> {
    Ok(serde_json::from_str(body)?)
}

/// Map every scoreboard event, stopping at the first one that cannot be mapped.
pub fn map_scoreboard(board: &espn::ScoreBoard, ctx: &MasterContext) -> MappedBatch<mastered::Event> {
    let Some(league) = board.leagues.first() else {
        return MappedBatch {
            items: Vec::new(),
            error: Some(MappingError::NoLeague),
        };
    };
    MappedBatch::collect(&board.events, |_, event| map_event(event, league, ctx))
}

/// Map one ESPN event and master it.
pub fn map_event(
    event: &espn::Event,
    league: &espn::League,
    ctx: &MasterContext,
) -> Result<mastered::Event, MappingError> {
    let competition = event
        .competitions
        .first()
        .ok_or_else(|| MappingError::NoCompetition {
            event_id: event.id.clone(),
        })?;
    if event.competitions.len() > 1 {
        warn!(event = %event.id, competitions = event.competitions.len(), "expected a single competition");
    }

    let season = Season {
        year: event.season.year,
        stage: event.season.season_type,
    };

    let mut home = None;
    let mut visit = None;
    for competitor in &competition.competitors {
        match competitor.home_away.as_str() {
            "home" => home = Some(map_competitor(competitor, season)),
            "away" => visit = Some(map_competitor(competitor, season)),
            other => warn!(event = %event.id, home_away = %other, "competitor is neither home nor away"),
        }
    }
    let home_team = require_side(home, &event.id, "home")?;
    let visit_team = require_side(visit, &event.id, "away")?;

    let mut venue = competition.venue.as_ref().map(map_venue);
    if let Some(v) = venue.as_mut() {
        ctx.try_master_venue(v);
    }

    let game_detail = event.date.map(|start| {
        let (start_date_eastern, start_time_eastern) = eastern_date_time(start);
        GameDetail {
            start_time: Some(start),
            start_date_eastern,
            start_time_eastern,
            attendance: competition.attendance.get(),
            ..Default::default()
        }
    });

    let mut mapped = mastered::Event {
        entity_id: event
            .extracted
            .map(|at| EntityId::extracted_from(event.extracted_src.clone(), at))
            .unwrap_or_default(),
        game_id: event.id.clone(),
        league: league.abbreviation.clone(),
        season,
        home_team,
        visit_team,
        venue,
        status: Some(mastered::GameStatus {
            clock: event.status.clock,
            period: event.status.period,
            state: event.status.status_type.state.clone(),
            detail: event.status.status_type.detail.clone(),
        }),
        links: event.links.iter().map(map_link).collect(),
        game_detail,
    };
    ctx.master(Masterable::Event(&mut mapped))?;
    Ok(mapped)
}

fn require_side(
    competitor: Option<mastered::Competitor>,
    event_id: &str,
    side: &'static str,
) -> Result<mastered::Competitor, MappingError> {
    let competitor = competitor.ok_or_else(|| MappingError::MissingCompetitor {
        event_id: event_id.to_string(),
        side,
    })?;
    if competitor.abbreviation.is_empty() {
        return Err(MappingError::MissingAbbreviation {
            event_id: event_id.to_string(),
            side,
        });
    }
    Ok(competitor)
}

fn map_competitor(competitor: &espn::Competitor, season: Season) -> mastered::Competitor {
    let team = &competitor.team;
    let mut mapped_team = map_team(team, season);

    let mut roster: Vec<Player> = Vec::new();
    for leader in competitor.leaders.iter().flat_map(|l| &l.leaders) {
        if roster.iter().all(|p| p.id_espn != leader.athlete.id) {
            roster.push(map_athlete(&leader.athlete));
        }
    }
    if !roster.is_empty() {
        mapped_team.rosters.push(TeamSeasonRoster { season, roster });
    }

    let mut links: Vec<Link> = team.links.iter().map(map_link).collect();
    if !team.logo.is_empty() {
        links.push(logo_link(&team.logo));
    }

    mastered::Competitor {
        entity_id: EntityId::default(),
        name: team.name.clone(),
        abbreviation: team.abbreviation.clone(),
        team: Some(mapped_team),
        record: map_record(&competitor.records),
        score: competitor.score.get(),
        line_score: competitor
            .linescores
            .iter()
            .map(|l| Score {
                score: l.value.get() as f32,
            })
            .collect(),
        location: team.location.clone(),
        color: team.color.clone(),
        alternate_color: team.alternate_color.clone(),
        is_active: team.is_active,
        is_all_star: team.is_all_star,
        links,
    }
}

/// Win/loss from the first `W-L` summary; every summary is kept as an item.
fn map_record(records: &[espn::Record]) -> Record {
    let (win, loss) = records
        .iter()
        .find_map(|r| win_loss(&r.summary))
        .unwrap_or_default();
    Record {
        win,
        loss,
        items: records
            .iter()
            .map(|r| RecordItem {
                summary: r.summary.clone(),
                stats: Vec::new(),
            })
            .collect(),
    }
}

fn win_loss(summary: &str) -> Option<(i64, i64)> {
    let (win, loss) = summary.split_once('-')?;
    Some((win.trim().parse().ok()?, loss.trim().parse().ok()?))
}

fn map_venue(venue: &espn::Venue) -> mastered::Venue {
    mastered::Venue {
        entity_id: EntityId::default(),
        local_id: venue.id.clone(),
        full_name: venue.full_name.clone(),
        address: venue.address.as_ref().map(|a| mastered::Address {
            city: a.city.clone(),
            state: a.state.clone(),
            ..Default::default()
        }),
        capacity: venue.capacity.get(),
        is_indoor: venue.is_indoor,
    }
}

/// A logo link points at the image itself.
pub fn map_link(link: &espn::Link) -> Link {
    let (href, is_logo) = if link.logo.is_empty() {
        (link.href.clone(), false)
    } else {
        (link.logo.clone(), true)
    };
    let alt = if link.text.is_empty() {
        link.alt.clone()
    } else {
        link.text.clone()
    };
    Link {
        href,
        rel: link.rel.clone(),
        alt,
        dimension: (link.width > 0 || link.height > 0).then_some(LinkDimensions {
            width: link.width,
            height: link.height,
        }),
        is_logo,
    }
}

fn logo_link(href: &str) -> Link {
    Link {
        href: href.to_string(),
        rel: vec!["logo".to_string()],
        is_logo: true,
        ..Default::default()
    }
}

/// ESPN team to mastered team, with its record items as season stats.
pub fn map_team(team: &espn::Team, season: Season) -> Team {
    let mut logos: Vec<Link> = team.logos.iter().map(map_link).collect();
    for logo in &mut logos {
        logo.is_logo = true;
    }
    if !team.logo.is_empty() && logos.iter().all(|l| l.href != team.logo) {
        logos.push(logo_link(&team.logo));
    }

    let records = team
        .record
        .iter()
        .map(|record| TeamSeasonRecords {
            season,
            stats: record
                .items
                .iter()
                .flat_map(|item| {
                    let summary = Stat {
                        key: "summary".to_string(),
                        value: serde_json::Value::from(item.summary.clone()),
                    };
                    std::iter::once(summary).chain(item.stats.iter().map(|s| Stat {
                        key: s.name.clone(),
                        value: serde_json::Value::from(s.value.get()),
                    }))
                })
                .collect(),
        })
        .collect();

    Team {
        entity_id: EntityId::default(),
        nba_team_id: String::new(),
        espn_team_id: team.id.clone(),
        abbreviation: team.abbreviation.clone(),
        name: if team.display_name.is_empty() {
            team.name.clone()
        } else {
            team.display_name.clone()
        },
        location: team.location.clone(),
        logos,
        records,
        rosters: Vec::new(),
    }
}

/// Map and master every team in a teams document.
pub fn map_teams(doc: &espn::TeamSport, ctx: &MasterContext) -> MappedBatch<Team> {
    let entries = doc.sports.iter().flat_map(|sport| &sport.leagues).flat_map(|league| {
        let season = league
            .season
            .as_ref()
            .map(|s| Season {
                year: s.year,
                stage: s.season_type.as_ref().map(|t| t.season_type).unwrap_or_default(),
            })
            .unwrap_or_default();
        league.teams.iter().map(move |entry| (&entry.team, season))
    });
    MappedBatch::collect(entries, |_, (team, season)| {
        if team.abbreviation.is_empty() {
            return Err(MappingError::TeamWithoutAbbreviation {
                team_id: team.id.clone(),
            });
        }
        let mut mapped = map_team(team, season);
        ctx.master(Masterable::Team {
            team: &mut mapped,
            season,
        })?;
        Ok(mapped)
    })
}

pub fn map_athlete(athlete: &espn::Athlete) -> Player {
    Player {
        entity_id: EntityId::default(),
        id_espn: athlete.id.clone(),
        id_nba: String::new(),
        full_name: athlete.full_name.clone(),
        display_name: athlete.display_name.clone(),
        short_name: athlete.short_name.clone(),
        links: athlete.links.iter().map(map_link).collect(),
        jersey: athlete.jersey.clone(),
        headshot: (!athlete.headshot.is_empty()).then(|| Link {
            href: athlete.headshot.clone(),
            rel: vec!["headshot".to_string()],
            alt: athlete.display_name.clone(),
            ..Default::default()
        }),
        position: athlete.position.as_ref().map(|p| Position {
            name: p.name.clone(),
            abbreviation: p.abbreviation.clone(),
        }),
        team: athlete.team.as_ref().map(|t| Team {
            espn_team_id: t.id.clone(),
            ..Default::default()
        }),
        active: athlete.active,
        history: Vec::new(),
    }
}
