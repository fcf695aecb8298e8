use std::time::Duration;

use chrono::{Datelike, Utc};
use chrono_tz::America::New_York;
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

use crate::error::MappedBatch;
use crate::espn::{self, Espn};
use crate::fetch::SourceConfig;
use crate::geocode::{Geocoder, GoogleGeocoder};
use crate::loader::{BulkLoader, DATASET, HttpLoader, WriteDisposition, persist, table_name};
use crate::mastered::MasterContext;
use crate::nba::{self, NbaData, NbaStats};

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Test,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    Scoreboard,
    Schedule,
    Boxscore,
    Teams,
    PlayerMovement,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub mode: Mode,
    pub loader_url: String,
    pub test_loader_url: String,
    #[serde(default = "default_league")]
    pub league: String,
    #[serde(default)]
    pub season_year: Option<i64>,
    /// Eastern game date, `YYYYMMDD`.
    #[serde(default)]
    pub game_date: Option<String>,
    #[serde(default)]
    pub game_id: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub geocoder_api_key: Option<String>,
    #[serde(default)]
    pub workflows: Vec<Workflow>,
}

fn default_league() -> String {
    "nba".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

/// Everything one workflow task needs, owned so it can move into `spawn_blocking`.
#[derive(Debug, Clone)]
struct Job {
    league: String,
    season_year: Option<i64>,
    game_date: Option<String>,
    game_id: Option<String>,
    user_agent: Option<String>,
    geocoder_api_key: Option<String>,
    loader: HttpLoader,
}

impl Job {
    fn geocoder(&self) -> Option<GoogleGeocoder> {
        let geocoder = self
            .geocoder_api_key
            .as_ref()
            .map(|key| GoogleGeocoder::new(key.clone(), UPSTREAM_TIMEOUT));
        if geocoder.is_none() {
            warn!("no geocoder key supplied; venues will not be mastered");
        }
        geocoder
    }

    fn source(&self, config: SourceConfig) -> SourceConfig {
        config.with_user_agent(self.user_agent.clone())
    }

    /// Staging object name for one workflow run.
    fn destination(&self, workflow: &str) -> String {
        format!(
            "{}/{}/{}-{}.ndjson",
            DATASET,
            self.league.to_lowercase(),
            workflow,
            Utc::now().format("%Y%m%dT%H%M%S")
        )
    }
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let payload = event.payload;

    // Select destination based on request mode
    let loader_url = match payload.mode {
        Mode::Test => payload.test_loader_url.clone(),
        Mode::Production => payload.loader_url.clone(),
    };

    let workflows = if payload.workflows.is_empty() {
        vec![Workflow::Scoreboard]
    } else {
        payload.workflows.clone()
    };

    let job = Job {
        league: payload.league.clone(),
        season_year: payload.season_year,
        game_date: payload.game_date.clone(),
        game_id: payload.game_id.clone(),
        user_agent: payload.user_agent.clone(),
        geocoder_api_key: payload.geocoder_api_key.clone(),
        loader: HttpLoader::new(loader_url, UPSTREAM_TIMEOUT),
    };

    let mut handles: Vec<tokio::task::JoinHandle<String>> = Vec::new();
    for wf in workflows {
        // Each blocking task owns its inputs.
        let job = job.clone();
        let handle = tokio::task::spawn_blocking(move || match wf {
            Workflow::Scoreboard => run_scoreboard(&job),
            Workflow::Schedule => run_schedule(&job),
            Workflow::Boxscore => run_boxscore(&job),
            Workflow::Teams => run_teams(&job),
            Workflow::PlayerMovement => run_player_movement(&job),
        });
        handles.push(handle);
    }

    let mut summaries: Vec<String> = Vec::new();
    for h in handles {
        match h.await {
            Ok(summary) => summaries.push(summary),
            Err(e) => summaries.push(format!("Workflow task join error: {}", e)),
        }
    }

    let summary = if summaries.is_empty() {
        "No workflows executed".to_string()
    } else {
        summaries.join("; ")
    };

    Ok(Response { message: summary })
}

/// Persist whatever a batch managed to map and describe the outcome.
pub fn persist_batch<T: Serialize>(
    label: &str,
    batch: &MappedBatch<T>,
    loader: &dyn BulkLoader,
    destination: &str,
    table: &str,
    disposition: WriteDisposition,
) -> String {
    if batch.items.is_empty() {
        return match &batch.error {
            Some(e) => format!("{label}: nothing mapped ({e})"),
            None => format!("{label}: no records (skipped)"),
        };
    }
    let loaded = match persist(loader, &batch.items, destination, table, disposition) {
        Ok(n) => n,
        Err(e) => {
            error!(error = %e, label, "persist failed");
            return format!("{label} load failed: {e}");
        }
    };
    match &batch.error {
        Some(e) => format!("{label}: loaded {loaded} records into {table}, partial ({e})"),
        None => format!("{label}: loaded {loaded} records into {table}"),
    }
}

fn run_scoreboard(job: &Job) -> String {
    let client = Espn::new(job.source(SourceConfig::espn()));
    let board = match client.scoreboard(&job.league) {
        Ok(board) => board,
        Err(e) => {
            error!(error = %e, "scoreboard fetch failed");
            return format!("Scoreboard fetch failed: {e}");
        }
    };
    let geocoder = job.geocoder();
    let ctx = MasterContext::new(geocoder.as_ref().map(|g| g as &dyn Geocoder));
    let batch = espn::map_scoreboard(&board, &ctx);
    info!(events = batch.items.len(), complete = batch.is_complete(), "mapped scoreboard");
    let league = batch
        .items
        .first()
        .map(|e| e.league.clone())
        .unwrap_or_else(|| job.league.to_uppercase());
    persist_batch(
        "Scoreboard",
        &batch,
        &job.loader,
        &job.destination("scoreboard"),
        &table_name(&league),
        WriteDisposition::Append,
    )
}

fn run_schedule(job: &Job) -> String {
    let year = job.season_year.unwrap_or_else(current_season_year);
    let client = NbaData::new(job.source(SourceConfig::nba_data()));
    let doc = match client.schedule(year) {
        Ok(doc) => doc,
        Err(e) => {
            error!(error = %e, year, "schedule fetch failed");
            return format!("Schedule fetch failed: {e}");
        }
    };
    let geocoder = job.geocoder();
    let ctx = MasterContext::new(geocoder.as_ref().map(|g| g as &dyn Geocoder));
    let batch = nba::map_schedule(&doc, &ctx);
    persist_batch(
        "Schedule",
        &batch,
        &job.loader,
        &job.destination("schedule"),
        &table_name(nba::LEAGUE),
        WriteDisposition::Truncate,
    )
}

fn run_boxscore(job: &Job) -> String {
    let (Some(game_date), Some(game_id)) = (job.game_date.as_deref(), job.game_id.as_deref()) else {
        warn!("boxscore workflow needs game_date and game_id");
        return "Boxscore: game_date and game_id are required (skipped)".to_string();
    };
    let client = NbaData::new(job.source(SourceConfig::nba_data()));
    let geocoder = job.geocoder();
    let ctx = MasterContext::new(geocoder.as_ref().map(|g| g as &dyn Geocoder));

    // Older games are only published as cms documents.
    let mapped = match client.boxscore(game_date, game_id) {
        Ok(doc) => nba::map_boxscore(&doc, &ctx),
        Err(e) => {
            warn!(error = %e, game_id, "prod box score unavailable, trying cms");
            match client.cms_boxscore(game_date, game_id) {
                Ok(doc) => nba::map_cms_boxscore(&doc, &ctx),
                Err(e) => {
                    error!(error = %e, game_id, "box score fetch failed");
                    return format!("Boxscore fetch failed: {e}");
                }
            }
        }
    };
    let batch = match mapped {
        Ok(event) => MappedBatch {
            items: vec![event],
            error: None,
        },
        Err(e) => MappedBatch {
            items: Vec::new(),
            error: Some(e),
        },
    };
    persist_batch(
        "Boxscore",
        &batch,
        &job.loader,
        &job.destination("boxscore"),
        &table_name(nba::LEAGUE),
        WriteDisposition::Append,
    )
}

fn run_teams(job: &Job) -> String {
    let client = Espn::new(job.source(SourceConfig::espn()));
    let doc = match client.teams(&job.league) {
        Ok(doc) => doc,
        Err(e) => {
            error!(error = %e, "teams fetch failed");
            return format!("Teams fetch failed: {e}");
        }
    };
    let batch = espn::map_teams(&doc, &MasterContext::default());
    persist_batch(
        "Teams",
        &batch,
        &job.loader,
        &job.destination("teams"),
        &format!("teams{}", job.league.to_uppercase()),
        WriteDisposition::Truncate,
    )
}

fn run_player_movement(job: &Job) -> String {
    let client = NbaStats::new(job.source(SourceConfig::nba_stats()));
    let tln = match client.player_movement() {
        Ok(tln) => tln,
        Err(e) => {
            error!(error = %e, "player movement fetch failed");
            return format!("Player movement fetch failed: {e}");
        }
    };
    let batch = nba::map_player_movement(&tln);
    persist_batch(
        "Player movement",
        &batch,
        &job.loader,
        &job.destination("playermovement"),
        &format!("players{}", nba::LEAGUE),
        WriteDisposition::Truncate,
    )
}

/// NBA seasons are named after the year they start; a season starts in October (Eastern).
fn current_season_year() -> i64 {
    let today = Utc::now().with_timezone(&New_York).date_naive();
    let year = i64::from(today.year());
    if today.month() >= 10 { year } else { year - 1 }
}
