use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::error::LoadError;

/// Dataset every table is loaded into.
pub const DATASET: &str = "boxscores";

/// Box score table for a league, e.g. `boxscoresNBA`.
pub fn table_name(league: &str) -> String {
    format!("{DATASET}{league}")
}

/// One compact JSON record per line, each line newline-terminated.
pub fn to_ndjson<T: Serialize>(records: &[T]) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.push(b'\n');
    }
    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteDisposition {
    Truncate,
    Append,
}

/// Stages NDJSON and loads it into a warehouse table.
pub trait BulkLoader: Send + Sync {
    fn write(&self, bytes: &[u8], destination: &str) -> Result<(), LoadError>;
    fn load_table(&self, source: &str, table: &str, disposition: WriteDisposition) -> Result<(), LoadError>;
}

/// Loader that talks to an HTTP staging endpoint.
#[derive(Debug, Clone)]
pub struct HttpLoader {
    endpoint: String,
    agent: ureq::Agent,
}

#[derive(Debug, Serialize)]
struct LoadJob<'a> {
    source: &'a str,
    table: &'a str,
    disposition: WriteDisposition,
}

impl HttpLoader {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        HttpLoader {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            agent,
        }
    }
}

impl BulkLoader for HttpLoader {
    fn write(&self, bytes: &[u8], destination: &str) -> Result<(), LoadError> {
        let target = format!("{}/{}", self.endpoint, destination.trim_start_matches('/'));
        match self
            .agent
            .put(&target)
            .header("Content-Type", "application/x-ndjson")
            .send(bytes)
        {
            Ok(resp) => {
                info!(status = resp.status().as_u16(), bytes = bytes.len(), target = %target, "staged records");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, target = %target, "failed to stage records");
                Err(LoadError::Transport { target, source: e })
            }
        }
    }

    fn load_table(&self, source: &str, table: &str, disposition: WriteDisposition) -> Result<(), LoadError> {
        let target = format!("{}/load", self.endpoint);
        let job = LoadJob {
            source,
            table,
            disposition,
        };
        match self.agent.post(&target).send_json(&job) {
            Ok(resp) => {
                info!(status = resp.status().as_u16(), table, ?disposition, "load job accepted");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, table, "load job failed");
                Err(LoadError::Transport { target, source: e })
            }
        }
    }
}

/// Serialize `records`, stage them at `destination` and load them into `table`.
/// Returns how many records were loaded.
#[instrument(level = "info", skip(loader, records), fields(records = records.len()))]
pub fn persist<T: Serialize>(
    loader: &dyn BulkLoader,
    records: &[T],
    destination: &str,
    table: &str,
    disposition: WriteDisposition,
) -> Result<usize, LoadError> {
    let bytes = to_ndjson(records)?;
    loader.write(&bytes, destination)?;
    loader.load_table(destination, table, disposition)?;
    Ok(records.len())
}
