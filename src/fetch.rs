use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span};

use crate::error::FetchError;

pub const NBA_DATA_BASE_URL: &str = "https://data.nba.net/";
pub const NBA_STATS_BASE_URL: &str = "https://stats.nba.com/";
pub const ESPN_BASE_URL: &str = "https://site.api.espn.com/";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach one upstream source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl SourceConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        SourceConfig {
            base_url: base_url.into(),
            user_agent: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn nba_data() -> Self {
        Self::new(NBA_DATA_BASE_URL)
    }

    pub fn nba_stats() -> Self {
        Self::new(NBA_STATS_BASE_URL)
    }

    pub fn espn() -> Self {
        Self::new(ESPN_BASE_URL)
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Absolute URL for a path relative to the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Fill `{name}` placeholders in a path template.
///
/// Names are matched lower-cased. Any placeholder left afterwards is an error.
pub fn path_with_params(template: &str, params: &HashMap<&str, String>) -> Result<String, FetchError> {
    let mut path = template.to_string();
    for (name, value) in params {
        let placeholder = format!("{{{}}}", name.to_lowercase());
        path = path.replacen(&placeholder, value, 1);
    }
    if path.contains('{') {
        return Err(FetchError::UnresolvedPath(path));
    }
    Ok(path)
}

/// Blocking HTTP GET client for one source.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    config: SourceConfig,
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(config: SourceConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .into();
        HttpFetcher { config, agent }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// GET `path` under the base URL and return the body text.
    pub fn fetch(&self, path: &str, headers: &[(&str, &str)]) -> Result<String, FetchError> {
        let url = self.config.url_for(path);
        let _span = info_span!("source_fetch", url = %url).entered();

        let mut request = self.agent.get(&url);
        if let Some(agent) = &self.config.user_agent {
            request = request.header("User-Agent", agent.as_str());
        }
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let body = request
            .call()
            .and_then(|response| response.into_body().read_to_string());
        match body {
            Ok(body) => {
                info!(bytes = body.len(), "fetched source document");
                Ok(body)
            }
            Err(ureq::Error::StatusCode(status)) => {
                error!(status, url = %url, "source answered with non-success status");
                Err(FetchError::Status { url, status })
            }
            Err(e) => {
                error!(error = %e, url = %url, "request failed");
                Err(FetchError::Transport { url, source: e })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_for_joins_without_double_slash() {
        let config = SourceConfig::nba_data();
        assert_eq!(
            config.url_for("/prod/v2/2019/schedule.json"),
            "https://data.nba.net/prod/v2/2019/schedule.json"
        );
    }
}
