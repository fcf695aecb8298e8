use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info_span};

use crate::error::GeocodeError;

const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// One candidate location for an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeMatch {
    pub place_id: String,
    pub plus_code: String,
}

/// Resolves a postal address to candidate locations.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeMatch>, GeocodeError>;
}

/// Geocoder backed by the Google Geocoding API.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    api_key: String,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    place_id: String,
    #[serde(default)]
    plus_code: Option<PlusCode>,
}

#[derive(Debug, Deserialize)]
struct PlusCode {
    global_code: String,
}

impl GoogleGeocoder {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        GoogleGeocoder {
            api_key: api_key.into(),
            agent,
        }
    }

    /// Interpret a Geocoding API response body.
    pub fn parse_response(body: &str) -> Result<Vec<GeocodeMatch>, GeocodeError> {
        let response: GeocodeResponse = serde_json::from_str(body)?;
        match response.status.as_str() {
            "OK" => Ok(response
                .results
                .into_iter()
                .map(|r| GeocodeMatch {
                    place_id: r.place_id,
                    plus_code: r.plus_code.map(|p| p.global_code).unwrap_or_default(),
                })
                .collect()),
            "ZERO_RESULTS" => Ok(Vec::new()),
            _ => Err(GeocodeError::Status {
                status: response.status,
            }),
        }
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeMatch>, GeocodeError> {
        let body = {
            let _span = info_span!("geocode_fetch", address = %address).entered();
            self.agent
                .get(GOOGLE_GEOCODE_URL)
                .query("address", address)
                .query("key", &self.api_key)
                .call()
                .and_then(|response| response.into_body().read_to_string())
                .inspect_err(|e| error!(error = %e, "geocoding request failed"))?
        };
        Self::parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_response_yields_plus_codes() {
        let body = r#"{
            "status": "OK",
            "results": [
                {"place_id": "ChIJ-capital-one", "plus_code": {"global_code": "87C4VXXH+6M", "compound_code": "VXXH+6M Washington"}},
                {"place_id": "ChIJ-no-code"}
            ]
        }"#;
        let matches = GoogleGeocoder::parse_response(body).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].plus_code, "87C4VXXH+6M");
        assert!(matches[1].plus_code.is_empty());
    }

    #[test]
    fn zero_results_is_empty_and_denial_is_an_error() {
        assert!(GoogleGeocoder::parse_response(r#"{"status": "ZERO_RESULTS", "results": []}"#)
            .unwrap()
            .is_empty());

        let err = GoogleGeocoder::parse_response(r#"{"status": "REQUEST_DENIED"}"#).unwrap_err();
        assert!(matches!(err, GeocodeError::Status { ref status } if status == "REQUEST_DENIED"));
    }
}
