use thiserror::Error;

/// Malformed or unexpectedly-typed JSON coming back from an upstream source.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stat group `{group}` is not an object holding a rows array")]
    MalformedStatGroup { group: String },
    #[error("row {index} of stat group `{group}` is not an object")]
    MalformedStatRow { group: String, index: usize },
}

#[derive(Debug, Error)]
pub enum MasteringError {
    #[error("mastering is not supported for {0} entities")]
    UnsupportedEntity(&'static str),
    #[error("{entity} is missing its {reference}")]
    MissingReference {
        entity: &'static str,
        reference: &'static str,
    },
    #[error("no geocoder configured")]
    NoGeocoder,
    #[error("geocoder match for `{address}` carries no plus code")]
    NoPlusCode { address: String },
    #[error("geocoder returned {count} matches for `{address}`, expected exactly one")]
    AmbiguousGeocode { address: String, count: usize },
    #[error("geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),
}

/// Failure translating one source item into the mastered schema.
#[derive(Debug, Error)]
pub enum MappingError {
    #[error("scoreboard lists no league")]
    NoLeague,
    #[error("event {event_id} has no competitions")]
    NoCompetition { event_id: String },
    #[error("event {event_id} has no {side} competitor")]
    MissingCompetitor { event_id: String, side: &'static str },
    #[error("event {event_id}: {side} competitor has no abbreviation")]
    MissingAbbreviation { event_id: String, side: &'static str },
    #[error("team {team_id} has no abbreviation")]
    TeamWithoutAbbreviation { team_id: String },
    #[error("document holds no game")]
    NoGame,
    #[error("game {game_id} has an unreadable start `{value}`")]
    InvalidStartTime { game_id: String, value: String },
    #[error("row {index} of {group} is missing {field}")]
    MissingField {
        group: String,
        index: usize,
        field: &'static str,
    },
    #[error("mastering failed: {0}")]
    Mastering(#[from] MasteringError),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("path `{0}` still holds unresolved placeholders")]
    UnresolvedPath(String),
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Transport(#[from] ureq::Error),
    #[error("unreadable geocoder response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("geocoder answered `{status}`")]
    Status { status: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("upload to {target} failed: {source}")]
    Transport {
        target: String,
        #[source]
        source: ureq::Error,
    },
}

/// Fetch-then-decode failure from one of the source clients.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result of mapping a source collection: every item mapped before the first
/// failure, plus that failure if there was one.
#[derive(Debug)]
pub struct MappedBatch<T> {
    pub items: Vec<T>,
    pub error: Option<MappingError>,
}

impl<T> MappedBatch<T> {
    /// Map `source` item by item, stopping at the first error.
    pub fn collect<S, F>(source: impl IntoIterator<Item = S>, mut map: F) -> Self
    where
        F: FnMut(usize, S) -> Result<T, MappingError>,
    {
        let mut items = Vec::new();
        for (index, item) in source.into_iter().enumerate() {
            match map(index, item) {
                Ok(mapped) => items.push(mapped),
                Err(e) => {
                    tracing::error!(error = %e, index, mapped = items.len(), "mapping stopped early");
                    return MappedBatch { items, error: Some(e) };
                }
            }
        }
        MappedBatch { items, error: None }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Discard the partial prefix if mapping did not finish.
    pub fn into_result(self) -> Result<Vec<T>, MappingError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.items),
        }
    }
}
