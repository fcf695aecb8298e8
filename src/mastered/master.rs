use tracing::{info, instrument, warn};

use crate::error::MasteringError;
use crate::geocode::Geocoder;
use crate::mastered::{Competitor, Event, Player, Season, Team, Venue};

/// An entity about to receive its mastered key, with whatever the key is built from.
#[derive(Debug)]
pub enum Masterable<'a> {
    Event(&'a mut Event),
    Competitor {
        competitor: &'a mut Competitor,
        event_key: &'a str,
        season: Season,
    },
    Team {
        team: &'a mut Team,
        season: Season,
    },
    Venue(&'a mut Venue),
    Player(&'a mut Player),
}

impl Masterable<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Masterable::Event(_) => "event",
            Masterable::Competitor { .. } => "competitor",
            Masterable::Team { .. } => "team",
            Masterable::Venue(_) => "venue",
            Masterable::Player(_) => "player",
        }
    }
}

/// The key assigned to an entity, and any failures from entities it cascaded into.
#[derive(Debug)]
pub struct Mastered {
    pub key: String,
    pub cascade_errors: Vec<MasteringError>,
}

impl Mastered {
    fn leaf(key: String) -> Self {
        Mastered {
            key,
            cascade_errors: Vec::new(),
        }
    }
}

/// Collaborators needed while deriving keys.
#[derive(Clone, Copy, Default)]
pub struct MasterContext<'g> {
    geocoder: Option<&'g dyn Geocoder>,
}

impl std::fmt::Debug for MasterContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterContext")
            .field("geocoder", &self.geocoder.is_some())
            .finish()
    }
}

impl<'g> MasterContext<'g> {
    pub fn new(geocoder: Option<&'g dyn Geocoder>) -> Self {
        MasterContext { geocoder }
    }

    pub fn with_geocoder(geocoder: &'g dyn Geocoder) -> Self {
        MasterContext {
            geocoder: Some(geocoder),
        }
    }

    pub fn has_geocoder(&self) -> bool {
        self.geocoder.is_some()
    }

    /// Assign `entity`'s mastered key in place and return it.
    pub fn master(&self, entity: Masterable<'_>) -> Result<Mastered, MasteringError> {
        match entity {
            Masterable::Event(event) => self.master_event(event),
            Masterable::Competitor {
                competitor,
                event_key,
                season,
            } => master_competitor(competitor, event_key, season),
            Masterable::Team { team, season } => Ok(Mastered::leaf(master_team(team, season))),
            Masterable::Venue(venue) => self.master_venue(venue).map(Mastered::leaf),
            other @ Masterable::Player(_) => Err(MasteringError::UnsupportedEntity(other.kind())),
        }
    }

    fn master_event(&self, event: &mut Event) -> Result<Mastered, MasteringError> {
        let detail = event
            .game_detail
            .as_ref()
            .ok_or(MasteringError::MissingReference {
                entity: "event",
                reference: "game detail",
            })?;
        let key = format!(
            "{}:{}:{}",
            detail.start_date_eastern, event.visit_team.abbreviation, event.home_team.abbreviation
        );
        event.entity_id.id = key.clone();

        let season = event.season;
        let mut cascade_errors = Vec::new();
        for (side, competitor) in [
            ("home", &mut event.home_team),
            ("visit", &mut event.visit_team),
        ] {
            let child = Masterable::Competitor {
                competitor,
                event_key: &key,
                season,
            };
            match self.master(child) {
                Ok(done) => cascade_errors.extend(done.cascade_errors),
                Err(e) => {
                    warn!(error = %e, event = %key, side, "competitor mastering failed");
                    cascade_errors.push(e);
                }
            }
        }
        Ok(Mastered {
            key,
            cascade_errors,
        })
    }

    /// Geocode `venue` when a geocoder is configured. Failures are logged and leave the key empty.
    pub fn try_master_venue(&self, venue: &mut Venue) {
        if self.geocoder.is_none() {
            return;
        }
        if let Err(e) = self.master_venue(venue) {
            warn!(error = %e, venue = %venue.full_name, "venue left unmastered");
        }
    }

    #[instrument(level = "info", skip(self, venue), fields(venue = %venue.full_name))]
    fn master_venue(&self, venue: &mut Venue) -> Result<String, MasteringError> {
        let geocoder = self.geocoder.ok_or(MasteringError::NoGeocoder)?;
        let address = venue.formatted_address();
        let matches = geocoder.geocode(&address)?;
        match matches.as_slice() {
            [only] if only.plus_code.is_empty() => Err(MasteringError::NoPlusCode { address }),
            [only] => {
                info!(plus_code = %only.plus_code, place_id = %only.place_id, "venue geocoded");
                venue.entity_id.id = only.plus_code.clone();
                Ok(only.plus_code.clone())
            }
            _ => Err(MasteringError::AmbiguousGeocode {
                address,
                count: matches.len(),
            }),
        }
    }
}

fn master_competitor(
    competitor: &mut Competitor,
    event_key: &str,
    season: Season,
) -> Result<Mastered, MasteringError> {
    let key = format!("{}:{}", competitor.abbreviation, event_key);
    competitor.entity_id.id = key.clone();
    let team = competitor
        .team
        .as_mut()
        .ok_or(MasteringError::MissingReference {
            entity: "competitor",
            reference: "team",
        })?;
    master_team(team, season);
    Ok(Mastered::leaf(key))
}

fn master_team(team: &mut Team, season: Season) -> String {
    let key = format!("{}:{}:{}", team.abbreviation, season.year, season.stage);
    team.entity_id.id = key.clone();
    key
}
