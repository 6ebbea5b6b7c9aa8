//! Geographic computations on top of the lookup engine
//!
//! Distances are great-circle distances from the haversine formula with a
//! mean Earth radius of 6371 km, rounded to whole kilometers.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use super::error::{LookupError, LookupResult};
use super::lookup::LookupEngine;
use crate::models::LocationRecord;

/// Geography of a trip across its locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GeoType {
    /// Every location in one country
    Domestic,
    /// Several countries, one IATA zone
    Continental,
    /// Several IATA zones
    InterContinental,
}

impl fmt::Display for GeoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GeoType::Domestic => "DOMESTIC",
            GeoType::Continental => "CONTINENTAL",
            GeoType::InterContinental => "INTER_CONTINENTAL",
        };
        f.write_str(name)
    }
}

/// Airport found around a location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NearbyAirport {
    pub code: String,
    pub distance_km: u32,
}

/// Latitude and longitude in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    fn of(record: &LocationRecord) -> LookupResult<Self> {
        Ok(Self {
            latitude: record.latitude_degrees()?,
            longitude: record.longitude_degrees()?,
        })
    }

    /// Great-circle distance rounded to the nearest kilometer
    fn distance_km(&self, other: &Coordinates) -> u32 {
        let distance = haversine::distance(
            haversine::Location {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            haversine::Location {
                latitude: other.latitude,
                longitude: other.longitude,
            },
            haversine::Units::Kilometers,
        );
        distance.round() as u32
    }
}

/// Distance, trip geography and radius search
#[derive(Debug, Clone)]
pub struct GeoEngine {
    lookup: LookupEngine,
}

impl GeoEngine {
    #[must_use]
    pub fn new(lookup: LookupEngine) -> Self {
        Self { lookup }
    }

    /// Distance in kilometers between two locations
    ///
    /// An unknown code on either side is reported before missing coordinates.
    pub fn distance_between(&self, from: &str, to: &str) -> LookupResult<u32> {
        let from_record = self.lookup.location(from)?;
        let to_record = self.lookup.location(to)?;

        let distance = Coordinates::of(from_record)?.distance_km(&Coordinates::of(to_record)?);
        debug!("Distance {} -> {}: {} km", from, to, distance);
        Ok(distance)
    }

    /// Classify a trip by how many countries and IATA zones it touches
    pub fn geo_type<S: AsRef<str>>(&self, locations: &[S]) -> LookupResult<GeoType> {
        if locations.len() < 2 {
            return Err(LookupError::invalid_argument(format!(
                "at least two locations are needed to classify a trip, got {}",
                locations.len()
            )));
        }

        let mut countries = BTreeSet::new();
        let mut unknown_locations = Vec::new();
        for location in locations {
            let location = location.as_ref();
            match self.lookup.country(location) {
                Ok(country) => {
                    countries.insert(country);
                }
                Err(e) => {
                    trace!("No country for {}: {}", location, e);
                    unknown_locations.push(location);
                }
            }
        }
        if !unknown_locations.is_empty() {
            return Err(LookupError::UnknownLocation(unknown_locations.join(", ")));
        }

        if countries.len() == 1 {
            return Ok(GeoType::Domestic);
        }

        let mut zones = BTreeSet::new();
        let mut unknown_countries = Vec::new();
        for country in &countries {
            match self.lookup.iata_zone(country) {
                Ok(zone) => {
                    zones.insert(zone);
                }
                Err(e) => {
                    trace!("No IATA zone for {}: {}", country, e);
                    unknown_countries.push(country.as_str());
                }
            }
        }
        if !unknown_countries.is_empty() {
            return Err(LookupError::UnknownCountry(unknown_countries.join(", ")));
        }

        let geo_type = if zones.len() == 1 {
            GeoType::Continental
        } else {
            GeoType::InterContinental
        };
        debug!(
            "{} countries in {} zones: {}",
            countries.len(),
            zones.len(),
            geo_type
        );
        Ok(geo_type)
    }

    /// Airports within `radius_km` of a location, nearest first
    pub fn nearby_airports(&self, location: &str, radius_km: f64) -> LookupResult<Vec<String>> {
        self.nearby_airports_with_details(location, radius_km)
            .map(|airports| airports.into_iter().map(|airport| airport.code).collect())
    }

    /// Airports within `radius_km` of a location with their distances, nearest first
    ///
    /// The location itself may be a city. Airports at a rounded distance of
    /// zero are left out, which drops the origin when it is an airport.
    /// Equidistant airports keep table order.
    pub fn nearby_airports_with_details(
        &self,
        location: &str,
        radius_km: f64,
    ) -> LookupResult<Vec<NearbyAirport>> {
        if radius_km.is_nan() || radius_km <= 0.0 {
            return Err(LookupError::invalid_argument(format!(
                "search radius must be positive, got {radius_km}"
            )));
        }

        let origin = Coordinates::of(self.lookup.location(location)?)?;

        let mut nearby: Vec<NearbyAirport> = self
            .lookup
            .data()
            .airports()
            .filter_map(|candidate| {
                let coordinates = match Coordinates::of(candidate) {
                    Ok(coordinates) => coordinates,
                    Err(e) => {
                        trace!("Skipping airport {}: {}", candidate.code, e);
                        return None;
                    }
                };
                let distance_km = origin.distance_km(&coordinates);
                (distance_km > 0 && f64::from(distance_km) <= radius_km).then(|| NearbyAirport {
                    code: candidate.code.clone(),
                    distance_km,
                })
            })
            .collect();

        nearby.sort_by_key(|airport| airport.distance_km);
        debug!(
            "{} airports within {} km of {}",
            nearby.len(),
            radius_km,
            location
        );
        Ok(nearby)
    }
}
