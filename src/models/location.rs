//! Location model for airports and cities

use serde::{Deserialize, Serialize};

use super::present;
use crate::engine::error::{Attribute, LookupError, LookupResult};

/// Whether a location code designates an airport or a city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationKind {
    #[serde(rename = "A")]
    Airport,
    #[serde(rename = "C")]
    City,
}

/// Airport or city as found in the reference data
///
/// Raw fields are kept as text; the accessors validate them on read so a
/// record with a gap in its data still answers every other question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Three-letter IATA code
    pub code: String,
    pub kind: LocationKind,
    /// Comma-joined city codes served by this location
    #[serde(default)]
    pub city_codes: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country_code: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: Option<String>,
    /// Longitude in decimal degrees
    pub longitude: Option<String>,
    /// IANA time zone name
    pub time_zone: Option<String>,
}

impl LocationRecord {
    /// Create a bare location with no attributes
    #[must_use]
    pub fn new(code: impl Into<String>, kind: LocationKind) -> Self {
        Self {
            code: code.into(),
            kind,
            city_codes: String::new(),
            country_code: None,
            latitude: None,
            longitude: None,
            time_zone: None,
        }
    }

    #[must_use]
    pub fn with_cities(mut self, city_codes: impl Into<String>) -> Self {
        self.city_codes = city_codes.into();
        self
    }

    #[must_use]
    pub fn with_country(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    #[must_use]
    pub fn with_coordinates(self, latitude: f64, longitude: f64) -> Self {
        self.with_raw_coordinates(&latitude.to_string(), &longitude.to_string())
    }

    #[must_use]
    pub fn with_raw_coordinates(mut self, latitude: &str, longitude: &str) -> Self {
        self.latitude = Some(latitude.to_string());
        self.longitude = Some(longitude.to_string());
        self
    }

    #[must_use]
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    #[must_use]
    pub fn is_airport(&self) -> bool {
        self.kind == LocationKind::Airport
    }

    /// All city codes, empty segments dropped
    pub fn cities(&self) -> LookupResult<Vec<&str>> {
        let cities: Vec<&str> = self
            .city_codes
            .split(',')
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .collect();

        if cities.is_empty() {
            return Err(LookupError::missing(&self.code, Attribute::City));
        }
        Ok(cities)
    }

    /// First city code in the list
    pub fn primary_city(&self) -> LookupResult<&str> {
        self.cities().map(|cities| cities[0])
    }

    pub fn country(&self) -> LookupResult<&str> {
        present(&self.country_code).ok_or_else(|| LookupError::missing(&self.code, Attribute::Country))
    }

    pub fn time_zone(&self) -> LookupResult<&str> {
        present(&self.time_zone).ok_or_else(|| LookupError::missing(&self.code, Attribute::TimeZone))
    }

    /// Latitude in decimal degrees
    pub fn latitude_degrees(&self) -> LookupResult<f64> {
        self.parse_coordinate(&self.latitude, Attribute::Latitude)
    }

    /// Longitude in decimal degrees
    pub fn longitude_degrees(&self) -> LookupResult<f64> {
        self.parse_coordinate(&self.longitude, Attribute::Longitude)
    }

    pub fn latitude_radians(&self) -> LookupResult<f64> {
        self.latitude_degrees().map(f64::to_radians)
    }

    pub fn longitude_radians(&self) -> LookupResult<f64> {
        self.longitude_degrees().map(f64::to_radians)
    }

    fn parse_coordinate(&self, raw: &Option<String>, attribute: Attribute) -> LookupResult<f64> {
        present(raw)
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .ok_or_else(|| LookupError::missing(&self.code, attribute))
    }
}
