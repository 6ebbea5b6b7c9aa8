//! Code to attribute resolution
//!
//! Composite lookups (continent, IATA zone, currency) go through `country`
//! first and stop at the first failure, which is returned unchanged.

use std::sync::Arc;

use tracing::debug;

use super::error::{LookupError, LookupResult};
use crate::models::{AirlineRecord, CountryRecord, LocationRecord};
use crate::reference::ReferenceData;

/// Resolves codes against the reference tables
#[derive(Debug, Clone)]
pub struct LookupEngine {
    data: Arc<ReferenceData>,
}

impl LookupEngine {
    #[must_use]
    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self { data }
    }

    #[must_use]
    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn location(&self, code: &str) -> LookupResult<&LocationRecord> {
        self.data
            .location(code)
            .ok_or_else(|| LookupError::UnknownLocation(code.to_string()))
    }

    pub fn country_record(&self, code: &str) -> LookupResult<&CountryRecord> {
        self.data
            .country(code)
            .ok_or_else(|| LookupError::UnknownCountry(code.to_string()))
    }

    pub fn airline_record(&self, code: &str) -> LookupResult<&AirlineRecord> {
        self.data
            .airline(code)
            .ok_or_else(|| LookupError::UnknownAirline(code.to_string()))
    }

    /// Country code of a location
    ///
    /// A two-character input is taken to be a country code already and is
    /// returned untouched, without checking the country table.
    pub fn country(&self, location: &str) -> LookupResult<String> {
        match location.chars().count() {
            2 => Ok(location.to_string()),
            3 => self
                .location(location)
                .and_then(LocationRecord::country)
                .map(str::to_string),
            _ => Err(LookupError::UnknownLocation(location.to_string())),
        }
    }

    /// Primary city served by an airport
    pub fn city(&self, airport: &str) -> LookupResult<String> {
        let city = self.location(airport)?.primary_city()?;
        debug!("{} serves city {}", airport, city);
        Ok(city.to_string())
    }

    /// Every city served by an airport
    pub fn cities(&self, airport: &str) -> LookupResult<Vec<String>> {
        let cities = self.location(airport)?.cities()?;
        Ok(cities.into_iter().map(str::to_string).collect())
    }

    pub fn continent(&self, location: &str) -> LookupResult<String> {
        let country = self.country(location)?;
        self.country_record(&country)?
            .continent()
            .map(str::to_string)
    }

    pub fn iata_zone(&self, location: &str) -> LookupResult<String> {
        let country = self.country(location)?;
        self.country_record(&country)?
            .iata_zone()
            .map(str::to_string)
    }

    pub fn currency(&self, location: &str) -> LookupResult<String> {
        let country = self.country(location)?;
        self.country_record(&country)?
            .currency()
            .map(str::to_string)
    }

    pub fn airline_country(&self, airline: &str) -> LookupResult<String> {
        self.airline_record(airline)?.country().map(str::to_string)
    }

    pub fn airline_name(&self, airline: &str) -> LookupResult<String> {
        self.airline_record(airline)?.name().map(str::to_string)
    }

    /// IANA time zone name of a location
    pub fn time_zone(&self, location: &str) -> LookupResult<String> {
        self.location(location)?.time_zone().map(str::to_string)
    }

    /// Latitude in radians
    pub fn latitude(&self, location: &str) -> LookupResult<f64> {
        self.location(location)?.latitude_radians()
    }

    /// Longitude in radians
    pub fn longitude(&self, location: &str) -> LookupResult<f64> {
        self.location(location)?.longitude_radians()
    }
}
