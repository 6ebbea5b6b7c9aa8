//! Single entry point over the lookup, geo and time engines
//!
//! `GeoLookup` owns one engine of each kind, all sharing the same reference
//! data, and fills in the default date pattern and duration unit when a call
//! leaves them out.

use std::borrow::Cow;
use std::sync::Arc;

use tracing::debug;

use crate::config::GeoLookupConfig;
use crate::engine::{
    DatePattern, DurationUnit, GeoEngine, GeoType, LookupEngine, LookupResult, NearbyAirport,
    TimeEngine, TripDuration,
};
use crate::reference::{DirectorySource, ReferenceData, ReferenceSource, ReferenceStore};

#[derive(Debug, Clone)]
pub struct GeoLookup {
    lookup: LookupEngine,
    geo: GeoEngine,
    time: TimeEngine,
    date_pattern: DatePattern,
    duration_unit: DurationUnit,
}

impl GeoLookup {
    /// Facade with the `yyyyMMdd_HHmm` pattern and hours as defaults
    #[must_use]
    pub fn new(data: Arc<ReferenceData>) -> Self {
        Self::with_defaults(data, DatePattern::default(), DurationUnit::default())
    }

    #[must_use]
    pub fn with_defaults(
        data: Arc<ReferenceData>,
        date_pattern: DatePattern,
        duration_unit: DurationUnit,
    ) -> Self {
        let lookup = LookupEngine::new(data);
        Self {
            geo: GeoEngine::new(lookup.clone()),
            time: TimeEngine::new(lookup.clone()),
            lookup,
            date_pattern,
            duration_unit,
        }
    }

    /// Facade over a store's data, loading it if nobody has yet
    pub fn from_store<S: ReferenceSource>(store: &ReferenceStore<S>) -> crate::Result<Self> {
        Ok(Self::new(store.get()?))
    }

    /// Load the configured data directory and apply the configured defaults
    pub fn from_config(config: &GeoLookupConfig) -> anyhow::Result<Self> {
        let store = ReferenceStore::new(DirectorySource::from_config(&config.data));
        let data = store.get()?;
        Ok(Self::with_defaults(
            data,
            config.date_pattern()?,
            config.duration_unit()?,
        ))
    }

    #[must_use]
    pub fn lookup(&self) -> &LookupEngine {
        &self.lookup
    }

    #[must_use]
    pub fn geo(&self) -> &GeoEngine {
        &self.geo
    }

    #[must_use]
    pub fn time(&self) -> &TimeEngine {
        &self.time
    }

    #[must_use]
    pub fn date_pattern(&self) -> &DatePattern {
        &self.date_pattern
    }

    #[must_use]
    pub fn duration_unit(&self) -> DurationUnit {
        self.duration_unit
    }

    fn pattern(&self, format: Option<&str>) -> LookupResult<Cow<'_, DatePattern>> {
        match format {
            Some(format) if format != self.date_pattern.as_str() => {
                debug!("Using date pattern {}", format);
                DatePattern::parse(format).map(Cow::Owned)
            }
            _ => Ok(Cow::Borrowed(&self.date_pattern)),
        }
    }

    pub fn city(&self, airport: &str) -> LookupResult<String> {
        self.lookup.city(airport)
    }

    pub fn cities(&self, airport: &str) -> LookupResult<Vec<String>> {
        self.lookup.cities(airport)
    }

    pub fn country(&self, location: &str) -> LookupResult<String> {
        self.lookup.country(location)
    }

    pub fn continent(&self, location: &str) -> LookupResult<String> {
        self.lookup.continent(location)
    }

    pub fn iata_zone(&self, location: &str) -> LookupResult<String> {
        self.lookup.iata_zone(location)
    }

    pub fn currency(&self, location: &str) -> LookupResult<String> {
        self.lookup.currency(location)
    }

    pub fn airline_country(&self, airline: &str) -> LookupResult<String> {
        self.lookup.airline_country(airline)
    }

    pub fn airline_name(&self, airline: &str) -> LookupResult<String> {
        self.lookup.airline_name(airline)
    }

    pub fn time_zone(&self, location: &str) -> LookupResult<String> {
        self.lookup.time_zone(location)
    }

    pub fn distance_between(&self, from: &str, to: &str) -> LookupResult<u32> {
        self.geo.distance_between(from, to)
    }

    pub fn geo_type<S: AsRef<str>>(&self, locations: &[S]) -> LookupResult<GeoType> {
        self.geo.geo_type(locations)
    }

    pub fn nearby_airports(&self, location: &str, radius_km: f64) -> LookupResult<Vec<String>> {
        self.geo.nearby_airports(location, radius_km)
    }

    pub fn nearby_airports_with_details(
        &self,
        location: &str,
        radius_km: f64,
    ) -> LookupResult<Vec<NearbyAirport>> {
        self.geo.nearby_airports_with_details(location, radius_km)
    }

    pub fn local_to_gmt(
        &self,
        local: &str,
        location: &str,
        format: Option<&str>,
    ) -> LookupResult<String> {
        let pattern = self.pattern(format)?;
        self.time.local_to_gmt(local, location, &pattern)
    }

    pub fn gmt_to_local(
        &self,
        gmt: &str,
        location: &str,
        format: Option<&str>,
    ) -> LookupResult<String> {
        let pattern = self.pattern(format)?;
        self.time.gmt_to_local(gmt, location, &pattern)
    }

    /// UTC offset in minutes at a location's local time
    pub fn offset_for_local_date(
        &self,
        local: &str,
        location: &str,
        format: Option<&str>,
    ) -> LookupResult<i32> {
        let pattern = self.pattern(format)?;
        self.time.offset_for_local_date(local, location, &pattern)
    }

    pub fn trip_duration(
        &self,
        departure: &str,
        origin: &str,
        arrival: &str,
        destination: &str,
        unit: Option<DurationUnit>,
        format: Option<&str>,
    ) -> LookupResult<TripDuration> {
        let pattern = self.pattern(format)?;
        self.time.trip_duration(
            departure,
            origin,
            arrival,
            destination,
            unit.unwrap_or(self.duration_unit),
            &pattern,
        )
    }
}
