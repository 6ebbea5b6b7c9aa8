//! Lookup and computation engines
//!
//! - Lookup: code to validated attribute, or a typed failure
//! - Geo: great-circle distances, trip geography, nearby airports
//! - Time: local/GMT conversion, UTC offsets, trip durations
//!
//! Every engine holds a clone of the same `Arc<ReferenceData>` handle, so they
//! are cheap to clone and safe to share across threads.

pub mod error;
pub mod geo;
pub mod lookup;
pub mod pattern;
pub mod time;

pub use error::{Attribute, LookupError, LookupResult};
pub use geo::{GeoEngine, GeoType, NearbyAirport};
pub use lookup::LookupEngine;
pub use pattern::DatePattern;
pub use time::{DurationUnit, TimeEngine, TripDuration};

#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::Arc;

    use crate::models::{AirlineRecord, CountryRecord, LocationKind, LocationRecord};
    use crate::reference::ReferenceData;

    fn airport(code: &str, city: &str, country: &str, lat: f64, lon: f64, tz: &str) -> LocationRecord {
        LocationRecord::new(code, LocationKind::Airport)
            .with_cities(city)
            .with_country(country)
            .with_coordinates(lat, lon)
            .with_time_zone(tz)
    }

    fn city(code: &str, country: &str, lat: f64, lon: f64, tz: &str) -> LocationRecord {
        LocationRecord::new(code, LocationKind::City)
            .with_cities(code)
            .with_country(country)
            .with_coordinates(lat, lon)
            .with_time_zone(tz)
    }

    /// Small hand-built dataset shared by the engine unit tests
    pub(crate) fn reference_data() -> Arc<ReferenceData> {
        let locations = vec![
            city("PAR", "FR", 48.85341, 2.3488, "Europe/Paris"),
            airport("CDG", "PAR", "FR", 49.012779, 2.55, "Europe/Paris"),
            airport("ORY", "PAR", "FR", 48.723333, 2.379444, "Europe/Paris"),
            airport("LBG", "PAR", "FR", 48.969444, 2.441389, "Europe/Paris"),
            airport("BVA", "PAR", "FR", 49.454444, 2.112778, "Europe/Paris"),
            airport("NCE", "NCE", "FR", 43.70313, 7.26608, "Europe/Paris"),
            airport("FRA", "FRA", "DE", 50.033333, 8.570556, "Europe/Berlin"),
            city("NYC", "US", 40.71427, -74.00597, "America/New_York"),
            airport("JFK", "NYC", "US", 40.639751, -73.778925, "America/New_York"),
            airport("EWR", "NYC,EWR", "US", 40.6925, -74.168667, "America/New_York"),
            // Gaps in the data
            LocationRecord::new("NOC", LocationKind::Airport)
                .with_cities("NOC")
                .with_country("FR")
                .with_time_zone("Europe/Paris"),
            LocationRecord::new("NOZ", LocationKind::Airport)
                .with_cities(",")
                .with_coordinates(48.0, 2.0)
                .with_time_zone("Not/AZone"),
            airport("MCM", "MCM", "MC", 43.73333, 7.41667, "Europe/Monaco"),
            airport("MCT", "MCT", "AQ", -77.85, 166.66667, "Antarctica/McMurdo"),
        ];
        let countries = vec![
            CountryRecord::new("FR")
                .with_currency("EUR")
                .with_continent("EU")
                .with_iata_zone("21"),
            CountryRecord::new("DE")
                .with_currency("EUR")
                .with_continent("EU")
                .with_iata_zone("21"),
            CountryRecord::new("US")
                .with_currency("USD")
                .with_continent("NA")
                .with_iata_zone("11"),
            CountryRecord::new("AQ").with_continent("AN"),
        ];
        let airlines = vec![
            AirlineRecord::new("AF").with_country("FR").with_name("Air France"),
            AirlineRecord::new("XQ").with_country("TR"),
            AirlineRecord::new("DL").with_name("Delta Air Lines"),
        ];

        Arc::new(ReferenceData::from_records(locations, countries, airlines))
    }
}
