//! `geolookup` - Airport, city, country and airline reference lookups
//!
//! This library resolves IATA codes to their attributes, computes
//! great-circle distances and trip geography, searches for nearby airports
//! and converts datetimes between local time and GMT.

pub mod config;
pub mod engine;
pub mod error;
pub mod facade;
pub mod logging;
pub mod models;
pub mod reference;

// Re-export core types for public API
pub use config::GeoLookupConfig;
pub use engine::{
    Attribute, DatePattern, DurationUnit, GeoEngine, GeoType, LookupEngine, LookupError,
    LookupResult, NearbyAirport, TimeEngine, TripDuration,
};
pub use error::GeoLookupError;
pub use facade::GeoLookup;
pub use models::{AirlineRecord, CountryRecord, LocationKind, LocationRecord};
pub use reference::{DirectorySource, ReferenceData, ReferenceSource, ReferenceStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, GeoLookupError>;
