//! Typed failures for lookup and computation operations

use std::fmt;

use thiserror::Error;

/// Attribute of a reference record that a lookup can find empty or unparsable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    City,
    Country,
    Latitude,
    Longitude,
    TimeZone,
    Currency,
    Continent,
    IataZone,
    AirlineCountry,
    AirlineName,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::City => "city",
            Attribute::Country => "country",
            Attribute::Latitude => "latitude",
            Attribute::Longitude => "longitude",
            Attribute::TimeZone => "time zone",
            Attribute::Currency => "currency",
            Attribute::Continent => "continent",
            Attribute::IataZone => "IATA zone",
            Attribute::AirlineCountry => "airline country",
            Attribute::AirlineName => "airline name",
        };
        f.write_str(name)
    }
}

/// Expected, data-driven outcome of a query that did not produce a value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Unknown location: {0}")]
    UnknownLocation(String),

    #[error("Unknown country: {0}")]
    UnknownCountry(String),

    #[error("Unknown airline: {0}")]
    UnknownAirline(String),

    #[error("No {attribute} recorded for {code}")]
    MissingAttribute { code: String, attribute: Attribute },

    #[error("Arrival precedes departure: trip duration is {minutes} minutes")]
    NegativeDuration { minutes: i64 },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Unparsable date '{value}': {reason}")]
    UnparsableDate { value: String, reason: String },
}

impl LookupError {
    pub fn missing(code: &str, attribute: Attribute) -> Self {
        Self::MissingAttribute {
            code: code.to_string(),
            attribute,
        }
    }

    pub fn invalid_argument<S: Into<String>>(reason: S) -> Self {
        Self::InvalidArgument(reason.into())
    }

    pub fn unparsable_date<S: Into<String>>(value: &str, reason: S) -> Self {
        Self::UnparsableDate {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// True when the failure comes from the reference data rather than from the call itself
    #[must_use]
    pub fn is_data_failure(&self) -> bool {
        matches!(
            self,
            LookupError::UnknownLocation(_)
                | LookupError::UnknownCountry(_)
                | LookupError::UnknownAirline(_)
                | LookupError::MissingAttribute { .. }
        )
    }
}

pub type LookupResult<T> = std::result::Result<T, LookupError>;
