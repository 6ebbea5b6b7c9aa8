//! Local and GMT time conversion
//!
//! Zone arithmetic is delegated to `chrono-tz`; offsets are taken at the
//! converted instant, so daylight saving time is honoured. A wall-clock time
//! that occurs twice (clocks going back) resolves to the earlier instant, one
//! that never occurs (clocks going forward) is an `UnparsableDate`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::debug;

pub use super::pattern::DatePattern;

use super::error::{Attribute, LookupError, LookupResult};
use super::lookup::LookupEngine;

/// Unit in which a trip duration is reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum DurationUnit {
    #[default]
    Hours,
    Minutes,
}

impl DurationUnit {
    #[must_use]
    pub fn express(self, minutes: i64) -> TripDuration {
        match self {
            DurationUnit::Hours => TripDuration::Hours(minutes as f64 / 60.0),
            DurationUnit::Minutes => TripDuration::Minutes(minutes),
        }
    }
}

impl FromStr for DurationUnit {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hours" | "hour" | "h" => Ok(DurationUnit::Hours),
            "minutes" | "minute" | "min" | "m" => Ok(DurationUnit::Minutes),
            other => Err(LookupError::invalid_argument(format!(
                "unknown duration unit '{other}', expected hours or minutes"
            ))),
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationUnit::Hours => f.write_str("hours"),
            DurationUnit::Minutes => f.write_str("minutes"),
        }
    }
}

/// Elapsed time between departure and arrival
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TripDuration {
    /// Fractional hours
    Hours(f64),
    /// Whole minutes
    Minutes(i64),
}

impl TripDuration {
    #[must_use]
    pub fn value(&self) -> f64 {
        match *self {
            TripDuration::Hours(hours) => hours,
            TripDuration::Minutes(minutes) => minutes as f64,
        }
    }

    #[must_use]
    pub fn unit(&self) -> DurationUnit {
        match self {
            TripDuration::Hours(_) => DurationUnit::Hours,
            TripDuration::Minutes(_) => DurationUnit::Minutes,
        }
    }
}

impl fmt::Display for TripDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value(), self.unit())
    }
}

/// Converts datetimes between a location's zone and GMT
#[derive(Debug, Clone)]
pub struct TimeEngine {
    lookup: LookupEngine,
}

impl TimeEngine {
    #[must_use]
    pub fn new(lookup: LookupEngine) -> Self {
        Self { lookup }
    }

    /// Time zone of a location, parsed
    pub fn zone(&self, location: &str) -> LookupResult<Tz> {
        let name = self.lookup.time_zone(location)?;
        name.parse::<Tz>()
            .map_err(|_| LookupError::missing(location, Attribute::TimeZone))
    }

    /// Instant denoted by a wall-clock time at a location
    pub fn local_instant(
        &self,
        local: &str,
        location: &str,
        pattern: &DatePattern,
    ) -> LookupResult<DateTime<Tz>> {
        let zone = self.zone(location)?;
        let naive = pattern.parse_naive(local)?;

        zone.from_local_datetime(&naive).earliest().ok_or_else(|| {
            LookupError::unparsable_date(local, format!("{naive} does not exist in {zone}"))
        })
    }

    pub fn local_to_gmt_instant(
        &self,
        local: &str,
        location: &str,
        pattern: &DatePattern,
    ) -> LookupResult<DateTime<Utc>> {
        self.local_instant(local, location, pattern)
            .map(|instant| instant.with_timezone(&Utc))
    }

    /// Wall-clock time at a location, rewritten as GMT in the same pattern
    pub fn local_to_gmt(
        &self,
        local: &str,
        location: &str,
        pattern: &DatePattern,
    ) -> LookupResult<String> {
        let gmt = self.local_to_gmt_instant(local, location, pattern)?;
        Ok(pattern.format(&gmt))
    }

    /// GMT time rewritten as the wall-clock time at a location
    pub fn gmt_to_local(
        &self,
        gmt: &str,
        location: &str,
        pattern: &DatePattern,
    ) -> LookupResult<String> {
        let zone = self.zone(location)?;
        let naive = pattern.parse_naive(gmt)?;
        let local = Utc.from_utc_datetime(&naive).with_timezone(&zone);
        Ok(pattern.format(&local))
    }

    /// UTC offset in minutes in force at a location at the given local time
    pub fn offset_for_local_date(
        &self,
        local: &str,
        location: &str,
        pattern: &DatePattern,
    ) -> LookupResult<i32> {
        let instant = self.local_instant(local, location, pattern)?;
        Ok(instant.offset().fix().local_minus_utc() / 60)
    }

    /// Elapsed time from a local departure to a local arrival
    ///
    /// The origin is resolved before the destination, so with two bad
    /// arguments the origin's failure is reported.
    pub fn trip_duration(
        &self,
        departure: &str,
        origin: &str,
        arrival: &str,
        destination: &str,
        unit: DurationUnit,
        pattern: &DatePattern,
    ) -> LookupResult<TripDuration> {
        let departure_gmt = self.local_to_gmt_instant(departure, origin, pattern)?;
        let arrival_gmt = self.local_to_gmt_instant(arrival, destination, pattern)?;

        let minutes = (arrival_gmt - departure_gmt).num_minutes();
        debug!(
            "Trip {} -> {}: {} to {} GMT, {} minutes",
            origin, destination, departure_gmt, arrival_gmt, minutes
        );

        if minutes < 0 {
            return Err(LookupError::NegativeDuration { minutes });
        }
        Ok(unit.express(minutes))
    }
}
