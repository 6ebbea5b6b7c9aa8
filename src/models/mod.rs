//! Reference data models
//!
//! This module contains the immutable records the lookup engine is built on:
//! - Location: airports and cities with coordinates and time zone
//! - Country: currency, continent and IATA zone
//! - Airline: operating country and name

pub mod airline;
pub mod country;
pub mod location;

// Re-export all public types for convenient access
pub use airline::{AirlineRecord, merge_airlines};
pub use country::CountryRecord;
pub use location::{LocationKind, LocationRecord};

/// Returns the trimmed value when the raw field holds anything but whitespace
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_filters_blank_values() {
        assert_eq!(present(&Some(" FR ".to_string())), Some("FR"));
        assert_eq!(present(&Some("   ".to_string())), None);
        assert_eq!(present(&None), None);
    }
}
