//! Pipe-delimited reference file loading
//!
//! Each table is a text file with a header row and `|` separated fields.
//! Empty fields become absent attributes; rows that do not fit the header are
//! skipped with a warning rather than failing the whole load.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::{ReferenceSource, insert_location};
use crate::config::DataConfig;
use crate::error::GeoLookupError;
use crate::models::airline::{AirlineCountryEntry, AirlineNameEntry};
use crate::models::{AirlineRecord, CountryRecord, LocationRecord, merge_airlines};

/// Reference tables read from a directory of `.dat` files
#[derive(Debug, Clone)]
pub struct DirectorySource {
    directory: PathBuf,
    files: DataConfig,
}

impl DirectorySource {
    /// Source reading the default file names from `directory`
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        let files = DataConfig {
            directory: directory.to_string_lossy().into_owned(),
            ..DataConfig::default()
        };
        Self { directory, files }
    }

    /// Source following the configured directory and file names
    #[must_use]
    pub fn from_config(config: &DataConfig) -> Self {
        Self {
            directory: PathBuf::from(&config.directory),
            files: config.clone(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn read_table<T: DeserializeOwned>(&self, file_name: &str) -> crate::Result<Vec<T>> {
        let path = self.directory.join(file_name);
        debug!("Reading reference table {}", path.display());

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'|')
            .trim(csv::Trim::All)
            .from_path(&path)
            .map_err(|source| GeoLookupError::Read {
                path: path.clone(),
                source,
            })?;

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for (index, row) in reader.deserialize::<T>().enumerate() {
            match row {
                Ok(row) => rows.push(row),
                Err(source) if source.is_io_error() => {
                    return Err(GeoLookupError::Read { path, source });
                }
                Err(e) => {
                    // Header is line 1
                    warn!("Skipping malformed row {} in {}: {}", index + 2, path.display(), e);
                    skipped += 1;
                }
            }
        }

        debug!(
            "Read {} rows from {} ({} skipped)",
            rows.len(),
            path.display(),
            skipped
        );
        Ok(rows)
    }
}

impl ReferenceSource for DirectorySource {
    fn load_locations(&self) -> crate::Result<HashMap<String, LocationRecord>> {
        let rows: Vec<LocationRecord> = self.read_table(&self.files.locations_file)?;
        let row_count = rows.len();

        let mut locations = HashMap::with_capacity(row_count);
        for record in rows {
            if record.code.is_empty() {
                warn!("Skipping location row without a code");
                continue;
            }
            insert_location(&mut locations, record);
        }

        info!(
            "Loaded {} locations from {} rows",
            locations.len(),
            row_count
        );
        Ok(locations)
    }

    fn load_countries(&self) -> crate::Result<HashMap<String, CountryRecord>> {
        let rows: Vec<CountryRecord> = self.read_table(&self.files.countries_file)?;

        let mut countries = HashMap::with_capacity(rows.len());
        for record in rows {
            if record.code.is_empty() {
                warn!("Skipping country row without a code");
                continue;
            }
            countries.entry(record.code.clone()).or_insert(record);
        }

        info!("Loaded {} countries", countries.len());
        Ok(countries)
    }

    fn load_airlines(&self) -> crate::Result<HashMap<String, AirlineRecord>> {
        let countries: Vec<AirlineCountryEntry> = self.read_table(&self.files.airlines_file)?;
        let names: Vec<AirlineNameEntry> = self.read_table(&self.files.airline_names_file)?;

        let airlines = merge_airlines(countries, names);
        info!("Loaded {} airlines", airlines.len());
        Ok(airlines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationKind;
    use std::fs;
    use tempfile::TempDir;

    fn write_tables(dir: &Path) {
        fs::write(
            dir.join("locations.dat"),
            "code|kind|city_codes|country_code|latitude|longitude|time_zone\n\
             NCE|C|NCE|FR|43.71016|7.26195|Europe/Paris\n\
             NCE|A|NCE|FR|43.70313|7.26608|Europe/Paris\n\
             EWR|A|NYC,EWR|US|40.6925|-74.168667|America/New_York\n\
             ZZZ|A|ZZZ||||\n\
             BAD|A|only three fields\n\
             QQQ|X|QQQ|FR|1.0|2.0|Europe/Paris\n",
        )
        .unwrap();
        fs::write(
            dir.join("countries.dat"),
            "code|currency_code|continent_code|iata_zone\nFR|EUR|EU|21\nAQ||AN|\n",
        )
        .unwrap();
        fs::write(dir.join("airlines.dat"), "code|country_code\nAF|FR\nXQ|TR\n").unwrap();
        fs::write(
            dir.join("airline_names.dat"),
            "code|name\nAF|Air France\nAF|Air France Hop\nDL|Delta Air Lines\n",
        )
        .unwrap();
    }

    #[test]
    fn test_load_locations_merges_and_skips() {
        let dir = TempDir::new().unwrap();
        write_tables(dir.path());
        let source = DirectorySource::new(dir.path());

        let locations = source.load_locations().unwrap();
        assert_eq!(locations.len(), 3);

        let nce = &locations["NCE"];
        assert_eq!(nce.kind, LocationKind::Airport);
        assert_eq!(nce.latitude.as_deref(), Some("43.70313"));

        let ewr = &locations["EWR"];
        assert_eq!(ewr.cities().unwrap(), vec!["NYC", "EWR"]);

        let zzz = &locations["ZZZ"];
        assert!(zzz.country_code.is_none());
        assert!(zzz.time_zone.is_none());
        assert!(!locations.contains_key("BAD"));
        assert!(!locations.contains_key("QQQ"));
    }

    #[test]
    fn test_load_countries_keeps_empty_attributes_absent() {
        let dir = TempDir::new().unwrap();
        write_tables(dir.path());
        let source = DirectorySource::new(dir.path());

        let countries = source.load_countries().unwrap();
        assert_eq!(countries["FR"].currency().unwrap(), "EUR");
        assert!(countries["AQ"].currency().is_err());
        assert_eq!(countries["AQ"].continent().unwrap(), "AN");
    }

    #[test]
    fn test_load_airlines_merges_both_tables() {
        let dir = TempDir::new().unwrap();
        write_tables(dir.path());
        let source = DirectorySource::new(dir.path());

        let airlines = source.load_airlines().unwrap();
        assert_eq!(airlines.len(), 3);
        assert_eq!(airlines["AF"].name().unwrap(), "Air France");
        assert_eq!(airlines["AF"].country().unwrap(), "FR");
        assert!(airlines["XQ"].name().is_err());
        assert!(airlines["DL"].country().is_err());
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let source = DirectorySource::new(dir.path());

        let result = source.load_countries();
        assert!(matches!(result, Err(GeoLookupError::Read { .. })));
    }

    #[test]
    fn test_custom_file_names() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("por.psv"),
            "code|kind|city_codes|country_code|latitude|longitude|time_zone\n\
             CDG|A|PAR|FR|49.012779|2.55|Europe/Paris\n",
        )
        .unwrap();

        let config = DataConfig {
            directory: dir.path().to_string_lossy().into_owned(),
            locations_file: "por.psv".to_string(),
            ..DataConfig::default()
        };
        let source = DirectorySource::from_config(&config);
        assert_eq!(source.directory(), dir.path());
        assert!(source.load_locations().unwrap().contains_key("CDG"));
    }
}
