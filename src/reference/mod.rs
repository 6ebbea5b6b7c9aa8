//! Reference data tables and their once-only loading
//!
//! `ReferenceData` owns the three immutable tables. `ReferenceStore` wraps a
//! `ReferenceSource` and loads it the first time the data is asked for; every
//! later caller, on any thread, receives the same `Arc` handle.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, info, instrument};

use crate::error::GeoLookupError;
use crate::models::{AirlineRecord, CountryRecord, LocationRecord};

pub mod loader;

pub use loader::DirectorySource;

/// Immutable location, country and airline tables keyed by code
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    locations: HashMap<String, LocationRecord>,
    countries: HashMap<String, CountryRecord>,
    airlines: HashMap<String, AirlineRecord>,
}

impl ReferenceData {
    /// Build from already keyed tables, checking that every key matches its record
    pub fn new(
        locations: HashMap<String, LocationRecord>,
        countries: HashMap<String, CountryRecord>,
        airlines: HashMap<String, AirlineRecord>,
    ) -> crate::Result<Self> {
        check_keys("location", &locations, |record| &record.code)?;
        check_keys("country", &countries, |record| &record.code)?;
        check_keys("airline", &airlines, |record| &record.code)?;

        Ok(Self {
            locations,
            countries,
            airlines,
        })
    }

    /// Build from loose records
    ///
    /// A location code seen twice keeps the airport. Other duplicates keep the
    /// first record.
    pub fn from_records<L, C, A>(locations: L, countries: C, airlines: A) -> Self
    where
        L: IntoIterator<Item = LocationRecord>,
        C: IntoIterator<Item = CountryRecord>,
        A: IntoIterator<Item = AirlineRecord>,
    {
        let mut location_table = HashMap::new();
        for record in locations {
            insert_location(&mut location_table, record);
        }

        let mut country_table = HashMap::new();
        for record in countries {
            country_table.entry(record.code.clone()).or_insert(record);
        }

        let mut airline_table = HashMap::new();
        for record in airlines {
            airline_table.entry(record.code.clone()).or_insert(record);
        }

        Self {
            locations: location_table,
            countries: country_table,
            airlines: airline_table,
        }
    }

    #[must_use]
    pub fn location(&self, code: &str) -> Option<&LocationRecord> {
        self.locations.get(code)
    }

    #[must_use]
    pub fn country(&self, code: &str) -> Option<&CountryRecord> {
        self.countries.get(code)
    }

    #[must_use]
    pub fn airline(&self, code: &str) -> Option<&AirlineRecord> {
        self.airlines.get(code)
    }

    /// Every airport record, in table order
    pub fn airports(&self) -> impl Iterator<Item = &LocationRecord> {
        self.locations.values().filter(|record| record.is_airport())
    }

    #[must_use]
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn country_count(&self) -> usize {
        self.countries.len()
    }

    #[must_use]
    pub fn airline_count(&self) -> usize {
        self.airlines.len()
    }
}

/// Insert a location, letting an airport replace a city that shares its code
///
/// Returns false when the record was discarded.
pub(crate) fn insert_location(
    table: &mut HashMap<String, LocationRecord>,
    record: LocationRecord,
) -> bool {
    match table.entry(record.code.clone()) {
        Entry::Vacant(slot) => {
            slot.insert(record);
            true
        }
        Entry::Occupied(mut slot) => {
            if record.is_airport() && !slot.get().is_airport() {
                debug!("Airport {} replaces the city sharing its code", record.code);
                slot.insert(record);
                true
            } else {
                debug!("Discarding duplicate location {}", record.code);
                false
            }
        }
    }
}

fn check_keys<T>(
    table_name: &str,
    table: &HashMap<String, T>,
    code_of: impl Fn(&T) -> &String,
) -> crate::Result<()> {
    for (key, record) in table {
        if key != code_of(record) {
            return Err(GeoLookupError::data(format!(
                "{table_name} table maps key {key} to record {}",
                code_of(record)
            )));
        }
    }
    Ok(())
}

/// Producer of the three reference tables
///
/// Implementations must return tables whose keys equal their records' codes,
/// with the location and airline merge rules already applied.
pub trait ReferenceSource: Send + Sync {
    fn load_locations(&self) -> crate::Result<HashMap<String, LocationRecord>>;
    fn load_countries(&self) -> crate::Result<HashMap<String, CountryRecord>>;
    fn load_airlines(&self) -> crate::Result<HashMap<String, AirlineRecord>>;
}

/// Lazily loaded, shared reference data
pub struct ReferenceStore<S: ReferenceSource> {
    source: S,
    data: OnceCell<Arc<ReferenceData>>,
}

impl<S: ReferenceSource> ReferenceStore<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            data: OnceCell::new(),
        }
    }

    /// Shared handle to the tables, loading them on first call
    ///
    /// Concurrent first callers block until a single load finishes. A failed
    /// load leaves the store empty so a later call retries.
    pub fn get(&self) -> crate::Result<Arc<ReferenceData>> {
        self.data
            .get_or_try_init(|| self.load().map(Arc::new))
            .cloned()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.data.get().is_some()
    }

    #[instrument(skip(self))]
    fn load(&self) -> crate::Result<ReferenceData> {
        let data = ReferenceData::new(
            self.source.load_locations()?,
            self.source.load_countries()?,
            self.source.load_airlines()?,
        )?;

        info!(
            "Loaded reference data: {} locations, {} countries, {} airlines",
            data.location_count(),
            data.country_count(),
            data.airline_count()
        );
        Ok(data)
    }
}
