//! Airline model and the merge of its two partial sources

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::present;
use crate::engine::error::{Attribute, LookupError, LookupResult};

/// Airline with its operating country and name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineRecord {
    /// Two-letter IATA airline designator
    pub code: String,
    pub country_code: Option<String>,
    pub name: Option<String>,
}

/// Row of the airline country table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirlineCountryEntry {
    pub code: String,
    pub country_code: Option<String>,
}

/// Row of the airline name table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirlineNameEntry {
    pub code: String,
    pub name: Option<String>,
}

impl AirlineRecord {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            country_code: None,
            name: None,
        }
    }

    #[must_use]
    pub fn with_country(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn country(&self) -> LookupResult<&str> {
        present(&self.country_code)
            .ok_or_else(|| LookupError::missing(&self.code, Attribute::AirlineCountry))
    }

    pub fn name(&self) -> LookupResult<&str> {
        present(&self.name).ok_or_else(|| LookupError::missing(&self.code, Attribute::AirlineName))
    }
}

/// Merge the country table and the name table into one record per airline code
///
/// The country comes from the country table, the name is the first one seen
/// for the code in the name table. A code present in only one table still
/// yields a record with the other attribute absent.
pub fn merge_airlines<C, N>(countries: C, names: N) -> HashMap<String, AirlineRecord>
where
    C: IntoIterator<Item = AirlineCountryEntry>,
    N: IntoIterator<Item = AirlineNameEntry>,
{
    let mut airlines: HashMap<String, AirlineRecord> = HashMap::new();

    for entry in countries {
        let code = entry.code.trim().to_string();
        if code.is_empty() {
            continue;
        }
        match airlines.entry(code) {
            Entry::Vacant(slot) => {
                let record = AirlineRecord {
                    code: slot.key().clone(),
                    country_code: entry.country_code,
                    name: None,
                };
                slot.insert(record);
            }
            Entry::Occupied(slot) => {
                debug!("Ignoring duplicate country entry for airline {}", slot.key());
            }
        }
    }

    for entry in names {
        let code = entry.code.trim().to_string();
        if code.is_empty() || present(&entry.name).is_none() {
            continue;
        }
        let record = airlines
            .entry(code.clone())
            .or_insert_with(|| AirlineRecord::new(code));
        if present(&record.name).is_none() {
            record.name = entry.name;
        }
    }

    airlines
}
