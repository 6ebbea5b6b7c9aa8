//! Country model

use serde::{Deserialize, Serialize};

use super::present;
use crate::engine::error::{Attribute, LookupError, LookupResult};

/// Country with its travel-relevant attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Country code (ISO 3166-1 alpha-2)
    pub code: String,
    /// ISO 4217 currency code
    pub currency_code: Option<String>,
    /// Two-letter continent code
    pub continent_code: Option<String>,
    /// IATA zone used to tell continental from intercontinental trips
    pub iata_zone: Option<String>,
}

impl CountryRecord {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            currency_code: None,
            continent_code: None,
            iata_zone: None,
        }
    }

    #[must_use]
    pub fn with_currency(mut self, currency_code: impl Into<String>) -> Self {
        self.currency_code = Some(currency_code.into());
        self
    }

    #[must_use]
    pub fn with_continent(mut self, continent_code: impl Into<String>) -> Self {
        self.continent_code = Some(continent_code.into());
        self
    }

    #[must_use]
    pub fn with_iata_zone(mut self, iata_zone: impl Into<String>) -> Self {
        self.iata_zone = Some(iata_zone.into());
        self
    }

    pub fn currency(&self) -> LookupResult<&str> {
        present(&self.currency_code)
            .ok_or_else(|| LookupError::missing(&self.code, Attribute::Currency))
    }

    pub fn continent(&self) -> LookupResult<&str> {
        present(&self.continent_code)
            .ok_or_else(|| LookupError::missing(&self.code, Attribute::Continent))
    }

    pub fn iata_zone(&self) -> LookupResult<&str> {
        present(&self.iata_zone).ok_or_else(|| LookupError::missing(&self.code, Attribute::IataZone))
    }
}
