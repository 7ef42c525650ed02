//! Persisted per-currency rate entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::catalog::CurrencyRecord;
use super::iso_code::IsoCode;

/// One persisted row per ISO code.
///
/// `territory`, `currency_name` and `symbol` are copied from the catalog when
/// the entry is first created and never updated afterwards; refresh cycles
/// only move `date` and `rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForexEntry {
    /// Unique key
    pub iso_code: IsoCode,
    pub territory: String,
    pub currency_name: String,
    pub symbol: String,
    /// Effective date of the most recent rate applied
    pub date: NaiveDate,
    /// Most recent rate applied, in the provider's opaque base unit
    pub rate: f64,
}

impl ForexEntry {
    /// Builds a candidate entry from a catalog record and a snapshot value.
    pub fn from_catalog(record: &CurrencyRecord, date: NaiveDate, rate: f64) -> Self {
        Self {
            iso_code: record.iso_code.clone(),
            territory: record.territory.clone(),
            currency_name: record.currency_name.clone(),
            symbol: record.symbol.clone(),
            date,
            rate,
        }
    }
}

impl std::fmt::Display for ForexEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<5} {:<24} {:<4} {:>14.6}  {}  {}",
            self.iso_code.as_str(),
            self.currency_name,
            self.symbol,
            self.rate,
            self.date,
            self.territory
        )
    }
}
