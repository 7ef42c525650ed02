//! Reference currency catalog, loaded once at startup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::iso_code::IsoCode;
use crate::error::DomainError;

/// One row of the reference currency table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyRecord {
    /// Unique key
    pub iso_code: IsoCode,
    /// Issuing territory (e.g. "United States")
    pub territory: String,
    /// Currency name (e.g. "US Dollar")
    pub currency_name: String,
    /// Display symbol (e.g. "$")
    pub symbol: String,
}

/// Immutable mapping from ISO code to `CurrencyRecord`.
///
/// Built once at startup and shared read-only between the scheduler and the
/// console loop. Iteration is sorted by ISO code, so every refresh cycle
/// visits the catalog in the same order.
#[derive(Debug, Clone)]
pub struct CurrencyCatalog {
    records: BTreeMap<IsoCode, CurrencyRecord>,
}

impl CurrencyCatalog {
    /// Builds a catalog from records, rejecting duplicate ISO codes.
    pub fn from_records(
        records: impl IntoIterator<Item = CurrencyRecord>,
    ) -> Result<Self, DomainError> {
        let mut map = BTreeMap::new();
        for record in records {
            let code = record.iso_code.clone();
            if map.insert(code.clone(), record).is_some() {
                return Err(DomainError::DuplicateIsoCode(code));
            }
        }
        Ok(Self { records: map })
    }

    /// Looks up a record by ISO code.
    pub fn get(&self, code: &IsoCode) -> Option<&CurrencyRecord> {
        self.records.get(code)
    }

    /// Iterates records in ascending ISO-code order.
    pub fn iter(&self) -> impl Iterator<Item = &CurrencyRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
