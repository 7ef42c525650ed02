//! One fetched set of rates plus its effective date.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::iso_code::IsoCode;

/// A single snapshot of exchange rates from the provider.
///
/// Rates are quote-currency units per one unit of the provider's base
/// currency; the base is opaque to this system and the value is carried
/// through unchanged. The date has day granularity only.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    as_of: NaiveDate,
    rates: BTreeMap<IsoCode, f64>,
}

impl RateSnapshot {
    pub fn new(as_of: NaiveDate, rates: BTreeMap<IsoCode, f64>) -> Self {
        Self { as_of, rates }
    }

    /// The provider's stated effective date, truncated to day granularity.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    /// The rate for a code, if the snapshot carries one.
    pub fn rate_for(&self, code: &IsoCode) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
