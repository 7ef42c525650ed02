//! Reference currency table loader.

use std::path::Path;

use forex_types::{CatalogError, CurrencyCatalog, CurrencyRecord, IsoCode};

const TERRITORY_COLUMN: &str = "Territory";
const CURRENCY_COLUMN: &str = "Currency";
const SYMBOL_COLUMN: &str = "SymbolAbbrev";
const ISO_COLUMN: &str = "ISO code";

/// Loads the reference currency table from a CSV file.
///
/// Columns are located by name (case-insensitive), so their order in the
/// file is irrelevant. Any failure here is fatal to startup - there is no
/// degraded mode without a catalog.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<CurrencyCatalog, CatalogError> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| CatalogError::Read(format!("{}: {}", path.display(), e)))?;

    let headers = reader
        .headers()
        .map_err(|e| CatalogError::Malformed(e.to_string()))?
        .clone();

    let territory_idx = find_column(&headers, TERRITORY_COLUMN)?;
    let currency_idx = find_column(&headers, CURRENCY_COLUMN)?;
    let symbol_idx = find_column(&headers, SYMBOL_COLUMN)?;
    let iso_idx = find_column(&headers, ISO_COLUMN)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| CatalogError::Malformed(e.to_string()))?;

        records.push(CurrencyRecord {
            iso_code: IsoCode::new(field(&row, iso_idx, ISO_COLUMN)?)?,
            territory: field(&row, territory_idx, TERRITORY_COLUMN)?.to_string(),
            currency_name: field(&row, currency_idx, CURRENCY_COLUMN)?.to_string(),
            symbol: field(&row, symbol_idx, SYMBOL_COLUMN)?.to_string(),
        });
    }

    if records.is_empty() {
        return Err(CatalogError::Empty);
    }

    Ok(CurrencyCatalog::from_records(records)?)
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize, CatalogError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| CatalogError::Malformed(format!("column {:?} not found", name)))
}

fn field<'a>(row: &'a csv::StringRecord, idx: usize, name: &str) -> Result<&'a str, CatalogError> {
    row.get(idx)
        .ok_or_else(|| CatalogError::Malformed(format!("missing {:?} field", name)))
}
