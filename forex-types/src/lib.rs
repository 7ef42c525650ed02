//! # Forex Types
//!
//! Domain types and port traits for the forex sync service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (IsoCode, CurrencyCatalog, RateSnapshot, ForexEntry)
//! - `ports/` - Trait definitions that adapters must implement
//! - `report/` - The refresh cycle summary returned to callers
//! - `error/` - Domain, fetch, catalog and store error types

pub mod domain;
pub mod error;
pub mod ports;
pub mod report;

// Re-export commonly used types
pub use domain::{CurrencyCatalog, CurrencyRecord, ForexEntry, IsoCode, RateSnapshot};
pub use error::{CatalogError, DomainError, FetchError, RefreshError, StoreError};
pub use ports::{ForexStore, RateSource, UpsertOutcome};
pub use report::RefreshReport;
