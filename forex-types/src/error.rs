//! Error types for the forex sync service.

use crate::domain::IsoCode;

/// Domain-level errors (validation failures).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid ISO code: {0:?}")]
    InvalidIsoCode(String),

    #[error("Duplicate ISO code in catalog: {0}")]
    DuplicateIsoCode(IsoCode),
}

/// Failures while fetching a rate snapshot from the provider.
///
/// Always recovered locally: the refresh cycle for that attempt is a no-op
/// and both the scheduler and the console loop keep running.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Rate provider returned status {0}")]
    Status(u16),

    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

/// Failures while loading the reference currency catalog.
///
/// Fatal: there is no meaningful degraded mode without a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Cannot read currency catalog: {0}")]
    Read(String),

    #[error("Malformed currency catalog: {0}")]
    Malformed(String),

    #[error("Currency catalog is empty")]
    Empty,
}

/// Failures at the durable store boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Fatal at startup.
    #[error("Cannot open rate store: {0}")]
    Open(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Failures of a single refresh cycle.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    /// The fetch failed; no store mutation occurred.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A row write failed; the remainder of the cycle was abandoned.
    /// Rows written earlier in the same cycle stay committed.
    #[error("Upsert failed for {iso_code} ({remaining} codes not applied): {source}")]
    Store {
        iso_code: IsoCode,
        remaining: usize,
        source: StoreError,
    },
}
