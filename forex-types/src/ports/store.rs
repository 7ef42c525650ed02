//! Durable rate store port.
//!
//! Adapters (SQLite, in-memory test doubles) implement this trait.

use crate::domain::{ForexEntry, IsoCode};
use crate::error::StoreError;

/// Whether an upsert created the row or moved an existing one forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// The durable keyed store port.
///
/// `upsert` MUST be atomic per call: concurrent callers writing different
/// ISO codes never corrupt each other, and concurrent writes of the same
/// code leave the row consistent with one of the writes winning entirely.
#[async_trait::async_trait]
pub trait ForexStore: Send + Sync + 'static {
    /// Inserts a new row, or updates only `date` and `rate` if one exists
    /// for `entry.iso_code`.
    async fn upsert(&self, entry: &ForexEntry) -> Result<UpsertOutcome, StoreError>;

    /// Returns every current row in ascending ISO-code order.
    async fn read_all(&self) -> Result<Vec<ForexEntry>, StoreError>;

    /// Returns a single row by key, if present.
    async fn get(&self, code: &IsoCode) -> Result<Option<ForexEntry>, StoreError>;
}
