//! Forex Reconciliation Service
//!
//! Orchestrates one refresh cycle through the provider and store ports.
//! Contains NO infrastructure logic - pure reconciliation orchestration.

use std::sync::Arc;

use forex_types::{
    CurrencyCatalog, ForexEntry, ForexStore, RateSource, RefreshError, RefreshReport, StoreError,
    UpsertOutcome,
};

/// Reconciliation engine for the forex sync service.
///
/// Generic over `P: RateSource` and `S: ForexStore` - the adapters are
/// injected at startup. One instance is shared behind an `Arc` between the
/// scheduler task and the console loop; the catalog inside is read-only
/// after load, so no synchronization is needed beyond the store's own.
pub struct ForexService<P: RateSource, S: ForexStore> {
    provider: P,
    store: S,
    catalog: Arc<CurrencyCatalog>,
}

impl<P: RateSource, S: ForexStore> ForexService<P, S> {
    /// Creates a new service over the given adapters.
    pub fn new(provider: P, store: S, catalog: Arc<CurrencyCatalog>) -> Self {
        Self {
            provider,
            store,
            catalog,
        }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the loaded currency catalog.
    pub fn catalog(&self) -> &CurrencyCatalog {
        &self.catalog
    }

    /// Runs one refresh cycle: fetch the latest snapshot, then merge it
    /// into the store, catalog entry by catalog entry in ISO-code order.
    ///
    /// A fetch failure leaves the store untouched. An upsert failure aborts
    /// the remainder of the cycle; rows already written stay committed.
    /// Running twice with the same snapshot yields the same store state as
    /// running once - the second pass performs only updates.
    pub async fn refresh(&self) -> Result<RefreshReport, RefreshError> {
        let snapshot = self.provider.fetch_latest().await?;
        let as_of = snapshot.as_of();

        let mut inserted = 0;
        let mut updated = 0;
        let mut skipped = 0;

        let records: Vec<_> = self.catalog.iter().collect();
        for (idx, &record) in records.iter().enumerate() {
            let Some(rate) = snapshot.rate_for(&record.iso_code) else {
                tracing::debug!(code = %record.iso_code, "no rate in snapshot");
                skipped += 1;
                continue;
            };

            let entry = ForexEntry::from_catalog(record, as_of, rate);
            match self.store.upsert(&entry).await {
                Ok(UpsertOutcome::Inserted) => inserted += 1,
                Ok(UpsertOutcome::Updated) => updated += 1,
                Err(source) => {
                    let not_applied: Vec<&str> = records[idx + 1..]
                        .iter()
                        .filter(|r| snapshot.rate_for(&r.iso_code).is_some())
                        .map(|r| r.iso_code.as_str())
                        .collect();
                    tracing::warn!(
                        code = %record.iso_code,
                        ?not_applied,
                        "aborting refresh cycle after upsert failure"
                    );
                    return Err(RefreshError::Store {
                        iso_code: record.iso_code.clone(),
                        remaining: not_applied.len(),
                        source,
                    });
                }
            }
        }

        Ok(RefreshReport {
            as_of,
            inserted,
            updated,
            skipped,
        })
    }

    /// Returns every persisted entry, ordered by ISO code.
    pub async fn entries(&self) -> Result<Vec<ForexEntry>, StoreError> {
        self.store.read_all().await
    }
}
