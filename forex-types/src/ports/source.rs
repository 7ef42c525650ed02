//! Rate provider port.

use crate::domain::RateSnapshot;
use crate::error::FetchError;

/// Port trait for the remote rate provider.
///
/// One call is one network request; implementations make no retries. The
/// transport timeout is the implementation's own.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Fetches the provider's current snapshot of exchange rates.
    async fn fetch_latest(&self) -> Result<RateSnapshot, FetchError>;
}
