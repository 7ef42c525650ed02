//! # Forex Provider
//!
//! HTTP adapter for the `RateSource` port: one GET to the provider's
//! "latest rates" endpoint, no retries. Body parsing is a pure function so
//! the wire handling is testable without a network.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use forex_types::{FetchError, IsoCode, RateSnapshot, RateSource};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ─────────────────────────────────────────────────────────────────────────────
// Wire format
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level shape of the provider's latest-rates body. Anything that does
/// not deserialize into this fails the whole fetch.
#[derive(Deserialize)]
struct LatestRatesBody {
    date: String,
    rates: BTreeMap<String, RateValue>,
}

/// Rates arrive as JSON numbers or numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RateValue {
    Number(f64),
    Text(String),
}

impl RateValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            RateValue::Number(n) => Some(*n),
            RateValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Parses a latest-rates body into a snapshot.
///
/// The date field's first 10 characters are interpreted as `YYYY-MM-DD`.
/// A rate that fails numeric coercion, or a key that is not a valid ISO
/// code, drops only that code; a malformed top-level body fails closed.
pub fn parse_snapshot(body: &str) -> Result<RateSnapshot, FetchError> {
    let parsed: LatestRatesBody =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let date_prefix = parsed
        .date
        .get(..10)
        .ok_or_else(|| FetchError::Malformed(format!("date too short: {:?}", parsed.date)))?;
    let as_of = NaiveDate::parse_from_str(date_prefix, "%Y-%m-%d")
        .map_err(|e| FetchError::Malformed(format!("bad date {:?}: {}", date_prefix, e)))?;

    let mut rates = BTreeMap::new();
    for (raw_code, value) in parsed.rates {
        let Ok(code) = IsoCode::new(&raw_code) else {
            tracing::warn!(code = %raw_code, "skipping rate with invalid code");
            continue;
        };
        let Some(rate) = value.as_f64() else {
            tracing::warn!(code = %code, "skipping non-numeric rate");
            continue;
        };
        rates.insert(code, rate);
    }

    Ok(RateSnapshot::new(as_of, rates))
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP adapter
// ─────────────────────────────────────────────────────────────────────────────

/// `RateSource` implementation over the provider's HTTP API.
pub struct HttpRateSource {
    base_url: String,
    api_key: String,
    http: Client,
}

impl HttpRateSource {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.currencyfreaks.com/v2.0";

    /// Creates a source for the given endpoint and credential.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl RateSource for HttpRateSource {
    async fn fetch_latest(&self) -> Result<RateSnapshot, FetchError> {
        let resp = self
            .http
            .get(format!("{}/rates/latest", self.base_url))
            .query(&[("apikey", self.api_key.as_str())])
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        parse_snapshot(&body)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> IsoCode {
        IsoCode::new(s).unwrap()
    }

    #[test]
    fn test_parses_string_and_number_rates() {
        let body = r#"{"date": "2024-01-15 00:00:00+00", "rates": {"USD": "1.0", "EUR": 0.92}}"#;
        let snapshot = parse_snapshot(body).unwrap();

        assert_eq!(
            snapshot.as_of(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(snapshot.rate_for(&code("USD")), Some(1.0));
        assert_eq!(snapshot.rate_for(&code("EUR")), Some(0.92));
    }

    #[test]
    fn test_date_truncated_to_ten_chars() {
        let body = r#"{"date": "2024-01-15T23:59:59Z", "rates": {}}"#;
        let snapshot = parse_snapshot(body).unwrap();
        assert_eq!(
            snapshot.as_of(),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_bad_rate_drops_only_that_code() {
        let body = r#"{"date": "2024-01-15", "rates": {"USD": "1.0", "EUR": "n/a"}}"#;
        let snapshot = parse_snapshot(body).unwrap();

        assert_eq!(snapshot.rate_for(&code("USD")), Some(1.0));
        assert_eq!(snapshot.rate_for(&code("EUR")), None);
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_missing_rates_fails_closed() {
        let body = r#"{"date": "2024-01-15"}"#;
        assert!(matches!(
            parse_snapshot(body),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn test_short_date_fails_closed() {
        let body = r#"{"date": "2024", "rates": {"USD": 1.0}}"#;
        assert!(matches!(
            parse_snapshot(body),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn test_unparseable_date_fails_closed() {
        let body = r#"{"date": "15/01/2024", "rates": {"USD": 1.0}}"#;
        assert!(matches!(
            parse_snapshot(body),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn test_not_json_fails_closed() {
        assert!(matches!(
            parse_snapshot("<html>rate limited</html>"),
            Err(FetchError::Malformed(_))
        ));
    }
}
