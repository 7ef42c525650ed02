//! Summary of one refresh cycle.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Counts produced by a completed refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshReport {
    /// Effective date of the snapshot that was applied
    pub as_of: NaiveDate,
    /// Codes written for the first time
    pub inserted: usize,
    /// Codes whose date/rate were moved forward
    pub updated: usize,
    /// Catalog codes the snapshot carried no rate for
    pub skipped: usize,
}

impl RefreshReport {
    pub fn applied(&self) -> usize {
        self.inserted + self.updated
    }
}

impl std::fmt::Display for RefreshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "inserted {}, updated {}, skipped {} (rates as of {})",
            self.inserted, self.updated, self.skipped, self.as_of
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let report = RefreshReport {
            as_of: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            inserted: 3,
            updated: 2,
            skipped: 5,
        };
        assert_eq!(
            report.to_string(),
            "inserted 3, updated 2, skipped 5 (rates as of 2024-01-15)"
        );
        assert_eq!(report.applied(), 5);
    }

    #[test]
    fn test_serde_round_trip() {
        let report = RefreshReport {
            as_of: NaiveDate::from_ymd_opt(2024, 1, 16).unwrap(),
            inserted: 0,
            updated: 7,
            skipped: 1,
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: RefreshReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
