//! Daily refresh task.
//!
//! Fires one refresh per calendar day at local midnight. The sleep target is
//! recomputed from the wall clock every cycle rather than ticking a fixed
//! 24 hours, so a suspended process or a backward clock jump cannot skew the
//! boundary.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local, TimeZone};

use forex_types::{ForexStore, RateSource};

use crate::service::ForexService;

/// Slack added past the boundary so sub-second timer jitter cannot fire a
/// tick before midnight.
const BOUNDARY_SLACK: Duration = Duration::from_secs(1);

/// Runs the daily refresh loop forever. Spawned once at startup; terminates
/// only with the process. A failed refresh is logged and the loop goes back
/// to sleep until the next boundary.
pub async fn run<P: RateSource, S: ForexStore>(service: Arc<ForexService<P, S>>) {
    loop {
        let now = Local::now();
        let boundary = next_midnight_after(now);
        let wait = sleep_duration(now, boundary);
        tracing::info!(
            boundary = %boundary.format("%Y-%m-%d %H:%M:%S"),
            wait_secs = wait.as_secs(),
            "sleeping until next daily refresh"
        );
        tokio::time::sleep(wait).await;

        match service.refresh().await {
            Ok(report) => tracing::info!(%report, "daily refresh applied"),
            Err(e) => tracing::error!(error = %e, "daily refresh failed"),
        }
    }
}

/// The next local-midnight instant strictly after `now`.
fn next_midnight_after(now: DateTime<Local>) -> DateTime<Local> {
    let fallback = now + chrono::Duration::days(1);
    let Some(tomorrow) = now.date_naive().succ_opt() else {
        return fallback;
    };
    let Some(midnight) = tomorrow.and_hms_opt(0, 0, 0) else {
        return fallback;
    };
    // Midnight can be skipped or doubled by a DST transition; take the
    // earliest instant of that wall-clock time, or a flat day if it does
    // not exist at all.
    Local.from_local_datetime(&midnight).earliest().unwrap_or(fallback)
}

/// Converts a boundary into a sleep duration with slack applied.
///
/// A boundary at or behind `now` (the host clock jumped while we were
/// computing it) yields zero: fire immediately rather than sleeping a day
/// or treating it as an error.
fn sleep_duration(now: DateTime<Local>, boundary: DateTime<Local>) -> Duration {
    if boundary <= now {
        return Duration::ZERO;
    }
    (boundary - now).to_std().unwrap_or(Duration::ZERO) + BOUNDARY_SLACK
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .earliest()
            .unwrap()
    }

    #[test]
    fn test_boundary_is_midnight_of_next_day() {
        let now = local(2024, 1, 15, 13, 45, 30);
        let boundary = next_midnight_after(now);

        assert!(boundary > now);
        assert_eq!(boundary.date_naive(), now.date_naive().succ_opt().unwrap());
        assert_eq!((boundary.hour(), boundary.minute(), boundary.second()), (0, 0, 0));
    }

    #[test]
    fn test_boundary_just_before_midnight() {
        let now = local(2024, 1, 15, 23, 59, 59);
        let boundary = next_midnight_after(now);

        assert_eq!(boundary.date_naive(), now.date_naive().succ_opt().unwrap());
    }

    #[test]
    fn test_sleep_covers_remaining_interval_plus_slack() {
        let now = local(2024, 1, 15, 23, 0, 0);
        let boundary = next_midnight_after(now);

        let wait = sleep_duration(now, boundary);
        assert_eq!(wait, Duration::from_secs(3600) + BOUNDARY_SLACK);
    }

    #[test]
    fn test_boundary_behind_now_fires_immediately() {
        // Host clock jumped forward past the computed boundary.
        let now = local(2024, 1, 16, 0, 0, 5);
        let stale_boundary = local(2024, 1, 16, 0, 0, 0);

        assert_eq!(sleep_duration(now, stale_boundary), Duration::ZERO);
    }

    #[test]
    fn test_boundary_equal_to_now_fires_immediately() {
        let now = local(2024, 1, 16, 0, 0, 0);
        assert_eq!(sleep_duration(now, now), Duration::ZERO);
    }
}
