use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::api::MarketData;
use crate::config::Config;
use crate::error::FetchError;
use crate::state::{MarketSeries, PriceSnapshot};

/// Shortest allowed auto-refresh interval (seconds).
pub const MIN_INTERVAL_SECS: u32 = 10;
/// Longest allowed auto-refresh interval (seconds).
pub const MAX_INTERVAL_SECS: u32 = 300;
/// Interval used until the user picks one.
pub const DEFAULT_INTERVAL_SECS: u32 = 60;

/// Refresh state machine for the market snapshot.
///
/// Owns the snapshot, the series and the refresh bookkeeping; all mutation
/// goes through these methods. The host polls it once per tick and nothing
/// here reads the wall clock itself - `now` is always passed in.
#[derive(Debug)]
pub struct RefreshController {
    snapshot: Option<PriceSnapshot>,
    series: Option<MarketSeries>,
    last_update: Option<DateTime<Utc>>,
    auto_refresh: bool,
    interval_secs: u32,
    manual_trigger: bool,
}

impl Default for RefreshController {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshController {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            series: None,
            last_update: None,
            auto_refresh: false,
            interval_secs: DEFAULT_INTERVAL_SECS,
            manual_trigger: false,
        }
    }

    /// Whether the next poll should fetch. Pure read, no mutation.
    ///
    /// Due when nothing has been fetched yet, when a manual refresh is
    /// pending, or when auto-refresh has run past its interval. The interval
    /// check is inclusive: due exactly at the boundary.
    pub fn is_refresh_due(&self, now: DateTime<Utc>) -> bool {
        if self.snapshot.is_none() || self.manual_trigger {
            return true;
        }
        match self.last_update {
            Some(last) if self.auto_refresh => {
                (now - last).num_seconds() >= i64::from(self.interval_secs)
            }
            _ => false,
        }
    }

    /// Auto-refresh boundary check, run once per host tick.
    ///
    /// When the interval has elapsed this arms the manual trigger, advances
    /// `last_update`, and returns true to ask the host for an immediate
    /// re-poll. It never fetches by itself - the re-entered poll does that
    /// via `is_refresh_due`.
    pub fn check_auto_refresh(&mut self, now: DateTime<Utc>) -> bool {
        if !self.auto_refresh {
            return false;
        }
        let Some(last) = self.last_update else {
            return false;
        };
        let next_refresh = last + Duration::seconds(i64::from(self.interval_secs));
        if now >= next_refresh {
            debug!(
                interval_secs = self.interval_secs,
                "auto-refresh interval elapsed"
            );
            self.manual_trigger = true;
            self.last_update = Some(now);
            return true;
        }
        false
    }

    /// Fetch a fresh snapshot and series, replacing the held ones.
    ///
    /// Both reads must succeed before anything changes; on failure the
    /// previous data survives and the manual trigger stays armed, so the
    /// next poll retries. No retry or backoff happens in here.
    pub async fn refresh(
        &mut self,
        feed: &impl MarketData,
        config: &Config,
        now: DateTime<Utc>,
    ) -> Result<(), FetchError> {
        let snapshot = feed.fetch_current_metrics().await?;
        let series = feed.fetch_market_series(config.market_days).await?;

        info!(
            price = snapshot.price,
            points = series.points().len(),
            "market data refreshed"
        );
        self.snapshot = Some(snapshot);
        self.series = Some(series);
        self.last_update = Some(now);
        self.manual_trigger = false;
        Ok(())
    }

    /// Ask for a refresh on the next poll. Only `refresh` clears the flag.
    pub fn request_refresh(&mut self) {
        self.manual_trigger = true;
    }

    pub fn set_auto_refresh(&mut self, on: bool) {
        self.auto_refresh = on;
    }

    /// Change the auto-refresh interval, clamped to the allowed range.
    pub fn set_interval(&mut self, secs: u32) {
        self.interval_secs = secs.clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS);
    }

    pub fn snapshot(&self) -> Option<&PriceSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn series(&self) -> Option<&MarketSeries> {
        self.series.as_ref()
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    pub fn interval_secs(&self) -> u32 {
        self.interval_secs
    }

    pub fn manual_trigger(&self) -> bool {
        self.manual_trigger
    }
}
