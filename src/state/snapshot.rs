use chrono::{DateTime, Utc};

use crate::error::FetchError;

/// Point-in-time BTC/USD reading with its 24h move.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    /// Current price in USD
    pub price: f64,
    /// Absolute 24h change in USD (derived, not quoted)
    pub change_24h: f64,
    /// 24h change in percent
    pub change_pct_24h: f64,
}

impl PriceSnapshot {
    /// Build a snapshot from the quoted price and 24h percent move.
    /// The price must be positive; the absolute change is computed here.
    pub fn new(price: f64, change_pct_24h: f64) -> Result<Self, FetchError> {
        if price <= 0.0 {
            return Err(FetchError::BadPrice(price));
        }
        Ok(Self {
            price,
            change_24h: price * change_pct_24h / 100.0,
            change_pct_24h,
        })
    }

    /// True when the 24h move is flat or up.
    pub fn is_up(&self) -> bool {
        self.change_24h >= 0.0
    }
}

/// One sample of the historical price curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub time: DateTime<Utc>,
    pub price: f64,
}

/// Ordered price history for the trend view.
///
/// Points keep source order (timestamps non-decreasing); an empty history is
/// an error, not a valid state.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketSeries {
    points: Vec<PricePoint>,
}

impl MarketSeries {
    /// Wrap an ordered list of points. Fails on an empty list.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, FetchError> {
        if points.is_empty() {
            return Err(FetchError::EmptySeries);
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }
}
