mod coingecko;

pub use coingecko::CoinGeckoClient;

use serde::Deserialize;

use crate::error::FetchError;
use crate::state::{MarketSeries, PriceSnapshot};

/// Read access to the market data source.
///
/// The controller is generic over this so the real CoinGecko client and the
/// canned feeds in tests are interchangeable.
pub trait MarketData {
    /// Current price and 24h move.
    async fn fetch_current_metrics(&self) -> Result<PriceSnapshot, FetchError>;

    /// Price history covering the past `days` days.
    async fn fetch_market_series(&self, days: u32) -> Result<MarketSeries, FetchError>;
}

/// Current-metrics payload before validation. Fields the API may omit stay
/// optional here; `validate_metrics` turns absence into an error.
#[derive(Debug, Deserialize)]
pub struct RawMetrics {
    #[serde(rename = "usd")]
    pub price: Option<f64>,
    #[serde(rename = "usd_24h_change")]
    pub change_pct_24h: Option<f64>,
}

/// Invariant check shared by every current-metrics source: both fields
/// present and the price positive.
pub fn validate_metrics(raw: &RawMetrics) -> Result<PriceSnapshot, FetchError> {
    let price = raw.price.ok_or(FetchError::MissingField("usd"))?;
    let change_pct = raw
        .change_pct_24h
        .ok_or(FetchError::MissingField("usd_24h_change"))?;
    PriceSnapshot::new(price, change_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_complete_payload() {
        let raw = RawMetrics {
            price: Some(43_250.5),
            change_pct_24h: Some(-2.1),
        };
        let snapshot = validate_metrics(&raw).unwrap();
        assert_eq!(snapshot.price, 43_250.5);
        assert_eq!(snapshot.change_pct_24h, -2.1);
        assert!((snapshot.change_24h - 43_250.5 * -2.1 / 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_validate_names_missing_price() {
        let raw = RawMetrics {
            price: None,
            change_pct_24h: Some(1.0),
        };
        assert!(matches!(
            validate_metrics(&raw),
            Err(FetchError::MissingField("usd"))
        ));
    }

    #[test]
    fn test_validate_names_missing_change() {
        let raw = RawMetrics {
            price: Some(43_250.5),
            change_pct_24h: None,
        };
        assert!(matches!(
            validate_metrics(&raw),
            Err(FetchError::MissingField("usd_24h_change"))
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_price() {
        let raw = RawMetrics {
            price: Some(0.0),
            change_pct_24h: Some(1.0),
        };
        assert!(matches!(
            validate_metrics(&raw),
            Err(FetchError::BadPrice(_))
        ));
    }
}
