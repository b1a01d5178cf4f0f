use std::time::Duration;

use chrono::DateTime;
use serde::Deserialize;
use tracing::debug;

use super::{validate_metrics, MarketData, RawMetrics};
use crate::error::FetchError;
use crate::state::{MarketSeries, PricePoint, PriceSnapshot};

/// Request timeout for both endpoints.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// CoinGecko REST client for the BTC/USD pair.
pub struct CoinGeckoClient {
    http: reqwest::Client,
    base_url: String,
}

/// `/simple/price` response: one entry per requested coin id.
#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    bitcoin: Option<RawMetrics>,
}

/// `/coins/bitcoin/market_chart` response; each entry is [ms-epoch, price].
#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    #[serde(default)]
    prices: Vec<(f64, f64)>,
}

impl CoinGeckoClient {
    /// Build a client with the bounded request timeout baked in.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl MarketData for CoinGeckoClient {
    async fn fetch_current_metrics(&self) -> Result<PriceSnapshot, FetchError> {
        let url = format!(
            "{}/simple/price?ids=bitcoin&vs_currencies=usd&include_24hr_change=true",
            self.base_url
        );
        debug!(%url, "fetching current metrics");

        let response = self.http.get(&url).send().await?.error_for_status()?;
        let payload: SimplePriceResponse = response.json().await?;
        let raw = payload.bitcoin.ok_or(FetchError::MissingField("bitcoin"))?;
        validate_metrics(&raw)
    }

    async fn fetch_market_series(&self, days: u32) -> Result<MarketSeries, FetchError> {
        let url = format!(
            "{}/coins/bitcoin/market_chart?vs_currency=usd&days={}",
            self.base_url, days
        );
        debug!(%url, "fetching market series");

        let response = self.http.get(&url).send().await?.error_for_status()?;
        let payload: MarketChartResponse = response.json().await?;
        series_from_prices(payload.prices)
    }
}

/// Convert the API's [ms-epoch, price] pairs into a series, keeping source
/// order.
fn series_from_prices(prices: Vec<(f64, f64)>) -> Result<MarketSeries, FetchError> {
    let mut points = Vec::with_capacity(prices.len());
    for (ts_ms, price) in prices {
        let ts_ms = ts_ms as i64;
        let time =
            DateTime::from_timestamp_millis(ts_ms).ok_or(FetchError::BadTimestamp(ts_ms))?;
        points.push(PricePoint { time, price });
    }
    MarketSeries::new(points)
}
