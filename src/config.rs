use serde::Deserialize;
use std::env;
use std::fs;
use tracing::debug;

const DEFAULT_API_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const DEFAULT_MARKET_DAYS: u32 = 2;

/// Application configuration. Immutable after load.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Price API root URL
    pub api_base_url: String,
    /// Market-chart lookback in days (at least 1)
    pub market_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            market_days: DEFAULT_MARKET_DAYS,
        }
    }
}

impl Config {
    /// Load from a TOML file when present, then apply environment overrides.
    ///
    /// `COINGECKO_API_URL` and `COINGECKO_MARKET_DAYS` take precedence over
    /// the file; a missing file just means defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let mut config: Config = match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(_) => {
                debug!(path, "no config file, using defaults");
                Config::default()
            }
        };

        if let Ok(url) = env::var("COINGECKO_API_URL") {
            config.api_base_url = url;
        }
        if let Ok(days) = env::var("COINGECKO_MARKET_DAYS") {
            config.market_days = days.parse()?;
        }

        Ok(config.sanitized())
    }

    /// Clamp fields to usable values.
    fn sanitized(mut self) -> Self {
        self.market_days = self.market_days.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.market_days, 2);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("market_days = 7").unwrap();
        assert_eq!(config.market_days, 7);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_full_toml() {
        let config: Config = toml::from_str(
            "api_base_url = \"http://localhost:9000\"\nmarket_days = 30\n",
        )
        .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.market_days, 30);
    }

    #[test]
    fn test_sanitized_clamps_market_days() {
        let config: Config = toml::from_str("market_days = 0").unwrap();
        assert_eq!(config.sanitized().market_days, 1);
    }
}
