use thiserror::Error;

/// Errors surfaced by a refresh attempt.
///
/// Every variant is recoverable: the host keeps the previous data and the
/// next poll retries.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Response parsed but a required field was absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// Quoted price failed the sanity check (must be positive).
    #[error("bad price in response: {0}")]
    BadPrice(f64),

    /// Historical endpoint returned no points.
    #[error("empty price series")]
    EmptySeries,

    /// Millisecond epoch outside the representable range.
    #[error("timestamp out of range: {0}")]
    BadTimestamp(i64),

    /// Transport, timeout, or HTTP-status failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
