mod refresh;
mod snapshot;

pub use refresh::RefreshController;
pub use snapshot::{MarketSeries, PricePoint, PriceSnapshot};
