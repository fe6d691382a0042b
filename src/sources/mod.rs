//! External data fetchers.
//!
//! Each fetcher owns its fallback policy: on failure it returns the
//! last successfully fetched value when one exists, otherwise a
//! documented fallback constant tagged as an estimate. Callers always
//! receive a usable value.

pub mod coingecko;
pub mod feargreed;
pub mod fred;
pub mod manual;

pub use coingecko::{BitcoinSnapshot, CoinGeckoClient};
pub use feargreed::{FearGreedClient, SentimentReading};
pub use fred::{FredClient, MoneySupplySnapshot};
pub use manual::ManualMetrics;
