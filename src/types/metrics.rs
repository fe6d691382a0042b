//! Raw market/macro metric readings consumed by the engine.

use serde::{Deserialize, Serialize};

/// A single named numeric reading. Immutable once captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    /// Raw value as reported by the source (or its fallback).
    pub value: f64,
    /// Unix timestamp (milliseconds) when the value was captured.
    pub captured_at: i64,
    /// True when the value is a fallback/estimate rather than a live reading.
    #[serde(default)]
    pub is_estimate: bool,
    /// Source label (e.g., "CoinGecko", "FRED", "TradingView").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Metric {
    /// Create a live metric captured now.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            captured_at: chrono::Utc::now().timestamp_millis(),
            is_estimate: false,
            source: None,
        }
    }

    /// Mark this metric as an estimate/fallback value.
    pub fn estimate(mut self) -> Self {
        self.is_estimate = true;
        self
    }

    /// Attach a source label.
    pub fn from_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }
}

/// The complete input set for one evaluation cycle.
///
/// Values arrive from external fetchers that own retry/fallback policy;
/// the engine accepts whatever it is given (real or fallback) and treats
/// both uniformly apart from surfacing `is_estimate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSet {
    /// Fear & Greed index, 0-100.
    pub sentiment_value: Metric,
    /// Current BTC price in USD.
    pub current_price: Metric,
    /// All-time-high BTC price in USD.
    pub peak_price: Metric,
    /// M2 money supply year-over-year growth, percent.
    pub money_supply_growth_pct: Metric,
    /// Dollar index (DXY) 6-month trend, percent.
    pub dollar_index_trend_pct: Metric,
    /// ETF flow score, -5 (massive outflows) to +5 (massive inflows).
    pub etf_flow_score: Metric,
    /// Stablecoin supply ratio, percent.
    pub stablecoin_ratio_pct: Metric,
}

impl MetricSet {
    /// Iterate over all fields with their names, for validation.
    pub fn fields(&self) -> [(&'static str, &Metric); 7] {
        [
            ("sentimentValue", &self.sentiment_value),
            ("currentPrice", &self.current_price),
            ("peakPrice", &self.peak_price),
            ("moneySupplyGrowthPct", &self.money_supply_growth_pct),
            ("dollarIndexTrendPct", &self.dollar_index_trend_pct),
            ("etfFlowScore", &self.etf_flow_score),
            ("stablecoinRatioPct", &self.stablecoin_ratio_pct),
        ]
    }

    /// Percentage distance below the all-time high.
    /// Positive when the price is below the peak.
    pub fn peak_distance_pct(&self) -> f64 {
        ((self.peak_price.value - self.current_price.value) / self.peak_price.value) * 100.0
    }
}
