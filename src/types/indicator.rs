//! Normalized indicator classification results.

use serde::{Deserialize, Serialize};

/// Display color class for indicator/score/signal presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    Green,
    Yellow,
    Gray,
    Orange,
    Red,
}

impl ColorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorClass::Green => "green",
            ColorClass::Yellow => "yellow",
            ColorClass::Gray => "gray",
            ColorClass::Orange => "orange",
            ColorClass::Red => "red",
        }
    }
}

/// Output of one indicator classifier.
///
/// Produced purely from a metric value by an ordered threshold table;
/// stateless and recomputed every cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorResult {
    /// Normalized score, 1 (most bearish) to 9 (most bullish).
    pub score: u8,
    /// Narrative band label.
    pub label: String,
    /// Display color for the band.
    pub color: ColorClass,
    /// Derived intermediate value, when the classifier computes one
    /// (e.g., percentage distance from the all-time high).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derived_value: Option<f64>,
}

/// The six indicator results of one evaluation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSet {
    pub sentiment: IndicatorResult,
    pub peak_distance: IndicatorResult,
    pub money_supply: IndicatorResult,
    pub dollar_index: IndicatorResult,
    pub etf_flows: IndicatorResult,
    pub stablecoin_ratio: IndicatorResult,
}
