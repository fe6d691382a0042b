//! Distance-from-peak classifier.
//!
//! Measures how far below the all-time high the price sits; deep
//! discounts map to accumulation zones, a new high to caution.

use super::{classify_with, Band};
use crate::types::{ColorClass, IndicatorResult};

const BANDS: &[Band] = &[
    Band::excl(30.0, 8, "Zone accumulation forte", ColorClass::Green),
    Band::incl(20.0, 7, "Zone accumulation", ColorClass::Green),
    Band::incl(10.0, 5, "Modérément sous-évalué", ColorClass::Yellow),
    Band::incl(0.0, 4, "Proche ATH", ColorClass::Gray),
    Band::incl(f64::NEG_INFINITY, 2, "Nouveau ATH - Prudence", ColorClass::Red),
];

/// Percentage distance below the peak. Positive when below.
pub fn distance_pct(current_price: f64, peak_price: f64) -> f64 {
    ((peak_price - current_price) / peak_price) * 100.0
}

/// Classify from current price and all-time high. The computed distance
/// is carried as the derived value.
pub fn classify(current_price: f64, peak_price: f64) -> IndicatorResult {
    let distance = distance_pct(current_price, peak_price);
    let mut result = classify_with(BANDS, distance);
    result.derived_value = Some(distance);
    result
}
