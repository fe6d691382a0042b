//! Fear & Greed sentiment classifier.
//!
//! The index runs 0 (extreme fear) to 100 (extreme greed); the score is
//! contrarian, so deep fear maps to the most bullish band.

use super::{classify_with, Band};
use crate::types::{ColorClass, IndicatorResult};

const BANDS: &[Band] = &[
    Band::incl(80.0, 1, "VENTE/PRUDENCE (Cupidité)", ColorClass::Red),
    Band::incl(70.0, 2, "Surévalué", ColorClass::Orange),
    Band::incl(55.0, 4, "Prudence", ColorClass::Yellow),
    Band::incl(45.0, 5, "Neutre", ColorClass::Gray),
    Band::incl(30.0, 6, "Légèrement bullish", ColorClass::Yellow),
    Band::incl(20.0, 7, "Achat (Peur)", ColorClass::Green),
    Band::incl(f64::NEG_INFINITY, 9, "ACHAT FORT (Peur extrême)", ColorClass::Green),
];

/// Classify a Fear & Greed index value.
pub fn classify(value: f64) -> IndicatorResult {
    classify_with(BANDS, value)
}
