//! ETF flow classifier.
//!
//! Input is a curated flow score from -5 (massive outflows) to +5
//! (massive inflows); the outer bands stay open-ended for robustness.

use super::{classify_with, Band};
use crate::types::{ColorClass, IndicatorResult};

const BANDS: &[Band] = &[
    Band::excl(5.0, 9, "Entrées massives", ColorClass::Green),
    Band::incl(2.0, 7, "Entrées positives", ColorClass::Green),
    Band::incl(-1.0, 5, "Flux neutres", ColorClass::Gray),
    Band::incl(-5.0, 3, "Sorties modérées", ColorClass::Orange),
    Band::incl(f64::NEG_INFINITY, 2, "Sorties importantes", ColorClass::Red),
];

/// Classify an ETF flow score.
pub fn classify(flow_score: f64) -> IndicatorResult {
    classify_with(BANDS, flow_score)
}
