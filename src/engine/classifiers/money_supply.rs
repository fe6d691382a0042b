//! M2 money supply growth classifier.
//!
//! Year-over-year growth of the M2 money stock leads BTC price action by
//! roughly 70-107 days, so expansion scores bullish on the medium horizon.

use super::{classify_with, Band};
use crate::types::{ColorClass, IndicatorResult};

const BANDS: &[Band] = &[
    Band::excl(8.0, 9, "Expansion forte", ColorClass::Green),
    Band::incl(5.0, 7, "Expansion modérée", ColorClass::Green),
    Band::incl(3.0, 5, "Expansion faible", ColorClass::Yellow),
    Band::incl(0.0, 3, "Croissance minimale", ColorClass::Orange),
    Band::incl(f64::NEG_INFINITY, 1, "Contraction", ColorClass::Red),
];

/// Classify a YoY M2 growth percentage.
pub fn classify(growth_pct: f64) -> IndicatorResult {
    classify_with(BANDS, growth_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_expansion() {
        assert_eq!(classify(9.5).score, 9);
    }

    #[test]
    fn test_boundary_8_is_moderate() {
        // Exactly 8 belongs to the [5,8] band.
        assert_eq!(classify(8.0).score, 7);
        assert_eq!(classify(8.01).score, 9);
    }

    #[test]
    fn test_weak_expansion() {
        assert_eq!(classify(3.9).score, 5);
        assert_eq!(classify(3.0).score, 5);
    }

    #[test]
    fn test_minimal_growth() {
        let result = classify(1.5);
        assert_eq!(result.score, 3);
        assert_eq!(result.color, ColorClass::Orange);
    }

    #[test]
    fn test_contraction() {
        let result = classify(-2.0);
        assert_eq!(result.score, 1);
        assert_eq!(result.label, "Contraction");
    }
}
