//! Dollar index (DXY) trend classifier.
//!
//! A weakening dollar is bullish for BTC, so the score is inverted
//! against the 6-month trend.

use super::{classify_with, Band};
use crate::types::{ColorClass, IndicatorResult};

const BANDS: &[Band] = &[
    Band::excl(5.0, 1, "Dollar fort (bearish BTC)", ColorClass::Red),
    Band::excl(2.0, 3, "Dollar en hausse", ColorClass::Orange),
    Band::incl(-1.0, 5, "Dollar stable", ColorClass::Gray),
    Band::incl(-4.0, 6, "Dollar légèrement faible", ColorClass::Yellow),
    Band::incl(-8.0, 7, "Dollar en baisse", ColorClass::Green),
    Band::incl(f64::NEG_INFINITY, 9, "Dollar faible (très bullish BTC)", ColorClass::Green),
];

/// Classify a DXY 6-month trend percentage.
pub fn classify(trend_pct: f64) -> IndicatorResult {
    classify_with(BANDS, trend_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_very_weak_dollar() {
        assert_eq!(classify(-10.0).score, 9);
        assert_eq!(classify(-8.01).score, 9);
    }

    #[test]
    fn test_falling_dollar() {
        assert_eq!(classify(-8.0).score, 7);
        assert_eq!(classify(-5.0).score, 7);
    }

    #[test]
    fn test_slightly_weak() {
        assert_eq!(classify(-4.0).score, 6);
        assert_eq!(classify(-2.1).score, 6);
    }

    #[test]
    fn test_stable_band_includes_both_bounds() {
        assert_eq!(classify(-1.0).score, 5);
        assert_eq!(classify(0.0).score, 5);
        assert_eq!(classify(2.0).score, 5);
    }

    #[test]
    fn test_rising_dollar() {
        assert_eq!(classify(2.01).score, 3);
        assert_eq!(classify(5.0).score, 3);
    }

    #[test]
    fn test_strong_dollar() {
        let result = classify(6.5);
        assert_eq!(result.score, 1);
        assert_eq!(result.color, ColorClass::Red);
    }
}
