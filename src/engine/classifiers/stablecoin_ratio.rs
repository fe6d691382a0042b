//! Stablecoin supply ratio (SSR) classifier.
//!
//! SSR = stablecoin market cap / BTC market cap * 100. A low ratio means
//! abundant dry powder relative to BTC, historically a bottom signal.

use super::{classify_with, Band};
use crate::types::{ColorClass, IndicatorResult};

const BANDS: &[Band] = &[
    Band::incl(25.0, 3, "Faible liquidité", ColorClass::Orange),
    Band::incl(20.0, 5, "Liquidité modérée", ColorClass::Yellow),
    Band::incl(15.0, 7, "Forte liquidité stablecoin", ColorClass::Green),
    Band::incl(f64::NEG_INFINITY, 9, "SIGNAL BOTTOM historique", ColorClass::Green),
];

/// Classify a stablecoin supply ratio percentage.
pub fn classify(ratio_pct: f64) -> IndicatorResult {
    classify_with(BANDS, ratio_pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_signal() {
        let result = classify(12.0);
        assert_eq!(result.score, 9);
        assert_eq!(result.label, "SIGNAL BOTTOM historique");
    }

    #[test]
    fn test_strong_liquidity() {
        assert_eq!(classify(15.0).score, 7);
        assert_eq!(classify(18.2).score, 7);
        assert_eq!(classify(19.9).score, 7);
    }

    #[test]
    fn test_moderate_liquidity() {
        assert_eq!(classify(20.0).score, 5);
        assert_eq!(classify(24.9).score, 5);
    }

    #[test]
    fn test_weak_liquidity() {
        let result = classify(25.0);
        assert_eq!(result.score, 3);
        assert_eq!(result.color, ColorClass::Orange);
        assert_eq!(classify(40.0).score, 3);
    }
}
