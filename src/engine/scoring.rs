//! Composite decision scorers.
//!
//! Two fixed-weight linear combinations of indicator scores, each mapped
//! to its own narrative band table. The Trading and Macro tables are kept
//! separate on purpose: probability ranges and action text are calibrated
//! per horizon, so the bands must not be parameterized generically.

use crate::error::EngineError;
use crate::types::{ColorClass, CompositeScore};

/// Trading composite weights: Fear & Greed 30%, peak distance 20%,
/// DXY 25%, ETF flows 25%.
pub const TRADING_WEIGHTS: [f64; 4] = [0.30, 0.20, 0.25, 0.25];

/// Macro composite weights: M2 40%, SSR 35%, DXY 25%.
pub const MACRO_WEIGHTS: [f64; 3] = [0.40, 0.35, 0.25];

struct ScoreBand {
    min: f64,
    label: &'static str,
    action: &'static str,
    probability: &'static str,
    color: ColorClass,
}

const TRADING_BANDS: &[ScoreBand] = &[
    ScoreBand {
        min: 7.5,
        label: "ACHAT FORT",
        action: "Zone d'achat idéale - Configuration très favorable",
        probability: "75-80%",
        color: ColorClass::Green,
    },
    ScoreBand {
        min: 6.0,
        label: "Achat",
        action: "Configuration favorable - Entrée progressive recommandée",
        probability: "60-70%",
        color: ColorClass::Green,
    },
    ScoreBand {
        min: 5.0,
        label: "Neutre-Bullish",
        action: "Attendre confirmation - Signal mixte",
        probability: "50-55%",
        color: ColorClass::Yellow,
    },
    ScoreBand {
        min: 4.0,
        label: "Neutre",
        action: "Pas de signal clair - Rester en observation",
        probability: "45-50%",
        color: ColorClass::Gray,
    },
    ScoreBand {
        min: f64::NEG_INFINITY,
        label: "Prudence",
        action: "Risque de correction - Éviter nouvelles entrées",
        probability: "< 40%",
        color: ColorClass::Red,
    },
];

const MACRO_BANDS: &[ScoreBand] = &[
    ScoreBand {
        min: 7.5,
        label: "EXPANSION FORTE",
        action: "Accumulation agressive - Conditions macro optimales",
        probability: "78-83%",
        color: ColorClass::Green,
    },
    ScoreBand {
        min: 6.0,
        label: "Expansion modérée",
        action: "Accumulation progressive - Fondamentaux favorables",
        probability: "65-75%",
        color: ColorClass::Green,
    },
    ScoreBand {
        min: 5.0,
        label: "Expansion faible",
        action: "Prudence - Fondamentaux macro mixtes",
        probability: "50-60%",
        color: ColorClass::Yellow,
    },
    ScoreBand {
        min: 4.0,
        label: "Stagnation",
        action: "Pas de catalyseur macro - Attendre amélioration",
        probability: "40-50%",
        color: ColorClass::Gray,
    },
    ScoreBand {
        min: f64::NEG_INFINITY,
        label: "Contraction",
        action: "Environnement défavorable - Réduire exposition",
        probability: "< 35%",
        color: ColorClass::Red,
    },
];

/// Round a weighted sum to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn band_for(bands: &[ScoreBand], value: f64) -> &ScoreBand {
    bands
        .iter()
        .find(|b| value >= b.min)
        .unwrap_or_else(|| bands.last().expect("band table is never empty"))
}

fn composite(bands: &[ScoreBand], weighted_sum: f64) -> CompositeScore {
    let value = round1(weighted_sum);
    let band = band_for(bands, value);
    CompositeScore {
        value,
        label: band.label.to_string(),
        action: band.action.to_string(),
        probability: band.probability.to_string(),
        color: band.color,
    }
}

/// Short-horizon Trading composite from four indicator scores.
pub fn trading_score(sentiment: u8, peak: u8, dxy: u8, etf: u8) -> CompositeScore {
    let sum = sentiment as f64 * TRADING_WEIGHTS[0]
        + peak as f64 * TRADING_WEIGHTS[1]
        + dxy as f64 * TRADING_WEIGHTS[2]
        + etf as f64 * TRADING_WEIGHTS[3];
    composite(TRADING_BANDS, sum)
}

/// Medium-horizon Macro composite from three indicator scores.
pub fn macro_score(m2: u8, ssr: u8, dxy: u8) -> CompositeScore {
    let sum = m2 as f64 * MACRO_WEIGHTS[0]
        + ssr as f64 * MACRO_WEIGHTS[1]
        + dxy as f64 * MACRO_WEIGHTS[2];
    composite(MACRO_BANDS, sum)
}

/// Verify both weight tables sum to 1.0. Run once at startup; a failure
/// here is a build defect, not a runtime condition.
pub fn verify_weights() -> Result<(), EngineError> {
    let trading_sum: f64 = TRADING_WEIGHTS.iter().sum();
    if (trading_sum - 1.0).abs() > 1e-9 {
        return Err(EngineError::WeightTable {
            name: "trading",
            sum: trading_sum,
        });
    }
    let macro_sum: f64 = MACRO_WEIGHTS.iter().sum();
    if (macro_sum - 1.0).abs() > 1e-9 {
        return Err(EngineError::WeightTable {
            name: "macro",
            sum: macro_sum,
        });
    }
    Ok(())
}
