//! Global synthesis: blends the Trading and Macro composites into one
//! risk profile and a 90-day appreciation probability estimate.

use crate::types::{ColorClass, CompositeScore, Synthesis};

/// Parse the lower bound of a probability range string.
///
/// "75-80%" -> 75, "< 40%" -> 40 (the first numeric token, matching how
/// the bands were calibrated; an open "< X%" range intentionally reads
/// as X, not a worst case).
pub fn probability_lower_bound(range: &str) -> Option<f64> {
    let start = range.find(|c: char| c.is_ascii_digit())?;
    let token: String = range[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    token.parse().ok()
}

/// Blend the two composites. The probability weighting favors the macro
/// horizon (40% trading, 60% macro) for strategic sizing.
pub fn synthesize(trading: &CompositeScore, macro_score: &CompositeScore) -> Synthesis {
    let avg = (trading.value + macro_score.value) / 2.0;
    let average_score = (avg * 10.0).round() / 10.0;

    let (risk_label, color) = if avg >= 7.0 {
        (
            "Favorable - Configuration optimale court & moyen terme",
            ColorClass::Green,
        )
    } else if avg >= 5.5 {
        ("Modéré - Opportunités sélectives", ColorClass::Yellow)
    } else if avg >= 4.0 {
        ("Mitigé - Prudence recommandée", ColorClass::Orange)
    } else {
        ("Défavorable - Conditions difficiles", ColorClass::Red)
    };

    let trading_prob = probability_lower_bound(&trading.probability).unwrap_or(0.0);
    let macro_prob = probability_lower_bound(&macro_score.probability).unwrap_or(0.0);
    let probability_pct = (trading_prob * 0.4 + macro_prob * 0.6).round() as u32;

    Synthesis {
        risk_label: risk_label.to_string(),
        color,
        average_score,
        probability_pct,
    }
}
