//! Rule-based trading strategies.
//!
//! Five independent rules, each pure over a shared context. A rule
//! returning `None` means "not applicable now"; several rules may fire
//! concurrently. The precision label on each rule is fixed historical
//! metadata from 2023-2025 backtests, not a computed statistic.

use crate::types::{NamedSignal, SignalKind, SignalStrength, StrategySignal};

/// Inputs shared by all strategy rules for one evaluation.
#[derive(Debug, Clone, Copy)]
pub struct StrategyContext {
    /// Fear & Greed index value, 0-100.
    pub sentiment: f64,
    /// Percentage distance below the all-time high.
    pub peak_distance: f64,
    /// M2 YoY growth, percent.
    pub m2_growth: f64,
    /// Rounded Trading composite value.
    pub trading_score: f64,
    /// Rounded Macro composite value.
    pub macro_score: f64,
}

impl StrategyContext {
    /// Average of the two composite values.
    pub fn combined_score(&self) -> f64 {
        (self.trading_score + self.macro_score) / 2.0
    }
}

/// A rule that may emit a discrete recommended action.
pub trait Strategy: Send + Sync {
    /// Display name of the rule.
    fn name(&self) -> &'static str;

    /// Fixed historical-precision label.
    fn precision(&self) -> &'static str;

    /// Evaluate the rule; `None` when not applicable.
    fn evaluate(&self, ctx: &StrategyContext) -> Option<StrategySignal>;
}

/// Strategy 1: Fear & Greed extremes.
pub struct SentimentExtremes;

impl Strategy for SentimentExtremes {
    fn name(&self) -> &'static str {
        "Fear & Greed Extremes"
    }

    fn precision(&self) -> &'static str {
        "73%"
    }

    fn evaluate(&self, ctx: &StrategyContext) -> Option<StrategySignal> {
        if ctx.sentiment < 25.0 {
            Some(StrategySignal {
                kind: SignalKind::Buy,
                strength: SignalStrength::Strong,
                action: "Acheter 30-40% de votre allocation".to_string(),
                reason: "Peur extrême - Zone d'accumulation historique".to_string(),
                entry_level: Some("Immédiat".to_string()),
                precision: self.precision().to_string(),
                details: None,
            })
        } else if ctx.sentiment > 75.0 {
            Some(StrategySignal {
                kind: SignalKind::Sell,
                strength: SignalStrength::Strong,
                action: "Prendre 50-70% de profits".to_string(),
                reason: "Cupidité extrême - Zone de surévaluation".to_string(),
                entry_level: Some("Immédiat".to_string()),
                precision: self.precision().to_string(),
                details: None,
            })
        } else {
            None
        }
    }
}

/// Strategy 2: peak distance + fear combo.
pub struct PeakFearCombo;

impl Strategy for PeakFearCombo {
    fn name(&self) -> &'static str {
        "Distance ATH + Fear"
    }

    fn precision(&self) -> &'static str {
        "78%"
    }

    fn evaluate(&self, ctx: &StrategyContext) -> Option<StrategySignal> {
        if ctx.peak_distance > 20.0 && ctx.sentiment < 30.0 {
            Some(StrategySignal {
                kind: SignalKind::Buy,
                strength: SignalStrength::VeryStrong,
                action: "Acheter 40-50% de votre allocation".to_string(),
                reason: "Double confirmation: ATH distant + Peur".to_string(),
                entry_level: Some("Zone d'accumulation idéale".to_string()),
                precision: self.precision().to_string(),
                details: None,
            })
        } else if ctx.peak_distance < 5.0 && ctx.sentiment > 70.0 {
            Some(StrategySignal {
                kind: SignalKind::Sell,
                strength: SignalStrength::Strong,
                action: "Sécuriser 60-80% des gains".to_string(),
                reason: "Double alerte: Proche ATH + Cupidité".to_string(),
                entry_level: Some("Zone de prise de profit".to_string()),
                precision: self.precision().to_string(),
                details: None,
            })
        } else {
            None
        }
    }
}

/// Strategy 3: M2 lead indicator (70-107 day lag on the medium horizon).
pub struct MoneySupplyLead;

impl Strategy for MoneySupplyLead {
    fn name(&self) -> &'static str {
        "M2 Lead Indicator"
    }

    fn precision(&self) -> &'static str {
        "81%"
    }

    fn evaluate(&self, ctx: &StrategyContext) -> Option<StrategySignal> {
        if ctx.m2_growth > 6.0 {
            Some(StrategySignal {
                kind: SignalKind::Accumulate,
                strength: SignalStrength::Medium,
                action: "Accumulation progressive sur 1-3 mois".to_string(),
                reason: "M2 en forte expansion (impact dans 70-107j)".to_string(),
                entry_level: Some("DCA renforcé".to_string()),
                precision: self.precision().to_string(),
                details: None,
            })
        } else if ctx.m2_growth < 1.0 {
            Some(StrategySignal {
                kind: SignalKind::Reduce,
                strength: SignalStrength::Medium,
                action: "Réduire exposition de 30-40%".to_string(),
                reason: "M2 stagnant - Risque baisse moyen terme".to_string(),
                entry_level: Some("Sortie progressive".to_string()),
                precision: self.precision().to_string(),
                details: None,
            })
        } else {
            None
        }
    }
}

/// Strategy 4: score confluence. The three conditions are checked in a
/// fixed order and the first match wins.
pub struct ScoreConfluence;

impl Strategy for ScoreConfluence {
    fn name(&self) -> &'static str {
        "Score Confluence"
    }

    fn precision(&self) -> &'static str {
        "76%"
    }

    fn evaluate(&self, ctx: &StrategyContext) -> Option<StrategySignal> {
        let scores = format!(
            "Scores: Trading {}/10, Macro {}/10",
            ctx.trading_score, ctx.macro_score
        );

        if ctx.trading_score >= 7.0 && ctx.macro_score >= 7.0 {
            Some(StrategySignal {
                kind: SignalKind::Buy,
                strength: SignalStrength::VeryStrong,
                action: "Acheter 50-60% de votre allocation".to_string(),
                reason: "Double confirmation Trading + Macro".to_string(),
                entry_level: Some("Configuration optimale".to_string()),
                precision: self.precision().to_string(),
                details: Some(scores),
            })
        } else if ctx.trading_score < 4.0 && ctx.macro_score < 5.0 {
            Some(StrategySignal {
                kind: SignalKind::Sell,
                strength: SignalStrength::Strong,
                action: "Réduire exposition de 40-60%".to_string(),
                reason: "Double alerte négative".to_string(),
                entry_level: Some("Sortie recommandée".to_string()),
                precision: self.precision().to_string(),
                details: Some(scores),
            })
        } else if (ctx.trading_score - ctx.macro_score).abs() > 3.0 {
            Some(StrategySignal {
                kind: SignalKind::Hold,
                strength: SignalStrength::Neutral,
                action: "Conserver positions actuelles".to_string(),
                reason: "Signaux divergents - Attendre confirmation".to_string(),
                entry_level: Some("Observation".to_string()),
                precision: self.precision().to_string(),
                details: Some(format!(
                    "Scores divergents: Trading {}/10, Macro {}/10",
                    ctx.trading_score, ctx.macro_score
                )),
            })
        } else {
            None
        }
    }
}

/// Strategy 5: smart DCA cadence. Exhaustive over the combined score, so
/// this rule always applies.
pub struct SmartDca;

impl Strategy for SmartDca {
    fn name(&self) -> &'static str {
        "Smart DCA"
    }

    fn precision(&self) -> &'static str {
        "70%"
    }

    fn evaluate(&self, ctx: &StrategyContext) -> Option<StrategySignal> {
        let combined = ctx.combined_score();
        let details = Some(format!("Score global: {:.1}/10", combined));

        if combined > 7.0 {
            Some(StrategySignal {
                kind: SignalKind::DcaIncrease,
                strength: SignalStrength::Medium,
                action: "Augmenter DCA de 50-100%".to_string(),
                reason: "Conditions favorables - DCA renforcé".to_string(),
                entry_level: Some("Achats réguliers augmentés".to_string()),
                precision: self.precision().to_string(),
                details,
            })
        } else if combined >= 5.0 {
            Some(StrategySignal {
                kind: SignalKind::DcaNormal,
                strength: SignalStrength::Neutral,
                action: "Maintenir DCA actuel".to_string(),
                reason: "Conditions neutres - DCA standard".to_string(),
                entry_level: Some("Achats réguliers normaux".to_string()),
                precision: self.precision().to_string(),
                details,
            })
        } else {
            Some(StrategySignal {
                kind: SignalKind::DcaReduce,
                strength: SignalStrength::Medium,
                action: "Réduire DCA de 30-50%".to_string(),
                reason: "Conditions défavorables - DCA réduit".to_string(),
                entry_level: Some("Achats réguliers diminués".to_string()),
                precision: self.precision().to_string(),
                details,
            })
        }
    }
}

/// All strategy rules in their fixed registration order. The order is
/// load-bearing: the aggregator's stable sort keeps it on strength ties.
pub fn all_strategies() -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(SentimentExtremes),
        Box::new(PeakFearCombo),
        Box::new(MoneySupplyLead),
        Box::new(ScoreConfluence),
        Box::new(SmartDca),
    ]
}

/// Evaluate every rule against the context, collecting the ones that fire.
pub fn evaluate_all(ctx: &StrategyContext) -> Vec<NamedSignal> {
    all_strategies()
        .iter()
        .filter_map(|strategy| {
            strategy.evaluate(ctx).map(|signal| NamedSignal {
                name: strategy.name().to_string(),
                signal,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(
        sentiment: f64,
        peak_distance: f64,
        m2_growth: f64,
        trading: f64,
        macro_s: f64,
    ) -> StrategyContext {
        StrategyContext {
            sentiment,
            peak_distance,
            m2_growth,
            trading_score: trading,
            macro_score: macro_s,
        }
    }

    #[test]
    fn test_sentiment_extremes_buy() {
        let signal = SentimentExtremes.evaluate(&ctx(24.0, 10.0, 3.0, 5.0, 5.0)).unwrap();
        assert_eq!(signal.kind, SignalKind::Buy);
        assert_eq!(signal.strength, SignalStrength::Strong);
        assert_eq!(signal.precision, "73%");
    }

    #[test]
    fn test_sentiment_extremes_sell() {
        let signal = SentimentExtremes.evaluate(&ctx(76.0, 10.0, 3.0, 5.0, 5.0)).unwrap();
        assert_eq!(signal.kind, SignalKind::Sell);
        assert_eq!(signal.strength, SignalStrength::Strong);
    }

    #[test]
    fn test_sentiment_extremes_inapplicable_at_bounds() {
        assert!(SentimentExtremes.evaluate(&ctx(25.0, 10.0, 3.0, 5.0, 5.0)).is_none());
        assert!(SentimentExtremes.evaluate(&ctx(75.0, 10.0, 3.0, 5.0, 5.0)).is_none());
    }

    #[test]
    fn test_peak_fear_combo_very_strong_buy() {
        let signal = PeakFearCombo.evaluate(&ctx(25.0, 25.0, 3.0, 5.0, 5.0)).unwrap();
        assert_eq!(signal.kind, SignalKind::Buy);
        assert_eq!(signal.strength, SignalStrength::VeryStrong);
    }

    #[test]
    fn test_peak_fear_combo_sell_near_peak() {
        let signal = PeakFearCombo.evaluate(&ctx(72.0, 3.0, 3.0, 5.0, 5.0)).unwrap();
        assert_eq!(signal.kind, SignalKind::Sell);
        assert_eq!(signal.strength, SignalStrength::Strong);
    }

    #[test]
    fn test_peak_fear_combo_single_condition_not_enough() {
        // Deep discount alone, without fear, does not fire.
        assert!(PeakFearCombo.evaluate(&ctx(50.0, 25.0, 3.0, 5.0, 5.0)).is_none());
        // Fear alone, near the peak, does not fire the buy branch.
        assert!(PeakFearCombo.evaluate(&ctx(25.0, 10.0, 3.0, 5.0, 5.0)).is_none());
    }

    #[test]
    fn test_money_supply_lead() {
        let accumulate = MoneySupplyLead.evaluate(&ctx(50.0, 10.0, 6.5, 5.0, 5.0)).unwrap();
        assert_eq!(accumulate.kind, SignalKind::Accumulate);
        assert_eq!(accumulate.strength, SignalStrength::Medium);

        let reduce = MoneySupplyLead.evaluate(&ctx(50.0, 10.0, 0.5, 5.0, 5.0)).unwrap();
        assert_eq!(reduce.kind, SignalKind::Reduce);

        assert!(MoneySupplyLead.evaluate(&ctx(50.0, 10.0, 3.9, 5.0, 5.0)).is_none());
    }

    #[test]
    fn test_confluence_double_confirmation() {
        let signal = ScoreConfluence.evaluate(&ctx(50.0, 10.0, 3.0, 8.0, 7.5)).unwrap();
        assert_eq!(signal.kind, SignalKind::Buy);
        assert_eq!(signal.strength, SignalStrength::VeryStrong);
        assert!(signal.details.as_deref().unwrap().contains("8"));
    }

    #[test]
    fn test_confluence_double_alert() {
        let signal = ScoreConfluence.evaluate(&ctx(50.0, 10.0, 3.0, 3.0, 4.0)).unwrap();
        assert_eq!(signal.kind, SignalKind::Sell);
        assert_eq!(signal.strength, SignalStrength::Strong);
    }

    #[test]
    fn test_confluence_divergence_checked_last() {
        // 9 vs 3: not a buy (macro < 7), not a sell (trading not < 4),
        // divergence 6 > 3 -> HOLD.
        let signal = ScoreConfluence.evaluate(&ctx(50.0, 10.0, 3.0, 9.0, 3.0)).unwrap();
        assert_eq!(signal.kind, SignalKind::Hold);
        assert_eq!(signal.strength, SignalStrength::Neutral);
        assert!(signal.details.as_deref().unwrap().starts_with("Scores divergents"));
    }

    #[test]
    fn test_confluence_inapplicable() {
        assert!(ScoreConfluence.evaluate(&ctx(50.0, 10.0, 3.0, 5.5, 5.0)).is_none());
    }

    #[test]
    fn test_smart_dca_is_exhaustive() {
        let increase = SmartDca.evaluate(&ctx(50.0, 10.0, 3.0, 8.0, 7.0)).unwrap();
        assert_eq!(increase.kind, SignalKind::DcaIncrease);

        let normal = SmartDca.evaluate(&ctx(50.0, 10.0, 3.0, 6.0, 5.0)).unwrap();
        assert_eq!(normal.kind, SignalKind::DcaNormal);
        assert_eq!(normal.strength, SignalStrength::Neutral);

        let reduce = SmartDca.evaluate(&ctx(50.0, 10.0, 3.0, 4.0, 4.0)).unwrap();
        assert_eq!(reduce.kind, SignalKind::DcaReduce);
    }

    #[test]
    fn test_smart_dca_boundary_values() {
        // combined == 7.0 belongs to the normal band, == 5.0 as well.
        let at_seven = SmartDca.evaluate(&ctx(50.0, 10.0, 3.0, 7.0, 7.0)).unwrap();
        assert_eq!(at_seven.kind, SignalKind::DcaNormal);

        let at_five = SmartDca.evaluate(&ctx(50.0, 10.0, 3.0, 5.0, 5.0)).unwrap();
        assert_eq!(at_five.kind, SignalKind::DcaNormal);
    }

    #[test]
    fn test_evaluate_all_neutral_market_only_dca_fires() {
        let signals = evaluate_all(&ctx(50.0, 10.0, 3.9, 5.3, 5.1));
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].name, "Smart DCA");
    }

    #[test]
    fn test_evaluate_all_keeps_rule_order() {
        // Fearful, discounted, expanding market: rules 1, 2, 3, 4 and 5 all fire.
        let signals = evaluate_all(&ctx(20.0, 30.0, 7.0, 7.5, 7.2));
        let names: Vec<&str> = signals.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Fear & Greed Extremes",
                "Distance ATH + Fear",
                "M2 Lead Indicator",
                "Score Confluence",
                "Smart DCA"
            ]
        );
    }
}
