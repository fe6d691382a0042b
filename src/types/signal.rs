//! Strategy signal types and the per-cycle evaluation result.

use crate::types::{ColorClass, CompositeScore, IndicatorSet, MetricSet};
use serde::{Deserialize, Serialize};

/// Discrete recommended action emitted by a strategy rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    Buy,
    Sell,
    Accumulate,
    Reduce,
    Hold,
    DcaIncrease,
    DcaNormal,
    DcaReduce,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Buy => "BUY",
            SignalKind::Sell => "SELL",
            SignalKind::Accumulate => "ACCUMULATE",
            SignalKind::Reduce => "REDUCE",
            SignalKind::Hold => "HOLD",
            SignalKind::DcaIncrease => "DCA_INCREASE",
            SignalKind::DcaNormal => "DCA_NORMAL",
            SignalKind::DcaReduce => "DCA_REDUCE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "BUY" => Some(SignalKind::Buy),
            "SELL" => Some(SignalKind::Sell),
            "ACCUMULATE" => Some(SignalKind::Accumulate),
            "REDUCE" => Some(SignalKind::Reduce),
            "HOLD" => Some(SignalKind::Hold),
            "DCA_INCREASE" => Some(SignalKind::DcaIncrease),
            "DCA_NORMAL" => Some(SignalKind::DcaNormal),
            "DCA_REDUCE" => Some(SignalKind::DcaReduce),
            _ => None,
        }
    }

    /// Display color for this action.
    pub fn color(&self) -> ColorClass {
        match self {
            SignalKind::Buy | SignalKind::DcaIncrease | SignalKind::Accumulate => ColorClass::Green,
            SignalKind::Sell => ColorClass::Red,
            SignalKind::Reduce => ColorClass::Orange,
            SignalKind::DcaReduce => ColorClass::Yellow,
            SignalKind::Hold | SignalKind::DcaNormal => ColorClass::Gray,
        }
    }
}

/// Strength of a strategy signal, totally ordered.
///
/// The rank is shared by the signal aggregator (primary selection) and
/// the notification gate (escalation check).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalStrength {
    VeryStrong,
    Strong,
    Medium,
    Neutral,
}

impl SignalStrength {
    /// Total-order rank: VERY_STRONG=4 > STRONG=3 > MEDIUM=2 > NEUTRAL=1.
    pub fn rank(&self) -> u8 {
        match self {
            SignalStrength::VeryStrong => 4,
            SignalStrength::Strong => 3,
            SignalStrength::Medium => 2,
            SignalStrength::Neutral => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalStrength::VeryStrong => "VERY_STRONG",
            SignalStrength::Strong => "STRONG",
            SignalStrength::Medium => "MEDIUM",
            SignalStrength::Neutral => "NEUTRAL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "VERY_STRONG" => Some(SignalStrength::VeryStrong),
            "STRONG" => Some(SignalStrength::Strong),
            "MEDIUM" => Some(SignalStrength::Medium),
            "NEUTRAL" => Some(SignalStrength::Neutral),
            _ => None,
        }
    }
}

/// A signal emitted by one strategy rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySignal {
    pub kind: SignalKind,
    pub strength: SignalStrength,
    /// Recommended action text.
    pub action: String,
    /// Why the rule fired.
    pub reason: String,
    /// Entry guidance, when the rule provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_level: Option<String>,
    /// Fixed historical-precision label for the rule (e.g., "73%").
    /// Static metadata, not a computed statistic.
    pub precision: String,
    /// Extra context (e.g., the scores that triggered the rule).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A strategy signal paired with the name of the rule that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedSignal {
    pub name: String,
    pub signal: StrategySignal,
}

/// The single recommended action of one evaluation cycle: the
/// highest-strength applicable strategy signal, or a neutral default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimarySignal {
    #[serde(flatten)]
    pub signal: StrategySignal,
    /// Number of strategies that fired this cycle.
    pub active_strategies: usize,
    pub color: ColorClass,
}

impl PrimarySignal {
    /// Fixed neutral default when no strategy applies.
    pub fn default_hold() -> Self {
        Self {
            signal: StrategySignal {
                kind: SignalKind::Hold,
                strength: SignalStrength::Neutral,
                action: "Aucun signal fort - Conserver positions".to_string(),
                reason: "Conditions de marché neutres".to_string(),
                entry_level: None,
                precision: String::new(),
                details: None,
            },
            active_strategies: 0,
            color: ColorClass::Gray,
        }
    }
}

/// Blended risk profile from the Trading and Macro composites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Synthesis {
    /// Overall risk-profile label.
    pub risk_label: String,
    pub color: ColorClass,
    /// Average of the two composite values, one decimal.
    pub average_score: f64,
    /// Blended appreciation probability, percent (40% trading, 60% macro).
    pub probability_pct: u32,
}

/// The full output of one evaluation cycle. Sole input to the
/// notification gate, the history store, and the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleResult {
    /// Unix timestamp (milliseconds) of the evaluation.
    pub evaluated_at: i64,
    /// The metric set the cycle was computed from.
    pub metrics: MetricSet,
    /// Per-indicator classification results.
    pub indicators: IndicatorSet,
    /// Short-horizon composite.
    pub trading: CompositeScore,
    /// Medium-horizon composite.
    #[serde(rename = "macro")]
    pub macro_score: CompositeScore,
    pub synthesis: Synthesis,
    /// All strategies that fired, in rule order.
    pub signals: Vec<NamedSignal>,
    pub primary: PrimarySignal,
}

/// Outbound notification payload handed to the dispatch channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyRequest {
    pub signal: PrimarySignal,
    pub btc_price: f64,
    /// Unix timestamp (milliseconds) of the dispatch attempt.
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_rank_total_order() {
        assert!(SignalStrength::VeryStrong.rank() > SignalStrength::Strong.rank());
        assert!(SignalStrength::Strong.rank() > SignalStrength::Medium.rank());
        assert!(SignalStrength::Medium.rank() > SignalStrength::Neutral.rank());
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&SignalKind::DcaIncrease).unwrap(),
            "\"DCA_INCREASE\""
        );
        let parsed: SignalKind = serde_json::from_str("\"BUY\"").unwrap();
        assert_eq!(parsed, SignalKind::Buy);
    }

    #[test]
    fn test_kind_str_round_trip() {
        for kind in [
            SignalKind::Buy,
            SignalKind::Sell,
            SignalKind::Accumulate,
            SignalKind::Reduce,
            SignalKind::Hold,
            SignalKind::DcaIncrease,
            SignalKind::DcaNormal,
            SignalKind::DcaReduce,
        ] {
            assert_eq!(SignalKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_strength_str_round_trip() {
        for strength in [
            SignalStrength::VeryStrong,
            SignalStrength::Strong,
            SignalStrength::Medium,
            SignalStrength::Neutral,
        ] {
            assert_eq!(SignalStrength::from_str(strength.as_str()), Some(strength));
        }
    }

    #[test]
    fn test_kind_colors() {
        assert_eq!(SignalKind::Buy.color(), ColorClass::Green);
        assert_eq!(SignalKind::Sell.color(), ColorClass::Red);
        assert_eq!(SignalKind::Reduce.color(), ColorClass::Orange);
        assert_eq!(SignalKind::DcaReduce.color(), ColorClass::Yellow);
        assert_eq!(SignalKind::Hold.color(), ColorClass::Gray);
    }

    #[test]
    fn test_default_hold() {
        let primary = PrimarySignal::default_hold();
        assert_eq!(primary.signal.kind, SignalKind::Hold);
        assert_eq!(primary.signal.strength, SignalStrength::Neutral);
        assert_eq!(primary.active_strategies, 0);
        assert_eq!(primary.color, ColorClass::Gray);
    }
}
