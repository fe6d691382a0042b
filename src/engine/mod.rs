//! The scoring-and-signal engine.
//!
//! One full evaluation turns a validated [`MetricSet`] into a
//! [`CycleResult`]: six indicator classifications, the Trading and Macro
//! composites, the strategy signals, the primary selection and the
//! global synthesis. Everything here is synchronous and pure apart from
//! the evaluation timestamp; the stateful collaborators (notification
//! gate, history store) live in `services`.

pub mod aggregator;
pub mod classifiers;
pub mod scoring;
pub mod strategies;
pub mod synthesis;

use crate::error::EngineError;
use crate::types::{CycleResult, IndicatorSet, MetricSet};
use strategies::StrategyContext;

/// Reject metric sets the classifiers cannot meaningfully score.
///
/// A non-finite field aborts the whole cycle rather than classifying
/// garbage; the error names the offending field so the caller can
/// surface it. A zero or negative peak price would make the distance
/// computation meaningless and is rejected the same way.
pub fn validate(metrics: &MetricSet) -> Result<(), EngineError> {
    for (field, metric) in metrics.fields() {
        if !metric.value.is_finite() {
            return Err(EngineError::InvalidMetric {
                field,
                value: metric.value,
            });
        }
    }
    if metrics.peak_price.value <= 0.0 {
        return Err(EngineError::InvalidMetric {
            field: "peakPrice",
            value: metrics.peak_price.value,
        });
    }
    Ok(())
}

/// Run one full evaluation cycle over a metric set.
pub fn evaluate(metrics: &MetricSet) -> Result<CycleResult, EngineError> {
    validate(metrics)?;

    let indicators = IndicatorSet {
        sentiment: classifiers::sentiment::classify(metrics.sentiment_value.value),
        peak_distance: classifiers::peak_distance::classify(
            metrics.current_price.value,
            metrics.peak_price.value,
        ),
        money_supply: classifiers::money_supply::classify(metrics.money_supply_growth_pct.value),
        dollar_index: classifiers::dollar_index::classify(metrics.dollar_index_trend_pct.value),
        etf_flows: classifiers::etf_flows::classify(metrics.etf_flow_score.value),
        stablecoin_ratio: classifiers::stablecoin_ratio::classify(
            metrics.stablecoin_ratio_pct.value,
        ),
    };

    let trading = scoring::trading_score(
        indicators.sentiment.score,
        indicators.peak_distance.score,
        indicators.dollar_index.score,
        indicators.etf_flows.score,
    );
    let macro_score = scoring::macro_score(
        indicators.money_supply.score,
        indicators.stablecoin_ratio.score,
        indicators.dollar_index.score,
    );

    let ctx = StrategyContext {
        sentiment: metrics.sentiment_value.value,
        peak_distance: metrics.peak_distance_pct(),
        m2_growth: metrics.money_supply_growth_pct.value,
        trading_score: trading.value,
        macro_score: macro_score.value,
    };

    let signals = strategies::evaluate_all(&ctx);
    let primary = aggregator::aggregate(signals.clone());
    let synthesis = synthesis::synthesize(&trading, &macro_score);

    Ok(CycleResult {
        evaluated_at: chrono::Utc::now().timestamp_millis(),
        metrics: metrics.clone(),
        indicators,
        trading,
        macro_score,
        synthesis,
        signals,
        primary,
    })
}
