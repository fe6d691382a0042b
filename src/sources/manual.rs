//! Manually-curated metrics: DXY, stablecoin supply ratio, ETF flows.
//!
//! None of these have a free machine-readable feed, so values come from
//! config (defaults overridable via env) and are always tagged as
//! estimates with their curation date as the source label.

use crate::config::ManualMetricsConfig;
use crate::types::Metric;

/// Curated metric provider backed by config.
pub struct ManualMetrics {
    config: ManualMetricsConfig,
}

impl ManualMetrics {
    pub fn new(config: ManualMetricsConfig) -> Self {
        Self { config }
    }

    /// DXY 6-month trend, percent. The source label carries the
    /// current index level alongside the curation date.
    pub fn dxy_trend(&self) -> Metric {
        Metric::new(self.config.dxy_trend_6m)
            .estimate()
            .from_source(&format!(
                "TradingView DXY {} ({})",
                self.config.dxy_value, self.config.dxy_date
            ))
    }

    /// Stablecoin supply ratio, percent.
    pub fn stablecoin_ratio(&self) -> Metric {
        Metric::new(self.config.ssr_value)
            .estimate()
            .from_source(&format!("CryptoQuant ({})", self.config.ssr_date))
    }

    /// ETF flow score, -5 to +5.
    pub fn etf_flow_score(&self) -> Metric {
        Metric::new(self.config.etf_flow_score)
            .estimate()
            .from_source(&format!("Farside Investors ({})", self.config.etf_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_metrics_are_estimates() {
        let metrics = ManualMetrics::new(ManualMetricsConfig::default());

        let dxy = metrics.dxy_trend();
        assert!(dxy.is_estimate);
        assert_eq!(dxy.value, -2.1);
        assert!(dxy.source.as_deref().unwrap().contains("TradingView"));

        let ssr = metrics.stablecoin_ratio();
        assert_eq!(ssr.value, 18.2);
        assert!(ssr.source.as_deref().unwrap().contains("CryptoQuant"));
        assert_eq!(metrics.etf_flow_score().value, 3.0);
    }
}
