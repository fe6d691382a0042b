//! Refresh orchestration: fetch metrics, evaluate, publish, notify,
//! snapshot.
//!
//! One service instance owns the fetchers and the latest published
//! `CycleResult`. Overlapping refresh triggers coalesce through an
//! `AtomicBool` guard, and a failed cycle leaves the previously
//! published result in place.

use crate::config::Config;
use crate::error::EngineError;
use crate::services::history::SignalHistory;
use crate::services::notifier::SignalNotifier;
use crate::sources::{CoinGeckoClient, FearGreedClient, FredClient, ManualMetrics};
use crate::types::{CycleResult, DailySnapshot, Metric, MetricSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

pub struct DashboardService {
    coingecko: CoinGeckoClient,
    feargreed: FearGreedClient,
    fred: FredClient,
    manual: ManualMetrics,
    notifier: Arc<SignalNotifier>,
    history: Arc<SignalHistory>,
    latest: RwLock<Option<CycleResult>>,
    in_flight: AtomicBool,
}

impl DashboardService {
    pub fn new(
        config: &Config,
        notifier: Arc<SignalNotifier>,
        history: Arc<SignalHistory>,
    ) -> Self {
        Self {
            coingecko: CoinGeckoClient::new(),
            feargreed: FearGreedClient::new(),
            fred: FredClient::new(config.fred_api_key.clone()),
            manual: ManualMetrics::new(config.manual.clone()),
            notifier,
            history,
            latest: RwLock::new(None),
            in_flight: AtomicBool::new(false),
        }
    }

    /// The latest published cycle result, if any cycle has succeeded.
    pub async fn latest(&self) -> Option<CycleResult> {
        self.latest.read().await.clone()
    }

    /// Run one refresh cycle. Concurrent callers coalesce: if a cycle
    /// is already in flight, this returns immediately without fetching.
    /// An `InvalidMetric` fault aborts only this cycle; the previously
    /// published result stays in place.
    pub async fn refresh(&self) -> Result<(), EngineError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            debug!("Refresh already in flight, coalescing");
            return Ok(());
        }

        let outcome = self.run_cycle().await;
        self.in_flight.store(false, Ordering::SeqCst);
        outcome
    }

    async fn run_cycle(&self) -> Result<(), EngineError> {
        let (btc, sentiment, m2) = tokio::join!(
            self.coingecko.fetch(),
            self.feargreed.fetch(),
            self.fred.fetch(),
        );

        let mut price = Metric::new(btc.price).from_source("CoinGecko");
        if btc.is_estimate {
            price = price.estimate();
        }
        let mut peak = Metric::new(btc.ath).from_source("CoinGecko");
        if btc.is_estimate {
            peak = peak.estimate();
        }
        let mut sentiment_metric = Metric::new(sentiment.value).from_source("Alternative.me");
        if sentiment.is_estimate {
            sentiment_metric = sentiment_metric.estimate();
        }
        let mut m2_metric = Metric::new(m2.growth_pct).from_source("FRED");
        if m2.is_estimate {
            m2_metric = m2_metric.estimate();
        }

        let metrics = MetricSet {
            sentiment_value: sentiment_metric,
            current_price: price,
            peak_price: peak,
            money_supply_growth_pct: m2_metric,
            dollar_index_trend_pct: self.manual.dxy_trend(),
            etf_flow_score: self.manual.etf_flow_score(),
            stablecoin_ratio_pct: self.manual.stablecoin_ratio(),
        };

        let result = match crate::engine::evaluate(&metrics) {
            Ok(result) => result,
            Err(e) => {
                // Previous result stays published.
                error!("Evaluation cycle rejected: {}", e);
                return Err(e);
            }
        };

        info!(
            trading = result.trading.value,
            macro_score = result.macro_score.value,
            primary = result.primary.signal.kind.as_str(),
            "Cycle evaluated"
        );

        {
            let mut latest = self.latest.write().await;
            *latest = Some(result.clone());
        }

        self.notifier.process(&result).await;
        self.save_snapshot(&result);

        Ok(())
    }

    fn save_snapshot(&self, result: &CycleResult) {
        let date = chrono::Utc::now().format("%Y-%m-%d").to_string();
        let snapshot = DailySnapshot {
            date,
            price: result.metrics.current_price.value,
            sentiment: result.metrics.sentiment_value.value,
            m2_growth: result.metrics.money_supply_growth_pct.value,
            dxy: result.metrics.dollar_index_trend_pct.value,
            ssr: result.metrics.stablecoin_ratio_pct.value,
            etf: result.metrics.etf_flow_score.value,
            trading_score: result.trading.value,
            macro_score: result.macro_score.value,
            timestamp: result.evaluated_at,
        };
        if let Err(e) = self.history.save_snapshot(&snapshot) {
            warn!("Failed to save daily snapshot: {}", e);
        }
    }

    /// Spawn the periodic refresh loops. All cadences funnel into the
    /// same coalesced refresh.
    pub fn spawn_cadences(self: Arc<Self>, config: &Config) {
        for (label, secs) in [
            ("price", config.price_refresh_secs),
            ("sentiment", config.sentiment_refresh_secs),
            ("money supply", config.money_supply_refresh_secs),
        ] {
            let service = Arc::clone(&self);
            tokio::spawn(async move {
                let mut interval =
                    tokio::time::interval(tokio::time::Duration::from_secs(secs));
                // First tick fires immediately; the startup refresh
                // already covered it.
                interval.tick().await;
                loop {
                    interval.tick().await;
                    if let Err(e) = service.refresh().await {
                        warn!("Scheduled refresh failed: {}", e);
                    }
                }
            });
            debug!("Spawned {} refresh cadence every {}s", label, secs);
        }
    }
}
