use std::env;

/// Manually-curated metric values with their default estimates.
///
/// DXY, SSR and ETF flows have no free machine-readable feed; the
/// defaults are refreshed by hand (DXY/ETF weekly, SSR monthly) and can
/// be overridden per deployment via environment variables.
#[derive(Debug, Clone)]
pub struct ManualMetricsConfig {
    /// Current DXY value.
    pub dxy_value: f64,
    /// DXY 6-month percentage change.
    pub dxy_trend_6m: f64,
    /// Date the DXY numbers were last curated.
    pub dxy_date: String,
    /// Stablecoin supply ratio, percent.
    pub ssr_value: f64,
    /// Date the SSR number was last curated.
    pub ssr_date: String,
    /// ETF flow score, -5 to +5.
    pub etf_flow_score: f64,
    /// Date the ETF score was last curated.
    pub etf_date: String,
}

impl Default for ManualMetricsConfig {
    fn default() -> Self {
        Self {
            dxy_value: 108.5,
            dxy_trend_6m: -2.1,
            dxy_date: "2025-12-28".to_string(),
            ssr_value: 18.2,
            ssr_date: "2025-11-30".to_string(),
            etf_flow_score: 3.0,
            etf_date: "2025-12-28".to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// FRED API key for M2 money supply data (fallback estimates used
    /// when absent).
    pub fred_api_key: Option<String>,
    /// Webhook URL for signal notifications. Unset disables dispatch;
    /// the gate still runs and marks intentionally-skipped sends.
    pub notify_webhook_url: Option<String>,
    /// Path to the SQLite history database.
    pub history_db_path: String,
    /// Notification cool-down in milliseconds (default 4 hours).
    pub notify_cooldown_ms: i64,
    /// Fast metric refresh cadence (price), seconds.
    pub price_refresh_secs: u64,
    /// Sentiment refresh cadence, seconds.
    pub sentiment_refresh_secs: u64,
    /// Money supply refresh cadence, seconds.
    pub money_supply_refresh_secs: u64,
    /// Manually-curated metric values.
    pub manual: ManualMetricsConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = ManualMetricsConfig::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3002),
            fred_api_key: env::var("FRED_API_KEY").ok(),
            notify_webhook_url: env::var("NOTIFY_WEBHOOK_URL").ok(),
            history_db_path: env::var("HISTORY_DB_PATH")
                .unwrap_or_else(|_| "omen.db".to_string()),
            notify_cooldown_ms: env::var("NOTIFY_COOLDOWN_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(4 * 60 * 60 * 1000),
            price_refresh_secs: env::var("PRICE_REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            sentiment_refresh_secs: env::var("SENTIMENT_REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            money_supply_refresh_secs: env::var("MONEY_SUPPLY_REFRESH_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(86_400),
            manual: ManualMetricsConfig {
                dxy_value: env::var("DXY_VALUE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.dxy_value),
                dxy_trend_6m: env::var("DXY_TREND_6M")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.dxy_trend_6m),
                dxy_date: env::var("DXY_DATE").unwrap_or(defaults.dxy_date),
                ssr_value: env::var("SSR_VALUE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.ssr_value),
                ssr_date: env::var("SSR_DATE").unwrap_or(defaults.ssr_date),
                etf_flow_score: env::var("ETF_FLOW_SCORE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.etf_flow_score),
                etf_date: env::var("ETF_DATE").unwrap_or(defaults.etf_date),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
