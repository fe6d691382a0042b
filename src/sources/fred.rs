use chrono::{Duration as ChronoDuration, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

const FRED_BASE_URL: &str = "https://api.stlouisfed.org/fred";
// M2 Money Stock, seasonally adjusted, monthly.
const M2_SERIES_ID: &str = "M2SL";

// Liquidity changes take roughly 70-107 days to show up in BTC price;
// 84 is the midpoint used for the projected impact date.
const IMPACT_LAG_DAYS: i64 = 84;

// Hand-refreshed estimates used when no API key is configured or the
// request fails with no prior live value.
const FALLBACK_CURRENT: f64 = 21_080.0;
const FALLBACK_YEAR_AGO: f64 = 20_280.0;
const FALLBACK_GROWTH: f64 = 3.9;
const FALLBACK_DATE: &str = "2024-11-01";

/// M2 money supply reading with its year-over-year growth.
#[derive(Debug, Clone, PartialEq)]
pub struct MoneySupplySnapshot {
    /// Latest M2 level, billions USD.
    pub current: f64,
    /// M2 level twelve months earlier, billions USD.
    pub year_ago: f64,
    /// Year-over-year growth, percent, two decimals.
    pub growth_pct: f64,
    /// Observation date of the latest value, `YYYY-MM-DD`.
    pub date: String,
    /// Projected date the liquidity change reaches BTC price.
    pub impact_date: String,
    pub is_estimate: bool,
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

/// FRED client for the M2 money supply series.
pub struct FredClient {
    client: Client,
    api_key: Option<String>,
    last_known: Mutex<Option<MoneySupplySnapshot>>,
}

impl FredClient {
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .user_agent("Omen/1.0 (Bitcoin Signal Engine)")
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key,
            last_known: Mutex::new(None),
        }
    }

    /// Fetch the latest M2 snapshot. Without an API key, or on failure
    /// with no prior live value, returns the hard-coded estimates.
    pub async fn fetch(&self) -> MoneySupplySnapshot {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => {
                warn!("FRED API key not configured, using fallback M2 data");
                return self.fallback();
            }
        };

        match self.fetch_live(&api_key).await {
            Ok(snapshot) => {
                debug!(
                    "FRED M2: {} (YoY {:.2}%)",
                    snapshot.current, snapshot.growth_pct
                );
                let mut last = self.last_known.lock().unwrap();
                *last = Some(snapshot.clone());
                snapshot
            }
            Err(e) => {
                warn!("FRED fetch failed: {}, using fallback", e);
                self.fallback()
            }
        }
    }

    async fn fetch_live(&self, api_key: &str) -> anyhow::Result<MoneySupplySnapshot> {
        // 13 monthly observations, newest first: index 0 is the latest,
        // index 12 is the same month a year earlier.
        let url = format!(
            "{}/series/observations?series_id={}&api_key={}&file_type=json&sort_order=desc&limit=13",
            FRED_BASE_URL, M2_SERIES_ID, api_key
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("FRED API error: {}", response.status()));
        }

        let body: ObservationsResponse = response.json().await?;
        if body.observations.len() < 13 {
            return Err(anyhow::anyhow!(
                "Insufficient M2 data from FRED: {} observations",
                body.observations.len()
            ));
        }

        let current: f64 = body.observations[0].value.parse()?;
        let year_ago: f64 = body.observations[12].value.parse()?;
        let date = body.observations[0].date.clone();

        let growth = ((current - year_ago) / year_ago) * 100.0;
        let growth_pct = (growth * 100.0).round() / 100.0;

        Ok(MoneySupplySnapshot {
            current,
            year_ago,
            growth_pct,
            impact_date: impact_date(&date),
            date,
            is_estimate: false,
        })
    }

    fn fallback(&self) -> MoneySupplySnapshot {
        let last = self.last_known.lock().unwrap();
        match last.as_ref() {
            Some(snapshot) => MoneySupplySnapshot {
                is_estimate: true,
                ..snapshot.clone()
            },
            None => MoneySupplySnapshot {
                current: FALLBACK_CURRENT,
                year_ago: FALLBACK_YEAR_AGO,
                growth_pct: FALLBACK_GROWTH,
                date: FALLBACK_DATE.to_string(),
                impact_date: impact_date(FALLBACK_DATE),
                is_estimate: true,
            },
        }
    }
}

/// Observation date plus the liquidity lag, `YYYY-MM-DD`.
fn impact_date(observation_date: &str) -> String {
    NaiveDate::parse_from_str(observation_date, "%Y-%m-%d")
        .map(|d| (d + ChronoDuration::days(IMPACT_LAG_DAYS)).format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| observation_date.to_string())
}
