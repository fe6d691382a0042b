use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

// Hand-refreshed estimates used when CoinGecko is unreachable and no
// live value has been seen yet.
const FALLBACK_PRICE: f64 = 95_000.0;
const FALLBACK_ATH: f64 = 108_268.0;

/// Current Bitcoin market data.
#[derive(Debug, Clone, PartialEq)]
pub struct BitcoinSnapshot {
    pub price: f64,
    pub change_24h: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    /// All-time-high price in USD.
    pub ath: f64,
    pub is_estimate: bool,
}

#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: Option<f64>,
    usd_market_cap: Option<f64>,
    usd_24h_vol: Option<f64>,
    usd_24h_change: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CoinDetail {
    market_data: CoinMarketData,
}

#[derive(Debug, Deserialize)]
struct CoinMarketData {
    ath: HashMap<String, f64>,
}

/// CoinGecko REST client for BTC price and all-time-high data.
pub struct CoinGeckoClient {
    client: Client,
    last_known: Mutex<Option<BitcoinSnapshot>>,
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("Omen/1.0 (Bitcoin Signal Engine)")
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            last_known: Mutex::new(None),
        }
    }

    /// Fetch the current BTC snapshot. On failure, falls back to the
    /// last live value, then to hard-coded estimates.
    pub async fn fetch(&self) -> BitcoinSnapshot {
        match self.fetch_live().await {
            Ok(snapshot) => {
                debug!("CoinGecko BTC price: ${}", snapshot.price);
                let mut last = self.last_known.lock().unwrap();
                *last = Some(snapshot.clone());
                snapshot
            }
            Err(e) => {
                warn!("CoinGecko fetch failed: {}, using fallback", e);
                self.fallback()
            }
        }
    }

    async fn fetch_live(&self) -> anyhow::Result<BitcoinSnapshot> {
        let url = format!(
            "{}/simple/price?ids=bitcoin&vs_currencies=usd&include_market_cap=true&include_24hr_vol=true&include_24hr_change=true",
            COINGECKO_API_URL
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("CoinGecko API error: {}", response.status()));
        }

        let prices: HashMap<String, SimplePrice> = response.json().await?;
        let btc = prices
            .get("bitcoin")
            .ok_or_else(|| anyhow::anyhow!("Missing bitcoin entry in CoinGecko response"))?;
        let price = btc
            .usd
            .ok_or_else(|| anyhow::anyhow!("Missing USD price in CoinGecko response"))?;

        // ATH comes from the coin detail endpoint.
        let detail_url = format!(
            "{}/coins/bitcoin?localization=false&tickers=false&community_data=false&developer_data=false",
            COINGECKO_API_URL
        );
        let detail: CoinDetail = self
            .client
            .get(&detail_url)
            .header("Accept", "application/json")
            .send()
            .await?
            .json()
            .await?;
        let ath = detail
            .market_data
            .ath
            .get("usd")
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Missing USD ATH in CoinGecko response"))?;

        Ok(BitcoinSnapshot {
            price,
            change_24h: btc.usd_24h_change.unwrap_or(0.0),
            market_cap: btc.usd_market_cap.unwrap_or(0.0),
            volume_24h: btc.usd_24h_vol.unwrap_or(0.0),
            ath,
            is_estimate: false,
        })
    }

    fn fallback(&self) -> BitcoinSnapshot {
        let last = self.last_known.lock().unwrap();
        match last.as_ref() {
            Some(snapshot) => BitcoinSnapshot {
                is_estimate: true,
                ..snapshot.clone()
            },
            None => BitcoinSnapshot {
                price: FALLBACK_PRICE,
                change_24h: 0.0,
                market_cap: 0.0,
                volume_24h: 0.0,
                ath: FALLBACK_ATH,
                is_estimate: true,
            },
        }
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_without_prior_value_uses_constants() {
        let client = CoinGeckoClient::new();
        let snapshot = client.fallback();
        assert!(snapshot.is_estimate);
        assert_eq!(snapshot.price, FALLBACK_PRICE);
        assert_eq!(snapshot.ath, FALLBACK_ATH);
    }

    #[test]
    fn test_fallback_prefers_last_known() {
        let client = CoinGeckoClient::new();
        {
            let mut last = client.last_known.lock().unwrap();
            *last = Some(BitcoinSnapshot {
                price: 101_000.0,
                change_24h: 1.2,
                market_cap: 2.0e12,
                volume_24h: 4.5e10,
                ath: 108_268.0,
                is_estimate: false,
            });
        }
        let snapshot = client.fallback();
        assert!(snapshot.is_estimate);
        assert_eq!(snapshot.price, 101_000.0);
    }
}
