use reqwest::Client;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

const FEAR_GREED_URL: &str = "https://api.alternative.me/fng/";

// Neutral midpoint used when the index has never been fetched.
const FALLBACK_VALUE: f64 = 50.0;

/// Fear & Greed index reading.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentReading {
    /// Index value, 0-100.
    pub value: f64,
    /// Textual classification from the provider (e.g., "Fear").
    pub classification: String,
    pub is_estimate: bool,
}

#[derive(Debug, Deserialize)]
struct FngResponse {
    data: Vec<FngEntry>,
}

#[derive(Debug, Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
}

/// Alternative.me Fear & Greed index client.
pub struct FearGreedClient {
    client: Client,
    last_known: Mutex<Option<SentimentReading>>,
}

impl FearGreedClient {
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

    /// Fetch the current index. On failure, falls back to the last live
    /// value, then to the neutral midpoint.
    pub async fn fetch(&self) -> SentimentReading {
        match self.fetch_live().await {
            Ok(reading) => {
                debug!(
                    "Fear & Greed index: {} ({})",
                    reading.value, reading.classification
                );
                let mut last = self.last_known.lock().unwrap();
                *last = Some(reading.clone());
                reading
            }
            Err(e) => {
                warn!("Fear & Greed fetch failed: {}, using fallback", e);
                self.fallback()
            }
        }
    }

    async fn fetch_live(&self) -> anyhow::Result<SentimentReading> {
        let url = format!("{}?limit=1", FEAR_GREED_URL);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Fear & Greed API error: {}",
                response.status()
            ));
        }

        let body: FngResponse = response.json().await?;
        let entry = body
            .data
            .first()
            .ok_or_else(|| anyhow::anyhow!("Empty Fear & Greed response"))?;
        let value: f64 = entry.value.parse()?;

        Ok(SentimentReading {
            value,
            classification: entry.value_classification.clone(),
            is_estimate: false,
        })
    }

    fn fallback(&self) -> SentimentReading {
        let last = self.last_known.lock().unwrap();
        match last.as_ref() {
            Some(reading) => SentimentReading {
                is_estimate: true,
                ..reading.clone()
            },
            None => SentimentReading {
                value: FALLBACK_VALUE,
                classification: "Neutral".to_string(),
                is_estimate: true,
            },
        }
    }
}

impl Default for FearGreedClient {
    fn default() -> Self {
        Self::new()
    }
}
