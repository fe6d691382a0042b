//! Signal history, daily snapshots, and notification bookkeeping types.

use crate::types::{PrimarySignal, SignalKind, SignalStrength};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The last-notified signal, kept for the dedup decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub kind: SignalKind,
    pub strength: SignalStrength,
    /// Unix timestamp (milliseconds) when the notification was sent.
    pub sent_at: i64,
}

/// One entry in the append-only, time-bounded signal log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unix timestamp (milliseconds).
    pub timestamp: i64,
    /// ISO-8601 date-time of the entry.
    pub date: String,
    pub kind: SignalKind,
    pub strength: SignalStrength,
    pub action: String,
    pub reason: String,
    pub precision: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// BTC price at the time the signal fired.
    pub btc_price: f64,
}

impl HistoryEntry {
    /// Build an entry from a primary signal at a given time.
    pub fn from_signal(signal: &PrimarySignal, btc_price: f64, timestamp: i64) -> Self {
        let date = chrono::DateTime::from_timestamp_millis(timestamp)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();
        Self {
            timestamp,
            date,
            kind: signal.signal.kind,
            strength: signal.signal.strength,
            action: signal.signal.action.clone(),
            reason: signal.signal.reason.clone(),
            precision: signal.signal.precision.clone(),
            entry_level: signal.signal.entry_level.clone(),
            details: signal.signal.details.clone(),
            btc_price,
        }
    }
}

/// Date-keyed audit snapshot of the metrics and scores used in one
/// evaluation. One per calendar day; later writes overwrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySnapshot {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub price: f64,
    pub sentiment: f64,
    pub m2_growth: f64,
    pub dxy: f64,
    pub ssr: f64,
    pub etf: f64,
    pub trading_score: f64,
    pub macro_score: f64,
    /// Unix timestamp (milliseconds) of the write.
    pub timestamp: i64,
}

/// Aggregate statistics over a trailing window of history entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalStats {
    pub total: usize,
    /// Entry counts grouped by signal kind.
    pub by_kind: BTreeMap<String, u32>,
    /// Entry counts grouped by strength.
    pub by_strength: BTreeMap<String, u32>,
    /// Rounded average of parsed precision percentages; 0 when none parse.
    pub average_precision: u32,
}

impl SignalStats {
    pub fn empty() -> Self {
        Self {
            total: 0,
            by_kind: BTreeMap::new(),
            by_strength: BTreeMap::new(),
            average_precision: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrimarySignal;

    #[test]
    fn test_history_entry_from_signal() {
        let primary = PrimarySignal::default_hold();
        let entry = HistoryEntry::from_signal(&primary, 97_500.0, 1_700_000_000_000);
        assert_eq!(entry.kind, SignalKind::Hold);
        assert_eq!(entry.strength, SignalStrength::Neutral);
        assert_eq!(entry.btc_price, 97_500.0);
        assert!(entry.date.starts_with("2023-11-14"));
    }

    #[test]
    fn test_history_entry_round_trip() {
        let entry = HistoryEntry {
            timestamp: 1_700_000_000_000,
            date: "2023-11-14T22:13:20+00:00".to_string(),
            kind: SignalKind::Buy,
            strength: SignalStrength::VeryStrong,
            action: "Acheter 40-50% de votre allocation".to_string(),
            reason: "Double confirmation: ATH distant + Peur".to_string(),
            precision: "78%".to_string(),
            entry_level: Some("Zone d'accumulation idéale".to_string()),
            details: None,
            btc_price: 36_250.75,
        };
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_empty_stats() {
        let stats = SignalStats::empty();
        assert_eq!(stats.total, 0);
        assert!(stats.by_kind.is_empty());
        assert_eq!(stats.average_precision, 0);
    }
}
