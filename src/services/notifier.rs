//! Notification gate and webhook dispatch.
//!
//! Only STRONG and VERY_STRONG primary signals are candidates; the gate
//! then deduplicates against the last notified signal with a cool-down.
//! The last-sent cell advances only on a confirmed send or an
//! intentional skip, so a transport failure retries on the next cycle.

use crate::services::history::SignalHistory;
use crate::types::{
    CycleResult, HistoryEntry, NotificationRecord, NotifyRequest, PrimarySignal, SignalStrength,
};
use reqwest::Client;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Whether `current` warrants a new notification given the last one sent.
///
/// Rules, in order: first signal ever notifies; a changed kind notifies;
/// an escalated strength notifies; anything inside the cool-down window
/// is suppressed; a stable signal past the cool-down stays suppressed
/// until its kind or strength changes.
pub fn should_notify(
    current: &PrimarySignal,
    last: Option<&NotificationRecord>,
    now_ms: i64,
    cooldown_ms: i64,
) -> bool {
    let last = match last {
        Some(record) => record,
        None => return true,
    };

    if current.signal.kind != last.kind {
        return true;
    }

    if current.signal.strength.rank() > last.strength.rank() {
        return true;
    }

    if now_ms - last.sent_at < cooldown_ms {
        return false;
    }

    false
}

/// Gates and dispatches signal notifications.
pub struct SignalNotifier {
    client: Client,
    webhook_url: Option<String>,
    cooldown_ms: i64,
    last_sent: Mutex<Option<NotificationRecord>>,
    history: Arc<SignalHistory>,
}

impl SignalNotifier {
    pub fn new(
        webhook_url: Option<String>,
        cooldown_ms: i64,
        history: Arc<SignalHistory>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            webhook_url,
            cooldown_ms,
            last_sent: Mutex::new(None),
            history,
        }
    }

    /// Run the gate against a finished cycle and dispatch if it passes.
    /// Never fails: transport and store errors are logged and absorbed.
    pub async fn process(&self, result: &CycleResult) {
        let primary = &result.primary;

        if !matches!(
            primary.signal.strength,
            SignalStrength::Strong | SignalStrength::VeryStrong
        ) {
            return;
        }

        let now_ms = chrono::Utc::now().timestamp_millis();
        {
            let last = self.last_sent.lock().unwrap();
            if !should_notify(primary, last.as_ref(), now_ms, self.cooldown_ms) {
                debug!(
                    kind = primary.signal.kind.as_str(),
                    "Signal suppressed by notification gate"
                );
                return;
            }
        }

        let btc_price = result.metrics.current_price.value;

        if let Some(url) = &self.webhook_url {
            let request = NotifyRequest {
                signal: primary.clone(),
                btc_price,
                timestamp: now_ms,
            };
            match self.client.post(url).json(&request).send().await {
                Ok(response) if response.status().is_success() => {
                    info!(
                        kind = primary.signal.kind.as_str(),
                        strength = primary.signal.strength.as_str(),
                        "Signal notification sent"
                    );
                }
                Ok(response) => {
                    warn!(
                        status = %response.status(),
                        "Webhook rejected signal notification, will retry next cycle"
                    );
                    return;
                }
                Err(e) => {
                    warn!("Webhook dispatch failed: {}, will retry next cycle", e);
                    return;
                }
            }
        } else {
            debug!(
                kind = primary.signal.kind.as_str(),
                "No webhook configured, recording signal without dispatch"
            );
        }

        self.mark_sent(primary, now_ms);

        let entry = HistoryEntry::from_signal(primary, btc_price, now_ms);
        if let Err(e) = self.history.append(&entry) {
            warn!("Failed to append signal to history: {}", e);
        }
    }

    fn mark_sent(&self, primary: &PrimarySignal, now_ms: i64) {
        let mut last = self.last_sent.lock().unwrap();
        *last = Some(NotificationRecord {
            kind: primary.signal.kind,
            strength: primary.signal.strength,
            sent_at: now_ms,
        });
    }

    /// The last notification sent, if any.
    pub fn last_sent(&self) -> Option<NotificationRecord> {
        self.last_sent.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColorClass, SignalKind, StrategySignal};

    const COOLDOWN: i64 = 4 * 60 * 60 * 1000;
    const HOUR: i64 = 60 * 60 * 1000;

    fn primary(kind: SignalKind, strength: SignalStrength) -> PrimarySignal {
        PrimarySignal {
            signal: StrategySignal {
                kind,
                strength,
                action: "action".to_string(),
                reason: "reason".to_string(),
                entry_level: None,
                precision: "73%".to_string(),
                details: None,
            },
            active_strategies: 1,
            color: ColorClass::Green,
        }
    }

    fn record(kind: SignalKind, strength: SignalStrength, sent_at: i64) -> NotificationRecord {
        NotificationRecord {
            kind,
            strength,
            sent_at,
        }
    }

    #[test]
    fn test_first_signal_always_notifies() {
        let current = primary(SignalKind::Buy, SignalStrength::Strong);
        assert!(should_notify(&current, None, 0, COOLDOWN));
    }

    #[test]
    fn test_kind_change_notifies_immediately() {
        let current = primary(SignalKind::Sell, SignalStrength::Strong);
        let last = record(SignalKind::Buy, SignalStrength::Strong, 0);
        // Inside the cool-down window, but the kind changed.
        assert!(should_notify(&current, Some(&last), HOUR, COOLDOWN));
    }

    #[test]
    fn test_strength_escalation_notifies_immediately() {
        let current = primary(SignalKind::Buy, SignalStrength::VeryStrong);
        let last = record(SignalKind::Buy, SignalStrength::Strong, 0);
        assert!(should_notify(&current, Some(&last), HOUR, COOLDOWN));
    }

    #[test]
    fn test_strength_decrease_does_not_notify() {
        let current = primary(SignalKind::Buy, SignalStrength::Strong);
        let last = record(SignalKind::Buy, SignalStrength::VeryStrong, 0);
        assert!(!should_notify(&current, Some(&last), 5 * HOUR, COOLDOWN));
    }

    #[test]
    fn test_duplicate_inside_cooldown_suppressed() {
        let current = primary(SignalKind::Buy, SignalStrength::Strong);
        let last = record(SignalKind::Buy, SignalStrength::Strong, 0);
        assert!(!should_notify(&current, Some(&last), 3 * HOUR, COOLDOWN));
    }

    #[test]
    fn test_stable_signal_stays_suppressed_past_cooldown() {
        let current = primary(SignalKind::Buy, SignalStrength::Strong);
        let last = record(SignalKind::Buy, SignalStrength::Strong, 0);
        assert!(!should_notify(&current, Some(&last), 5 * HOUR, COOLDOWN));
    }

    #[tokio::test]
    async fn test_neutral_primary_never_reaches_gate() {
        let history = Arc::new(SignalHistory::new_in_memory().unwrap());
        let notifier = SignalNotifier::new(None, COOLDOWN, Arc::clone(&history));

        let mut result = neutral_cycle();
        result.primary = primary(SignalKind::Hold, SignalStrength::Neutral);
        notifier.process(&result).await;

        assert!(notifier.last_sent().is_none());
        assert!(history.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_strong_primary_recorded_without_webhook() {
        let history = Arc::new(SignalHistory::new_in_memory().unwrap());
        let notifier = SignalNotifier::new(None, COOLDOWN, Arc::clone(&history));

        let mut result = neutral_cycle();
        result.primary = primary(SignalKind::Buy, SignalStrength::Strong);
        notifier.process(&result).await;

        let last = notifier.last_sent().unwrap();
        assert_eq!(last.kind, SignalKind::Buy);
        assert_eq!(last.strength, SignalStrength::Strong);
        assert_eq!(history.len().unwrap(), 1);

        // Same signal again right away: suppressed, no second record.
        notifier.process(&result).await;
        assert_eq!(history.len().unwrap(), 1);
    }

    fn neutral_cycle() -> CycleResult {
        let metrics = crate::types::MetricSet {
            sentiment_value: crate::types::Metric::new(50.0),
            current_price: crate::types::Metric::new(95_000.0),
            peak_price: crate::types::Metric::new(108_000.0),
            money_supply_growth_pct: crate::types::Metric::new(3.9),
            dollar_index_trend_pct: crate::types::Metric::new(-2.1),
            etf_flow_score: crate::types::Metric::new(3.0),
            stablecoin_ratio_pct: crate::types::Metric::new(18.2),
        };
        crate::engine::evaluate(&metrics).unwrap()
    }
}
