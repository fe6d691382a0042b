//! SQLite persistence for the signal log and daily metric snapshots.
//!
//! The signal log is append-only and time-bounded: every write prunes
//! entries older than 90 days, so the store never grows unbounded.
//! Snapshots are keyed by calendar date; later writes for the same date
//! overwrite. All writes are best-effort from the caller's perspective:
//! a store failure must never block score computation or the
//! notification decision.

use crate::types::{DailySnapshot, HistoryEntry, SignalKind, SignalStats, SignalStrength};
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Days of signal history retained.
pub const MAX_HISTORY_DAYS: i64 = 90;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// SQLite-backed store for signal history and daily snapshots.
pub struct SignalHistory {
    conn: Mutex<Connection>,
}

impl SignalHistory {
    /// Open (or create) a store at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        info!("Signal history store initialized");
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub fn new_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        debug!("In-memory signal history store initialized");
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS signal_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp INTEGER NOT NULL,
                date TEXT NOT NULL,
                kind TEXT NOT NULL,
                strength TEXT NOT NULL,
                action TEXT NOT NULL,
                reason TEXT NOT NULL,
                precision TEXT NOT NULL,
                entry_level TEXT,
                details TEXT,
                btc_price REAL NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_history_timestamp
             ON signal_history(timestamp DESC)",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS daily_snapshots (
                date TEXT PRIMARY KEY,
                price REAL NOT NULL,
                sentiment REAL NOT NULL,
                m2_growth REAL NOT NULL,
                dxy REAL NOT NULL,
                ssr REAL NOT NULL,
                etf REAL NOT NULL,
                trading_score REAL NOT NULL,
                macro_score REAL NOT NULL,
                timestamp INTEGER NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Append an entry, then prune everything older than the retention
    /// window. Pruning is idempotent.
    pub fn append(&self, entry: &HistoryEntry) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO signal_history
             (timestamp, date, kind, strength, action, reason, precision,
              entry_level, details, btc_price)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                entry.timestamp,
                entry.date,
                entry.kind.as_str(),
                entry.strength.as_str(),
                entry.action,
                entry.reason,
                entry.precision,
                entry.entry_level,
                entry.details,
                entry.btc_price,
            ],
        )?;

        let cutoff = chrono::Utc::now().timestamp_millis() - MAX_HISTORY_DAYS * DAY_MS;
        let pruned = conn.execute(
            "DELETE FROM signal_history WHERE timestamp <= ?1",
            params![cutoff],
        )?;
        if pruned > 0 {
            debug!("Pruned {} history entries past the retention window", pruned);
        }

        Ok(())
    }

    /// Entries within the trailing `days` window, newest first.
    pub fn recent(&self, days: i64) -> Result<Vec<HistoryEntry>, rusqlite::Error> {
        let cutoff = chrono::Utc::now().timestamp_millis() - days * DAY_MS;
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT timestamp, date, kind, strength, action, reason, precision,
                    entry_level, details, btc_price
             FROM signal_history
             WHERE timestamp > ?1
             ORDER BY timestamp DESC",
        )?;

        let rows = stmt.query_map(params![cutoff], Self::map_entry)?;
        rows.collect()
    }

    /// Every retained entry, newest first.
    pub fn all(&self) -> Result<Vec<HistoryEntry>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT timestamp, date, kind, strength, action, reason, precision,
                    entry_level, details, btc_price
             FROM signal_history
             ORDER BY timestamp DESC",
        )?;
        let rows = stmt.query_map([], Self::map_entry)?;
        rows.collect()
    }

    /// Total number of retained entries.
    pub fn len(&self) -> Result<usize, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM signal_history", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> Result<bool, rusqlite::Error> {
        Ok(self.len()? == 0)
    }

    /// Aggregate statistics over the trailing `days` window: counts by
    /// kind and strength, plus the average of parseable precision labels.
    pub fn stats(&self, days: i64) -> Result<SignalStats, rusqlite::Error> {
        let entries = self.recent(days)?;
        if entries.is_empty() {
            return Ok(SignalStats::empty());
        }

        let mut by_kind: BTreeMap<String, u32> = BTreeMap::new();
        let mut by_strength: BTreeMap<String, u32> = BTreeMap::new();
        let mut precision_sum = 0.0;
        let mut precision_count = 0u32;

        for entry in &entries {
            *by_kind.entry(entry.kind.as_str().to_string()).or_insert(0) += 1;
            *by_strength
                .entry(entry.strength.as_str().to_string())
                .or_insert(0) += 1;

            if let Ok(value) = entry.precision.trim_end_matches('%').trim().parse::<f64>() {
                precision_sum += value;
                precision_count += 1;
            }
        }

        let average_precision = if precision_count > 0 {
            (precision_sum / precision_count as f64).round() as u32
        } else {
            0
        };

        Ok(SignalStats {
            total: entries.len(),
            by_kind,
            by_strength,
            average_precision,
        })
    }

    /// Export the full retained log as pretty JSON.
    pub fn export_json(&self) -> Result<String, rusqlite::Error> {
        let entries = self.all()?;
        Ok(serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string()))
    }

    /// Remove all history entries.
    pub fn clear(&self) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM signal_history", [])?;
        Ok(())
    }

    /// Upsert the snapshot for its calendar date.
    pub fn save_snapshot(&self, snapshot: &DailySnapshot) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO daily_snapshots
             (date, price, sentiment, m2_growth, dxy, ssr, etf,
              trading_score, macro_score, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(date) DO UPDATE SET
                price = excluded.price,
                sentiment = excluded.sentiment,
                m2_growth = excluded.m2_growth,
                dxy = excluded.dxy,
                ssr = excluded.ssr,
                etf = excluded.etf,
                trading_score = excluded.trading_score,
                macro_score = excluded.macro_score,
                timestamp = excluded.timestamp",
            params![
                snapshot.date,
                snapshot.price,
                snapshot.sentiment,
                snapshot.m2_growth,
                snapshot.dxy,
                snapshot.ssr,
                snapshot.etf,
                snapshot.trading_score,
                snapshot.macro_score,
                snapshot.timestamp,
            ],
        )?;
        Ok(())
    }

    /// The snapshot for a calendar date, if any.
    pub fn snapshot(&self, date: &str) -> Result<Option<DailySnapshot>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let result = conn.query_row(
            "SELECT date, price, sentiment, m2_growth, dxy, ssr, etf,
                    trading_score, macro_score, timestamp
             FROM daily_snapshots WHERE date = ?1",
            params![date],
            Self::map_snapshot,
        );
        match result {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Snapshots from the trailing `days` window, newest first.
    pub fn recent_snapshots(&self, days: i64) -> Result<Vec<DailySnapshot>, rusqlite::Error> {
        let cutoff = chrono::Utc::now().timestamp_millis() - days * DAY_MS;
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT date, price, sentiment, m2_growth, dxy, ssr, etf,
                    trading_score, macro_score, timestamp
             FROM daily_snapshots
             WHERE timestamp > ?1
             ORDER BY date DESC",
        )?;
        let rows = stmt.query_map(params![cutoff], Self::map_snapshot)?;
        rows.collect()
    }

    fn map_entry(row: &rusqlite::Row<'_>) -> Result<HistoryEntry, rusqlite::Error> {
        let kind: String = row.get(2)?;
        let strength: String = row.get(3)?;
        Ok(HistoryEntry {
            timestamp: row.get(0)?,
            date: row.get(1)?,
            kind: SignalKind::from_str(&kind).unwrap_or_else(|| {
                warn!("Unknown signal kind `{}` in history, treating as HOLD", kind);
                SignalKind::Hold
            }),
            strength: SignalStrength::from_str(&strength).unwrap_or_else(|| {
                warn!(
                    "Unknown signal strength `{}` in history, treating as NEUTRAL",
                    strength
                );
                SignalStrength::Neutral
            }),
            action: row.get(4)?,
            reason: row.get(5)?,
            precision: row.get(6)?,
            entry_level: row.get(7)?,
            details: row.get(8)?,
            btc_price: row.get(9)?,
        })
    }

    fn map_snapshot(row: &rusqlite::Row<'_>) -> Result<DailySnapshot, rusqlite::Error> {
        Ok(DailySnapshot {
            date: row.get(0)?,
            price: row.get(1)?,
            sentiment: row.get(2)?,
            m2_growth: row.get(3)?,
            dxy: row.get(4)?,
            ssr: row.get(5)?,
            etf: row.get(6)?,
            trading_score: row.get(7)?,
            macro_score: row.get(8)?,
            timestamp: row.get(9)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_at(timestamp: i64, kind: SignalKind, strength: SignalStrength) -> HistoryEntry {
        HistoryEntry {
            timestamp,
            date: chrono::DateTime::from_timestamp_millis(timestamp)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default(),
            kind,
            strength,
            action: "action".to_string(),
            reason: "reason".to_string(),
            precision: "73%".to_string(),
            entry_level: Some("Immédiat".to_string()),
            details: None,
            btc_price: 95_000.0,
        }
    }

    #[test]
    fn test_append_and_read_back() {
        let store = SignalHistory::new_in_memory().unwrap();
        let now = chrono::Utc::now().timestamp_millis();
        let entry = entry_at(now, SignalKind::Buy, SignalStrength::Strong);
        store.append(&entry).unwrap();

        let entries = store.recent(1).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], entry);
    }

    #[test]
    fn test_newest_first_ordering() {
        let store = SignalHistory::new_in_memory().unwrap();
        let now = chrono::Utc::now().timestamp_millis();
        store
            .append(&entry_at(now - 1000, SignalKind::Buy, SignalStrength::Strong))
            .unwrap();
        store
            .append(&entry_at(now, SignalKind::Sell, SignalStrength::Strong))
            .unwrap();

        let entries = store.recent(1).unwrap();
        assert_eq!(entries[0].kind, SignalKind::Sell);
        assert_eq!(entries[1].kind, SignalKind::Buy);
    }

    #[test]
    fn test_prunes_beyond_retention_window() {
        let store = SignalHistory::new_in_memory().unwrap();
        let now = chrono::Utc::now().timestamp_millis();

        // One entry per simulated day, going back 95 days.
        for day in 0..95 {
            let ts = now - day * DAY_MS;
            store
                .append(&entry_at(ts, SignalKind::Hold, SignalStrength::Neutral))
                .unwrap();
        }

        let retained = store.len().unwrap();
        assert!(retained <= 90, "retained {} entries", retained);

        let cutoff = now - MAX_HISTORY_DAYS * DAY_MS;
        for entry in store.all().unwrap() {
            assert!(entry.timestamp > cutoff);
        }
    }

    #[test]
    fn test_stats_grouping_sums_to_total() {
        let store = SignalHistory::new_in_memory().unwrap();
        let now = chrono::Utc::now().timestamp_millis();

        store
            .append(&entry_at(now - 1, SignalKind::Buy, SignalStrength::VeryStrong))
            .unwrap();
        store
            .append(&entry_at(now - 2, SignalKind::Buy, SignalStrength::Strong))
            .unwrap();
        store
            .append(&entry_at(now - 3, SignalKind::Sell, SignalStrength::Strong))
            .unwrap();

        let stats = store.stats(30).unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_kind.values().sum::<u32>() as usize, stats.total);
        assert_eq!(stats.by_strength.values().sum::<u32>() as usize, stats.total);
        assert_eq!(stats.by_kind.get("BUY"), Some(&2));
        assert_eq!(stats.by_strength.get("STRONG"), Some(&2));
        assert_eq!(stats.average_precision, 73);
    }

    #[test]
    fn test_stats_ignores_unparseable_precision() {
        let store = SignalHistory::new_in_memory().unwrap();
        let now = chrono::Utc::now().timestamp_millis();

        let mut good = entry_at(now - 1, SignalKind::Buy, SignalStrength::Strong);
        good.precision = "81%".to_string();
        store.append(&good).unwrap();

        let mut bad = entry_at(now - 2, SignalKind::Hold, SignalStrength::Neutral);
        bad.precision = String::new();
        store.append(&bad).unwrap();

        let stats = store.stats(30).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.average_precision, 81);
    }

    #[test]
    fn test_stats_empty_window() {
        let store = SignalHistory::new_in_memory().unwrap();
        let stats = store.stats(30).unwrap();
        assert_eq!(stats, SignalStats::empty());
    }

    #[test]
    fn test_export_round_trip() {
        let store = SignalHistory::new_in_memory().unwrap();
        let now = chrono::Utc::now().timestamp_millis();
        let entry = entry_at(now, SignalKind::DcaIncrease, SignalStrength::Medium);
        store.append(&entry).unwrap();

        let json = store.export_json().unwrap();
        let parsed: Vec<HistoryEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![entry]);
    }

    #[test]
    fn test_snapshot_upsert_by_date() {
        let store = SignalHistory::new_in_memory().unwrap();
        let now = chrono::Utc::now().timestamp_millis();

        let mut snapshot = DailySnapshot {
            date: "2026-08-29".to_string(),
            price: 95_000.0,
            sentiment: 50.0,
            m2_growth: 3.9,
            dxy: 108.5,
            ssr: 18.2,
            etf: 3.0,
            trading_score: 5.8,
            macro_score: 5.9,
            timestamp: now,
        };
        store.save_snapshot(&snapshot).unwrap();

        snapshot.price = 96_500.0;
        snapshot.timestamp = now + 1000;
        store.save_snapshot(&snapshot).unwrap();

        let loaded = store.snapshot("2026-08-29").unwrap().unwrap();
        assert_eq!(loaded.price, 96_500.0);
        assert_eq!(store.recent_snapshots(7).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_snapshot_is_none() {
        let store = SignalHistory::new_in_memory().unwrap();
        assert!(store.snapshot("1999-01-01").unwrap().is_none());
    }

    #[test]
    fn test_clear() {
        let store = SignalHistory::new_in_memory().unwrap();
        let now = chrono::Utc::now().timestamp_millis();
        store
            .append(&entry_at(now, SignalKind::Buy, SignalStrength::Strong))
            .unwrap();
        store.clear().unwrap();
        assert!(store.is_empty().unwrap());
    }
}
