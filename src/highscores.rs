//! Local high score table
//!
//! Persisted to LocalStorage, tracks the top 10 runs on this browser profile.
//! Seeds the personal best at startup when the ledger has not answered yet.

#[cfg(not(target_arch = "wasm32"))]
use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore};
use crate::sim::GameMode;

pub const MAX_HIGH_SCORES: usize = 10;

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Signed-in player, empty when anonymous
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub mode: GameMode,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Top runs, highest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "flappy_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// A non-zero score that beats the last entry, or any score while the
    /// table has room
    pub fn qualifies(&self, score: u64) -> bool {
        score > 0
            && (self.entries.len() < MAX_HIGH_SCORES
                || self.entries.last().is_some_and(|lowest| score > lowest.score))
    }

    /// 1-based rank `score` would take. Ties rank below existing entries.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        self.qualifies(score)
            .then(|| self.entries.partition_point(|e| e.score >= score) + 1)
    }

    /// Insert a finished run; returns the rank it took, or None when it
    /// did not make the table
    pub fn add_score(
        &mut self,
        score: u64,
        player: &str,
        mode: GameMode,
        timestamp: f64,
    ) -> Option<usize> {
        let rank = self.potential_rank(score)?;
        self.entries.insert(
            rank - 1,
            HighScoreEntry {
                score,
                player: player.to_string(),
                mode,
                timestamp,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score on this profile, seeds the personal best
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Best score recorded for `player`
    pub fn best_for(&self, player: &str) -> Option<u64> {
        self.entries
            .iter()
            .filter(|e| e.player == player)
            .map(|e| e.score)
            .max()
    }

    /// Load high scores, starting fresh when absent or unreadable
    pub fn load(store: &impl KeyValueStore) -> Self {
        match persistence::load_json::<HighScores>(store, Self::STORAGE_KEY) {
            Some(mut scores) => {
                // Restore ordering in case the stored table was edited by hand
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, store: &impl KeyValueStore) {
        if persistence::save_json(store, Self::STORAGE_KEY, self) {
            log::info!("High scores saved ({} entries)", self.entries.len());
        }
    }
}

const MINUTE_MS: f64 = 60_000.0;
const HOUR_MS: f64 = 60.0 * MINUTE_MS;
const DAY_MS: f64 = 24.0 * HOUR_MS;

/// Age of a table entry for display: "Just now", "5 mins ago", "Yesterday",
/// and a plain M/D/YY date after a week
pub fn format_date(now_ms: f64, timestamp: f64) -> String {
    let age = (now_ms - timestamp).max(0.0);
    let count = |unit: f64| (age / unit).floor() as u64;

    match count(DAY_MS) {
        0 => {}
        1 => return "Yesterday".to_string(),
        days @ 2..=6 => return format!("{} days ago", days),
        _ => return calendar_date(timestamp),
    }

    match (count(HOUR_MS), count(MINUTE_MS)) {
        (0, 0) => "Just now".to_string(),
        (0, 1) => "1 min ago".to_string(),
        (0, mins) => format!("{} mins ago", mins),
        (1, _) => "1 hour ago".to_string(),
        (hours, _) => format!("{} hours ago", hours),
    }
}

/// M/D/YY in the local timezone
#[cfg(target_arch = "wasm32")]
fn calendar_date(timestamp_ms: f64) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(timestamp_ms));
    format!(
        "{}/{}/{:02}",
        date.get_month() + 1,
        date.get_date(),
        date.get_full_year() % 100
    )
}

/// M/D/YY in the local timezone
#[cfg(not(target_arch = "wasm32"))]
fn calendar_date(timestamp_ms: f64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms as i64).earliest() {
        Some(date) => date.format("%-m/%-d/%y").to_string(),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    const MIN: f64 = MINUTE_MS;
    const DAY: f64 = DAY_MS;

    #[test]
    fn test_insert_keeps_descending_order() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, "ada", GameMode::Practice, 1.0), Some(1));
        assert_eq!(scores.add_score(9, "bob", GameMode::Practice, 2.0), Some(1));
        assert_eq!(scores.add_score(7, "ada", GameMode::Tournament, 3.0), Some(2));
        let order: Vec<u64> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![9, 7, 5]);
        assert_eq!(scores.top_score(), Some(9));
        assert_eq!(scores.best_for("ada"), Some(7));
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, "", GameMode::Practice, 0.0), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_table_is_capped() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(s * 10, "", GameMode::Practice, 0.0);
        }
        assert!(!scores.qualifies(5));
        assert_eq!(scores.potential_rank(55), Some(6));
        scores.add_score(55, "", GameMode::Practice, 0.0);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        let mut scores = HighScores::new();
        scores.add_score(12, "ada", GameMode::Practice, 5.0);
        scores.save(&store);

        let loaded = HighScores::load(&store);
        assert_eq!(loaded.entries, scores.entries);
    }

    #[test]
    fn test_load_tolerates_old_entries() {
        let store = MemoryStore::new();
        store.set_item(
            HighScores::STORAGE_KEY,
            r#"{"entries":[{"score":3,"timestamp":1.0},{"score":8,"timestamp":2.0}]}"#,
        );
        let loaded = HighScores::load(&store);
        assert_eq!(loaded.top_score(), Some(8));
        assert_eq!(loaded.entries[1].player, "");
    }

    #[test]
    fn test_relative_dates() {
        let now = 1_700_000_000_000.0;
        assert_eq!(format_date(now, now - 10_000.0), "Just now");
        assert_eq!(format_date(now, now - MIN), "1 min ago");
        assert_eq!(format_date(now, now - 5.0 * MIN), "5 mins ago");
        assert_eq!(format_date(now, now - 61.0 * MIN), "1 hour ago");
        assert_eq!(format_date(now, now - 1.5 * DAY), "Yesterday");
        assert_eq!(format_date(now, now - 3.0 * DAY), "3 days ago");
    }

    /// Expected M/D/YY, read field by field from the local calendar
    fn local_mdy(ts: f64) -> String {
        use chrono::Datelike;
        let date = Local
            .timestamp_millis_opt(ts as i64)
            .earliest()
            .expect("timestamp in range");
        format!("{}/{}/{}", date.month(), date.day(), date.year() % 100)
    }

    #[test]
    fn test_old_dates_are_absolute() {
        // 2023-11-14T11:00Z, the 14th from UTC-11 to UTC+12
        let ts = 1_699_959_600_000.0;
        let shown = format_date(ts + 30.0 * DAY, ts);
        assert_eq!(shown, local_mdy(ts));
        assert!(shown == "11/14/23" || shown == "11/15/23");
    }

    #[test]
    fn test_old_dates_follow_local_calendar_day() {
        // 2024-03-01T02:00Z is still Feb 29 west of UTC-2
        let ts = 1_709_258_400_000.0;
        assert_eq!(format_date(ts + 30.0 * DAY, ts), local_mdy(ts));
    }
}
