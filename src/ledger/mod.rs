//! Remote score ledger boundary
//!
//! The ledger is an external chain-backed service reached through a
//! query/mutation RPC. The game submits bests and reads back the top table
//! and the player's recorded best; everything here runs off the frame loop
//! and only reports back into it through [`LeaderboardSnapshot`]s.

use core::fmt;

use serde::{Deserialize, Serialize};

pub mod bridge;
pub mod graphql;
pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use bridge::LedgerBridge;
pub use memory::MemoryLedger;
#[cfg(target_arch = "wasm32")]
pub use web::WebLedger;

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player_name: String,
    pub score: u64,
    #[serde(default)]
    pub chain_id: String,
    #[serde(default)]
    pub timestamp: u64,
}

/// One leaderboard read, as handed back to the game
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeaderboardSnapshot {
    /// 1-based position of the player; None when not listed
    pub rank: Option<u32>,
    /// Best the ledger holds for the player
    pub best: u64,
    /// Table, best first
    pub entries: Vec<LeaderboardEntry>,
}

impl LeaderboardSnapshot {
    /// Build from a table and the player's chain best. A listed score
    /// higher than the chain best wins. An anonymous player is never listed.
    pub fn new(entries: Vec<LeaderboardEntry>, player_name: &str, chain_best: u64) -> Self {
        if player_name.is_empty() {
            return Self {
                rank: None,
                best: chain_best,
                entries,
            };
        }
        let listed = entries
            .iter()
            .find(|e| e.player_name == player_name)
            .map_or(0, |e| e.score);
        Self {
            rank: rank_of(&entries, player_name),
            best: chain_best.max(listed),
            entries,
        }
    }
}

/// Raw acknowledgement returned by a mutation. Not interpreted by the game.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Receipt(pub serde_json::Value);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerError {
    /// Client library not loaded or not connected yet
    NotInitialized,
    /// Request never produced a response
    Transport(String),
    /// Service answered with GraphQL errors
    Rejected(String),
    /// Response did not have the expected shape
    Malformed(String),
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "ledger client not initialized"),
            Self::Transport(msg) => write!(f, "ledger request failed: {msg}"),
            Self::Rejected(msg) => write!(f, "ledger rejected request: {msg}"),
            Self::Malformed(msg) => write!(f, "malformed ledger response: {msg}"),
        }
    }
}

impl std::error::Error for LedgerError {}

/// Client for the ledger service.
///
/// Futures are not `Send`; in the browser they run on the page's single
/// thread through `spawn_local`.
#[allow(async_fn_in_trait)]
pub trait Ledger {
    /// Register the player's chain with the shared leaderboard.
    /// Needed once per page load before the first submission.
    async fn setup_player(&self, player_name: &str) -> Result<Receipt, LedgerError>;

    /// Record a new best score for the connected player
    async fn submit_score(&self, score: u64) -> Result<Receipt, LedgerError>;

    /// Ask the leaderboard chain to push a fresh table to this chain
    async fn request_leaderboard_refresh(&self) -> Result<(), LedgerError>;

    /// Current table, best first
    async fn top_entries(&self) -> Result<Vec<LeaderboardEntry>, LedgerError>;

    /// Best recorded on the player's own chain, 0 before any submission
    async fn player_best(&self) -> Result<u64, LedgerError>;
}

/// 1-based position of `player_name` in the table, if listed
pub fn rank_of(entries: &[LeaderboardEntry], player_name: &str) -> Option<u32> {
    entries
        .iter()
        .position(|e| e.player_name == player_name)
        .map(|i| i as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            player_name: name.to_string(),
            score,
            chain_id: String::new(),
            timestamp: 0,
        }
    }

    #[test]
    fn test_rank_is_one_based() {
        let table = vec![entry("ada", 30), entry("bob", 20), entry("cy", 10)];
        assert_eq!(rank_of(&table, "ada"), Some(1));
        assert_eq!(rank_of(&table, "cy"), Some(3));
        assert_eq!(rank_of(&table, "dee"), None);
    }

    #[test]
    fn test_snapshot_prefers_higher_listed_score() {
        let table = vec![entry("bob", 30), entry("ada", 20)];
        let snapshot = LeaderboardSnapshot::new(table.clone(), "ada", 12);
        assert_eq!(snapshot.rank, Some(2));
        assert_eq!(snapshot.best, 20);
        assert_eq!(snapshot.entries, table);

        let unlisted = LeaderboardSnapshot::new(table, "cy", 7);
        assert_eq!(unlisted.rank, None);
        assert_eq!(unlisted.best, 7);
    }

    #[test]
    fn test_anonymous_snapshot_ignores_blank_rows() {
        let table = vec![entry("", 50), entry("bob", 30)];
        let snapshot = LeaderboardSnapshot::new(table, "", 0);
        assert_eq!(snapshot.rank, None);
        assert_eq!(snapshot.best, 0);
    }

    #[test]
    fn test_entry_uses_camel_case() {
        let json = r#"{"playerName":"ada","score":7,"chainId":"e4f1","timestamp":1700000000}"#;
        let parsed: LeaderboardEntry = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.player_name, "ada");
        assert_eq!(parsed.chain_id, "e4f1");
        assert!(serde_json::to_string(&parsed).unwrap().contains("\"playerName\""));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            LedgerError::Rejected("no chain".into()).to_string(),
            "ledger rejected request: no chain"
        );
    }
}
