//! GraphQL documents accepted by the ledger service, and response decoding

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{LeaderboardEntry, LedgerError};

pub const REQUEST_LEADERBOARD: &str = "mutation { requestLeaderboard }";

pub const TOP_LEADERBOARD: &str =
    "query { topLeaderboard { playerName score chainId timestamp } }";

/// Best on the player's own chain
pub const PLAYER_BEST: &str = "query { best }";

pub fn set_best_and_submit(best: u64) -> String {
    format!("mutation {{ setBestAndSubmit(best: {best}) }}")
}

pub fn setup_game(leaderboard_chain_id: &str, player_name: &str) -> String {
    format!(
        "mutation {{ setupGame(leaderboardChainId: {}, leaderboardName: {}) }}",
        string_literal(leaderboard_chain_id),
        string_literal(player_name)
    )
}

/// GraphQL string literal. JSON string escaping is a valid subset.
fn string_literal(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}

/// Request body the client library's `query` call expects
pub fn request_body(document: &str) -> String {
    serde_json::json!({ "query": document }).to_string()
}

#[derive(Debug, Deserialize)]
struct Response<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ResponseError>,
}

#[derive(Debug, Deserialize)]
struct ResponseError {
    message: String,
}

/// Decode a `{data, errors}` response. Any error entry rejects the whole response.
pub fn parse_response<T: DeserializeOwned>(raw: &str) -> Result<T, LedgerError> {
    let response: Response<T> =
        serde_json::from_str(raw).map_err(|e| LedgerError::Malformed(e.to_string()))?;

    if !response.errors.is_empty() {
        let messages: Vec<_> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(LedgerError::Rejected(messages.join("; ")));
    }

    response
        .data
        .ok_or_else(|| LedgerError::Malformed("response has no data".to_string()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TopLeaderboardData {
    top_leaderboard: Option<Vec<LeaderboardEntry>>,
}

/// Decode a [`TOP_LEADERBOARD`] response. A null table reads as empty.
pub fn parse_top_leaderboard(raw: &str) -> Result<Vec<LeaderboardEntry>, LedgerError> {
    let data: TopLeaderboardData = parse_response(raw)?;
    Ok(data.top_leaderboard.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct PlayerBestData {
    best: Option<u64>,
}

/// Decode a [`PLAYER_BEST`] response. A chain with no state reads as 0.
pub fn parse_player_best(raw: &str) -> Result<u64, LedgerError> {
    let data: PlayerBestData = parse_response(raw)?;
    Ok(data.best.unwrap_or(0))
}
