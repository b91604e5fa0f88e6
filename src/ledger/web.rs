//! Browser ledger client
//!
//! The page loads the chain client library and exposes it as
//! `window.flappyLedger = { query(body) -> Promise<string>, leaderboardChainId }`.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::{LeaderboardEntry, Ledger, LedgerError, Receipt, graphql};

#[wasm_bindgen(inline_js = "
    export function ledger_available() {
        return !!(window.flappyLedger && typeof window.flappyLedger.query === 'function');
    }

    export function ledger_leaderboard_chain() {
        return (window.flappyLedger && window.flappyLedger.leaderboardChainId) || '';
    }

    export function ledger_query(body) {
        return Promise.resolve(window.flappyLedger.query(body));
    }
")]
extern "C" {
    fn ledger_available() -> bool;
    fn ledger_leaderboard_chain() -> String;
    #[wasm_bindgen(catch)]
    fn ledger_query(body: &str) -> Result<js_sys::Promise, JsValue>;
}

pub struct WebLedger {
    leaderboard_chain_id: String,
}

impl WebLedger {
    /// Client configured from `window.flappyLedger`
    pub fn from_page() -> Self {
        let leaderboard_chain_id = ledger_leaderboard_chain();
        if leaderboard_chain_id.is_empty() {
            log::warn!("No leaderboard chain configured on the page");
        }
        Self {
            leaderboard_chain_id,
        }
    }

    async fn query(&self, document: &str) -> Result<String, LedgerError> {
        if !ledger_available() {
            return Err(LedgerError::NotInitialized);
        }
        let promise = ledger_query(&graphql::request_body(document))
            .map_err(|e| LedgerError::Transport(js_error_message(&e)))?;
        let value = JsFuture::from(promise)
            .await
            .map_err(|e| LedgerError::Transport(js_error_message(&e)))?;
        value
            .as_string()
            .ok_or_else(|| LedgerError::Malformed("response is not a string".to_string()))
    }
}

fn js_error_message(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    match value.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => format!("{:?}", value),
    }
}

impl Ledger for WebLedger {
    async fn setup_player(&self, player_name: &str) -> Result<Receipt, LedgerError> {
        let doc = graphql::setup_game(&self.leaderboard_chain_id, player_name);
        let raw = self.query(&doc).await?;
        graphql::parse_response(&raw).map(Receipt)
    }

    async fn submit_score(&self, score: u64) -> Result<Receipt, LedgerError> {
        let raw = self.query(&graphql::set_best_and_submit(score)).await?;
        graphql::parse_response(&raw).map(Receipt)
    }

    async fn request_leaderboard_refresh(&self) -> Result<(), LedgerError> {
        let raw = self.query(graphql::REQUEST_LEADERBOARD).await?;
        graphql::parse_response::<serde_json::Value>(&raw).map(|_| ())
    }

    async fn top_entries(&self) -> Result<Vec<LeaderboardEntry>, LedgerError> {
        let raw = self.query(graphql::TOP_LEADERBOARD).await?;
        graphql::parse_top_leaderboard(&raw)
    }

    async fn player_best(&self) -> Result<u64, LedgerError> {
        let raw = self.query(graphql::PLAYER_BEST).await?;
        graphql::parse_player_best(&raw)
    }
}
