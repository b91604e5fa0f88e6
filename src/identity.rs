//! Who is playing
//!
//! The account service owns registration and login; the game only reads the
//! signed-in player's name to tag ledger submissions.

use serde::Deserialize;

use crate::persistence::{self, KeyValueStore};
use crate::platform;

/// Read-only view of the signed-in player
pub trait PlayerIdentity {
    /// Empty when nobody is signed in
    fn current_player_name(&self) -> String;
}

/// Constant name, for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct FixedIdentity(pub String);

impl FixedIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl PlayerIdentity for FixedIdentity {
    fn current_player_name(&self) -> String {
        self.0.clone()
    }
}

/// Session record written by the account service on login
#[derive(Debug, Clone, Deserialize)]
pub struct StoredSession {
    pub username: String,
    #[serde(default)]
    pub role: String,
    /// Expiry, milliseconds since the Unix epoch
    pub expiry: f64,
}

impl StoredSession {
    pub fn is_expired(&self, now_ms: f64) -> bool {
        now_ms > self.expiry
    }
}

/// Identity backed by the account service's stored session
pub struct SessionIdentity<S> {
    store: S,
}

impl<S: KeyValueStore> SessionIdentity<S> {
    pub const STORAGE_KEY: &'static str = "session";

    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current session as of `now_ms`. Expired sessions are removed.
    pub fn session_at(&self, now_ms: f64) -> Option<StoredSession> {
        let session: StoredSession = persistence::load_json(&self.store, Self::STORAGE_KEY)?;
        if session.is_expired(now_ms) {
            log::info!("Session for '{}' expired", session.username);
            self.store.remove_item(Self::STORAGE_KEY);
            return None;
        }
        Some(session)
    }
}

impl<S: KeyValueStore> PlayerIdentity for SessionIdentity<S> {
    fn current_player_name(&self) -> String {
        self.session_at(platform::now_ms())
            .map(|s| s.username)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn identity_with(json: &str) -> SessionIdentity<MemoryStore> {
        let store = MemoryStore::new();
        store.set_item("session", json);
        SessionIdentity::new(store)
    }

    #[test]
    fn test_no_session_is_anonymous() {
        let identity = SessionIdentity::new(MemoryStore::new());
        assert_eq!(identity.current_player_name(), "");
    }

    #[test]
    fn test_live_session_gives_username() {
        let identity = identity_with(r#"{"username":"ada","role":"player","expiry":2000}"#);
        let session = identity.session_at(1000.0).unwrap();
        assert_eq!(session.username, "ada");
        assert_eq!(session.role, "player");
    }

    #[test]
    fn test_expired_session_is_dropped() {
        let identity = identity_with(r#"{"username":"ada","role":"player","expiry":1000}"#);
        assert!(identity.session_at(1001.0).is_none());
        // Removed, so even an earlier clock finds nothing
        assert!(identity.session_at(0.0).is_none());
    }

    #[test]
    fn test_garbage_session_is_anonymous() {
        let identity = identity_with("not json");
        assert_eq!(identity.current_player_name(), "");
    }

    #[test]
    fn test_fixed_identity() {
        assert_eq!(FixedIdentity::new("bob").current_player_name(), "bob");
    }
}
