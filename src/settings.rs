//! Game settings and preferences
//!
//! Persisted separately from high scores in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore};

/// What touching the ground does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GroundRule {
    /// Ground contact ends the run
    #[default]
    EndsGame,
    /// Legacy: the actor rests on the ground and only obstacles end the run
    Clamp,
}

impl GroundRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroundRule::EndsGame => "ends-game",
            GroundRule::Clamp => "clamp",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ends-game" | "ends_game" | "end" => Some(GroundRule::EndsGame),
            "clamp" | "legacy" => Some(GroundRule::Clamp),
            _ => None,
        }
    }
}

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Gameplay ===
    pub ground_rule: GroundRule,
    /// Let the demo pilot fly (attract mode)
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            show_fps: false,

            ground_rule: GroundRule::EndsGame,
            autopilot: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "flappy_settings";

    /// Volume actually applied to sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Load settings, falling back to defaults when absent or unreadable
    pub fn load(store: &impl KeyValueStore) -> Self {
        match persistence::load_json::<Settings>(store, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings from storage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &impl KeyValueStore) {
        if persistence::save_json(store, Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_ground_rule_parse() {
        assert_eq!(GroundRule::from_str("Clamp"), Some(GroundRule::Clamp));
        assert_eq!(GroundRule::from_str("ends-game"), Some(GroundRule::EndsGame));
        assert_eq!(GroundRule::from_str("bounce"), None);
        assert_eq!(
            GroundRule::from_str(GroundRule::Clamp.as_str()),
            Some(GroundRule::Clamp)
        );
    }

    #[test]
    fn test_effective_volume() {
        let mut settings = Settings::default();
        assert!((settings.effective_volume() - 0.8).abs() < 1e-6);
        settings.muted = true;
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_load_missing_gives_defaults() {
        let store = MemoryStore::new();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let settings = Settings {
            muted: true,
            ground_rule: GroundRule::Clamp,
            ..Settings::default()
        };
        settings.save(&store);
        assert_eq!(Settings::load(&store), settings);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let store = MemoryStore::new();
        store.set_item(Settings::STORAGE_KEY, r#"{"muted":true}"#);
        let settings = Settings::load(&store);
        assert!(settings.muted);
        assert_eq!(settings.ground_rule, GroundRule::EndsGame);
    }
}
