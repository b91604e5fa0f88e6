//! Flappy Ledger - a side-scrolling reflex game for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor physics, obstacles, collisions, session state)
//! - `scheduler` / `game_loop`: Cooperative per-frame loop with start/stop/visibility gating
//! - `events`: Observer interface the UI layer subscribes to
//! - `ledger`: Boundary to the remote score ledger (fire-and-forget)
//! - `renderer`: Draw hook and WebGPU rendering pipeline
//! - `persistence`, `settings`, `highscores`: LocalStorage-backed preferences and local bests

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod events;
pub mod game_loop;
pub mod highscores;
pub mod identity;
pub mod ledger;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod settings;
pub mod sim;

pub use events::{EventBus, EventKind, GameEvent};
pub use game_loop::{FrameOutcome, GameLoop};
pub use highscores::HighScores;
pub use scheduler::{FrameDriver, FrameHandle, GameLoopScheduler, Screen};
pub use score::ScoreTracker;
pub use settings::{GroundRule, Settings};

/// Game configuration constants
pub mod consts {
    /// Canvas size in game units (the shipped game never rescales its logic)
    pub const CANVAS_WIDTH: f32 = 288.0;
    pub const CANVAS_HEIGHT: f32 = 512.0;
    /// Height of the scrolling ground strip at the bottom of the canvas
    pub const GROUND_HEIGHT: f32 = 112.0;

    /// Flyable area above the ground
    pub const PLAYFIELD_WIDTH: f32 = CANVAS_WIDTH;
    pub const PLAYFIELD_HEIGHT: f32 = CANVAS_HEIGHT - GROUND_HEIGHT;

    /// Actor defaults
    pub const ACTOR_X: f32 = 60.0;
    pub const ACTOR_START_Y: f32 = CANVAS_HEIGHT / 2.0;
    pub const ACTOR_WIDTH: f32 = 34.0;
    pub const ACTOR_HEIGHT: f32 = 24.0;
    /// Downward acceleration, units per tick²
    pub const GRAVITY: f32 = 0.3;
    /// Velocity set by a flap (negative is up)
    pub const IMPULSE_VELOCITY: f32 = -6.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const OBSTACLE_GAP: f32 = 180.0;
    /// Minimum distance between the gap and the playfield top/ground
    pub const OBSTACLE_MARGIN: f32 = 50.0;
    pub const SCROLL_SPEED: f32 = 2.0;
    /// Ticks between obstacle spawns
    pub const SPAWN_INTERVAL: u64 = 120;
}
