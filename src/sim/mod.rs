//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step per displayed frame
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No platform dependencies; drawing goes through the `Painter` hook

pub mod actor;
pub mod collision;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use collision::{Aabb, CollisionKind, collides, detect};
pub use obstacle::{Obstacle, ObstacleField};
pub use state::{GameMode, GameSession, SessionPhase, TournamentRef};
pub use tick::{TickOutcome, autopilot, jump, restart, tick};
