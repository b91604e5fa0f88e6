//! Session state for one play-through
//!
//! All mutable game state is owned here and handed to `tick`/`jump`
//! explicitly. Nothing lives in globals.

use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::obstacle::ObstacleField;
use crate::consts::SCROLL_SPEED;
use crate::events::GameEvent;
use crate::renderer::Painter;
use crate::score::ScoreTracker;
use crate::settings::GroundRule;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the first flap; frames render but physics is frozen
    Idle,
    /// Active gameplay
    Running,
    /// Run ended, waiting for a restart request
    Over,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Running => "running",
            SessionPhase::Over => "over",
        }
    }
}

/// Game mode picked on the mode-select screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Practice,
    Tournament,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Practice => "practice",
            GameMode::Tournament => "tournament",
        }
    }
}

/// Handle to the tournament a session is played for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentRef {
    pub id: u64,
    pub name: String,
}

/// One play-through plus the score bookkeeping that outlives it
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Seed the obstacle field was built from
    pub seed: u64,
    pub phase: SessionPhase,
    pub actor: Actor,
    pub obstacles: ObstacleField,
    /// Running ticks since the first flap
    pub frame: u64,
    /// "Tap to fly" hint, cleared by the first flap
    pub show_instructions: bool,
    pub mode: GameMode,
    pub tournament: Option<TournamentRef>,
    pub ground_rule: GroundRule,
    scores: ScoreTracker,
    /// Events raised since the last drain
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Fresh idle session. `best` seeds the score tracker.
    pub fn new(seed: u64, best: u64) -> Self {
        Self {
            seed,
            phase: SessionPhase::Idle,
            actor: Actor::new(),
            obstacles: ObstacleField::new(seed),
            frame: 0,
            show_instructions: true,
            mode: GameMode::Practice,
            tournament: None,
            ground_rule: GroundRule::default(),
            scores: ScoreTracker::new(best),
            events: Vec::new(),
        }
    }

    pub fn scores(&self) -> &ScoreTracker {
        &self.scores
    }

    pub(crate) fn scores_mut(&mut self) -> &mut ScoreTracker {
        &mut self.scores
    }

    /// Move to `to`, queueing a `PhaseChanged` event if it differs
    pub(crate) fn set_phase(&mut self, to: SessionPhase) {
        if self.phase == to {
            return;
        }
        let from = self.phase;
        self.phase = to;
        log::info!("Session {} -> {}", from.as_str(), to.as_str());
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every queued event, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Distance the world has scrolled this session
    pub fn scroll_distance(&self) -> f32 {
        self.frame as f32 * SCROLL_SPEED
    }

    /// Issue one draw call per entity: background, obstacles, actor, ground
    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        painter.background();
        for obstacle in self.obstacles.iter() {
            obstacle.draw(painter);
        }
        self.actor.draw(painter);
        painter.ground(self.scroll_distance());
    }
}
