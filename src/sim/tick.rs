//! Fixed-step simulation tick and session transitions
//!
//! Core game loop body that advances a session deterministically. Input is
//! applied directly between ticks through [`jump`]; there is no input queue.

use super::collision::{self, CollisionKind};
use super::state::{GameSession, SessionPhase};
use crate::consts::*;
use crate::events::GameEvent;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Idle: frame rendered, physics and scoring skipped
    Waiting,
    /// Physics advanced, run continues
    Advanced,
    /// Run ended on this tick
    Collided(CollisionKind),
    /// Session was already over, nothing moved
    Halted,
}

/// Advance the session by one fixed step
pub fn tick(session: &mut GameSession) -> TickOutcome {
    match session.phase {
        SessionPhase::Idle => return TickOutcome::Waiting,
        SessionPhase::Over => return TickOutcome::Halted,
        SessionPhase::Running => {}
    }

    session.actor.tick();
    session.obstacles.tick(session.frame);

    let crossed = session.obstacles.score_crossings(&session.actor);
    if crossed > 0 {
        session.scores_mut().increment(crossed);
        let score = session.scores().score();
        session.push_event(GameEvent::ScoreChanged { score });
    }

    let hit = collision::detect(&session.actor, &session.obstacles, session.ground_rule);
    session.frame += 1;

    match hit {
        Some(cause) => {
            end_session(session, cause);
            TickOutcome::Collided(cause)
        }
        None => TickOutcome::Advanced,
    }
}

/// running -> over. Raises the high score event when best moved.
fn end_session(session: &mut GameSession, cause: CollisionKind) {
    session.set_phase(SessionPhase::Over);

    let score = session.scores().score();
    let new_best = session.scores_mut().finish_session();
    let best = session.scores().best();
    log::info!("Game over ({:?}): score {}, best {}", cause, score, best);
    session.push_event(GameEvent::GameOver { score, best, cause });

    if new_best.is_some() {
        log::info!("New best score: {}", score);
        session.push_event(GameEvent::HighScore {
            score,
            mode: session.mode,
            tournament: session.tournament.clone(),
        });
    }
}

/// Flap input. Starts the run from idle. Returns false once the run is over.
pub fn jump(session: &mut GameSession) -> bool {
    match session.phase {
        SessionPhase::Over => return false,
        SessionPhase::Idle => session.set_phase(SessionPhase::Running),
        SessionPhase::Running => {}
    }

    session.show_instructions = false;
    session.actor.apply_impulse();
    session.push_event(GameEvent::Flap);
    true
}

/// Replace the play-through with a fresh idle one.
///
/// Best, rank, mode, tournament and ground rule carry over; actor, obstacles,
/// frame counter, score and the instructions hint are reset. Works from any
/// phase.
pub fn restart(session: &mut GameSession, seed: u64) {
    let mut fresh = GameSession::new(seed, 0);
    *fresh.scores_mut() = session.scores().clone();
    fresh.scores_mut().reset_session();
    fresh.mode = session.mode;
    fresh.tournament = session.tournament.take();
    fresh.ground_rule = session.ground_rule;

    for event in session.drain_events() {
        fresh.push_event(event);
    }
    fresh.phase = session.phase;
    fresh.set_phase(SessionPhase::Idle);

    *session = fresh;
    log::debug!("Session restarted with seed {}", seed);
}

/// Demo pilot: flap when sinking below a line just above the next gap's
/// floor. Used by the headless build and the in-browser attract mode.
pub fn autopilot(session: &GameSession) -> bool {
    match session.phase {
        SessionPhase::Idle => return true,
        SessionPhase::Over => return false,
        SessionPhase::Running => {}
    }

    let actor = &session.actor;
    let target_y = session
        .obstacles
        .iter()
        .find(|o| o.right() >= actor.pos.x)
        .map(|o| o.gap_bottom - actor.size.y - 12.0)
        .unwrap_or(PLAYFIELD_HEIGHT / 2.0);

    actor.pos.y > target_y && actor.vel_y >= 0.0
}
