//! The player-controlled bird

use glam::Vec2;

use super::collision::Aabb;
use crate::consts::*;
use crate::renderer::Painter;

/// A falling/flapping body with a fixed horizontal position
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Top-left corner in playfield coordinates
    pub pos: Vec2,
    /// Vertical velocity in units per tick (positive is down)
    pub vel_y: f32,
    pub size: Vec2,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new()
    }
}

impl Actor {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(ACTOR_X, ACTOR_START_Y),
            vel_y: 0.0,
            size: Vec2::new(ACTOR_WIDTH, ACTOR_HEIGHT),
        }
    }

    /// Flap: velocity is overwritten, never accumulated
    pub fn apply_impulse(&mut self) {
        self.vel_y = IMPULSE_VELOCITY;
    }

    /// One physics step. Position is clamped into the playfield afterwards.
    pub fn tick(&mut self) {
        self.vel_y += GRAVITY;
        self.pos.y += self.vel_y;
        self.pos.y = self.pos.y.clamp(0.0, self.floor_y());
    }

    /// Lowest allowed top edge
    #[inline]
    pub fn floor_y(&self) -> f32 {
        PLAYFIELD_HEIGHT - self.size.y
    }

    /// Pinned to the lower playfield boundary
    #[inline]
    pub fn on_ground(&self) -> bool {
        self.pos.y >= self.floor_y()
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        painter.actor(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_tick_from_rest() {
        let mut actor = Actor::new();
        actor.pos.y = 50.0;
        actor.vel_y = 0.0;

        actor.tick();

        assert!((actor.vel_y - 0.3).abs() < 1e-5);
        assert!((actor.pos.y - 50.3).abs() < 1e-4);
    }

    #[test]
    fn test_impulse_overwrites_velocity() {
        let mut actor = Actor::new();
        actor.vel_y = 4.2;
        actor.apply_impulse();
        actor.apply_impulse();
        assert_eq!(actor.vel_y, IMPULSE_VELOCITY);
    }

    #[test]
    fn test_clamped_at_ceiling_and_floor() {
        let mut actor = Actor::new();
        actor.pos.y = 1.0;
        actor.vel_y = -20.0;
        actor.tick();
        assert_eq!(actor.pos.y, 0.0);
        assert!(!actor.on_ground());

        actor.pos.y = actor.floor_y() - 1.0;
        actor.vel_y = 10.0;
        actor.tick();
        assert_eq!(actor.pos.y, actor.floor_y());
        assert!(actor.on_ground());
    }

    proptest! {
        #[test]
        fn prop_position_stays_in_playfield(
            start_y in 0.0f32..(PLAYFIELD_HEIGHT - ACTOR_HEIGHT),
            flaps in proptest::collection::vec(any::<bool>(), 1..400),
        ) {
            let mut actor = Actor::new();
            actor.pos.y = start_y;
            for flap in flaps {
                if flap {
                    actor.apply_impulse();
                }
                actor.tick();
                prop_assert!(actor.pos.y >= 0.0);
                prop_assert!(actor.pos.y <= PLAYFIELD_HEIGHT - ACTOR_HEIGHT);
            }
        }
    }
}
