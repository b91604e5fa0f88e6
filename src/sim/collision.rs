//! Collision detection between the actor, obstacles and the ground
//!
//! Everything is axis-aligned, so the only geometry needed is a box overlap
//! test. Edges that merely touch do not collide.

use glam::Vec2;

use super::actor::Actor;
use super::obstacle::ObstacleField;
use crate::settings::GroundRule;

/// Axis-aligned bounding box in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from a top-left corner and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict overlap of the horizontal spans
    #[inline]
    pub fn overlaps_x(&self, min_x: f32, max_x: f32) -> bool {
        self.max.x > min_x && self.min.x < max_x
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other.min.x, other.max.x)
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Actor hit an obstacle barrier
    Obstacle,
    /// Actor was pinned to the lower playfield boundary
    Ground,
}

/// Check the actor against every live obstacle and the ground.
///
/// Obstacles are checked first so a run that clips a barrier on its way to
/// the floor reports the barrier. Ground contact only counts under
/// [`GroundRule::EndsGame`].
pub fn detect(actor: &Actor, field: &ObstacleField, ground: GroundRule) -> Option<CollisionKind> {
    if field.iter().any(|obstacle| obstacle.intersects(actor)) {
        return Some(CollisionKind::Obstacle);
    }

    if ground == GroundRule::EndsGame && actor.on_ground() {
        return Some(CollisionKind::Ground);
    }

    None
}

/// Boolean form of [`detect`]
#[inline]
pub fn collides(actor: &Actor, field: &ObstacleField, ground: GroundRule) -> bool {
    detect(actor, field, ground).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::obstacle::Obstacle;

    fn field_with(obstacle: Obstacle) -> ObstacleField {
        let mut field = ObstacleField::new(1);
        field.insert(obstacle);
        field
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(!a.overlaps(&b));

        let c = Aabb::new(Vec2::new(9.5, 9.5), Vec2::new(20.0, 20.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_detect_empty_field_mid_air() {
        let actor = Actor::new();
        let field = ObstacleField::new(7);
        assert_eq!(detect(&actor, &field, GroundRule::EndsGame), None);
    }

    #[test]
    fn test_detect_obstacle_hit() {
        let mut actor = Actor::new();
        actor.pos.y = 90.0;
        let field = field_with(Obstacle::new(ACTOR_X - 10.0, 100.0));
        assert_eq!(
            detect(&actor, &field, GroundRule::EndsGame),
            Some(CollisionKind::Obstacle)
        );
        assert!(collides(&actor, &field, GroundRule::Clamp));
    }

    #[test]
    fn test_ground_contact_ends_game_only_under_rule() {
        let mut actor = Actor::new();
        actor.pos.y = actor.floor_y();
        let field = ObstacleField::new(3);

        assert_eq!(
            detect(&actor, &field, GroundRule::EndsGame),
            Some(CollisionKind::Ground)
        );
        assert_eq!(detect(&actor, &field, GroundRule::Clamp), None);
    }

    #[test]
    fn test_obstacle_reported_before_ground() {
        let mut actor = Actor::new();
        actor.pos.y = actor.floor_y();
        // Gap far above the floor so the lower barrier covers the actor
        let field = field_with(Obstacle::new(ACTOR_X, OBSTACLE_MARGIN));
        assert_eq!(
            detect(&actor, &field, GroundRule::EndsGame),
            Some(CollisionKind::Obstacle)
        );
    }
}
