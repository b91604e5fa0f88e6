//! Scrolling pipe pairs and the field that spawns them

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::collision::Aabb;
use crate::consts::*;
use crate::renderer::Painter;

/// A pair of vertical barriers with a fixed-height gap between them
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Bottom of the upper barrier
    pub gap_top: f32,
    /// Top of the lower barrier, always `gap_top + OBSTACLE_GAP`
    pub gap_bottom: f32,
    /// Units scrolled left per tick
    pub speed: f32,
    /// Already counted toward the score
    pub passed: bool,
}

impl Obstacle {
    pub fn new(x: f32, gap_top: f32) -> Self {
        Self {
            x,
            width: OBSTACLE_WIDTH,
            gap_top,
            gap_bottom: gap_top + OBSTACLE_GAP,
            speed: SCROLL_SPEED,
            passed: false,
        }
    }

    /// Spawn at the right edge of the playfield with a random gap that keeps
    /// `OBSTACLE_MARGIN` clear above and below.
    ///
    /// The gap top is a whole number of units so `gap_bottom - gap_top` is
    /// exactly `OBSTACLE_GAP` in f32.
    pub fn spawn(rng: &mut Pcg32) -> Self {
        let highest_top = OBSTACLE_MARGIN as u32;
        let lowest_top = (PLAYFIELD_HEIGHT - OBSTACLE_MARGIN - OBSTACLE_GAP) as u32;
        let gap_top = rng.random_range(highest_top..=lowest_top) as f32;
        Self::new(PLAYFIELD_WIDTH, gap_top)
    }

    pub fn tick(&mut self) {
        self.x -= self.speed;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn gap_height(&self) -> f32 {
        self.gap_bottom - self.gap_top
    }

    /// Fully scrolled past the left edge
    pub fn is_offscreen(&self) -> bool {
        self.right() < 0.0
    }

    /// The actor overlaps this obstacle's column and pokes out of the gap.
    /// Touching an edge exactly is not a hit.
    pub fn intersects(&self, actor: &Actor) -> bool {
        let body = actor.bounds();
        body.overlaps(&self.upper_bounds()) || body.overlaps(&self.lower_bounds())
    }

    /// Upper barrier, from the playfield top down to the gap
    pub fn upper_bounds(&self) -> Aabb {
        Aabb::new(Vec2::new(self.x, 0.0), Vec2::new(self.right(), self.gap_top))
    }

    /// Lower barrier, from the gap down to the ground
    pub fn lower_bounds(&self) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, self.gap_bottom),
            Vec2::new(self.right(), PLAYFIELD_HEIGHT),
        )
    }

    pub fn draw<P: Painter + ?Sized>(&self, painter: &mut P) {
        painter.obstacle(self);
    }
}

/// Live obstacles in spawn order, which is also left-to-right screen order
#[derive(Debug, Clone)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    rng: Pcg32,
}

impl ObstacleField {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Spawn on the cadence, scroll everything, then drop what left the screen
    pub fn tick(&mut self, frame: u64) {
        if frame % SPAWN_INTERVAL == 0 {
            let obstacle = Obstacle::spawn(&mut self.rng);
            log::debug!(
                "Spawned obstacle at frame {} (gap {:.1}..{:.1})",
                frame,
                obstacle.gap_top,
                obstacle.gap_bottom
            );
            self.obstacles.push(obstacle);
        }

        for obstacle in &mut self.obstacles {
            obstacle.tick();
        }

        self.obstacles.retain(|o| !o.is_offscreen());
    }

    /// Mark every obstacle whose right edge moved left of the actor as
    /// passed. Returns how many were newly passed this call.
    pub fn score_crossings(&mut self, actor: &Actor) -> u32 {
        let mut crossed = 0;
        for obstacle in &mut self.obstacles {
            if !obstacle.passed && obstacle.right() < actor.pos.x {
                obstacle.passed = true;
                crossed += 1;
            }
        }
        crossed
    }

    /// Append an obstacle directly (bypasses the spawn cadence)
    pub fn insert(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
