//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::Painter;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Aabb, Actor, Obstacle};

/// Pipe lip overhang on each side
const LIP_OVERHANG: f32 = 3.0;
const LIP_HEIGHT: f32 = 24.0;
/// Grass strip on top of the ground, with scrolling stripes
const GRASS_HEIGHT: f32 = 12.0;
const STRIPE_WIDTH: f32 = 12.0;

/// Two triangles covering the box
pub fn rect(bounds: &Aabb, color: [f32; 4]) -> Vec<Vertex> {
    let Aabb { min, max } = *bounds;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, max.y, color),
        Vertex::new(min.x, max.y, color),
    ]
}

pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Triangle fan approximating an axis-aligned ellipse
pub fn ellipse(center: Vec2, radii: Vec2, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    ellipse(center, Vec2::splat(radius), color, segments)
}

/// One pipe: shaded body plus a wider lip at the gap end
fn pipe(body: &Aabb, lip_at_bottom: bool) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(24);
    if body.height() <= 0.0 {
        return vertices;
    }

    vertices.extend(rect(body, colors::PIPE));
    let shade = Aabb::new(
        Vec2::new(body.max.x - body.width() * 0.2, body.min.y),
        body.max,
    );
    vertices.extend(rect(&shade, colors::PIPE_SHADE));

    let lip_height = LIP_HEIGHT.min(body.height());
    let (lip_min_y, lip_max_y) = if lip_at_bottom {
        (body.max.y - lip_height, body.max.y)
    } else {
        (body.min.y, body.min.y + lip_height)
    };
    let lip = Aabb::new(
        Vec2::new(body.min.x - LIP_OVERHANG, lip_min_y),
        Vec2::new(body.max.x + LIP_OVERHANG, lip_max_y),
    );
    vertices.extend(rect(&lip, colors::PIPE_OUTLINE));
    let lip_inner = Aabb::new(lip.min + Vec2::splat(2.0), lip.max - Vec2::splat(2.0));
    vertices.extend(rect(&lip_inner, colors::PIPE));

    vertices
}

/// Collects a frame's triangles from the simulation's draw calls
#[derive(Debug, Default)]
pub struct SceneBuilder {
    vertices: Vec<Vertex>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame, keeping the allocation
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

impl Painter for SceneBuilder {
    fn background(&mut self) {
        let sky = Aabb::new(Vec2::ZERO, Vec2::new(CANVAS_WIDTH, PLAYFIELD_HEIGHT));
        self.vertices.extend(rect(&sky, colors::SKY));

        // Cloud bank along the horizon
        let base = PLAYFIELD_HEIGHT - 40.0;
        for i in 0..7 {
            let x = i as f32 * 48.0;
            let r = if i % 2 == 0 { 30.0 } else { 22.0 };
            self.vertices
                .extend(circle(Vec2::new(x, base), r, colors::CLOUD, 16));
        }
        let bank = Aabb::new(
            Vec2::new(0.0, base),
            Vec2::new(CANVAS_WIDTH, PLAYFIELD_HEIGHT),
        );
        self.vertices.extend(rect(&bank, colors::CLOUD));
    }

    fn obstacle(&mut self, obstacle: &Obstacle) {
        self.vertices.extend(pipe(&obstacle.upper_bounds(), true));
        self.vertices.extend(pipe(&obstacle.lower_bounds(), false));
    }

    fn actor(&mut self, actor: &Actor) {
        let bounds = actor.bounds();
        let center = (bounds.min + bounds.max) * 0.5;
        let half = actor.size * 0.5;

        self.vertices
            .extend(ellipse(center, half, colors::BIRD, 20));

        // Wing drops while falling, lifts while climbing
        let wing_lift = (actor.vel_y * 0.6).clamp(-4.0, 4.0);
        let wing_center = center + Vec2::new(-half.x * 0.45, wing_lift);
        self.vertices.extend(ellipse(
            wing_center,
            Vec2::new(half.x * 0.4, half.y * 0.3),
            colors::BIRD_WING,
            12,
        ));

        let eye = center + Vec2::new(half.x * 0.45, -half.y * 0.35);
        self.vertices.extend(circle(eye, half.y * 0.4, colors::EYE, 12));
        self.vertices.extend(circle(
            eye + Vec2::new(1.5, 0.0),
            half.y * 0.17,
            colors::PUPIL,
            8,
        ));

        let beak_root = center + Vec2::new(half.x * 0.6, half.y * 0.1);
        self.vertices.extend(triangle(
            beak_root + Vec2::new(0.0, -4.0),
            beak_root + Vec2::new(half.x * 0.7, 1.0),
            beak_root + Vec2::new(0.0, 5.0),
            colors::BEAK,
        ));
    }

    fn ground(&mut self, scroll: f32) {
        let dirt = Aabb::new(
            Vec2::new(0.0, PLAYFIELD_HEIGHT),
            Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        );
        self.vertices.extend(rect(&dirt, colors::DIRT));

        let grass = Aabb::new(
            Vec2::new(0.0, PLAYFIELD_HEIGHT),
            Vec2::new(CANVAS_WIDTH, PLAYFIELD_HEIGHT + GRASS_HEIGHT),
        );
        self.vertices.extend(rect(&grass, colors::GRASS));

        // Diagonal stripes move with the pipes
        let period = STRIPE_WIDTH * 2.0;
        let offset = scroll.rem_euclid(period);
        let mut x = -offset;
        while x < CANVAS_WIDTH {
            let top = PLAYFIELD_HEIGHT;
            let bottom = PLAYFIELD_HEIGHT + GRASS_HEIGHT;
            self.vertices.extend(triangle(
                Vec2::new(x, bottom),
                Vec2::new(x + STRIPE_WIDTH * 0.5, top),
                Vec2::new(x + STRIPE_WIDTH, bottom),
                colors::GRASS_STRIPE,
            ));
            x += period;
        }
    }
}
