//! Rendering module
//!
//! The simulation calls [`Painter`] once per entity per frame. `SceneBuilder`
//! turns those calls into colored triangles in canvas coordinates and
//! `RenderState` draws them with WebGPU.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::SceneBuilder;
pub use vertex::Vertex;

use crate::sim::{Actor, Obstacle};

/// Per-frame draw hook. Canvas coordinates: origin top-left, y down.
pub trait Painter {
    fn background(&mut self);
    fn obstacle(&mut self, obstacle: &Obstacle);
    fn actor(&mut self, actor: &Actor);
    /// Ground strip; `scroll` is the distance the world has moved this session
    fn ground(&mut self, scroll: f32);
}
