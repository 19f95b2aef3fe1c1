//! Pure math/data for the Tavla dice engine
//!
//! Geometry primitives, pointer velocities and the per-die transform
//! (`GraphicsLayer`) that the animation controller writes and visual
//! backends read.

mod geometry;
mod layer;
mod velocity;

pub use geometry::*;
pub use layer::*;
pub use velocity::*;

pub mod prelude {
    pub use crate::geometry::{Point, Rect, Size};
    pub use crate::layer::GraphicsLayer;
    pub use crate::velocity::Velocity;
}
