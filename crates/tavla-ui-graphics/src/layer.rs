use crate::geometry::Point;

/// Rendered transform of one die, relative to its rest slot.
///
/// `rotation_z` spins the die in the screen plane. `rotation_x` and
/// `rotation_y` carry the drag tilt; flat sprite backends ignore them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphicsLayer {
    pub translation_x: f32,
    pub translation_y: f32,
    /// Degrees.
    pub rotation_z: f32,
    /// Degrees.
    pub rotation_x: f32,
    /// Degrees.
    pub rotation_y: f32,
    pub scale: f32,
}

impl GraphicsLayer {
    pub const REST: GraphicsLayer = GraphicsLayer {
        translation_x: 0.0,
        translation_y: 0.0,
        rotation_z: 0.0,
        rotation_x: 0.0,
        rotation_y: 0.0,
        scale: 1.0,
    };

    pub fn translation(&self) -> Point {
        Point::new(self.translation_x, self.translation_y)
    }

    pub fn is_at_rest(&self) -> bool {
        *self == Self::REST
    }
}

impl Default for GraphicsLayer {
    fn default() -> Self {
        Self::REST
    }
}
