//! Pointer velocity in position units per millisecond.

use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Displacement over `elapsed_millis`.
    pub fn from_delta(delta: Point, elapsed_millis: f32) -> Self {
        Self::new(delta.x / elapsed_millis, delta.y / elapsed_millis)
    }

    pub fn speed(&self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unit direction of travel, or `None` when the pointer is at rest.
    pub fn direction(&self) -> Option<Point> {
        self.as_point().normalized()
    }

    pub fn as_point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl From<Point> for Velocity {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_delta_divides_by_elapsed() {
        let velocity = Velocity::from_delta(Point::new(30.0, -60.0), 10.0);
        assert_eq!(velocity, Velocity::new(3.0, -6.0));
    }

    #[test]
    fn speed_is_magnitude() {
        assert_eq!(Velocity::new(3.0, 4.0).speed(), 5.0);
        assert_eq!(Velocity::ZERO.speed(), 0.0);
        assert!(Velocity::ZERO.direction().is_none());
    }
}
