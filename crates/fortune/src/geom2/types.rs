//! Small value types shared by the primitives.

use nalgebra::Vector2;

/// Position of a point relative to the directed line `begin → end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    OnLine,
}

/// Half-line `start + t · direction`, `t >= 0`. The direction is not normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub start: Vector2<f64>,
    pub direction: Vector2<f64>,
}

impl Ray {
    #[inline]
    pub fn new(start: Vector2<f64>, direction: Vector2<f64>) -> Self {
        Self { start, direction }
    }
    #[inline]
    pub fn at(&self, t: f64) -> Vector2<f64> {
        self.start + self.direction * t
    }
}
