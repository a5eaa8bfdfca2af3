use crate::types::{Point, Value, Vector};

/// A half-line `origin + t * direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray.
    #[inline]
    pub fn position(&self, t: Value) -> Point {
        self.origin + self.direction * t
    }
}
