use crate::{
    ray::Ray,
    types::{Matrix, Point, Value, Vector},
};

/// Axis-aligned bounding box.
///
/// Every [`SignedDistance`](crate::sdf::SignedDistance) reports one that fully
/// contains its zero-level-set; tracing and sampling rely on it for correctness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point,
    pub max: Point,
}

impl Aabb {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Builds the box spanned by two arbitrary opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Returns the box centered at the origin with the given half extents.
    pub fn symmetric(half: Vector) -> Self {
        Self {
            min: Point::from(-half),
            max: Point::from(half),
        }
    }

    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    pub fn center(&self) -> Point {
        nalgebra::center(&self.min, &self.max)
    }

    /// True when both corners are finite and `min <= max` on every axis.
    pub fn is_finite(&self) -> bool {
        self.min.iter().chain(self.max.iter()).all(|c| c.is_finite())
            && self.min.iter().zip(self.max.iter()).all(|(lo, hi)| lo <= hi)
    }

    pub fn contains(&self, p: &Point) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }

    /// Axis-wise union with `other`.
    pub fn extend(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Returns the box containing all eight corners of `self` mapped through `matrix`.
    pub fn transform(&self, matrix: &Matrix) -> Aabb {
        let mut corners = (0..8).map(|i| {
            let pick = |bit: usize, axis: usize| {
                if i & bit == 0 { self.min[axis] } else { self.max[axis] }
            };
            matrix.transform_point(&Point::new(pick(1, 0), pick(2, 1), pick(4, 2)))
        });
        // `corners` always yields eight points.
        let first = corners.next().unwrap_or(self.min);
        corners.fold(Aabb::new(first, first), |acc, p| Aabb {
            min: acc.min.inf(&p),
            max: acc.max.sup(&p),
        })
    }

    /// Uniformly scales both corners about the origin. `factor` must be positive.
    pub fn scale(&self, factor: Value) -> Aabb {
        Aabb {
            min: self.min * factor,
            max: self.max * factor,
        }
    }

    /// Slab test: returns the `(t1, t2)` parameters where `ray` enters and leaves the box.
    ///
    /// There is no overlap when `t2 < t1`. The interval may start behind the
    /// ray origin, so callers also check `t2 < 0`.
    pub fn intersect_ray(&self, ray: &Ray) -> (Value, Value) {
        let mut t1 = Value::NEG_INFINITY;
        let mut t2 = Value::INFINITY;
        for axis in 0..3 {
            let mut near = (self.min[axis] - ray.origin[axis]) / ray.direction[axis];
            let mut far = (self.max[axis] - ray.origin[axis]) / ray.direction[axis];
            if near > far {
                std::mem::swap(&mut near, &mut far);
            }
            t1 = t1.max(near);
            t2 = t2.min(far);
        }
        (t1, t2)
    }
}
