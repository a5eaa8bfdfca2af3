use derive_more::From;
use nalgebra::Unit;

use crate::{
    bounds::Aabb,
    csg::{Difference, Intersection, Union},
    error::Result,
    primitives::{Capsule, Cone, Cube, Cylinder, Sphere, Torus},
    transforms::{Repeat, Scale, Transform},
    types::{Matrix, Point, Value, Vector},
};

/// A solid described by its signed distance field.
///
/// `evaluate` is negative strictly inside, zero on the boundary and positive
/// outside. Well-formed fields are 1-Lipschitz, which is what lets
/// [`SdfShape`](crate::shape::SdfShape) use the value as a safe marching step.
///
/// `bounding_box` must contain the whole zero-level-set.
pub trait SignedDistance: Send + Sync {
    fn evaluate(&self, p: &Point) -> Value;
    fn bounding_box(&self) -> Aabb;
}

/// Every primitive and combinator behind one dispatch level.
///
/// Combinators own their children, so a composed `Sdf` is always a strict tree.
#[derive(Debug, Clone, From)]
pub enum Sdf {
    Sphere(Sphere),
    Cone(Cone),
    Cube(Cube),
    Cylinder(Cylinder),
    Capsule(Capsule),
    Torus(Torus),
    Transform(Transform),
    Scale(Scale),
    Repeat(Repeat),
    Union(Union),
    Difference(Difference),
    Intersection(Intersection),
}

impl SignedDistance for Sdf {
    fn evaluate(&self, p: &Point) -> Value {
        match self {
            Sdf::Sphere(s) => s.evaluate(p),
            Sdf::Cone(s) => s.evaluate(p),
            Sdf::Cube(s) => s.evaluate(p),
            Sdf::Cylinder(s) => s.evaluate(p),
            Sdf::Capsule(s) => s.evaluate(p),
            Sdf::Torus(s) => s.evaluate(p),
            Sdf::Transform(s) => s.evaluate(p),
            Sdf::Scale(s) => s.evaluate(p),
            Sdf::Repeat(s) => s.evaluate(p),
            Sdf::Union(s) => s.evaluate(p),
            Sdf::Difference(s) => s.evaluate(p),
            Sdf::Intersection(s) => s.evaluate(p),
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            Sdf::Sphere(s) => s.bounding_box(),
            Sdf::Cone(s) => s.bounding_box(),
            Sdf::Cube(s) => s.bounding_box(),
            Sdf::Cylinder(s) => s.bounding_box(),
            Sdf::Capsule(s) => s.bounding_box(),
            Sdf::Torus(s) => s.bounding_box(),
            Sdf::Transform(s) => s.bounding_box(),
            Sdf::Scale(s) => s.bounding_box(),
            Sdf::Repeat(s) => s.bounding_box(),
            Sdf::Union(s) => s.bounding_box(),
            Sdf::Difference(s) => s.bounding_box(),
            Sdf::Intersection(s) => s.bounding_box(),
        }
    }
}

impl Sdf {
    /// Wraps `self` in a general affine [`Transform`].
    ///
    /// Fails with [`SdfError::SingularMatrix`](crate::error::SdfError::SingularMatrix)
    /// when `matrix` cannot be inverted.
    pub fn transform(self, matrix: Matrix) -> Result<Sdf> {
        Transform::new(self, matrix).map(Sdf::from)
    }

    pub fn translate(self, offset: Vector) -> Sdf {
        Transform::translation(self, offset).into()
    }

    pub fn rotate(self, axis: &Unit<Vector>, angle: Value) -> Sdf {
        Transform::rotation(self, axis, angle).into()
    }

    pub fn scale(self, factor: Value) -> Result<Sdf> {
        Scale::new(self, factor).map(Sdf::from)
    }

    /// Tiles `self` with period `step`. `bounds` is the finite region reported
    /// as the bounding box; the tiled field itself is unbounded.
    pub fn repeat(self, step: Vector, bounds: Aabb) -> Result<Sdf> {
        Repeat::new(self, step, bounds).map(Sdf::from)
    }

    pub fn union(self, other: impl Into<Sdf>) -> Sdf {
        Sdf::Union(Union {
            children: vec![self, other.into()],
        })
    }

    /// `self` with `other` carved out.
    pub fn difference(self, other: impl Into<Sdf>) -> Sdf {
        Sdf::Difference(Difference {
            children: vec![self, other.into()],
        })
    }

    pub fn intersection(self, other: impl Into<Sdf>) -> Sdf {
        Sdf::Intersection(Intersection {
            children: vec![self, other.into()],
        })
    }
}
