//! Combinators that remap the query point before evaluating one child.

use nalgebra::Unit;

use crate::{
    bounds::Aabb,
    error::{Result, SdfError},
    sdf::{Sdf, SignedDistance},
    types::{Matrix, Point, Value, Vector},
};

/// General affine placement of a child field.
///
/// The query point is pulled back through the inverse matrix. Distances stay
/// exact only for rigid motions; shear or non-uniform scale leaves a field
/// that is no longer 1-Lipschitz and can make sphere tracing overshoot.
#[derive(Debug, Clone)]
pub struct Transform {
    child: Box<Sdf>,
    matrix: Matrix,
    inverse: Matrix,
}

impl Transform {
    pub fn new(child: impl Into<Sdf>, matrix: Matrix) -> Result<Self> {
        let inverse = matrix.try_inverse().ok_or(SdfError::SingularMatrix)?;
        Ok(Self {
            child: Box::new(child.into()),
            matrix,
            inverse,
        })
    }

    pub fn translation(child: impl Into<Sdf>, offset: Vector) -> Self {
        Self {
            child: Box::new(child.into()),
            matrix: Matrix::new_translation(&offset),
            inverse: Matrix::new_translation(&-offset),
        }
    }

    /// Rotation by `angle` radians about `axis` through the origin.
    pub fn rotation(child: impl Into<Sdf>, axis: &Unit<Vector>, angle: Value) -> Self {
        Self {
            child: Box::new(child.into()),
            matrix: Matrix::from_axis_angle(axis, angle),
            inverse: Matrix::from_axis_angle(axis, -angle),
        }
    }

    pub fn child(&self) -> &Sdf {
        &self.child
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}

impl SignedDistance for Transform {
    fn evaluate(&self, p: &Point) -> Value {
        self.child.evaluate(&self.inverse.transform_point(p))
    }

    fn bounding_box(&self) -> Aabb {
        self.child.bounding_box().transform(&self.matrix)
    }
}

/// Uniform scale about the origin. Unlike [`Transform`] this keeps the field
/// an exact distance by rescaling the child's result.
#[derive(Debug, Clone)]
pub struct Scale {
    child: Box<Sdf>,
    factor: Value,
}

impl Scale {
    /// Fails with [`SdfError::InvalidScale`] unless `factor` is finite and positive.
    pub fn new(child: impl Into<Sdf>, factor: Value) -> Result<Self> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(SdfError::InvalidScale);
        }
        Ok(Self {
            child: Box::new(child.into()),
            factor,
        })
    }

    pub fn child(&self) -> &Sdf {
        &self.child
    }

    pub fn factor(&self) -> Value {
        self.factor
    }
}

impl SignedDistance for Scale {
    fn evaluate(&self, p: &Point) -> Value {
        self.child.evaluate(&(p / self.factor)) * self.factor
    }

    fn bounding_box(&self) -> Aabb {
        self.child.bounding_box().scale(self.factor)
    }
}

/// Infinite periodic tiling of a child field.
///
/// Each axis is reduced modulo `step` and re-centered on the tile, so the
/// child's origin lands at `step / 2 + k * step`. The tiled field has no finite
/// extent of its own; the caller supplies the region to report as its
/// bounding box. Children reaching past half a step are cut at tile borders,
/// where the field stops being 1-Lipschitz.
#[derive(Debug, Clone)]
pub struct Repeat {
    child: Box<Sdf>,
    step: Vector,
    bounds: Aabb,
}

impl Repeat {
    /// Fails with [`SdfError::InvalidStep`] unless every `step` component is
    /// finite and positive, and with [`SdfError::UnboundedRegion`] unless
    /// `bounds` is finite.
    pub fn new(child: impl Into<Sdf>, step: Vector, bounds: Aabb) -> Result<Self> {
        if step.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(SdfError::InvalidStep);
        }
        if !bounds.is_finite() {
            return Err(SdfError::UnboundedRegion);
        }
        Ok(Self {
            child: Box::new(child.into()),
            step,
            bounds,
        })
    }

    pub fn child(&self) -> &Sdf {
        &self.child
    }

    pub fn step(&self) -> &Vector {
        &self.step
    }
}

impl SignedDistance for Repeat {
    fn evaluate(&self, p: &Point) -> Value {
        let wrapped = p
            .coords
            .zip_map(&self.step, |c, s| c - s * (c / s).floor());
        self.child.evaluate(&Point::from(wrapped - self.step / 2.0))
    }

    fn bounding_box(&self) -> Aabb {
        self.bounds
    }
}
