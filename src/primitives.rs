//! Closed-form distance fields, all centered on the origin.

use nalgebra::Vector2;

use crate::{
    bounds::Aabb,
    error::{Result, SdfError},
    sdf::SignedDistance,
    types::{Point, Value, Vector, length_n},
};

/// Sphere measured in an Lp-norm. An exponent of `2` is the round sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: Value,
    pub exponent: Value,
}

impl Sphere {
    pub fn new(radius: Value) -> Self {
        Self {
            radius,
            exponent: 2.0,
        }
    }

    pub fn with_exponent(mut self, exponent: Value) -> Self {
        self.exponent = exponent;
        self
    }
}

impl SignedDistance for Sphere {
    fn evaluate(&self, p: &Point) -> Value {
        length_n(&p.coords, self.exponent) - self.radius
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::symmetric(Vector::repeat(self.radius))
    }
}

/// Truncated cone around the Z axis with optionally rounded edges.
///
/// The base circle sits at `z = -height / 2`, the top circle at `z = height / 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    base_radius: Value,
    top_radius: Value,
    height: Value,
    round: Value,
    profile: ConeProfile,
}

/// Slope geometry of the cone's core, inset by the rounding radius.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ConeProfile {
    half_height: Value,
    slope: Vector2<Value>,
    normal: Vector2<Value>,
    base_radius: Value,
    top_radius: Value,
    slope_length: Value,
}

impl Cone {
    /// Fails with [`SdfError::InvalidCone`] on negative radii, a non-positive
    /// height, or a rounding radius that does not fit in half the height or
    /// inside either rim.
    pub fn new(base_radius: Value, top_radius: Value, height: Value, round: Value) -> Result<Self> {
        let params = [base_radius, top_radius, height, round];
        if params.iter().any(|v| !v.is_finite())
            || base_radius < 0.0
            || top_radius < 0.0
            || height <= 0.0
            || round < 0.0
            || round >= height / 2.0
        {
            return Err(SdfError::InvalidCone);
        }

        let half_height = height / 2.0 - round;
        let slope = (Vector2::new(top_radius, half_height)
            - Vector2::new(base_radius, -half_height))
        .normalize();
        let normal = Vector2::new(slope.y, -slope.x);
        let inset = round / normal.x;
        let sr0 = base_radius - (1.0 + normal.y) * inset;
        let sr1 = top_radius - (1.0 - normal.y) * inset;
        // Rounding wider than a rim leaves no core profile to inset from.
        if sr0 < 0.0 || sr1 < 0.0 {
            return Err(SdfError::InvalidCone);
        }
        let slope_length = (Vector2::new(sr1, half_height) - Vector2::new(sr0, -half_height)).norm();

        Ok(Self {
            base_radius,
            top_radius,
            height,
            round,
            profile: ConeProfile {
                half_height,
                slope,
                normal,
                base_radius: sr0,
                top_radius: sr1,
                slope_length,
            },
        })
    }

    pub fn base_radius(&self) -> Value {
        self.base_radius
    }

    pub fn top_radius(&self) -> Value {
        self.top_radius
    }

    pub fn height(&self) -> Value {
        self.height
    }

    pub fn round(&self) -> Value {
        self.round
    }
}

impl SignedDistance for Cone {
    fn evaluate(&self, p: &Point) -> Value {
        let ConeProfile {
            half_height: h,
            slope,
            normal,
            base_radius: sr0,
            top_radius: sr1,
            slope_length,
        } = self.profile;
        let round = self.round;

        // Surface-of-revolution coordinates: (radial, axial).
        let q = Vector2::new(p.x.hypot(p.y), p.z);

        // The branch order decides ties on shared boundaries.
        if q.y >= h && q.x <= sr1 {
            return q.y - h - round;
        }
        if q.y <= -h && q.x <= sr0 {
            return -q.y - h - round;
        }
        let v = q - Vector2::new(sr0, -h);
        let d_slope = v.dot(&normal);
        if d_slope < 0.0 && q.y.abs() < h {
            return -(-d_slope).min(h - q.y.abs()) - round;
        }
        let t = v.dot(&slope);
        if (0.0..=slope_length).contains(&t) {
            return d_slope - round;
        }
        if t < 0.0 {
            return v.norm() - round;
        }
        (q - Vector2::new(sr1, h)).norm() - round
    }

    fn bounding_box(&self) -> Aabb {
        let r = self.base_radius.max(self.top_radius);
        Aabb::symmetric(Vector::new(r, r, self.height / 2.0))
    }
}

/// Axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cube {
    pub half_extents: Vector,
}

impl Cube {
    /// `size` holds the full edge lengths along each axis.
    pub fn new(size: Vector) -> Self {
        Self {
            half_extents: size / 2.0,
        }
    }
}

impl SignedDistance for Cube {
    fn evaluate(&self, p: &Point) -> Value {
        let overflow = p.coords.abs() - self.half_extents;
        let inside = overflow.x.max(overflow.y).max(overflow.z).min(0.0);
        let outside = overflow.sup(&Vector::zeros()).norm();
        inside + outside
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::symmetric(self.half_extents)
    }
}

/// Capped cylinder around the Y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub radius: Value,
    pub height: Value,
}

impl Cylinder {
    pub fn new(radius: Value, height: Value) -> Self {
        Self { radius, height }
    }
}

impl SignedDistance for Cylinder {
    fn evaluate(&self, p: &Point) -> Value {
        let overflow = Vector2::new(p.x.hypot(p.z) - self.radius, p.y.abs() - self.height / 2.0);
        let inside = overflow.x.max(overflow.y).min(0.0);
        let outside = overflow.sup(&Vector2::zeros()).norm();
        inside + outside
    }

    fn bounding_box(&self) -> Aabb {
        let r = self.radius;
        Aabb::symmetric(Vector::new(r, self.height / 2.0, r))
    }
}

/// Segment `a`–`b` swept by a ball of `radius`, measured in an Lp-norm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub a: Point,
    pub b: Point,
    pub radius: Value,
    pub exponent: Value,
}

impl Capsule {
    pub fn new(a: Point, b: Point, radius: Value) -> Self {
        Self {
            a,
            b,
            radius,
            exponent: 2.0,
        }
    }

    pub fn with_exponent(mut self, exponent: Value) -> Self {
        self.exponent = exponent;
        self
    }
}

impl SignedDistance for Capsule {
    fn evaluate(&self, p: &Point) -> Value {
        let pa = p - self.a;
        let ba = self.b - self.a;
        let len2 = ba.norm_squared();
        // A zero-length segment degenerates to a sphere around `a`.
        let h = if len2 > 0.0 {
            (pa.dot(&ba) / len2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        length_n(&(pa - ba * h), self.exponent) - self.radius
    }

    fn bounding_box(&self) -> Aabb {
        let r = Vector::repeat(self.radius);
        Aabb::new(self.a.inf(&self.b) - r, self.a.sup(&self.b) + r)
    }
}

/// Ring of `major_radius` in the XY plane, swept by a tube of `minor_radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    pub major_radius: Value,
    pub minor_radius: Value,
    pub major_exponent: Value,
    pub minor_exponent: Value,
}

impl Torus {
    pub fn new(major_radius: Value, minor_radius: Value) -> Self {
        Self {
            major_radius,
            minor_radius,
            major_exponent: 2.0,
            minor_exponent: 2.0,
        }
    }

    pub fn with_exponents(mut self, major: Value, minor: Value) -> Self {
        self.major_exponent = major;
        self.minor_exponent = minor;
        self
    }
}

impl SignedDistance for Torus {
    fn evaluate(&self, p: &Point) -> Value {
        let ring = length_n(&Vector::new(p.x, p.y, 0.0), self.major_exponent) - self.major_radius;
        length_n(&Vector::new(ring, p.z, 0.0), self.minor_exponent) - self.minor_radius
    }

    fn bounding_box(&self) -> Aabb {
        let a = self.minor_radius;
        let b = self.major_radius + self.minor_radius;
        Aabb::symmetric(Vector::new(b, b, a))
    }
}
