use nalgebra::{Matrix4, Point3, Vector3};

/// Scalar field value at a point in space.
pub type Value = f64;

/// A 3D point with [`Value`] components.
pub type Point = Point3<Value>;

/// A 3D vector with [`Value`] components.
pub type Vector = Vector3<Value>;

/// A homogeneous 4×4 transform with [`Value`] components.
pub type Matrix = Matrix4<Value>;

/// Lp-norm of `v`.
///
/// An exponent of `2` is the Euclidean length; larger exponents flatten the
/// unit ball toward a cube, which is how the "superquadric" primitives are made.
#[inline]
pub fn length_n(v: &Vector, exponent: Value) -> Value {
    if exponent == 2.0 {
        return v.norm();
    }
    (v.x.abs().powf(exponent) + v.y.abs().powf(exponent) + v.z.abs().powf(exponent))
        .powf(exponent.recip())
}
