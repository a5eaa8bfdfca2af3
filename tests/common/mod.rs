#![allow(dead_code)]

use sdf_shapes::types::{Point, Value, Vector};

/// `n` roughly uniform unit directions on a Fibonacci spiral.
pub fn fibonacci_directions(n: usize) -> Vec<Vector> {
    let golden = std::f64::consts::PI * (3.0 - 5.0_f64.sqrt());
    (0..n)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as Value + 0.5) / n as Value;
            let r = (1.0 - y * y).sqrt();
            let phi = golden * i as Value;
            Vector::new(r * phi.cos(), y, r * phi.sin())
        })
        .collect()
}

/// A scattered set of query points in `[-extent, extent]³`, none on a lattice.
pub fn scattered_points(n: usize, extent: Value) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let f = i as Value;
            Point::new(
                extent * (f * 0.618_033_988_7).fract() * 2.0 - extent,
                extent * (f * 0.414_213_562_3 + 0.1).fract() * 2.0 - extent,
                extent * (f * 0.732_050_807_5 + 0.2).fract() * 2.0 - extent,
            )
        })
        .collect()
}

/// Angles evenly spread over a full turn.
pub fn angles(n: usize) -> impl Iterator<Item = Value> {
    (0..n).map(move |i| std::f64::consts::TAU * i as Value / n as Value)
}

/// `n + 1` evenly spaced values covering `[lo, hi]`.
pub fn steps(lo: Value, hi: Value, n: usize) -> impl Iterator<Item = Value> {
    (0..=n).map(move |i| lo + (hi - lo) * i as Value / n as Value)
}
