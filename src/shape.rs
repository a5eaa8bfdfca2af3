use std::{fmt, sync::Arc};

use tracing::trace;

use crate::{
    ray::Ray,
    sdf::{Sdf, SignedDistance},
    types::{Point, Value, Vector},
};

/// Capabilities a renderer needs from a scene primitive.
///
/// `M` is the renderer's material type; shapes only hand out references to it.
pub trait Shape<M>: Send + Sync {
    /// Prepares acceleration data before rendering. Most shapes need none.
    fn compile(&mut self) {}

    /// Nearest hit along `ray`, or `None`.
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_, M>>;

    /// Unit outward normal at a point on (or very near) the surface.
    fn normal_at(&self, p: &Point) -> Vector;

    fn uv(&self, p: &Point) -> Vector;

    fn material_at(&self, p: &Point) -> &M;
}

/// A ray parameter at which `shape` was hit.
pub struct Hit<'a, M> {
    pub shape: &'a dyn Shape<M>,
    pub t: Value,
}

impl<M> Hit<'_, M> {
    /// World-space hit position for the ray that produced this hit.
    pub fn position(&self, ray: &Ray) -> Point {
        ray.position(self.t)
    }
}

impl<M> Clone for Hit<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Hit<'_, M> {}

impl<M> fmt::Debug for Hit<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hit").field("t", &self.t).finish_non_exhaustive()
    }
}

/// Tolerances for sphere tracing and normal estimation.
///
/// ```rust,ignore
/// let shape = SdfShape::new(sdf, material).with_config(TraceConfig {
///     max_steps: 200, // cheap preview
///     ..Default::default()
/// });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceConfig {
    /// A field value below this counts as a hit. Default: `1e-5`.
    pub epsilon: Value,
    /// Smallest ray parameter marching may start at. Default: `1e-4`.
    pub start: Value,
    /// Backward correction when marching starts inside the surface, and the
    /// minimum step until that correction has happened. Default: `1e-3`.
    pub jump_size: Value,
    /// Step cap per ray; running out is a miss. Default: `1000`.
    pub max_steps: usize,
    /// Central-difference offset used by [`Shape::normal_at`]. Default: `1e-4`.
    pub normal_offset: Value,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-5,
            start: 1e-4,
            jump_size: 1e-3,
            max_steps: 1000,
            normal_offset: 1e-4,
        }
    }
}

/// Makes a signed distance field renderable.
///
/// Rays are sphere traced through the field inside its bounding box, normals
/// come from the field's gradient and the whole surface shares one material.
///
/// ```text
///  t1 ──●────●──────●───●─●● hit      (each step advances by the field value)
///       └ start = max(start, t1)
/// ```
pub struct SdfShape<M, S = Sdf> {
    sdf: S,
    material: Arc<M>,
    config: TraceConfig,
}

impl<M, S: SignedDistance> SdfShape<M, S> {
    pub fn new(sdf: S, material: Arc<M>) -> Self {
        Self {
            sdf,
            material,
            config: TraceConfig::default(),
        }
    }

    pub fn with_config(mut self, config: TraceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn sdf(&self) -> &S {
        &self.sdf
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }
}

impl<M: Send + Sync, S: SignedDistance> Shape<M> for SdfShape<M, S> {
    fn intersect(&self, ray: &Ray) -> Option<Hit<'_, M>> {
        let TraceConfig {
            epsilon,
            start,
            jump_size,
            max_steps,
            ..
        } = self.config;

        let (t1, t2) = self.sdf.bounding_box().intersect_ray(ray);
        if t2 < t1 || t2 < 0.0 {
            return None;
        }

        let mut t = start.max(t1);
        let mut jump = true;
        for _ in 0..max_steps {
            let mut d = self.sdf.evaluate(&ray.position(t));
            if jump && d < 0.0 {
                // The start offset landed just inside the surface; back out once.
                t -= jump_size;
                jump = false;
                continue;
            }
            if d < epsilon {
                return Some(Hit { shape: self, t });
            }
            if jump && d < jump_size {
                d = jump_size;
            }
            t += d;
            if t > t2 {
                return None;
            }
        }

        trace!(max_steps, t, "sphere tracing ran out of steps");
        None
    }

    fn normal_at(&self, p: &Point) -> Vector {
        let e = self.config.normal_offset;
        let diff = |axis: usize| {
            let mut offset = Vector::zeros();
            offset[axis] = e;
            self.sdf.evaluate(&(p + offset)) - self.sdf.evaluate(&(p - offset))
        };
        Vector::new(diff(0), diff(1), diff(2))
            .try_normalize(0.0)
            .unwrap_or_else(Vector::zeros)
    }

    /// Implicit surfaces have no parametrization; always zero.
    fn uv(&self, _p: &Point) -> Vector {
        Vector::zeros()
    }

    fn material_at(&self, _p: &Point) -> &M {
        &self.material
    }
}
