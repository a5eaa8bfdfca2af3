#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::{
    bounds::Aabb,
    chunk::Chunk,
    error::Result,
    mesh::MarchMesh,
    sdf::SignedDistance,
    types::{Point, Value},
    utils::{TETRAHEDRA, polygonise_tetrahedron, voxel_corner_indices},
};

/// Settings for [`sdf_to_mesh`].
///
/// ```rust,ignore
/// let mesh = sdf_to_mesh(&cone, &bounds, &MeshConfig { cell_size: 0.05, ..Default::default() })?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshConfig {
    /// Edge length of each cubic voxel. Default: `0.01`.
    pub cell_size: Value,
    /// Iso-value of the extracted surface; corners at or below it are inside. Default: `0.0`.
    pub threshold: Value,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            cell_size: 0.01,
            threshold: 0.0,
        }
    }
}

impl MeshConfig {
    pub fn new(cell_size: Value) -> Self {
        Self {
            cell_size,
            ..Default::default()
        }
    }
}

/// Voxelizes the zero-level-set of `sdf` inside `bounds` into a triangle mesh.
///
/// `bounds` is usually `sdf.bounding_box()` padded by a cell, so that the
/// surface is closed off by the grid border; a [`Repeat`](crate::transforms::Repeat)
/// field must be given an explicit finite region.
///
/// ```text
/// Chunk::sample  →  values at (n + 1)³ corners
/// march          →  per voxel: 6 tetrahedra → 0–2 triangles each
/// ```
pub fn sdf_to_mesh<S>(sdf: &S, bounds: &Aabb, config: &MeshConfig) -> Result<MarchMesh>
where
    S: SignedDistance + ?Sized,
{
    let chunk = Chunk::sample(sdf, bounds, config.cell_size)?;
    let mesh = march(&chunk, config.threshold);
    debug!(
        size_x = chunk.size_x,
        size_y = chunk.size_y,
        size_z = chunk.size_z,
        triangles = mesh.triangle_count(),
        "extracted mesh"
    );
    Ok(mesh)
}

/// Runs Marching Tetrahedra over a sampled chunk.
///
/// Work is parallelised over X slices using Rayon when the `parallel` feature
/// is on. Returns a [`MarchMesh`] with sequential indices and flat-shaded normals.
///
/// ```text
/// Per voxel:
/// 1. voxel_corner_indices     →  8 grid corners
/// 2. corner_position / values →  8 world-space points and scalar values
/// 3. TETRAHEDRA (×6)          →  4 corners each
/// 4. polygonise_tetrahedron   →  0, 1 or 2 outward-facing triangles
/// ```
pub fn march(chunk: &Chunk, threshold: Value) -> MarchMesh {
    let slice = |x: usize| {
        let mut local: Vec<Point> = Vec::new();

        for y in 0..chunk.size_y {
            for z in 0..chunk.size_z {
                let corners = voxel_corner_indices(x, y, z);
                let positions = corners.map(|[cx, cy, cz]| chunk.corner_position(cx, cy, cz));
                let values = corners.map(|[cx, cy, cz]| chunk.get(cx, cy, cz));

                for tet in TETRAHEDRA {
                    polygonise_tetrahedron(
                        &tet.map(|i| positions[i]),
                        &tet.map(|i| values[i]),
                        threshold,
                        &mut local,
                    );
                }
            }
        }
        local
    };

    #[cfg(feature = "parallel")]
    let per_x: Vec<Vec<Point>> = (0..chunk.size_x).into_par_iter().map(slice).collect();
    #[cfg(not(feature = "parallel"))]
    let per_x: Vec<Vec<Point>> = (0..chunk.size_x).map(slice).collect();

    // Merge per-X slices into a single vertex buffer
    let total: usize = per_x.iter().map(|v| v.len()).sum();
    let mut vertices: Vec<Point> = Vec::with_capacity(total);
    for mut v in per_x {
        vertices.append(&mut v);
    }

    MarchMesh::from_vertices(vertices)
}
