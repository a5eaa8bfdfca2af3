use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use tracing::debug;

use crate::{
    bounds::Aabb,
    error::{Result, SdfError},
    types::{Point, Vector},
};

/// Triangle soup produced by [`march`](crate::march::march).
///
/// Vertices are stored flat: every group of three consecutive vertices forms one triangle.
/// [`from_vertices`](MarchMesh::from_vertices) fills in triangles and normals.
#[derive(Debug, Clone, Default)]
pub struct MarchMesh {
    /// Flat list of vertex positions.
    pub vertices: Vec<Point>,

    /// Triangle index triples into `vertices`: `[[v0, v1, v2], ...]`
    pub tris: Vec<[usize; 3]>,

    /// Per-vertex face normals.
    pub normals: Vec<Vector>,
}

impl MarchMesh {
    /// Creates an empty mesh with no vertices, triangles, or normals.
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Builds a mesh from a flat vertex list. Trailing vertices that do not
    /// complete a triangle are ignored.
    pub fn from_vertices(vertices: Vec<Point>) -> Self {
        let mut mesh = Self::new_empty();
        mesh.set_vertices(vertices);
        mesh.create_triangles();
        mesh.create_normals();
        mesh
    }

    pub fn is_empty(&self) -> bool {
        self.tris.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.tris.len()
    }

    /// Returns the three vertex positions of triangle `tri`.
    pub fn tri_coords(&self, tri: usize) -> [Point; 3] {
        self.tris[tri].map(|v| self.vertices[v])
    }

    /// Computes the face normal for triangle `tri`.
    ///
    /// Returns the zero vector if the triangle is degenerate.
    pub fn tri_normal(&self, tri: usize) -> Vector {
        let [a, b, c] = self.tri_coords(tri);
        (b - a)
            .cross(&(c - b))
            .try_normalize(0.0)
            .unwrap_or_else(Vector::zeros)
    }

    /// Generates triangles by grouping every three consecutive vertices.
    pub fn create_triangles(&mut self) {
        self.tris = (0..self.vertices.len() / 3)
            .map(|t| [3 * t, 3 * t + 1, 3 * t + 2])
            .collect();
    }

    /// Computes and stores face normals, one per vertex (three per triangle).
    ///
    /// Replaces any previously stored normals.
    /// Must be called after [`create_triangles`](MarchMesh::create_triangles).
    pub fn create_normals(&mut self) {
        self.normals = (0..self.tris.len())
            .flat_map(|tri| [self.tri_normal(tri); 3])
            .collect();
    }

    /// Replaces the vertex buffer.
    pub fn set_vertices(&mut self, vertices: Vec<Point>) {
        self.vertices = vertices
    }

    /// Smallest box holding every vertex, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        let (first, rest) = self.vertices.split_first()?;
        Some(rest.iter().fold(Aabb::new(*first, *first), |acc, p| Aabb {
            min: acc.min.inf(p),
            max: acc.max.sup(p),
        }))
    }

    /// Writes the mesh as binary STL.
    ///
    /// ```text
    /// [u8; 80]  header
    /// u32       triangle count
    /// per triangle: [f32; 3] normal, 3 × [f32; 3] vertex, u16 attribute
    /// ```
    ///
    /// Returns [`SdfError::EmptyMesh`] if there are no triangles.
    pub fn write_stl<W: Write>(&self, mut writer: W) -> Result<()> {
        if self.is_empty() {
            return Err(SdfError::EmptyMesh);
        }
        let count = u32::try_from(self.tris.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many triangles for STL"))?;

        let mut header = [0u8; 80];
        let tag = b"binary STL written by sdf_shapes";
        header[..tag.len()].copy_from_slice(tag);
        writer.write_all(&header)?;
        writer.write_all(&count.to_le_bytes())?;

        for tri in 0..self.tris.len() {
            let normal = self.tri_normal(tri);
            write_f32s(&mut writer, normal.iter())?;
            for v in self.tri_coords(tri) {
                write_f32s(&mut writer, v.iter())?;
            }
            writer.write_all(&0u16.to_le_bytes())?;
        }

        debug!(triangles = count, "wrote binary STL");
        Ok(())
    }

    /// Writes the mesh as binary STL to the file at `path`, replacing it.
    pub fn save_stl(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_stl(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn write_f32s<'a, W: Write>(writer: &mut W, values: impl Iterator<Item = &'a f64>) -> io::Result<()> {
    for v in values {
        writer.write_all(&(*v as f32).to_le_bytes())?;
    }
    Ok(())
}
