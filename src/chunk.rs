use ndarray::{Array3, Zip};

use crate::{
    bounds::Aabb,
    error::{Result, SdfError},
    sdf::SignedDistance,
    types::{Point, Value},
};

/// A voxel grid of sampled field values.
///
/// The grid has `(size_x + 1) × (size_y + 1) × (size_z + 1)` corner points
/// and `size_x × size_y × size_z` voxels, starting at `origin`.
///
/// Values are stored as `values[[x, y, z]]`.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Number of voxels along X.
    pub size_x: usize,
    /// Number of voxels along Y.
    pub size_y: usize,
    /// Number of voxels along Z.
    pub size_z: usize,
    /// World-space size of each voxel edge.
    pub scale: Value,
    /// World-space position of corner `(0, 0, 0)`.
    pub origin: Point,
    /// Scalar field values, indexed `[[x, y, z]]`.
    pub values: Array3<Value>,
}

impl Chunk {
    /// Creates a new chunk with the given voxel dimensions.
    ///
    /// All values are initialised to `0.0`. The grid has `(size + 1)` corners
    /// per axis so that every voxel has a full set of 8 corners.
    pub fn new(size_x: usize, size_y: usize, size_z: usize) -> Self {
        Self {
            size_x,
            size_y,
            size_z,
            scale: 1.,
            origin: Point::origin(),
            values: Array3::zeros((size_x + 1, size_y + 1, size_z + 1)),
        }
    }

    /// Sets the world-space size of each voxel edge.
    pub fn with_scale(mut self, scale: Value) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the world-space position of the first corner.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Samples `sdf` over `bounds` with cubic voxels of edge `cell_size`.
    ///
    /// Each axis gets `ceil(extent / cell_size)` voxels (at least one), so the
    /// grid may overhang `bounds.max` by less than one cell.
    pub fn sample<S>(sdf: &S, bounds: &Aabb, cell_size: Value) -> Result<Self>
    where
        S: SignedDistance + ?Sized,
    {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(SdfError::InvalidCellSize);
        }
        if !bounds.is_finite() {
            return Err(SdfError::UnboundedRegion);
        }
        let size = bounds.size();
        let [size_x, size_y, size_z] = grid_cells([size.x, size.y, size.z], cell_size)?;

        let mut chunk = Chunk::new(size_x, size_y, size_z)
            .with_scale(cell_size)
            .with_origin(bounds.min);
        chunk.fill(sdf);
        Ok(chunk)
    }

    /// Fills the chunk by evaluating `sdf` at every corner's world position.
    pub fn fill<S>(&mut self, sdf: &S)
    where
        S: SignedDistance + ?Sized,
    {
        let (origin, scale) = (self.origin, self.scale);
        let zip = Zip::indexed(&mut self.values);
        let eval = |(x, y, z): (usize, usize, usize), v: &mut Value| {
            *v = sdf.evaluate(&corner_at(origin, scale, x, y, z));
        };

        #[cfg(feature = "parallel")]
        zip.par_for_each(eval);
        #[cfg(not(feature = "parallel"))]
        zip.for_each(eval);
    }

    /// Returns the world-space position of corner `(x, y, z)`.
    #[inline]
    pub fn corner_position(&self, x: usize, y: usize, z: usize) -> Point {
        corner_at(self.origin, self.scale, x, y, z)
    }

    /// Returns the scalar field value at corner `(x, y, z)`.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Value {
        self.values[[x, y, z]]
    }

}

/// Voxel counts per axis for `extents`, at least one each.
///
/// Fails with [`SdfError::GridTooLarge`] when the corner grid would not fit in
/// memory addressable by a single array.
fn grid_cells(extents: [Value; 3], cell_size: Value) -> Result<[usize; 3]> {
    let mut cells = [0usize; 3];
    let mut corners: usize = 1;
    for (n, extent) in cells.iter_mut().zip(extents) {
        let count = (extent / cell_size).ceil().max(1.0);
        if !count.is_finite() || count >= usize::MAX as Value {
            return Err(SdfError::GridTooLarge);
        }
        *n = count as usize;
        corners = n
            .checked_add(1)
            .and_then(|c| corners.checked_mul(c))
            .ok_or(SdfError::GridTooLarge)?;
    }
    let bytes = corners
        .checked_mul(std::mem::size_of::<Value>())
        .ok_or(SdfError::GridTooLarge)?;
    if bytes > isize::MAX as usize {
        return Err(SdfError::GridTooLarge);
    }
    Ok(cells)
}

#[inline]
fn corner_at(origin: Point, scale: Value, x: usize, y: usize, z: usize) -> Point {
    Point::new(
        origin.x + x as Value * scale,
        origin.y + y as Value * scale,
        origin.z + z as Value * scale,
    )
}
