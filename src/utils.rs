use crate::{
    interp::{find_t, interpolate_points},
    types::{Point, Value, Vector},
};

/// Splits a voxel into six tetrahedra that all share the main diagonal `0 → 6`.
///
/// Neighbouring voxels split their shared faces along the same diagonal, so
/// the resulting surface has no cracks between voxels.
///
/// ```text
///     6----7          Y
///    /|   /|          |
///   2----3 |          *-- X
///   | 4--|-5         /
///   |/   |/         Z
///   0----1
/// ```
pub const TETRAHEDRA: [[usize; 4]; 6] = [
    [0, 1, 2, 6],
    [0, 2, 3, 6],
    [0, 3, 7, 6],
    [0, 7, 4, 6],
    [0, 4, 5, 6],
    [0, 5, 1, 6],
];

/// Returns the 8 corner indices `[x, y, z]` of the voxel at `(x, y, z)`.
///
/// ```text
///  0 = (x,   y,   z  )    4 = (x,   y,   z+1)
///  1 = (x+1, y,   z  )    5 = (x+1, y,   z+1)
///  2 = (x+1, y+1, z  )    6 = (x+1, y+1, z+1)
///  3 = (x,   y+1, z  )    7 = (x,   y+1, z+1)
/// ```
#[inline]
pub fn voxel_corner_indices(x: usize, y: usize, z: usize) -> [[usize; 3]; 8] {
    [
        [x, y, z],
        [x + 1, y, z],
        [x + 1, y + 1, z],
        [x, y + 1, z],
        [x, y, z + 1],
        [x + 1, y, z + 1],
        [x + 1, y + 1, z + 1],
        [x, y + 1, z + 1],
    ]
}

/// Computes the state bitmask for a tetrahedron.
///
/// A bit is set when the corner's value is **at or below** the threshold
/// (i.e. "inside" the surface):
///
/// ```text
/// corner index:  3  2  1  0
/// state bits:   [_][_][_][_]
///                         ^-- corner 0 inside?
/// ```
#[inline]
pub fn get_state(values: &[Value; 4], threshold: Value) -> u8 {
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v <= threshold)
        .fold(0, |state, (i, _)| state | (1 << i))
}

/// Appends the triangles where the iso-surface crosses one tetrahedron.
///
/// Each triangle is wound so that its normal points from the inside corners
/// toward the outside ones.
pub fn polygonise_tetrahedron(
    points: &[Point; 4],
    values: &[Value; 4],
    threshold: Value,
    out: &mut Vec<Point>,
) {
    let state = get_state(values, threshold);
    let (inside, outside): (Vec<usize>, Vec<usize>) = (0..4).partition(|&i| state & (1 << i) != 0);

    let cross = |a: usize, b: usize| {
        interpolate_points(&points[a], &points[b], find_t(values[a], values[b], threshold))
    };
    let outward = |from: &[usize], to: &[usize]| {
        let centroid = |idx: &[usize]| {
            idx.iter().map(|&i| points[i].coords).sum::<Vector>() / idx.len() as Value
        };
        centroid(to) - centroid(from)
    };

    match (inside.as_slice(), outside.as_slice()) {
        (&[a], &[b, c, d]) => {
            push_oriented(out, [cross(a, b), cross(a, c), cross(a, d)], outward(&inside, &outside));
        }
        (&[a, b, c], &[d]) => {
            push_oriented(out, [cross(a, d), cross(b, d), cross(c, d)], outward(&inside, &outside));
        }
        (&[a, b], &[c, d]) => {
            // The crossing is a quad: ac → ad → bd → bc.
            let (ac, ad, bd, bc) = (cross(a, c), cross(a, d), cross(b, d), cross(b, c));
            let dir = outward(&inside, &outside);
            push_oriented(out, [ac, ad, bd], dir);
            push_oriented(out, [ac, bd, bc], dir);
        }
        _ => {}
    }
}

fn push_oriented(out: &mut Vec<Point>, [a, b, c]: [Point; 3], outward: Vector) {
    let normal = (b - a).cross(&(c - b));
    if normal.dot(&outward) < 0.0 {
        out.extend([a, c, b]);
    } else {
        out.extend([a, b, c]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_tetrahedron() -> [Point; 4] {
        [
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
            Point::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn state_marks_inside_corners() {
        assert_eq!(get_state(&[-1.0, 1.0, 0.0, 2.0], 0.0), 0b0101);
    }

    #[test]
    fn uniform_tetrahedron_yields_nothing() {
        let mut out = Vec::new();
        polygonise_tetrahedron(&unit_tetrahedron(), &[1.0; 4], 0.0, &mut out);
        polygonise_tetrahedron(&unit_tetrahedron(), &[-1.0; 4], 0.0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn single_inside_corner_faces_away_from_it() {
        let mut out = Vec::new();
        polygonise_tetrahedron(&unit_tetrahedron(), &[-1.0, 1.0, 1.0, 1.0], 0.0, &mut out);
        assert_eq!(out.len(), 3);
        let normal = (out[1] - out[0]).cross(&(out[2] - out[1]));
        assert!(normal.dot(&Vector::new(1.0, 1.0, 1.0)) > 0.0);
    }

    #[test]
    fn split_tetrahedron_yields_a_quad() {
        let mut out = Vec::new();
        polygonise_tetrahedron(&unit_tetrahedron(), &[-1.0, -1.0, 1.0, 1.0], 0.0, &mut out);
        assert_eq!(out.len(), 6);
    }
}
