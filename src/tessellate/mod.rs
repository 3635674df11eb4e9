//! Regular-grid triangulation shared by every surface sampler.
//!
//! Both the parametric surface evaluator and the B-spline patch engine
//! tessellate uniform `(i, j)` sample grids. The connectivity here is the
//! single source of truth for the diagonal orientation, so meshes from
//! different producers shade without seams.

use crate::math::{Point3, Vector3};
use rayon::prelude::*;

/// Triangle indices for a `rows × cols` vertex grid in row-major order.
///
/// Each quad cell `(i, j)` is split along the diagonal from `(i, j)` to
/// `(i+1, j+1)` into the triangles `(a, c, d)` and `(a, d, b)`:
///
/// ```text
///   a ─── b        a = i*cols + j       b = a + 1
///   │ ╲   │        c = (i+1)*cols + j   d = c + 1
///   c ─── d
/// ```
///
/// The result holds `2(rows-1)(cols-1)` triangles.
pub fn grid_indices(rows: usize, cols: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(6 * rows.saturating_sub(1) * cols.saturating_sub(1));
    for i in 0..rows.saturating_sub(1) {
        for j in 0..cols.saturating_sub(1) {
            let a = (i * cols + j) as u32;
            let b = a + 1;
            let c = ((i + 1) * cols + j) as u32;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, d]);
            indices.extend_from_slice(&[a, d, b]);
        }
    }
    indices
}

/// Evaluate a `rows × cols` grid of vertices and normals in row-major
/// order. Rows are evaluated in parallel; the output order is the same as
/// a sequential double loop, so repeated calls with the same sampler are
/// deterministic.
pub fn sample_grid<F>(rows: usize, cols: usize, f: F) -> (Vec<Point3>, Vec<Vector3>)
where
    F: Fn(usize, usize) -> (Point3, Vector3) + Sync,
{
    let row_data: Vec<Vec<(Point3, Vector3)>> = (0..rows)
        .into_par_iter()
        .map(|i| (0..cols).map(|j| f(i, j)).collect())
        .collect();

    let mut vertices = Vec::with_capacity(rows * cols);
    let mut normals = Vec::with_capacity(rows * cols);
    for row in row_data {
        for (p, n) in row {
            vertices.push(p);
            normals.push(n);
        }
    }
    (vertices, normals)
}
