use crate::math::{Point3, Vector3};
use crate::tessellate;

/// An ordered sequence of samples along a curve's 1D domain.
///
/// Row 0 of the derivative data is the position itself; `derivatives[k]`
/// holds the (k+1)-th derivative at every sample. Sample count and
/// parameter spacing are fixed at construction — evaluators build a new
/// curve image instead of mutating an old one.
#[derive(Clone, Debug, PartialEq)]
pub struct GenericCurve3 {
    /// Parameter value of each sample.
    pub parameters: Vec<f64>,
    /// Sampled positions.
    pub points: Vec<Point3>,
    /// `derivatives[k][i]` is the (k+1)-th derivative at sample `i`.
    pub derivatives: Vec<Vec<Vector3>>,
}

impl GenericCurve3 {
    pub fn new(parameters: Vec<f64>, points: Vec<Point3>, derivatives: Vec<Vec<Vector3>>) -> Self {
        assert_eq!(parameters.len(), points.len());
        for (k, row) in derivatives.iter().enumerate() {
            assert_eq!(
                row.len(),
                points.len(),
                "Derivative row {k} has {} entries, expected {}",
                row.len(),
                points.len()
            );
        }
        Self {
            parameters,
            points,
            derivatives,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Highest derivative order available (0 = positions only).
    pub fn max_order(&self) -> usize {
        self.derivatives.len()
    }

    /// The `order`-th derivative at sample `i` (`order` ≥ 1).
    pub fn derivative(&self, order: usize, i: usize) -> Vector3 {
        self.derivatives[order - 1][i]
    }
}

/// A triangle mesh sampled from a surface.
///
/// Grid-sampled meshes derive their connectivity deterministically from
/// the grid resolution via [`TriangulatedMesh3::from_grid`]; loaded model
/// meshes carry the connectivity read from file.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangulatedMesh3 {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Per-vertex normals (unit length).
    pub normals: Vec<Vector3>,
    /// Triangle indices (every 3 consecutive values form one triangle).
    pub indices: Vec<u32>,
}

impl TriangulatedMesh3 {
    pub fn new(vertices: Vec<Point3>, normals: Vec<Vector3>, indices: Vec<u32>) -> Self {
        assert_eq!(vertices.len(), normals.len());
        assert_eq!(indices.len() % 3, 0);
        Self {
            vertices,
            normals,
            indices,
        }
    }

    /// Build a mesh from a `rows × cols` grid of vertices in row-major
    /// order. Connectivity is generated by [`tessellate::grid_indices`],
    /// so every grid-sampled mesh in the crate shares one diagonal
    /// orientation. The result has exactly `2(rows-1)(cols-1)` triangles.
    pub fn from_grid(
        rows: usize,
        cols: usize,
        vertices: Vec<Point3>,
        normals: Vec<Vector3>,
    ) -> Self {
        assert_eq!(vertices.len(), rows * cols);
        let indices = tessellate::grid_indices(rows, cols);
        Self::new(vertices, normals, indices)
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Sample-resolution configuration shared by every evaluator.
///
/// `derivative_order` is the highest curve derivative populated in a
/// [`GenericCurve3`] image (`mod` in the UI layer); `div_point_count`
/// is the number of division points per parametric direction (`div`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleSettings {
    pub derivative_order: usize,
    pub div_point_count: usize,
}

impl SampleSettings {
    /// Fewest samples that can represent a bounded domain.
    pub const MIN_DIV: usize = 2;
    /// Highest derivative order the analytic objects provide.
    pub const MAX_ORDER: usize = 2;

    /// Clamp recoverable out-of-range values (e.g. a transient slider
    /// position during a UI drag) to the nearest valid setting.
    pub fn clamped(self) -> Self {
        let clamped = Self {
            derivative_order: self.derivative_order.min(Self::MAX_ORDER),
            div_point_count: self.div_point_count.max(Self::MIN_DIV),
        };
        if clamped != self {
            log::warn!(
                "sample settings clamped: order {} -> {}, div {} -> {}",
                self.derivative_order,
                clamped.derivative_order,
                self.div_point_count,
                clamped.div_point_count
            );
        }
        clamped
    }
}

impl Default for SampleSettings {
    fn default() -> Self {
        Self {
            derivative_order: 2,
            div_point_count: 50,
        }
    }
}

/// Errors reported when a requested sampling resolution cannot represent
/// the target domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleError {
    /// The requested division point count is below the minimum.
    TooFewSamples { requested: usize, minimum: usize },
}

impl std::fmt::Display for SampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleError::TooFewSamples { requested, minimum } => {
                write!(f, "{requested} division points requested, minimum is {minimum}")
            }
        }
    }
}

impl std::error::Error for SampleError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_mesh_triangle_count() {
        let rows = 4;
        let cols = 6;
        let vertices: Vec<Point3> = (0..rows * cols)
            .map(|k| Point3::new((k % cols) as f64, (k / cols) as f64, 0.0))
            .collect();
        let normals = vec![Vector3::new(0.0, 0.0, 1.0); rows * cols];
        let mesh = TriangulatedMesh3::from_grid(rows, cols, vertices, normals);
        assert_eq!(mesh.triangle_count(), 2 * (rows - 1) * (cols - 1));
    }

    #[test]
    fn settings_clamp_raises_div_to_minimum() {
        let s = SampleSettings {
            derivative_order: 7,
            div_point_count: 0,
        }
        .clamped();
        assert_eq!(s.div_point_count, SampleSettings::MIN_DIV);
        assert_eq!(s.derivative_order, SampleSettings::MAX_ORDER);
    }

    #[test]
    fn settings_clamp_keeps_valid_values() {
        let s = SampleSettings::default();
        assert_eq!(s.clamped(), s);
    }

    #[test]
    fn curve_derivative_rows_indexed_by_order() {
        let params = vec![0.0, 1.0];
        let points = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)];
        let d1 = vec![Vector3::new(1.0, 0.0, 0.0); 2];
        let d2 = vec![Vector3::zeros(); 2];
        let curve = GenericCurve3::new(params, points, vec![d1, d2]);
        assert_eq!(curve.max_order(), 2);
        assert_eq!(curve.derivative(1, 0), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(curve.derivative(2, 1), Vector3::zeros());
    }
}
