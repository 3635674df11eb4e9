//! Bicubic B-spline patches over toroidal and cylindrical topologies.
//!
//! A patch collection is one shared control grid plus a periodicity rule.
//! Patch `(pi, pj)` evaluates the bicubic blend over the 4×4 window
//! starting at grid position `(pi, pj)`, wrapping in the periodic
//! directions. Adjacent patches therefore read overlapping windows —
//! three shared control rows/columns — which makes the composite surface
//! C² across patch boundaries and closes it into a torus or cylinder
//! without any stitching.

pub mod arc;
pub mod basis;

use crate::math::{Point3, Vector3};
use crate::tessellate;
use crate::types::{GenericCurve3, SampleSettings, TriangulatedMesh3};
use std::f64::consts::TAU;

/// Default tube radius used when seeding toroidal control grids.
pub const DEFAULT_MINOR_R: f64 = 0.75;
/// Default ring radius used when seeding toroidal control grids.
pub const DEFAULT_MAJOR_R: f64 = 1.5;
/// Default radius used when seeding cylindrical control grids.
pub const DEFAULT_CYLINDER_R: f64 = 1.0;
/// Default axial bounds used when seeding cylindrical control grids.
pub const DEFAULT_AXIS_A: f64 = -1.0;
pub const DEFAULT_AXIS_B: f64 = 1.0;

/// Canonical reference position on the ideal torus for grid index
/// `(i, j)` out of `(n, m)` divisions. Pure function of its inputs.
pub fn torus_point(i: usize, j: usize, n: usize, m: usize, r: f64, major_r: f64) -> Point3 {
    let u = TAU * i as f64 / n as f64;
    let v = TAU * j as f64 / m as f64;
    let w = major_r + r * v.cos();
    Point3::new(w * u.cos(), w * u.sin(), r * v.sin())
}

/// Canonical reference position on the ideal cylinder of radius `r` with
/// axial bounds `[a, b]`: angle `2πi/n`, axial coordinate `a + (b-a)·j/m`.
pub fn cylinder_point(i: usize, j: usize, n: usize, m: usize, r: f64, a: f64, b: f64) -> Point3 {
    let u = TAU * i as f64 / n as f64;
    let z = a + (b - a) * j as f64 / m as f64;
    Point3::new(r * u.cos(), r * u.sin(), z)
}

/// Periodicity pattern of a patch collection's parametric directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    /// Periodic in both directions — the patches tile a closed torus.
    Toroid,
    /// Periodic in `u` (rows), open in `v` (columns).
    Cylindric,
    /// No periodicity; arbitrary grids from persisted storage.
    Open,
}

impl Topology {
    /// Stable tag used by the persistence format.
    pub fn tag(self) -> &'static str {
        match self {
            Topology::Toroid => "toroid",
            Topology::Cylindric => "cylindric",
            Topology::Open => "open",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "toroid" => Some(Topology::Toroid),
            "cylindric" => Some(Topology::Cylindric),
            "open" => Some(Topology::Open),
            _ => None,
        }
    }

    /// Whether the row direction wraps.
    pub fn periodic_u(self) -> bool {
        matches!(self, Topology::Toroid | Topology::Cylindric)
    }

    /// Whether the column direction wraps.
    pub fn periodic_v(self) -> bool {
        matches!(self, Topology::Toroid)
    }
}

/// Iso-parametric line direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IsoDirection {
    /// Constant-`u` lines; `v` varies along the curve.
    U,
    /// Constant-`v` lines; `u` varies along the curve.
    V,
}

/// Errors raised by patch construction, editing and evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchError {
    /// Fewer patches requested than the topology can close.
    TooFewPatches {
        direction: char,
        got: usize,
        minimum: usize,
    },
    /// The control grid cannot carry a single bicubic patch.
    GridTooSmall { rows: usize, cols: usize },
    /// Point count disagrees with the declared grid dimensions.
    GridDimensionMismatch {
        rows: usize,
        cols: usize,
        points: usize,
    },
    /// Patch indices outside the collection.
    PatchOutOfRange {
        pi: usize,
        pj: usize,
        patch_rows: usize,
        patch_cols: usize,
    },
    /// Control-point indices outside the 4×4 patch window.
    ControlOutOfRange { i: usize, j: usize },
    /// Sampling resolution below the representable minimum.
    Resolution { requested: usize, minimum: usize },
}

impl std::fmt::Display for PatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatchError::TooFewPatches {
                direction,
                got,
                minimum,
            } => write!(
                f,
                "{got} patches in direction {direction}, a periodic direction needs {minimum}"
            ),
            PatchError::GridTooSmall { rows, cols } => {
                write!(f, "{rows}x{cols} control grid cannot carry a bicubic patch")
            }
            PatchError::GridDimensionMismatch { rows, cols, points } => {
                write!(f, "{points} control points for a {rows}x{cols} grid")
            }
            PatchError::PatchOutOfRange {
                pi,
                pj,
                patch_rows,
                patch_cols,
            } => write!(
                f,
                "Patch ({pi}, {pj}) outside the {patch_rows}x{patch_cols} collection"
            ),
            PatchError::ControlOutOfRange { i, j } => {
                write!(f, "Control point ({i}, {j}) outside the 4x4 patch window")
            }
            PatchError::Resolution { requested, minimum } => {
                write!(f, "{requested} samples requested, minimum is {minimum}")
            }
        }
    }
}

impl std::error::Error for PatchError {}

/// One bicubic patch: a 4×4 control-point window.
///
/// `points[di][dj]` follows the owning grid's row/column order. The local
/// domain is `(u, v) ∈ [0, 1]²`.
#[derive(Clone, Debug, PartialEq)]
pub struct BicubicPatch {
    pub points: [[Point3; 4]; 4],
}

impl BicubicPatch {
    /// Mixed partial derivative of order `(ku, kv)` at `(u, v)`.
    /// Order `(0, 0)` is the position itself (as a coordinate vector).
    pub fn partial(&self, ku: usize, kv: usize, u: f64, v: f64) -> Vector3 {
        let bu = basis::blend_order(ku, u);
        let bv = basis::blend_order(kv, v);
        let mut acc = Vector3::zeros();
        for di in 0..4 {
            for dj in 0..4 {
                acc += bu[di] * bv[dj] * self.points[di][dj].coords;
            }
        }
        acc
    }

    /// Evaluate the patch position at `(u, v)`.
    pub fn evaluate(&self, u: f64, v: f64) -> Point3 {
        Point3::from(self.partial(0, 0, u, v))
    }

    /// Position and first partial derivatives at `(u, v)`.
    pub fn derivatives(&self, u: f64, v: f64) -> (Point3, Vector3, Vector3) {
        (
            self.evaluate(u, v),
            self.partial(1, 0, u, v),
            self.partial(0, 1, u, v),
        )
    }

    /// Unit surface normal at `(u, v)`.
    pub fn normal(&self, u: f64, v: f64) -> Vector3 {
        let du = self.partial(1, 0, u, v);
        let dv = self.partial(0, 1, u, v);
        let n = du.cross(&dv);
        let len = n.norm();
        if len > 1e-15 {
            n / len
        } else {
            Vector3::new(0.0, 0.0, 1.0)
        }
    }
}

/// A bicubic B-spline patch collection over one shared control grid.
///
/// The grid is stored row-major; patches are addressed by `(pi, pj)` in
/// the same order. All derived geometry (iso-lines, tessellated meshes)
/// is owned by the caller and rebuilt when control points change — the
/// collection itself holds only the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct BSplineSurface {
    topology: Topology,
    rows: usize,
    cols: usize,
    points: Vec<Point3>,
}

impl BSplineSurface {
    /// Build a toroidal collection of `n × m` patches seeded on the ideal
    /// torus with minor radius `r` and major radius `major_r`. Both
    /// directions are periodic, so the control grid is exactly `n × m`.
    pub fn toroid(n: usize, m: usize, r: f64, major_r: f64) -> Result<Self, PatchError> {
        if n < 4 {
            return Err(PatchError::TooFewPatches {
                direction: 'u',
                got: n,
                minimum: 4,
            });
        }
        if m < 4 {
            return Err(PatchError::TooFewPatches {
                direction: 'v',
                got: m,
                minimum: 4,
            });
        }
        let mut points = Vec::with_capacity(n * m);
        for i in 0..n {
            for j in 0..m {
                points.push(torus_point(i, j, n, m, r, major_r));
            }
        }
        Ok(Self {
            topology: Topology::Toroid,
            rows: n,
            cols: m,
            points,
        })
    }

    /// Build a cylindrical collection of `n × m` patches seeded on the
    /// ideal cylinder of radius `r` with axial bounds `[a, b]`. The `u`
    /// direction wraps; the open `v` direction needs `m + 3` control
    /// columns spanning `[a, b]`.
    pub fn cylindric(n: usize, m: usize, r: f64, a: f64, b: f64) -> Result<Self, PatchError> {
        if n < 4 {
            return Err(PatchError::TooFewPatches {
                direction: 'u',
                got: n,
                minimum: 4,
            });
        }
        if m < 1 {
            return Err(PatchError::TooFewPatches {
                direction: 'v',
                got: m,
                minimum: 1,
            });
        }
        let cols = m + 3;
        let mut points = Vec::with_capacity(n * cols);
        for i in 0..n {
            for j in 0..cols {
                points.push(cylinder_point(i, j, n, cols - 1, r, a, b));
            }
        }
        Ok(Self {
            topology: Topology::Cylindric,
            rows: n,
            cols,
            points,
        })
    }

    /// Build a collection from an arbitrary control grid (row-major), as
    /// reconstructed by the persistence layer. The dimensions must be
    /// consistent with the declared topology's adjacency rule.
    pub fn from_grid(
        topology: Topology,
        rows: usize,
        cols: usize,
        points: Vec<Point3>,
    ) -> Result<Self, PatchError> {
        if points.len() != rows * cols {
            return Err(PatchError::GridDimensionMismatch {
                rows,
                cols,
                points: points.len(),
            });
        }
        if rows < 4 || cols < 4 {
            return Err(PatchError::GridTooSmall { rows, cols });
        }
        Ok(Self {
            topology,
            rows,
            cols,
            points,
        })
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Control grid row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Control grid column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The control grid in row-major order.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn control_point(&self, row: usize, col: usize) -> Point3 {
        self.points[row * self.cols + col]
    }

    /// Number of patches along the row direction.
    pub fn patch_rows(&self) -> usize {
        if self.topology.periodic_u() {
            self.rows
        } else {
            self.rows - 3
        }
    }

    /// Number of patches along the column direction.
    pub fn patch_cols(&self) -> usize {
        if self.topology.periodic_v() {
            self.cols
        } else {
            self.cols - 3
        }
    }

    fn window_row(&self, pi: usize, di: usize) -> usize {
        if self.topology.periodic_u() {
            (pi + di) % self.rows
        } else {
            pi + di
        }
    }

    fn window_col(&self, pj: usize, dj: usize) -> usize {
        if self.topology.periodic_v() {
            (pj + dj) % self.cols
        } else {
            pj + dj
        }
    }

    fn check_patch(&self, pi: usize, pj: usize) -> Result<(), PatchError> {
        if pi >= self.patch_rows() || pj >= self.patch_cols() {
            return Err(PatchError::PatchOutOfRange {
                pi,
                pj,
                patch_rows: self.patch_rows(),
                patch_cols: self.patch_cols(),
            });
        }
        Ok(())
    }

    /// The 4×4 control window of patch `(pi, pj)`.
    pub fn patch(&self, pi: usize, pj: usize) -> Result<BicubicPatch, PatchError> {
        self.check_patch(pi, pj)?;
        let mut points = [[Point3::origin(); 4]; 4];
        for (di, row) in points.iter_mut().enumerate() {
            for (dj, p) in row.iter_mut().enumerate() {
                *p = self.control_point(self.window_row(pi, di), self.window_col(pj, dj));
            }
        }
        Ok(BicubicPatch { points })
    }

    /// Displace one control point additively.
    ///
    /// The point is addressed patch-relatively: `(i, j)` inside the 4×4
    /// window of patch `(pi, pj)`. Returns the global grid position of
    /// the edited point so the caller can invalidate exactly the patches
    /// reported by [`BSplineSurface::affected_patches`].
    pub fn modify(
        &mut self,
        pi: usize,
        pj: usize,
        i: usize,
        j: usize,
        displacement: Vector3,
    ) -> Result<(usize, usize), PatchError> {
        self.check_patch(pi, pj)?;
        if i >= 4 || j >= 4 {
            return Err(PatchError::ControlOutOfRange { i, j });
        }
        let row = self.window_row(pi, i);
        let col = self.window_col(pj, j);
        self.points[row * self.cols + col] += displacement;
        Ok((row, col))
    }

    /// All patches whose 4×4 window references the control point at
    /// `(row, col)` — the exact invalidation set for a local edit.
    pub fn affected_patches(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        let mut pis = Vec::with_capacity(4);
        let mut pjs = Vec::with_capacity(4);
        for d in 0..4usize {
            if self.topology.periodic_u() {
                pis.push((row + self.rows - d) % self.rows);
            } else if let Some(pi) = row.checked_sub(d) {
                if pi < self.patch_rows() {
                    pis.push(pi);
                }
            }
            if self.topology.periodic_v() {
                pjs.push((col + self.cols - d) % self.cols);
            } else if let Some(pj) = col.checked_sub(d) {
                if pj < self.patch_cols() {
                    pjs.push(pj);
                }
            }
        }
        pis.sort_unstable();
        pis.dedup();
        pjs.sort_unstable();
        pjs.dedup();

        let mut affected = Vec::with_capacity(pis.len() * pjs.len());
        for &pi in &pis {
            for &pj in &pjs {
                affected.push((pi, pj));
            }
        }
        affected
    }

    /// Tessellate patch `(pi, pj)` into a `div × div` triangulated grid
    /// over its local `[0, 1]²` domain, with the crate-wide diagonal
    /// convention.
    pub fn tessellate(
        &self,
        pi: usize,
        pj: usize,
        settings: &SampleSettings,
    ) -> Result<TriangulatedMesh3, PatchError> {
        let div = settings.div_point_count;
        if div < SampleSettings::MIN_DIV {
            return Err(PatchError::Resolution {
                requested: div,
                minimum: SampleSettings::MIN_DIV,
            });
        }
        let patch = self.patch(pi, pj)?;
        let (vertices, normals) = tessellate::sample_grid(div, div, |i, j| {
            let u = i as f64 / (div - 1) as f64;
            let v = j as f64 / (div - 1) as f64;
            (patch.evaluate(u, v), patch.normal(u, v))
        });
        Ok(TriangulatedMesh3::from_grid(div, div, vertices, normals))
    }

    /// Tessellate every patch, row-major.
    pub fn tessellate_all(
        &self,
        settings: &SampleSettings,
    ) -> Result<Vec<TriangulatedMesh3>, PatchError> {
        let mut meshes = Vec::with_capacity(self.patch_rows() * self.patch_cols());
        for pi in 0..self.patch_rows() {
            for pj in 0..self.patch_cols() {
                meshes.push(self.tessellate(pi, pj, settings)?);
            }
        }
        Ok(meshes)
    }

    /// Extract `line_count` iso-parametric lines of patch `(pi, pj)`.
    ///
    /// The fixed parameter takes `line_count` uniform values over
    /// `[0, 1]` (both boundaries included, so lines of adjacent patches
    /// coincide on shared boundaries); each line is sampled at
    /// `settings.div_point_count` points with derivative rows along the
    /// varying direction up to `settings.derivative_order`.
    pub fn iso_lines(
        &self,
        pi: usize,
        pj: usize,
        direction: IsoDirection,
        line_count: usize,
        settings: &SampleSettings,
    ) -> Result<Vec<GenericCurve3>, PatchError> {
        if line_count < 1 {
            return Err(PatchError::Resolution {
                requested: line_count,
                minimum: 1,
            });
        }
        let div = settings.div_point_count;
        if div < SampleSettings::MIN_DIV {
            return Err(PatchError::Resolution {
                requested: div,
                minimum: SampleSettings::MIN_DIV,
            });
        }
        let order = settings.derivative_order.min(SampleSettings::MAX_ORDER);
        let patch = self.patch(pi, pj)?;

        let mut lines = Vec::with_capacity(line_count);
        for l in 0..line_count {
            let fixed = if line_count == 1 {
                0.0
            } else {
                l as f64 / (line_count - 1) as f64
            };

            let mut parameters = Vec::with_capacity(div);
            let mut points = Vec::with_capacity(div);
            let mut d1 = Vec::with_capacity(if order >= 1 { div } else { 0 });
            let mut d2 = Vec::with_capacity(if order >= 2 { div } else { 0 });

            for k in 0..div {
                let t = k as f64 / (div - 1) as f64;
                let (u, v) = match direction {
                    IsoDirection::U => (fixed, t),
                    IsoDirection::V => (t, fixed),
                };
                parameters.push(t);
                points.push(patch.evaluate(u, v));
                let (ku, kv) = match direction {
                    IsoDirection::U => (0, 1),
                    IsoDirection::V => (1, 0),
                };
                if order >= 1 {
                    d1.push(patch.partial(ku, kv, u, v));
                }
                if order >= 2 {
                    d2.push(patch.partial(2 * ku, 2 * kv, u, v));
                }
            }

            let mut derivatives = Vec::new();
            if order >= 1 {
                derivatives.push(d1);
            }
            if order >= 2 {
                derivatives.push(d2);
            }
            lines.push(GenericCurve3::new(parameters, points, derivatives));
        }
        Ok(lines)
    }
}
