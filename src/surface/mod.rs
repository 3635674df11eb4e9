//! Analytic parametric surfaces and their tessellation into triangle meshes.
//!
//! `ParametricSurface3` is the viewer's predefined surface set. Each
//! variant maps a bounded rectangle in `(u, v)` to 3D position with first
//! partial derivatives; normals come from the cross product of the
//! partials. Sampling discretizes the rectangle into a uniform grid and
//! triangulates it with the crate-wide diagonal convention.

use crate::math::{Point3, Vector3};
use crate::tessellate;
use crate::types::{SampleError, SampleSettings, TriangulatedMesh3};
use std::f64::consts::{FRAC_PI_2, TAU};

/// An analytic surface in 3D space.
///
/// Parameter conventions (all surfaces are centered on the Z axis):
/// - **Sphere:** `S(u,v) = r·(cos v·cos u, cos v·sin u, sin v)`,
///   `u ∈ [0, 2π]`, `v ∈ [-π/2, π/2]`
/// - **Cylinder:** `S(u,v) = (r·cos u, r·sin u, v)`,
///   `u ∈ [0, 2π]`, `v ∈ [0, height]`
/// - **Torus:** `S(u,v) = ((R + r·cos v)·cos u, (R + r·cos v)·sin u, r·sin v)`,
///   `u, v ∈ [0, 2π]`
/// - **Helicoid:** `S(u,v) = (u·cos v, u·sin v, pitch·v)`,
///   `u ∈ [0, radius]`, `v ∈ [0, 4π]`
/// - **Saddle:** `S(u,v) = (u, v, u² - v²)`, `u, v ∈ [-size, size]`
/// - **Catenoid:** `S(u,v) = (c·cosh(v/c)·cos u, c·cosh(v/c)·sin u, v)`,
///   `u ∈ [0, 2π]`, `v ∈ [-height, height]`
#[derive(Clone, Debug)]
pub enum ParametricSurface3 {
    Sphere { radius: f64 },
    Cylinder { radius: f64, height: f64 },
    Torus { major_r: f64, minor_r: f64 },
    Helicoid { radius: f64, pitch: f64 },
    Saddle { size: f64 },
    Catenoid { waist: f64, height: f64 },
}

impl ParametricSurface3 {
    /// The rectangular parameter domain `((u_min, u_max), (v_min, v_max))`.
    pub fn domain(&self) -> ((f64, f64), (f64, f64)) {
        match *self {
            ParametricSurface3::Sphere { .. } => ((0.0, TAU), (-FRAC_PI_2, FRAC_PI_2)),
            ParametricSurface3::Cylinder { height, .. } => ((0.0, TAU), (0.0, height)),
            ParametricSurface3::Torus { .. } => ((0.0, TAU), (0.0, TAU)),
            ParametricSurface3::Helicoid { radius, .. } => ((0.0, radius), (0.0, 2.0 * TAU)),
            ParametricSurface3::Saddle { size } => ((-size, size), (-size, size)),
            ParametricSurface3::Catenoid { height, .. } => ((0.0, TAU), (-height, height)),
        }
    }

    /// Evaluate the surface at parameters `(u, v)`.
    pub fn evaluate(&self, u: f64, v: f64) -> Point3 {
        match *self {
            ParametricSurface3::Sphere { radius } => Point3::new(
                radius * v.cos() * u.cos(),
                radius * v.cos() * u.sin(),
                radius * v.sin(),
            ),
            ParametricSurface3::Cylinder { radius, .. } => {
                Point3::new(radius * u.cos(), radius * u.sin(), v)
            }
            ParametricSurface3::Torus { major_r, minor_r } => {
                let w = major_r + minor_r * v.cos();
                Point3::new(w * u.cos(), w * u.sin(), minor_r * v.sin())
            }
            ParametricSurface3::Helicoid { pitch, .. } => {
                Point3::new(u * v.cos(), u * v.sin(), pitch * v)
            }
            ParametricSurface3::Saddle { .. } => Point3::new(u, v, u * u - v * v),
            ParametricSurface3::Catenoid { waist, .. } => {
                let w = waist * (v / waist).cosh();
                Point3::new(w * u.cos(), w * u.sin(), v)
            }
        }
    }

    /// Partial derivative with respect to `u`.
    pub fn derivative_u(&self, u: f64, v: f64) -> Vector3 {
        match *self {
            ParametricSurface3::Sphere { radius } => Vector3::new(
                -radius * v.cos() * u.sin(),
                radius * v.cos() * u.cos(),
                0.0,
            ),
            ParametricSurface3::Cylinder { radius, .. } => {
                Vector3::new(-radius * u.sin(), radius * u.cos(), 0.0)
            }
            ParametricSurface3::Torus { major_r, minor_r } => {
                let w = major_r + minor_r * v.cos();
                Vector3::new(-w * u.sin(), w * u.cos(), 0.0)
            }
            ParametricSurface3::Helicoid { .. } => Vector3::new(v.cos(), v.sin(), 0.0),
            ParametricSurface3::Saddle { .. } => Vector3::new(1.0, 0.0, 2.0 * u),
            ParametricSurface3::Catenoid { waist, .. } => {
                let w = waist * (v / waist).cosh();
                Vector3::new(-w * u.sin(), w * u.cos(), 0.0)
            }
        }
    }

    /// Partial derivative with respect to `v`.
    pub fn derivative_v(&self, u: f64, v: f64) -> Vector3 {
        match *self {
            ParametricSurface3::Sphere { radius } => Vector3::new(
                -radius * v.sin() * u.cos(),
                -radius * v.sin() * u.sin(),
                radius * v.cos(),
            ),
            ParametricSurface3::Cylinder { .. } => Vector3::new(0.0, 0.0, 1.0),
            ParametricSurface3::Torus { minor_r, .. } => Vector3::new(
                -minor_r * v.sin() * u.cos(),
                -minor_r * v.sin() * u.sin(),
                minor_r * v.cos(),
            ),
            ParametricSurface3::Helicoid { pitch, .. } => {
                Vector3::new(-u * v.sin(), u * v.cos(), pitch)
            }
            ParametricSurface3::Saddle { .. } => Vector3::new(0.0, 1.0, -2.0 * v),
            ParametricSurface3::Catenoid { waist, .. } => {
                let s = (v / waist).sinh();
                Vector3::new(s * u.cos(), s * u.sin(), 1.0)
            }
        }
    }

    /// Surface normal at parameters `(u, v)` (unit length).
    pub fn normal(&self, u: f64, v: f64) -> Vector3 {
        let du = self.derivative_u(u, v);
        let dv = self.derivative_v(u, v);
        let n = du.cross(&dv);
        let len = n.norm();
        if len > 1e-15 {
            n / len
        } else {
            // Degenerate point (e.g., pole of sphere) — use axis direction
            match self {
                ParametricSurface3::Sphere { .. } => {
                    if v > 0.0 {
                        Vector3::new(0.0, 0.0, 1.0)
                    } else {
                        Vector3::new(0.0, 0.0, -1.0)
                    }
                }
                _ => Vector3::new(0.0, 0.0, 1.0),
            }
        }
    }

    /// Tessellate the surface into a `rows × cols` triangulated grid
    /// (`u` along rows, `v` along columns).
    pub fn sample(&self, rows: usize, cols: usize) -> Result<TriangulatedMesh3, SampleError> {
        let minimum = SampleSettings::MIN_DIV;
        if rows < minimum || cols < minimum {
            return Err(SampleError::TooFewSamples {
                requested: rows.min(cols),
                minimum,
            });
        }
        let ((u0, u1), (v0, v1)) = self.domain();
        let (vertices, normals) = tessellate::sample_grid(rows, cols, |i, j| {
            let u = u0 + (u1 - u0) * (i as f64 / (rows - 1) as f64);
            let v = v0 + (v1 - v0) * (j as f64 / (cols - 1) as f64);
            (self.evaluate(u, v), self.normal(u, v))
        });
        Ok(TriangulatedMesh3::from_grid(rows, cols, vertices, normals))
    }
}
