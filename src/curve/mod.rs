//! Analytic parametric curves and their sampling into renderable images.
//!
//! `ParametricCurve3` is the predefined example set of the viewer: each
//! variant is an analytic mapping from a bounded parameter interval to 3D
//! position with derivatives up to second order. Sampling discretizes the
//! domain at uniform steps into a [`GenericCurve3`].

use crate::math::{Point3, Vector3};
use crate::types::{GenericCurve3, SampleError, SampleSettings};
use std::f64::consts::TAU;

/// An analytic curve in 3D space.
#[derive(Clone, Debug)]
pub enum ParametricCurve3 {
    /// `c(t) = (a·cos t, b·sin t, 0)`, `t ∈ [0, 2π]`.
    Ellipse { a: f64, b: f64 },
    /// `c(t) = (r·cos t, r·sin t, pitch·t)`, `t ∈ [0, 4π]`.
    Helix { radius: f64, pitch: f64 },
    /// `(p, q)` torus knot on the torus with radii `(R, r)`:
    /// `c(t) = ((R + r·cos qt)·cos pt, (R + r·cos qt)·sin pt, r·sin qt)`,
    /// `t ∈ [0, 2π]`.
    TorusKnot { p: u32, q: u32, major_r: f64, minor_r: f64 },
    /// Planar rose `r(θ) = cos kθ`: `c(t) = (cos kt·cos t, cos kt·sin t, 0)`,
    /// `t ∈ [0, 2π]`.
    Rose { k: u32 },
    /// Planar Lissajous figure `c(t) = (cos kx·t, sin ky·t, 0)`, `t ∈ [0, 2π]`.
    Lissajous { kx: u32, ky: u32 },
    /// Conical spiral `c(t) = (a·t·cos t, a·t·sin t, b·t)`, `t ∈ [0, 6π]`.
    ConicalSpiral { a: f64, b: f64 },
}

impl ParametricCurve3 {
    /// The parameter domain `[t_min, t_max]`.
    pub fn domain(&self) -> (f64, f64) {
        match self {
            ParametricCurve3::Ellipse { .. }
            | ParametricCurve3::TorusKnot { .. }
            | ParametricCurve3::Rose { .. }
            | ParametricCurve3::Lissajous { .. } => (0.0, TAU),
            ParametricCurve3::Helix { .. } => (0.0, 2.0 * TAU),
            ParametricCurve3::ConicalSpiral { .. } => (0.0, 3.0 * TAU),
        }
    }

    /// Evaluate the curve at parameter `t`.
    pub fn evaluate(&self, t: f64) -> Point3 {
        match *self {
            ParametricCurve3::Ellipse { a, b } => Point3::new(a * t.cos(), b * t.sin(), 0.0),
            ParametricCurve3::Helix { radius, pitch } => {
                Point3::new(radius * t.cos(), radius * t.sin(), pitch * t)
            }
            ParametricCurve3::TorusKnot { p, q, major_r, minor_r } => {
                let (p, q) = (p as f64, q as f64);
                let w = major_r + minor_r * (q * t).cos();
                Point3::new(
                    w * (p * t).cos(),
                    w * (p * t).sin(),
                    minor_r * (q * t).sin(),
                )
            }
            ParametricCurve3::Rose { k } => {
                let r = (k as f64 * t).cos();
                Point3::new(r * t.cos(), r * t.sin(), 0.0)
            }
            ParametricCurve3::Lissajous { kx, ky } => {
                Point3::new((kx as f64 * t).cos(), (ky as f64 * t).sin(), 0.0)
            }
            ParametricCurve3::ConicalSpiral { a, b } => {
                Point3::new(a * t * t.cos(), a * t * t.sin(), b * t)
            }
        }
    }

    /// First derivative with respect to `t`.
    pub fn derivative(&self, t: f64) -> Vector3 {
        match *self {
            ParametricCurve3::Ellipse { a, b } => Vector3::new(-a * t.sin(), b * t.cos(), 0.0),
            ParametricCurve3::Helix { radius, pitch } => {
                Vector3::new(-radius * t.sin(), radius * t.cos(), pitch)
            }
            ParametricCurve3::TorusKnot { p, q, major_r, minor_r } => {
                let (p, q) = (p as f64, q as f64);
                let (s_q, c_q) = (q * t).sin_cos();
                let (s_p, c_p) = (p * t).sin_cos();
                let w = major_r + minor_r * c_q;
                Vector3::new(
                    -minor_r * q * s_q * c_p - p * w * s_p,
                    -minor_r * q * s_q * s_p + p * w * c_p,
                    minor_r * q * c_q,
                )
            }
            ParametricCurve3::Rose { k } => {
                let k = k as f64;
                let (s_k, c_k) = (k * t).sin_cos();
                let (s, c) = t.sin_cos();
                Vector3::new(-k * s_k * c - c_k * s, -k * s_k * s + c_k * c, 0.0)
            }
            ParametricCurve3::Lissajous { kx, ky } => {
                let (kx, ky) = (kx as f64, ky as f64);
                Vector3::new(-kx * (kx * t).sin(), ky * (ky * t).cos(), 0.0)
            }
            ParametricCurve3::ConicalSpiral { a, b } => {
                let (s, c) = t.sin_cos();
                Vector3::new(a * (c - t * s), a * (s + t * c), b)
            }
        }
    }

    /// Second derivative with respect to `t`.
    pub fn second_derivative(&self, t: f64) -> Vector3 {
        match *self {
            ParametricCurve3::Ellipse { a, b } => Vector3::new(-a * t.cos(), -b * t.sin(), 0.0),
            ParametricCurve3::Helix { radius, .. } => {
                Vector3::new(-radius * t.cos(), -radius * t.sin(), 0.0)
            }
            ParametricCurve3::TorusKnot { p, q, major_r, minor_r } => {
                let (p, q) = (p as f64, q as f64);
                let (s_q, c_q) = (q * t).sin_cos();
                let (s_p, c_p) = (p * t).sin_cos();
                let w = major_r + minor_r * c_q;
                Vector3::new(
                    -minor_r * q * q * c_q * c_p + 2.0 * minor_r * p * q * s_q * s_p
                        - p * p * w * c_p,
                    -minor_r * q * q * c_q * s_p - 2.0 * minor_r * p * q * s_q * c_p
                        - p * p * w * s_p,
                    -minor_r * q * q * s_q,
                )
            }
            ParametricCurve3::Rose { k } => {
                let k = k as f64;
                let (s_k, c_k) = (k * t).sin_cos();
                let (s, c) = t.sin_cos();
                Vector3::new(
                    -k * k * c_k * c + 2.0 * k * s_k * s - c_k * c,
                    -k * k * c_k * s - 2.0 * k * s_k * c - c_k * s,
                    0.0,
                )
            }
            ParametricCurve3::Lissajous { kx, ky } => {
                let (kx, ky) = (kx as f64, ky as f64);
                Vector3::new(-kx * kx * (kx * t).cos(), -ky * ky * (ky * t).sin(), 0.0)
            }
            ParametricCurve3::ConicalSpiral { a, .. } => {
                let (s, c) = t.sin_cos();
                Vector3::new(a * (-2.0 * s - t * c), a * (2.0 * c - t * s), 0.0)
            }
        }
    }

    /// Discretize the curve into a renderable image.
    ///
    /// Samples `settings.div_point_count` uniformly spaced parameters over
    /// the domain, with derivative rows up to `settings.derivative_order`
    /// (capped at 2). The parameter of sample `k` out of `n` is computed
    /// as `a + (b-a)·(k/(n-1))`, so samples whose parameters coincide
    /// between a coarser and a finer sampling evaluate identically.
    pub fn sample(&self, settings: &SampleSettings) -> Result<GenericCurve3, SampleError> {
        let div = settings.div_point_count;
        if div < SampleSettings::MIN_DIV {
            return Err(SampleError::TooFewSamples {
                requested: div,
                minimum: SampleSettings::MIN_DIV,
            });
        }
        let order = settings.derivative_order.min(SampleSettings::MAX_ORDER);
        let (a, b) = self.domain();

        let mut parameters = Vec::with_capacity(div);
        let mut points = Vec::with_capacity(div);
        let mut d1 = Vec::with_capacity(if order >= 1 { div } else { 0 });
        let mut d2 = Vec::with_capacity(if order >= 2 { div } else { 0 });

        for k in 0..div {
            let t = a + (b - a) * (k as f64 / (div - 1) as f64);
            parameters.push(t);
            points.push(self.evaluate(t));
            if order >= 1 {
                d1.push(self.derivative(t));
            }
            if order >= 2 {
                d2.push(self.second_derivative(t));
            }
        }

        let mut derivatives = Vec::new();
        if order >= 1 {
            derivatives.push(d1);
        }
        if order >= 2 {
            derivatives.push(d2);
        }
        Ok(GenericCurve3::new(parameters, points, derivatives))
    }
}
