//! Closed uniform cubic B-spline arcs.
//!
//! An arc is the curve analogue of the patch collections in the parent
//! module: `n ≥ 4` control points with modular 4-point windows, so the
//! curve closes on itself with C² continuity everywhere. Arcs can also be
//! fitted through data points: the interpolation solve inverts the cyclic
//! `(P[k] + 4·P[k+1] + P[k+2])/6 = D[k]` system.

use super::basis;
use crate::math::{Point3, Vector3};
use crate::types::{GenericCurve3, SampleError, SampleSettings};
use nalgebra::DMatrix;

/// Errors raised for degenerate arc configurations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArcError {
    /// A closed cubic arc needs at least 4 control points.
    TooFewPoints { got: usize },
    /// The interpolation system could not be solved.
    SingularSystem,
}

impl std::fmt::Display for ArcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArcError::TooFewPoints { got } => {
                write!(f, "Closed cubic arc needs at least 4 control points, got {got}")
            }
            ArcError::SingularSystem => write!(f, "Arc interpolation system is singular"),
        }
    }
}

impl std::error::Error for ArcError {}

/// A closed uniform cubic B-spline curve.
///
/// The parameter domain is `[0, n)` with one unit span per control
/// point; evaluation wraps periodically.
#[derive(Clone, Debug, PartialEq)]
pub struct BSplineArc {
    points: Vec<Point3>,
}

impl BSplineArc {
    pub fn new(points: Vec<Point3>) -> Result<Self, ArcError> {
        if points.len() < 4 {
            return Err(ArcError::TooFewPoints { got: points.len() });
        }
        Ok(Self { points })
    }

    /// Fit an arc through the given data points: the result passes
    /// through `data[k]` at parameter `t = k`.
    pub fn interpolate(data: &[Point3]) -> Result<Self, ArcError> {
        let n = data.len();
        if n < 4 {
            return Err(ArcError::TooFewPoints { got: n });
        }

        // (P[k] + 4·P[k+1] + P[k+2]) = 6·D[k], cyclic in k.
        let mut a = DMatrix::<f64>::zeros(n, n);
        let mut rhs = DMatrix::<f64>::zeros(n, 3);
        for k in 0..n {
            a[(k, k)] += 1.0;
            a[(k, (k + 1) % n)] += 4.0;
            a[(k, (k + 2) % n)] += 1.0;
            rhs[(k, 0)] = 6.0 * data[k].x;
            rhs[(k, 1)] = 6.0 * data[k].y;
            rhs[(k, 2)] = 6.0 * data[k].z;
        }

        let solution = a.lu().solve(&rhs).ok_or(ArcError::SingularSystem)?;
        let points = (0..n)
            .map(|k| Point3::new(solution[(k, 0)], solution[(k, 1)], solution[(k, 2)]))
            .collect();
        Ok(Self { points })
    }

    /// Number of control points (= number of spans).
    pub fn control_count(&self) -> usize {
        self.points.len()
    }

    pub fn control_points(&self) -> &[Point3] {
        &self.points
    }

    /// The parameter period (one full loop).
    pub fn period(&self) -> f64 {
        self.points.len() as f64
    }

    fn span(&self, t: f64) -> (usize, f64) {
        let n = self.points.len() as f64;
        let u = t.rem_euclid(n);
        let k = (u.floor() as usize).min(self.points.len() - 1);
        (k, u - k as f64)
    }

    fn combine(&self, k: usize, weights: [f64; 4]) -> Vector3 {
        let n = self.points.len();
        let mut acc = Vector3::zeros();
        for (d, w) in weights.into_iter().enumerate() {
            acc += w * self.points[(k + d) % n].coords;
        }
        acc
    }

    /// Evaluate the arc position at any real parameter (periodic).
    pub fn evaluate(&self, t: f64) -> Point3 {
        let (k, s) = self.span(t);
        Point3::from(self.combine(k, basis::blend(s)))
    }

    /// First derivative at any real parameter (periodic).
    pub fn derivative(&self, t: f64) -> Vector3 {
        let (k, s) = self.span(t);
        self.combine(k, basis::blend_d1(s))
    }

    /// Second derivative at any real parameter (periodic).
    pub fn second_derivative(&self, t: f64) -> Vector3 {
        let (k, s) = self.span(t);
        self.combine(k, basis::blend_d2(s))
    }

    /// Discretize one full loop into a renderable image. The final
    /// sample reuses the first one so the loop closes exactly.
    pub fn sample(&self, settings: &SampleSettings) -> Result<GenericCurve3, SampleError> {
        let div = settings.div_point_count;
        if div < SampleSettings::MIN_DIV {
            return Err(SampleError::TooFewSamples {
                requested: div,
                minimum: SampleSettings::MIN_DIV,
            });
        }
        let order = settings.derivative_order.min(SampleSettings::MAX_ORDER);
        let period = self.period();

        let mut parameters = Vec::with_capacity(div);
        let mut points = Vec::with_capacity(div);
        let mut d1 = Vec::with_capacity(if order >= 1 { div } else { 0 });
        let mut d2 = Vec::with_capacity(if order >= 2 { div } else { 0 });

        for k in 0..div - 1 {
            let t = period * (k as f64 / (div - 1) as f64);
            parameters.push(t);
            points.push(self.evaluate(t));
            if order >= 1 {
                d1.push(self.derivative(t));
            }
            if order >= 2 {
                d2.push(self.second_derivative(t));
            }
        }

        parameters.push(period);
        points.push(points[0]);
        if order >= 1 {
            d1.push(d1[0]);
        }
        if order >= 2 {
            d2.push(d2[0]);
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
