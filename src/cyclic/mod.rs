//! Cyclic (periodic) curves interpolating nodes with prescribed derivatives.
//!
//! A `CyclicCurve3` is a closed curve through `n ≥ 3` nodes, each node
//! carrying a parameter inside one period, a position, and a first
//! derivative. The blend is a periodic piecewise-cubic Hermite
//! polynomial: on every span — including the wrap span from the last
//! node back to the first — the cubic matches both endpoint positions
//! and derivatives, so interpolation is exact by construction and the
//! curve is C¹ across nodes.

use crate::math::{Point3, Vector3};
use crate::types::{GenericCurve3, SampleError, SampleSettings};
use std::f64::consts::TAU;

/// Errors raised for degenerate interpolation configurations.
#[derive(Debug, Clone, PartialEq)]
pub enum CyclicError {
    /// A cycle needs at least 3 nodes.
    TooFewNodes { got: usize },
    /// Two node parameters coincide.
    CoincidentNodes { index: usize },
    /// Node parameters must be strictly increasing.
    UnorderedNodes { index: usize },
    /// Node parameters must lie inside `[0, 2π)`.
    NodeOutOfRange { index: usize, value: f64 },
    /// Node, position and derivative columns must have equal length.
    LengthMismatch {
        nodes: usize,
        points: usize,
        derivatives: usize,
    },
}

impl std::fmt::Display for CyclicError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CyclicError::TooFewNodes { got } => {
                write!(f, "Cyclic interpolation needs at least 3 nodes, got {got}")
            }
            CyclicError::CoincidentNodes { index } => {
                write!(f, "Node parameters {index} and {} coincide", index + 1)
            }
            CyclicError::UnorderedNodes { index } => {
                write!(f, "Node parameter {} is not greater than node {index}", index + 1)
            }
            CyclicError::NodeOutOfRange { index, value } => {
                write!(f, "Node parameter {index} = {value} outside [0, 2π)")
            }
            CyclicError::LengthMismatch {
                nodes,
                points,
                derivatives,
            } => write!(
                f,
                "Column lengths disagree: {nodes} nodes, {points} points, {derivatives} derivatives"
            ),
        }
    }
}

impl std::error::Error for CyclicError {}

/// A closed periodic curve interpolating nodes and derivative constraints.
#[derive(Clone, Debug, PartialEq)]
pub struct CyclicCurve3 {
    nodes: Vec<f64>,
    points: Vec<Point3>,
    derivatives: Vec<Vector3>,
}

impl CyclicCurve3 {
    /// Build the interpolating curve.
    ///
    /// `nodes` are strictly increasing parameters inside `[0, 2π)`;
    /// `points` and `derivatives` prescribe the position and first
    /// derivative at each node. Re-evaluating the curve at a node
    /// reproduces both exactly.
    pub fn interpolate(
        nodes: Vec<f64>,
        points: Vec<Point3>,
        derivatives: Vec<Vector3>,
    ) -> Result<Self, CyclicError> {
        let n = nodes.len();
        if n != points.len() || n != derivatives.len() {
            return Err(CyclicError::LengthMismatch {
                nodes: n,
                points: points.len(),
                derivatives: derivatives.len(),
            });
        }
        if n < 3 {
            return Err(CyclicError::TooFewNodes { got: n });
        }
        for (i, &t) in nodes.iter().enumerate() {
            if !(0.0..TAU).contains(&t) {
                return Err(CyclicError::NodeOutOfRange { index: i, value: t });
            }
        }
        for i in 0..n - 1 {
            if nodes[i + 1] == nodes[i] {
                return Err(CyclicError::CoincidentNodes { index: i });
            }
            if nodes[i + 1] < nodes[i] {
                return Err(CyclicError::UnorderedNodes { index: i });
            }
        }
        Ok(Self {
            nodes,
            points,
            derivatives,
        })
    }

    /// Number of interpolation nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The parameter period (one full cycle).
    pub fn period(&self) -> f64 {
        TAU
    }

    /// Locate the span containing the wrapped parameter and return
    /// `(span start index, local parameter s ∈ [0, 1], span width)`.
    fn span(&self, t: f64) -> (usize, f64, f64) {
        let n = self.nodes.len();
        let t0 = self.nodes[0];
        // rem_euclid keeps u inside [t0, t0 + 2π)
        let u = (t - t0).rem_euclid(TAU) + t0;

        // Index of the last node with nodes[k] <= u.
        let k = self.nodes.partition_point(|&x| x <= u) - 1;
        let (ta, tb) = if k == n - 1 {
            (self.nodes[n - 1], self.nodes[0] + TAU)
        } else {
            (self.nodes[k], self.nodes[k + 1])
        };
        let h = tb - ta;
        (k, (u - ta) / h, h)
    }

    /// Evaluate the curve position at any real parameter (periodic).
    pub fn evaluate(&self, t: f64) -> Point3 {
        let n = self.nodes.len();
        let (k, s, h) = self.span(t);
        let (pa, pb) = (self.points[k], self.points[(k + 1) % n]);
        let (da, db) = (self.derivatives[k], self.derivatives[(k + 1) % n]);

        let s2 = s * s;
        let s3 = s2 * s;
        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        Point3::from(h00 * pa.coords + h01 * pb.coords + (h10 * da + h11 * db) * h)
    }

    /// First derivative at any real parameter (periodic).
    pub fn derivative(&self, t: f64) -> Vector3 {
        let n = self.nodes.len();
        let (k, s, h) = self.span(t);
        let (pa, pb) = (self.points[k], self.points[(k + 1) % n]);
        let (da, db) = (self.derivatives[k], self.derivatives[(k + 1) % n]);

        let s2 = s * s;
        let h00 = 6.0 * s2 - 6.0 * s;
        let h10 = 3.0 * s2 - 4.0 * s + 1.0;
        let h01 = -6.0 * s2 + 6.0 * s;
        let h11 = 3.0 * s2 - 2.0 * s;

        (h00 * pa.coords + h01 * pb.coords) / h + h10 * da + h11 * db
    }

    /// Second derivative at any real parameter (periodic).
    pub fn second_derivative(&self, t: f64) -> Vector3 {
        let n = self.nodes.len();
        let (k, s, h) = self.span(t);
        let (pa, pb) = (self.points[k], self.points[(k + 1) % n]);
        let (da, db) = (self.derivatives[k], self.derivatives[(k + 1) % n]);

        let h00 = 12.0 * s - 6.0;
        let h10 = 6.0 * s - 4.0;
        let h01 = -12.0 * s + 6.0;
        let h11 = 6.0 * s - 2.0;

        (h00 * pa.coords + h01 * pb.coords) / (h * h) + (h10 * da + h11 * db) / h
    }

    /// Discretize one full period into a renderable image.
    ///
    /// The samples are uniformly spaced over `[t₀, t₀ + 2π]`; the final
    /// sample reuses the first sample's data so the rendered loop closes
    /// exactly, not merely within tolerance.
    pub fn sample(&self, settings: &SampleSettings) -> Result<GenericCurve3, SampleError> {
        let div = settings.div_point_count;
        if div < SampleSettings::MIN_DIV {
            return Err(SampleError::TooFewSamples {
                requested: div,
                minimum: SampleSettings::MIN_DIV,
            });
        }
        let order = settings.derivative_order.min(SampleSettings::MAX_ORDER);
        let t0 = self.nodes[0];

        let mut parameters = Vec::with_capacity(div);
        let mut points = Vec::with_capacity(div);
        let mut d1 = Vec::with_capacity(if order >= 1 { div } else { 0 });
        let mut d2 = Vec::with_capacity(if order >= 2 { div } else { 0 });

        for k in 0..div - 1 {
            let t = t0 + TAU * (k as f64 / (div - 1) as f64);
            parameters.push(t);
            points.push(self.evaluate(t));
            if order >= 1 {
                d1.push(self.derivative(t));
            }
            if order >= 2 {
                d2.push(self.second_derivative(t));
            }
        }

        // Closed loop: the last sample is the first one, one period later.
        parameters.push(t0 + TAU);
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

#[cfg(test)]
mod tests {
    use super::*;

    fn circle_nodes(n: usize, radius: f64) -> (Vec<f64>, Vec<Point3>, Vec<Vector3>) {
        let nodes: Vec<f64> = (0..n).map(|k| TAU * k as f64 / n as f64).collect();
        let points = nodes
            .iter()
            .map(|t| Point3::new(radius * t.cos(), radius * t.sin(), 0.0))
            .collect();
        let derivatives = nodes
            .iter()
            .map(|t| Vector3::new(-radius * t.sin(), radius * t.cos(), 0.0))
            .collect();
        (nodes, points, derivatives)
    }

    #[test]
    fn reproduces_nodes_exactly() {
        let (nodes, points, derivatives) = circle_nodes(5, 2.0);
        let curve =
            CyclicCurve3::interpolate(nodes.clone(), points.clone(), derivatives.clone()).unwrap();
        for i in 0..nodes.len() {
            let p = curve.evaluate(nodes[i]);
            let d = curve.derivative(nodes[i]);
            assert!(
                (p - points[i]).norm() < 1e-12,
                "position at node {i}: {p:?} vs {:?}",
                points[i]
            );
            assert!(
                (d - derivatives[i]).norm() < 1e-12,
                "derivative at node {i}: {d:?} vs {:?}",
                derivatives[i]
            );
        }
    }

    #[test]
    fn periodic_wrap_matches() {
        let (nodes, points, derivatives) = circle_nodes(4, 1.0);
        let curve = CyclicCurve3::interpolate(nodes, points, derivatives).unwrap();
        let t = 1.3;
        assert!((curve.evaluate(t) - curve.evaluate(t + TAU)).norm() < 1e-12);
        assert!((curve.derivative(t) - curve.derivative(t - TAU)).norm() < 1e-12);
    }

    #[test]
    fn rejects_too_few_nodes() {
        let (mut nodes, mut points, mut derivatives) = circle_nodes(3, 1.0);
        nodes.pop();
        points.pop();
        derivatives.pop();
        assert_eq!(
            CyclicCurve3::interpolate(nodes, points, derivatives),
            Err(CyclicError::TooFewNodes { got: 2 })
        );
    }

    #[test]
    fn rejects_coincident_nodes() {
        let (mut nodes, points, derivatives) = circle_nodes(4, 1.0);
        nodes[2] = nodes[1];
        assert_eq!(
            CyclicCurve3::interpolate(nodes, points, derivatives),
            Err(CyclicError::CoincidentNodes { index: 1 })
        );
    }

    #[test]
    fn rejects_out_of_range_nodes() {
        let (mut nodes, points, derivatives) = circle_nodes(4, 1.0);
        nodes[3] = TAU + 0.5;
        assert!(matches!(
            CyclicCurve3::interpolate(nodes, points, derivatives),
            Err(CyclicError::NodeOutOfRange { index: 3, .. })
        ));
    }

    #[test]
    fn sampled_loop_closes_exactly() {
        let (nodes, points, derivatives) = circle_nodes(6, 1.5);
        let curve = CyclicCurve3::interpolate(nodes, points, derivatives).unwrap();
        let settings = SampleSettings {
            derivative_order: 2,
            div_point_count: 37,
        };
        let image = curve.sample(&settings).unwrap();
        assert_eq!(image.points[0], image.points[36]);
        assert_eq!(image.derivative(1, 0), image.derivative(1, 36));
        assert_eq!(image.derivative(2, 0), image.derivative(2, 36));
    }
}
