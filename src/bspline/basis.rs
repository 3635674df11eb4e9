//! Uniform cubic B-spline blending functions.
//!
//! The four basis polynomials over one span, with first and second
//! derivatives. Their values at `t = 0` and `t = 1` are computed exactly
//! (the arithmetic below yields the rational constants 0, 1/6 and 4/6
//! without rounding differences), which is what makes adjacent patch
//! boundaries coincide bitwise — see the surface module.

/// The four blending function values at local parameter `t ∈ [0, 1]`.
pub fn blend(t: f64) -> [f64; 4] {
    let s = 1.0 - t;
    [
        s * s * s / 6.0,
        (3.0 * t * t * t - 6.0 * t * t + 4.0) / 6.0,
        (-3.0 * t * t * t + 3.0 * t * t + 3.0 * t + 1.0) / 6.0,
        t * t * t / 6.0,
    ]
}

/// First derivatives of the blending functions.
pub fn blend_d1(t: f64) -> [f64; 4] {
    let s = 1.0 - t;
    [
        -s * s / 2.0,
        (3.0 * t * t - 4.0 * t) / 2.0,
        (-3.0 * t * t + 2.0 * t + 1.0) / 2.0,
        t * t / 2.0,
    ]
}

/// Second derivatives of the blending functions.
pub fn blend_d2(t: f64) -> [f64; 4] {
    [1.0 - t, 3.0 * t - 2.0, -3.0 * t + 1.0, t]
}

/// Blending function values for derivative order `order` (0, 1 or 2).
pub fn blend_order(order: usize, t: f64) -> [f64; 4] {
    match order {
        0 => blend(t),
        1 => blend_d1(t),
        _ => blend_d2(t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_of_unity() {
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let sum: f64 = blend(t).iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-14,
                "Partition of unity failed at t={t}: sum={sum}"
            );
        }
    }

    #[test]
    fn non_negative() {
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            for (j, &b) in blend(t).iter().enumerate() {
                assert!(b >= 0.0, "Negative basis function at t={t}, j={j}: {b}");
            }
        }
    }

    #[test]
    fn derivative_sums_vanish() {
        // The basis sums to a constant, so derivative sums must be 0.
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let sum1: f64 = blend_d1(t).iter().sum();
            let sum2: f64 = blend_d2(t).iter().sum();
            assert!(sum1.abs() < 1e-14, "d1 sum at t={t}: {sum1}");
            assert!(sum2.abs() < 1e-14, "d2 sum at t={t}: {sum2}");
        }
    }

    #[test]
    fn end_values_exact() {
        // These equalities must be bitwise — patch boundary coincidence
        // depends on them.
        assert_eq!(blend(0.0), [1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0, 0.0]);
        assert_eq!(blend(1.0), [0.0, 1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0]);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1e-7;
        for i in 1..10 {
            let t = i as f64 / 10.0;
            let plus = blend(t + h);
            let minus = blend(t - h);
            let d1 = blend_d1(t);
            for j in 0..4 {
                let fd = (plus[j] - minus[j]) / (2.0 * h);
                assert!(
                    (d1[j] - fd).abs() < 1e-6,
                    "blend_d1[{j}] vs finite difference at t={t}"
                );
            }
            let plus = blend_d1(t + h);
            let minus = blend_d1(t - h);
            let d2 = blend_d2(t);
            for j in 0..4 {
                let fd = (plus[j] - minus[j]) / (2.0 * h);
                assert!(
                    (d2[j] - fd).abs() < 1e-6,
                    "blend_d2[{j}] vs finite difference at t={t}"
                );
            }
        }
    }
}
