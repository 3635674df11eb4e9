//! Tests for the bicubic B-spline patch engine.

use approx::assert_relative_eq;
use curvet::bspline::{
    cylinder_point, torus_point, BSplineSurface, IsoDirection, PatchError,
};
use curvet::math::Vector3;
use curvet::types::SampleSettings;
use std::f64::consts::PI;

fn settings(div: usize) -> SampleSettings {
    SampleSettings {
        derivative_order: 1,
        div_point_count: div,
    }
}

#[test]
fn toroidal_adjacency_in_both_directions() {
    // Sampling two patches that share a boundary at matching relative
    // parameters yields identical positions — including across the wrap.
    let surf = BSplineSurface::toroid(6, 4, 0.75, 1.5).unwrap();
    let (pr, pc) = (surf.patch_rows(), surf.patch_cols());

    for pi in 0..pr {
        for pj in 0..pc {
            let here = surf.patch(pi, pj).unwrap();
            let right = surf.patch((pi + 1) % pr, pj).unwrap();
            let up = surf.patch(pi, (pj + 1) % pc).unwrap();
            for k in 0..=8 {
                let t = k as f64 / 8.0;
                assert_eq!(
                    here.evaluate(1.0, t),
                    right.evaluate(0.0, t),
                    "u-boundary of patch ({pi}, {pj}) at t={t}"
                );
                assert_eq!(
                    here.evaluate(t, 1.0),
                    up.evaluate(t, 0.0),
                    "v-boundary of patch ({pi}, {pj}) at t={t}"
                );
            }
        }
    }
}

#[test]
fn boundary_derivatives_are_c2() {
    // Shared control windows give C² across boundaries, not just C⁰.
    let surf = BSplineSurface::toroid(5, 5, 0.75, 1.5).unwrap();
    let a = surf.patch(1, 2).unwrap();
    let b = surf.patch(2, 2).unwrap();
    for k in 0..=6 {
        let v = k as f64 / 6.0;
        assert!((a.partial(1, 0, 1.0, v) - b.partial(1, 0, 0.0, v)).norm() < 1e-12);
        assert!((a.partial(2, 0, 1.0, v) - b.partial(2, 0, 0.0, v)).norm() < 1e-12);
    }
}

#[test]
fn tessellation_triangle_count() {
    let surf = BSplineSurface::cylindric(4, 2, 1.0, -1.0, 1.0).unwrap();
    for div in [2usize, 5, 16] {
        let mesh = surf.tessellate(1, 0, &settings(div)).unwrap();
        assert_eq!(
            mesh.triangle_count(),
            2 * (div - 1) * (div - 1),
            "div={div}"
        );
    }
}

#[test]
fn local_edit_changes_only_referencing_patches() {
    let mut surf = BSplineSurface::toroid(8, 8, 0.75, 1.5).unwrap();
    let settings = settings(7);
    let before = surf.tessellate_all(&settings).unwrap();

    let (row, col) = surf
        .modify(2, 3, 1, 2, Vector3::new(0.0, 0.0, 0.4))
        .unwrap();
    let after = surf.tessellate_all(&settings).unwrap();
    let affected = surf.affected_patches(row, col);

    for pi in 0..surf.patch_rows() {
        for pj in 0..surf.patch_cols() {
            let idx = pi * surf.patch_cols() + pj;
            if affected.contains(&(pi, pj)) {
                assert_ne!(
                    before[idx], after[idx],
                    "patch ({pi}, {pj}) references the edit but did not change"
                );
            } else {
                // Byte-identical: untouched control windows re-evaluate to
                // exactly the same geometry.
                assert_eq!(
                    before[idx], after[idx],
                    "patch ({pi}, {pj}) changed without referencing the edit"
                );
            }
        }
    }
}

#[test]
fn edit_out_of_range_rejected_without_mutation() {
    let mut surf = BSplineSurface::toroid(4, 4, 0.75, 1.5).unwrap();
    let pristine = surf.clone();

    assert!(matches!(
        surf.modify(9, 0, 0, 0, Vector3::new(1.0, 0.0, 0.0)),
        Err(PatchError::PatchOutOfRange { .. })
    ));
    assert!(matches!(
        surf.modify(0, 0, 4, 0, Vector3::new(1.0, 0.0, 0.0)),
        Err(PatchError::ControlOutOfRange { .. })
    ));
    assert_eq!(surf, pristine);
}

#[test]
fn iso_lines_carry_derivatives_and_align() {
    let surf = BSplineSurface::toroid(5, 6, 0.75, 1.5).unwrap();
    let settings = SampleSettings {
        derivative_order: 2,
        div_point_count: 13,
    };

    let lines = surf
        .iso_lines(2, 4, IsoDirection::V, 5, &settings)
        .unwrap();
    assert_eq!(lines.len(), 5);
    for line in &lines {
        assert_eq!(line.len(), 13);
        assert_eq!(line.max_order(), 2);
    }

    // The v=1 boundary line of one patch equals the v=0 line of its
    // column neighbor.
    let here = surf.iso_lines(2, 4, IsoDirection::V, 3, &settings).unwrap();
    let next = surf.iso_lines(2, 5, IsoDirection::V, 3, &settings).unwrap();
    assert_eq!(here[2].points, next[0].points);
}

#[test]
fn cylinder_reference_points() {
    let r = 1.0;
    // Angle 0 at the first division.
    let p = cylinder_point(0, 0, 4, 1, r, -1.0, 1.0);
    assert_relative_eq!(p.x, r, epsilon = 1e-15);
    assert_relative_eq!(p.y, 0.0, epsilon = 1e-15);
    assert_relative_eq!(p.z, -1.0, epsilon = 1e-15);

    // Half the division count is angle π.
    let p = cylinder_point(2, 0, 4, 1, r, -1.0, 1.0);
    assert_relative_eq!(p.x, r * PI.cos(), epsilon = 1e-12);
    assert_relative_eq!(p.y, r * PI.sin(), epsilon = 1e-12);

    // The axial coordinate spans [a, b].
    let p = cylinder_point(0, 1, 4, 1, r, -1.0, 1.0);
    assert_relative_eq!(p.z, 1.0, epsilon = 1e-15);
}

#[test]
fn torus_reference_points() {
    let (r, major_r) = (0.75, 1.5);
    let p = torus_point(0, 0, 8, 8, r, major_r);
    assert_relative_eq!(p.x, major_r + r, epsilon = 1e-15);
    assert_relative_eq!(p.z, 0.0, epsilon = 1e-15);

    // Half a minor turn lands on the inner equator.
    let p = torus_point(0, 4, 8, 8, r, major_r);
    assert_relative_eq!(p.x, major_r - r, epsilon = 1e-12);
    assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
}

#[test]
fn seeded_toroid_approximates_torus() {
    // A B-spline surface with control points on a torus stays close to
    // that torus (convex-hull property keeps it inside the tube).
    let (r, major_r) = (0.75, 1.5);
    let surf = BSplineSurface::toroid(12, 12, r, major_r).unwrap();
    let mesh = surf.tessellate(3, 5, &settings(9)).unwrap();
    for p in &mesh.vertices {
        let ring = (p.x * p.x + p.y * p.y).sqrt() - major_r;
        let tube = (ring * ring + p.z * p.z).sqrt();
        assert!(
            tube < r * 1.05,
            "tessellated point {p:?} strays {tube} from the torus ring"
        );
    }
}
