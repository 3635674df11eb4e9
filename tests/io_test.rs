//! Tests for control-grid and model persistence.

use curvet::bspline::{BSplineSurface, Topology};
use curvet::io::grid::{read_grid, write_grid, GridIoError};
use curvet::io::off::{read_off, write_off};
use curvet::math::{Point3, Vector3};
use curvet::surface::ParametricSurface3;

#[test]
fn grid_round_trip_reproduces_everything() {
    // Dimensions, coordinates and topology tag all survive save/load.
    let mut toroid = BSplineSurface::toroid(5, 4, 0.75, 1.5).unwrap();
    toroid
        .modify(2, 1, 0, 3, Vector3::new(0.1, -0.7, 0.03125))
        .unwrap();
    let cylindric = BSplineSurface::cylindric(6, 2, 1.0, -1.0, 1.0).unwrap();

    for surface in [toroid, cylindric] {
        let mut buf = Vec::new();
        write_grid(&surface, &mut buf).unwrap();
        let loaded = read_grid(&mut buf.as_slice()).unwrap();

        assert_eq!(loaded.topology(), surface.topology());
        assert_eq!((loaded.rows(), loaded.cols()), (surface.rows(), surface.cols()));
        assert_eq!(loaded.points(), surface.points());
    }
}

#[test]
fn grid_round_trip_is_bitwise_after_awkward_edits() {
    // Shortest round-trip float formatting keeps even non-dyadic
    // coordinates exact.
    let mut surface = BSplineSurface::toroid(4, 4, 0.75, 1.5).unwrap();
    surface
        .modify(0, 0, 1, 1, Vector3::new(1.0 / 3.0, 2.0 / 7.0, -1e-13))
        .unwrap();

    let mut buf = Vec::new();
    write_grid(&surface, &mut buf).unwrap();
    let loaded = read_grid(&mut buf.as_slice()).unwrap();
    assert_eq!(loaded, surface);
}

#[test]
fn adjacency_is_reconstructed_after_load() {
    let surface = BSplineSurface::toroid(5, 5, 0.75, 1.5).unwrap();
    let mut buf = Vec::new();
    write_grid(&surface, &mut buf).unwrap();
    let loaded = read_grid(&mut buf.as_slice()).unwrap();

    // Point order was preserved, so patches still share boundaries.
    let a = loaded.patch(4, 2).unwrap();
    let b = loaded.patch(0, 2).unwrap();
    for k in 0..=5 {
        let v = k as f64 / 5.0;
        assert_eq!(a.evaluate(1.0, v), b.evaluate(0.0, v));
    }
}

#[test]
fn mismatched_dimensions_rejected() {
    let mut text = String::from("toroid\n4 4\n");
    for _ in 0..12 {
        text.push_str("0 0 0\n");
    }
    let err = read_grid(&mut text.as_bytes()).unwrap_err();
    assert!(matches!(err, GridIoError::Malformed { .. }), "{err}");
}

#[test]
fn garbage_coordinates_rejected() {
    let text = "open\n4 4\nnot a number at all\n";
    let err = read_grid(&mut text.as_bytes()).unwrap_err();
    assert!(matches!(err, GridIoError::Malformed { .. }), "{err}");
}

#[test]
fn open_topology_tag_round_trips() {
    let points: Vec<Point3> = (0..16)
        .map(|k| Point3::new((k % 4) as f64, (k / 4) as f64, 0.0))
        .collect();
    let surface = BSplineSurface::from_grid(Topology::Open, 4, 4, points).unwrap();

    let mut buf = Vec::new();
    write_grid(&surface, &mut buf).unwrap();
    let loaded = read_grid(&mut buf.as_slice()).unwrap();
    assert_eq!(loaded.topology(), Topology::Open);
    assert_eq!(loaded, surface);
}

#[test]
fn off_round_trip_preserves_model_geometry() {
    // A sampled surface stands in for a model mesh.
    let mesh = ParametricSurface3::Sphere { radius: 1.0 }
        .sample(8, 8)
        .unwrap();

    let mut buf = Vec::new();
    write_off(&mesh, &mut buf).unwrap();
    let reloaded = read_off(&mut buf.as_slice()).unwrap();

    assert_eq!(reloaded.vertices.len(), mesh.vertices.len());
    assert_eq!(reloaded.indices, mesh.indices);
    assert_eq!(reloaded.triangle_count(), mesh.triangle_count());
    // Positions survive bitwise; normals are recomputed from faces.
    assert_eq!(reloaded.vertices, mesh.vertices);
}
