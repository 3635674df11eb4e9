//! curvet — a geometric modeling and tessellation engine for an
//! interactive curve/surface viewer.
//!
//! The crate evaluates analytic parametric curves and surfaces, closed
//! interpolating (cyclic) curves, and bicubic B-spline patch collections
//! over toroidal and cylindrical topologies into discretized, renderable
//! geometry. The renderer consumes [`types::GenericCurve3`] (ordered
//! position + derivative samples) and [`types::TriangulatedMesh3`]
//! (vertex/normal grid with a triangle index list); the engine never
//! issues drawing calls itself.
//!
//! A [`scene::Scene`] ties everything together: it owns the collections
//! of analytic objects, their sampled images, and the selection/edit
//! state that a UI layer forwards into the engine.

pub mod bspline;
pub mod curve;
pub mod cyclic;
pub mod io;
pub mod math;
pub mod scene;
pub mod surface;
pub mod tessellate;
pub mod types;
