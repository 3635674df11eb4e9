//! The scene registry: parallel collections of analytic objects, their
//! sampled images, and the selection/edit state the UI layer drives.
//!
//! Control flow is always the same: a UI event selects an index or
//! mutates a parameter, the registry updates the referenced analytic
//! object, the relevant evaluator recomputes the sampled geometry, and
//! the renderer consumes the new image. Every recompute builds the new
//! image first and swaps it in only on success, so the renderer never
//! sees partially written geometry.

use crate::bspline::arc::{ArcError, BSplineArc};
use crate::bspline::{self, BSplineSurface, IsoDirection, PatchError};
use crate::curve::ParametricCurve3;
use crate::cyclic::{CyclicCurve3, CyclicError};
use crate::io::grid::{self, GridIoError};
use crate::math::{Point3, Vector3};
use crate::surface::ParametricSurface3;
use crate::types::{GenericCurve3, SampleError, SampleSettings, TriangulatedMesh3};
use std::f64::consts::TAU;
use std::io::{BufRead, Write};

/// Number of shader programs the render layer provides.
pub const SHADER_COUNT: usize = 4;

/// Patch topology slot indices.
pub const SLOT_TOROID: usize = 0;
pub const SLOT_CYLINDRIC: usize = 1;
pub const SLOT_LOADED: usize = 2;
const SLOT_COUNT: usize = 3;

/// Errors surfaced to the UI layer.
#[derive(Debug)]
pub enum SceneError {
    /// A selection index exceeds the active collection size. Rejected
    /// before any state mutation.
    IndexOutOfRange {
        category: &'static str,
        index: usize,
        len: usize,
    },
    /// The addressed patch topology slot holds no surface yet.
    EmptySlot { slot: usize },
    Sample(SampleError),
    Patch(PatchError),
    Cyclic(CyclicError),
    Arc(ArcError),
    Grid(GridIoError),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IndexOutOfRange {
                category,
                index,
                len,
            } => write!(f, "{category} index {index} out of range ({len} objects)"),
            SceneError::EmptySlot { slot } => {
                write!(f, "Patch topology slot {slot} holds no surface")
            }
            SceneError::Sample(e) => write!(f, "{e}"),
            SceneError::Patch(e) => write!(f, "{e}"),
            SceneError::Cyclic(e) => write!(f, "{e}"),
            SceneError::Arc(e) => write!(f, "{e}"),
            SceneError::Grid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SceneError {}

impl From<SampleError> for SceneError {
    fn from(e: SampleError) -> Self {
        SceneError::Sample(e)
    }
}

impl From<PatchError> for SceneError {
    fn from(e: PatchError) -> Self {
        SceneError::Patch(e)
    }
}

impl From<CyclicError> for SceneError {
    fn from(e: CyclicError) -> Self {
        SceneError::Cyclic(e)
    }
}

impl From<ArcError> for SceneError {
    fn from(e: ArcError) -> Self {
        SceneError::Arc(e)
    }
}

impl From<GridIoError> for SceneError {
    fn from(e: GridIoError) -> Self {
        SceneError::Grid(e)
    }
}

/// Opaque shader-parameter scalars forwarded to the render layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaderParams {
    pub scale_factor: f64,
    pub smoothing: f64,
    pub shading: f64,
}

impl Default for ShaderParams {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            smoothing: 1.0,
            shading: 1.0,
        }
    }
}

/// Iso-parametric line counts per patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IsoSettings {
    pub u_line_count: usize,
    pub v_line_count: usize,
}

impl Default for IsoSettings {
    fn default() -> Self {
        Self {
            u_line_count: 4,
            v_line_count: 4,
        }
    }
}

/// The local-edit target: one control point addressed patch-relatively,
/// plus the displacement applied by [`Scene::modify`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PatchEdit {
    pub patch_i: usize,
    pub patch_j: usize,
    pub coord_i: usize,
    pub coord_j: usize,
    pub displacement: Vector3,
}

impl Default for PatchEdit {
    fn default() -> Self {
        Self {
            patch_i: 0,
            patch_j: 0,
            coord_i: 0,
            coord_j: 0,
            displacement: Vector3::zeros(),
        }
    }
}

/// One patch topology slot: the control surface and all geometry derived
/// from it. The derived vectors are row-major per patch and rebuilt
/// whenever control points change.
#[derive(Clone, Debug)]
pub struct PatchSlot {
    surface: BSplineSurface,
    meshes: Vec<TriangulatedMesh3>,
    u_lines: Vec<Vec<GenericCurve3>>,
    v_lines: Vec<Vec<GenericCurve3>>,
}

impl PatchSlot {
    fn build(
        surface: BSplineSurface,
        iso: &IsoSettings,
        settings: &SampleSettings,
    ) -> Result<Self, SceneError> {
        let meshes = surface.tessellate_all(settings)?;
        let mut u_lines = Vec::with_capacity(meshes.len());
        let mut v_lines = Vec::with_capacity(meshes.len());
        for pi in 0..surface.patch_rows() {
            for pj in 0..surface.patch_cols() {
                u_lines.push(surface.iso_lines(pi, pj, IsoDirection::U, iso.u_line_count, settings)?);
                v_lines.push(surface.iso_lines(pi, pj, IsoDirection::V, iso.v_line_count, settings)?);
            }
        }
        Ok(Self {
            surface,
            meshes,
            u_lines,
            v_lines,
        })
    }

    fn refresh_patch(
        &mut self,
        pi: usize,
        pj: usize,
        iso: &IsoSettings,
        settings: &SampleSettings,
    ) -> Result<(), SceneError> {
        let idx = pi * self.surface.patch_cols() + pj;
        self.meshes[idx] = self.surface.tessellate(pi, pj, settings)?;
        self.u_lines[idx] =
            self.surface
                .iso_lines(pi, pj, IsoDirection::U, iso.u_line_count, settings)?;
        self.v_lines[idx] =
            self.surface
                .iso_lines(pi, pj, IsoDirection::V, iso.v_line_count, settings)?;
        Ok(())
    }

    pub fn surface(&self) -> &BSplineSurface {
        &self.surface
    }

    /// Per-patch tessellated meshes, row-major.
    pub fn meshes(&self) -> &[TriangulatedMesh3] {
        &self.meshes
    }

    /// Per-patch constant-`u` line sets, row-major.
    pub fn u_lines(&self) -> &[Vec<GenericCurve3>] {
        &self.u_lines
    }

    /// Per-patch constant-`v` line sets, row-major.
    pub fn v_lines(&self) -> &[Vec<GenericCurve3>] {
        &self.v_lines
    }
}

/// The engine-state struct: everything the original viewer kept as
/// widget member fields, decoupled from any UI framework.
#[derive(Debug)]
pub struct Scene {
    settings: SampleSettings,
    iso: IsoSettings,
    shader_index: usize,
    shader_params: ShaderParams,
    angle: f64,
    angle_step: f64,

    curves: Vec<ParametricCurve3>,
    curve_images: Vec<GenericCurve3>,
    curve_index: usize,

    cyclic_curves: Vec<CyclicCurve3>,
    cyclic_images: Vec<GenericCurve3>,
    cyclic_index: usize,

    arcs: Vec<BSplineArc>,
    arc_images: Vec<GenericCurve3>,
    arc_index: usize,

    surfaces: Vec<ParametricSurface3>,
    surface_images: Vec<TriangulatedMesh3>,
    surface_index: usize,

    models: Vec<TriangulatedMesh3>,
    model_index: usize,

    slots: [Option<PatchSlot>; SLOT_COUNT],
    patch_index: usize,

    edit: PatchEdit,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            settings: SampleSettings::default(),
            iso: IsoSettings::default(),
            shader_index: 0,
            shader_params: ShaderParams::default(),
            angle: 0.0,
            angle_step: TAU / 360.0,
            curves: Vec::new(),
            curve_images: Vec::new(),
            curve_index: 0,
            cyclic_curves: Vec::new(),
            cyclic_images: Vec::new(),
            cyclic_index: 0,
            arcs: Vec::new(),
            arc_images: Vec::new(),
            arc_index: 0,
            surfaces: Vec::new(),
            surface_images: Vec::new(),
            surface_index: 0,
            models: Vec::new(),
            model_index: 0,
            slots: [None, None, None],
            patch_index: SLOT_TOROID,
            edit: PatchEdit::default(),
        }
    }

    // ─── Category initialization ────────────────────────────────────────

    /// Install the predefined parametric curve families and sample them.
    pub fn init_parametric_curves(&mut self) -> Result<(), SceneError> {
        let curves = vec![
            ParametricCurve3::Ellipse { a: 2.0, b: 1.0 },
            ParametricCurve3::Helix {
                radius: 1.5,
                pitch: 0.2,
            },
            ParametricCurve3::TorusKnot {
                p: 2,
                q: 3,
                major_r: 1.5,
                minor_r: 0.5,
            },
            ParametricCurve3::Rose { k: 4 },
            ParametricCurve3::Lissajous { kx: 3, ky: 2 },
            ParametricCurve3::ConicalSpiral { a: 0.2, b: 0.15 },
        ];
        let images = curves
            .iter()
            .map(|c| c.sample(&self.settings))
            .collect::<Result<Vec<_>, _>>()?;
        self.curves = curves;
        self.curve_images = images;
        self.curve_index = 0;
        Ok(())
    }

    /// Install the predefined cyclic curves and sample them.
    ///
    /// Both examples interpolate nodes on a circle of known radius with
    /// matching tangents; the second adds a vertical wave.
    pub fn init_cyclic_curves(&mut self) -> Result<(), SceneError> {
        let flat = cyclic_demo(5, 2.0, 0.0);
        let wavy = cyclic_demo(7, 1.5, 0.4);
        let cyclic_curves = vec![
            CyclicCurve3::interpolate(flat.0, flat.1, flat.2)?,
            CyclicCurve3::interpolate(wavy.0, wavy.1, wavy.2)?,
        ];
        let images = cyclic_curves
            .iter()
            .map(|c| c.sample(&self.settings))
            .collect::<Result<Vec<_>, _>>()?;
        self.cyclic_curves = cyclic_curves;
        self.cyclic_images = images;
        self.cyclic_index = 0;
        Ok(())
    }

    /// Install the predefined closed B-spline arcs and sample them.
    pub fn init_bspline_arcs(&mut self) -> Result<(), SceneError> {
        let diamond: Vec<Point3> = (0..4)
            .map(|k| {
                let t = TAU * k as f64 / 4.0;
                Point3::new(1.5 * t.cos(), 1.5 * t.sin(), 0.0)
            })
            .collect();
        let star: Vec<Point3> = (0..8)
            .map(|k| {
                let t = TAU * k as f64 / 8.0;
                let r = if k % 2 == 0 { 2.0 } else { 1.0 };
                Point3::new(r * t.cos(), r * t.sin(), 0.0)
            })
            .collect();
        let arcs = vec![
            BSplineArc::interpolate(&diamond)?,
            BSplineArc::interpolate(&star)?,
        ];
        let images = arcs
            .iter()
            .map(|a| a.sample(&self.settings))
            .collect::<Result<Vec<_>, _>>()?;
        self.arcs = arcs;
        self.arc_images = images;
        self.arc_index = 0;
        Ok(())
    }

    /// Install the predefined parametric surface families and sample them.
    pub fn init_parametric_surfaces(&mut self) -> Result<(), SceneError> {
        let surfaces = vec![
            ParametricSurface3::Sphere { radius: 2.0 },
            ParametricSurface3::Cylinder {
                radius: 1.0,
                height: 3.0,
            },
            ParametricSurface3::Torus {
                major_r: 1.5,
                minor_r: 0.5,
            },
            ParametricSurface3::Helicoid {
                radius: 2.0,
                pitch: 0.25,
            },
            ParametricSurface3::Saddle { size: 1.5 },
            ParametricSurface3::Catenoid {
                waist: 1.0,
                height: 1.5,
            },
        ];
        let div = self.settings.div_point_count;
        let images = surfaces
            .iter()
            .map(|s| s.sample(div, div))
            .collect::<Result<Vec<_>, _>>()?;
        self.surfaces = surfaces;
        self.surface_images = images;
        self.surface_index = 0;
        Ok(())
    }

    /// Replace the model collection (meshes loaded by the host, e.g. via
    /// [`crate::io::off::read_off`]).
    pub fn init_models(&mut self, models: Vec<TriangulatedMesh3>) {
        self.models = models;
        self.model_index = 0;
    }

    /// Build the toroidal and cylindrical patch collections with `n × m`
    /// patches each, seeded on the canonical torus/cylinder, and derive
    /// their meshes and iso-lines. The loaded slot is left untouched.
    pub fn init_patches(&mut self, n: usize, m: usize) -> Result<(), SceneError> {
        let toroid = BSplineSurface::toroid(n, m, bspline::DEFAULT_MINOR_R, bspline::DEFAULT_MAJOR_R)?;
        let cylindric = BSplineSurface::cylindric(
            n,
            m,
            bspline::DEFAULT_CYLINDER_R,
            bspline::DEFAULT_AXIS_A,
            bspline::DEFAULT_AXIS_B,
        )?;
        let toroid_slot = PatchSlot::build(toroid, &self.iso, &self.settings)?;
        let cylindric_slot = PatchSlot::build(cylindric, &self.iso, &self.settings)?;
        self.slots[SLOT_TOROID] = Some(toroid_slot);
        self.slots[SLOT_CYLINDRIC] = Some(cylindric_slot);
        log::debug!("initialized patch collections ({n}x{m} patches)");
        Ok(())
    }

    // ─── Selection ──────────────────────────────────────────────────────

    pub fn set_parametric_curve_index(&mut self, index: usize) -> Result<(), SceneError> {
        Self::select("parametric curve", index, self.curves.len())?;
        self.curve_index = index;
        Ok(())
    }

    pub fn set_cyclic_curve_index(&mut self, index: usize) -> Result<(), SceneError> {
        Self::select("cyclic curve", index, self.cyclic_curves.len())?;
        self.cyclic_index = index;
        Ok(())
    }

    pub fn set_bspline_arc_index(&mut self, index: usize) -> Result<(), SceneError> {
        Self::select("B-spline arc", index, self.arcs.len())?;
        self.arc_index = index;
        Ok(())
    }

    pub fn set_parametric_surface_index(&mut self, index: usize) -> Result<(), SceneError> {
        Self::select("parametric surface", index, self.surfaces.len())?;
        self.surface_index = index;
        Ok(())
    }

    pub fn set_model_index(&mut self, index: usize) -> Result<(), SceneError> {
        Self::select("model", index, self.models.len())?;
        self.model_index = index;
        Ok(())
    }

    /// Select the patch topology slot subsequent edit/render operations
    /// target (`SLOT_TOROID`, `SLOT_CYLINDRIC` or `SLOT_LOADED`).
    pub fn set_patch_index(&mut self, index: usize) -> Result<(), SceneError> {
        Self::select("patch topology", index, SLOT_COUNT)?;
        self.patch_index = index;
        Ok(())
    }

    pub fn set_shader_index(&mut self, index: usize) -> Result<(), SceneError> {
        Self::select("shader", index, SHADER_COUNT)?;
        self.shader_index = index;
        Ok(())
    }

    fn select(category: &'static str, index: usize, len: usize) -> Result<(), SceneError> {
        if index >= len {
            return Err(SceneError::IndexOutOfRange {
                category,
                index,
                len,
            });
        }
        Ok(())
    }

    // ─── Accessors ──────────────────────────────────────────────────────

    pub fn settings(&self) -> SampleSettings {
        self.settings
    }

    pub fn iso_settings(&self) -> IsoSettings {
        self.iso
    }

    pub fn shader_index(&self) -> usize {
        self.shader_index
    }

    pub fn shader_params(&self) -> ShaderParams {
        self.shader_params
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn current_curve(&self) -> Option<&ParametricCurve3> {
        self.curves.get(self.curve_index)
    }

    pub fn current_curve_image(&self) -> Option<&GenericCurve3> {
        self.curve_images.get(self.curve_index)
    }

    pub fn current_cyclic_curve(&self) -> Option<&CyclicCurve3> {
        self.cyclic_curves.get(self.cyclic_index)
    }

    pub fn current_cyclic_image(&self) -> Option<&GenericCurve3> {
        self.cyclic_images.get(self.cyclic_index)
    }

    pub fn current_arc(&self) -> Option<&BSplineArc> {
        self.arcs.get(self.arc_index)
    }

    pub fn current_arc_image(&self) -> Option<&GenericCurve3> {
        self.arc_images.get(self.arc_index)
    }

    pub fn current_surface(&self) -> Option<&ParametricSurface3> {
        self.surfaces.get(self.surface_index)
    }

    pub fn current_surface_image(&self) -> Option<&TriangulatedMesh3> {
        self.surface_images.get(self.surface_index)
    }

    pub fn current_model(&self) -> Option<&TriangulatedMesh3> {
        self.models.get(self.model_index)
    }

    pub fn patch_slot(&self, slot: usize) -> Option<&PatchSlot> {
        self.slots.get(slot).and_then(|s| s.as_ref())
    }

    pub fn current_patch_slot(&self) -> Option<&PatchSlot> {
        self.patch_slot(self.patch_index)
    }

    /// The local-edit target for [`Scene::modify`].
    pub fn edit(&self) -> &PatchEdit {
        &self.edit
    }

    pub fn edit_mut(&mut self) -> &mut PatchEdit {
        &mut self.edit
    }

    // ─── Shared settings ────────────────────────────────────────────────

    /// Change the derivative order and re-image every curve category.
    /// Out-of-range values are clamped.
    pub fn set_derivative_order(&mut self, order: usize) -> Result<(), SceneError> {
        self.update_settings(SampleSettings {
            derivative_order: order,
            ..self.settings
        })
    }

    /// Change the division point count and re-image every category.
    /// Out-of-range values are clamped.
    pub fn set_div_point_count(&mut self, div: usize) -> Result<(), SceneError> {
        self.update_settings(SampleSettings {
            div_point_count: div,
            ..self.settings
        })
    }

    fn update_settings(&mut self, requested: SampleSettings) -> Result<(), SceneError> {
        let clamped = requested.clamped();
        if clamped == self.settings {
            return Ok(());
        }
        self.settings = clamped;
        self.rebuild_images()
    }

    /// Change the iso-line counts and re-derive the patch slots.
    pub fn set_iso_line_counts(&mut self, u: usize, v: usize) -> Result<(), SceneError> {
        self.iso = IsoSettings {
            u_line_count: u.max(1),
            v_line_count: v.max(1),
        };
        self.rebuild_patch_slots()
    }

    /// Recompute every sampled image from the current settings.
    fn rebuild_images(&mut self) -> Result<(), SceneError> {
        log::debug!(
            "re-imaging all categories (order {}, div {})",
            self.settings.derivative_order,
            self.settings.div_point_count
        );
        self.curve_images = self
            .curves
            .iter()
            .map(|c| c.sample(&self.settings))
            .collect::<Result<Vec<_>, _>>()?;
        self.cyclic_images = self
            .cyclic_curves
            .iter()
            .map(|c| c.sample(&self.settings))
            .collect::<Result<Vec<_>, _>>()?;
        self.arc_images = self
            .arcs
            .iter()
            .map(|a| a.sample(&self.settings))
            .collect::<Result<Vec<_>, _>>()?;
        let div = self.settings.div_point_count;
        self.surface_images = self
            .surfaces
            .iter()
            .map(|s| s.sample(div, div))
            .collect::<Result<Vec<_>, _>>()?;
        self.rebuild_patch_slots()
    }

    fn rebuild_patch_slots(&mut self) -> Result<(), SceneError> {
        for slot in &mut self.slots {
            if let Some(old) = slot.take() {
                *slot = Some(PatchSlot::build(old.surface, &self.iso, &self.settings)?);
            }
        }
        Ok(())
    }

    // ─── Local patch editing ────────────────────────────────────────────

    /// Apply the stored displacement to the stored control-point target
    /// of the current topology slot, then recompute the meshes and
    /// iso-lines of exactly the patches whose windows reference the
    /// edited point. Geometry of every other patch is untouched.
    pub fn modify(&mut self) -> Result<(), SceneError> {
        let edit = self.edit;
        let iso = self.iso;
        let settings = self.settings;
        let index = self.patch_index;
        let slot = self.slots[index]
            .as_mut()
            .ok_or(SceneError::EmptySlot { slot: index })?;

        let (row, col) = slot.surface.modify(
            edit.patch_i,
            edit.patch_j,
            edit.coord_i,
            edit.coord_j,
            edit.displacement,
        )?;
        let affected = slot.surface.affected_patches(row, col);
        for &(pi, pj) in &affected {
            slot.refresh_patch(pi, pj, &iso, &settings)?;
        }
        log::debug!(
            "moved control point ({row}, {col}) of slot {index}; {} patches recomputed",
            affected.len()
        );
        Ok(())
    }

    // ─── Persistence ────────────────────────────────────────────────────

    /// Serialize the current topology slot's control grid.
    pub fn save_patches<W: Write>(&self, writer: &mut W) -> Result<(), SceneError> {
        let slot = self
            .current_patch_slot()
            .ok_or(SceneError::EmptySlot {
                slot: self.patch_index,
            })?;
        grid::write_grid(slot.surface(), writer).map_err(GridIoError::Io)?;
        Ok(())
    }

    /// Replace the loaded topology slot from persisted storage.
    ///
    /// The grid is read, validated and fully re-derived before the slot
    /// is swapped; on any failure the previous loaded surface (if any)
    /// stays intact.
    pub fn load_patches<R: BufRead>(&mut self, reader: &mut R) -> Result<(), SceneError> {
        let surface = grid::read_grid(reader)?;
        let slot = PatchSlot::build(surface, &self.iso, &self.settings)?;
        self.slots[SLOT_LOADED] = Some(slot);
        Ok(())
    }

    // ─── Animation and shader state ─────────────────────────────────────

    /// Advance the animation angle by `angle_step · elapsed`, wrapping at
    /// one full turn. Invoked by the host's render loop.
    pub fn tick(&mut self, elapsed: f64) {
        self.angle = (self.angle + self.angle_step * elapsed).rem_euclid(TAU);
    }

    /// Animation speed in radians per second of elapsed time.
    pub fn set_angle_step(&mut self, step: f64) {
        self.angle_step = step;
    }

    pub fn set_shader_scale_factor(&mut self, value: f64) {
        self.shader_params.scale_factor = value;
    }

    pub fn set_shader_smoothing(&mut self, value: f64) {
        self.shader_params.smoothing = value;
    }

    pub fn set_shader_shading(&mut self, value: f64) {
        self.shader_params.shading = value;
    }
}

/// Nodes on a circle of the given radius with exact tangents; `wave`
/// adds a vertical ripple.
fn cyclic_demo(n: usize, radius: f64, wave: f64) -> (Vec<f64>, Vec<Point3>, Vec<Vector3>) {
    let nodes: Vec<f64> = (0..n).map(|k| TAU * k as f64 / n as f64).collect();
    let points = nodes
        .iter()
        .map(|&t| {
            Point3::new(
                radius * t.cos(),
                radius * t.sin(),
                wave * (3.0 * t).sin(),
            )
        })
        .collect();
    let derivatives = nodes
        .iter()
        .map(|&t| {
            Vector3::new(
                -radius * t.sin(),
                radius * t.cos(),
                3.0 * wave * (3.0 * t).cos(),
            )
        })
        .collect();
    (nodes, points, derivatives)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scene_is_empty() {
        let scene = Scene::new();
        assert!(scene.current_curve_image().is_none());
        assert!(scene.current_patch_slot().is_none());
    }

    #[test]
    fn index_rejection_keeps_selection() {
        let mut scene = Scene::new();
        scene.init_parametric_curves().unwrap();
        scene.set_parametric_curve_index(2).unwrap();
        let err = scene.set_parametric_curve_index(99).unwrap_err();
        assert!(matches!(err, SceneError::IndexOutOfRange { .. }));
        assert!(matches!(
            scene.current_curve(),
            Some(ParametricCurve3::TorusKnot { .. })
        ));
    }

    #[test]
    fn tick_wraps_angle() {
        let mut scene = Scene::new();
        scene.set_angle_step(1.0);
        scene.tick(TAU + 0.5);
        assert!((scene.angle() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn settings_change_reimages_curves() {
        let mut scene = Scene::new();
        scene.init_parametric_curves().unwrap();
        scene.set_div_point_count(17).unwrap();
        assert_eq!(scene.current_curve_image().unwrap().len(), 17);
    }

    #[test]
    fn transient_div_is_clamped_not_rejected() {
        let mut scene = Scene::new();
        scene.init_parametric_curves().unwrap();
        scene.set_div_point_count(0).unwrap();
        assert_eq!(
            scene.settings().div_point_count,
            SampleSettings::MIN_DIV
        );
        assert_eq!(
            scene.current_curve_image().unwrap().len(),
            SampleSettings::MIN_DIV
        );
    }
}
