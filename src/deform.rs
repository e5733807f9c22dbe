//! Deformation operators.
//!
//! Each operator consumes a vertex selection and mutates positions in
//! place; normals are read-only and only refreshed afterwards by the
//! mesh's `update_region`. The per-vertex weight is always the
//! [falloff](crate::falloff::falloff) of the distance to the brush
//! center divided by the brush radius.
//!
//! - [`brush`]: push along the selection's average normal
//! - [`inflate`]: push along each vertex's own normal
//! - [`rotate`]: spin about the axis captured at gesture start
//! - [`smooth`]: move toward the Laplacian average
//! - [`flatten`]: project toward the selection's average plane
//! - [`smooth_tangential`]: Laplacian smoothing restricted to the
//!   tangent plane, preserving surface detail
//!
//! Degenerate input — an empty selection, a vanishing average normal, a
//! rotation inside the pivot dead zone — is a silent no-op.
//!
//! # Example
//!
//! ```
//! use chisel::deform::{self, BrushContext};
//! use chisel::mesh::{MeshBuffers, VertexId};
//! use nalgebra::Point3;
//!
//! let positions = vec![
//!     0.0, 0.0, 0.0,
//!     1.0, 0.0, 0.0,
//!     0.5, 1.0, 0.0,
//! ];
//! let mut mesh = MeshBuffers::from_triangles(positions, vec![[0, 1, 2]]).unwrap();
//! let selection = vec![VertexId::new(0), VertexId::new(1), VertexId::new(2)];
//!
//! let brush = BrushContext::new(Point3::new(0.5, 0.3, 0.0), 4.0, 0.75);
//! deform::inflate(&mut mesh, &selection, &brush);
//! ```

use nalgebra::{Point2, Point3, Unit, Vector3};

use crate::falloff::{falloff, radius_scaled_magnitude, FLATTEN_RATE};
use crate::geom::{rotate_about, signed_angle_2d};
use crate::mesh::{SculptMesh, VertexId};
use crate::region::{area_center, area_normal};
use crate::smooth::laplacian_targets;

/// Screen-space distance to the rotation pivot under which a rotate step
/// is inert; angles computed closer to the pivot are unstable.
pub const MIN_PIVOT_DISTANCE: f32 = 30.0;

/// Shared per-step brush parameters consumed by the operators.
#[derive(Debug, Clone, Copy)]
pub struct BrushContext {
    /// World-space brush center (pick intersection point).
    pub center: Point3<f32>,

    /// Squared world-space brush radius.
    pub radius_squared: f32,

    /// Deformation intensity in `[0, 1]`.
    pub intensity: f32,

    /// Subtractive stroke: flips brush/inflate displacement. Ignored by
    /// flatten.
    pub negative: bool,

    /// Upper bound on per-vertex displacement, present iff the topology
    /// mode is adaptive.
    pub step_limit: Option<f32>,
}

impl BrushContext {
    /// Create a context with no step limit and additive direction.
    pub fn new(center: Point3<f32>, radius_squared: f32, intensity: f32) -> Self {
        Self {
            center,
            radius_squared,
            intensity,
            negative: false,
            step_limit: None,
        }
    }

    /// Set subtractive mode.
    pub fn negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    /// Bound per-vertex displacement for adaptive topology mode.
    pub fn with_step_limit(mut self, limit: f32) -> Self {
        self.step_limit = Some(limit);
        self
    }
}

/// State captured when a rotate gesture starts and reused for every step
/// until the gesture ends.
#[derive(Debug, Clone, Copy)]
pub struct RotateGesture {
    /// Rotation axis in object space (the view ray at gesture start).
    pub axis: Unit<Vector3<f32>>,

    /// Screen-space pivot the mouse direction is measured from.
    pub pivot: Point2<f32>,
}

impl RotateGesture {
    /// Capture a gesture from its rotation axis and screen pivot.
    pub fn new(axis: Unit<Vector3<f32>>, pivot: Point2<f32>) -> Self {
        Self { axis, pivot }
    }
}

/// Push the selection along its average normal, weighted by falloff.
///
/// No-op when the average normal is degenerate.
pub fn brush<M: SculptMesh>(mesh: &mut M, selection: &[VertexId], brush: &BrushContext) {
    let Some(direction) = area_normal(mesh, selection) else {
        return;
    };
    let direction = direction.into_inner();
    let radius = brush.radius_squared.sqrt();
    let magnitude =
        radius_scaled_magnitude(brush.intensity, radius, brush.step_limit, brush.negative);
    for &v in selection {
        let position = mesh.position(v);
        let t = (position - brush.center).norm() / radius;
        mesh.set_position(v, position + direction * (magnitude * falloff(t)));
    }
}

/// Push each selected vertex along its own normal, weighted by falloff.
pub fn inflate<M: SculptMesh>(mesh: &mut M, selection: &[VertexId], brush: &BrushContext) {
    let radius = brush.radius_squared.sqrt();
    let magnitude =
        radius_scaled_magnitude(brush.intensity, radius, brush.step_limit, brush.negative);
    for &v in selection {
        let position = mesh.position(v);
        let t = (position - brush.center).norm() / radius;
        mesh.set_position(v, position + mesh.normal(v) * (magnitude * falloff(t)));
    }
}

/// Rotate the selection about the gesture axis through the brush center.
///
/// The angle is the signed screen-space angle between the current and
/// previous mouse directions measured from the gesture pivot, scaled per
/// vertex by falloff. Inert while the mouse is within
/// [`MIN_PIVOT_DISTANCE`] of the pivot, or when the previous direction
/// is degenerate.
pub fn rotate<M: SculptMesh>(
    mesh: &mut M,
    selection: &[VertexId],
    gesture: &RotateGesture,
    brush: &BrushContext,
    mouse: Point2<f32>,
    last_mouse: Point2<f32>,
) {
    let current = mouse - gesture.pivot;
    if current.norm() < MIN_PIVOT_DISTANCE {
        return;
    }
    let current = current.normalize();
    let Some(previous) = (last_mouse - gesture.pivot).try_normalize(1.0e-8) else {
        return;
    };
    let angle = signed_angle_2d(&current, &previous);
    let radius = brush.radius_squared.sqrt();
    for &v in selection {
        let position = mesh.position(v);
        let t = (position - brush.center).norm() / radius;
        mesh.set_position(
            v,
            rotate_about(position, brush.center, &gesture.axis, angle * falloff(t)),
        );
    }
}

/// Move each selected vertex toward its Laplacian target by `intensity`.
///
/// When `step_limit` is present the per-vertex step vector is clamped to
/// that length.
pub fn smooth<M: SculptMesh>(
    mesh: &mut M,
    selection: &[VertexId],
    intensity: f32,
    step_limit: Option<f32>,
) {
    let targets = laplacian_targets(mesh, selection);
    for (&v, target) in selection.iter().zip(&targets) {
        let position = mesh.position(v);
        let mut step = (target - position) * intensity;
        if let Some(limit) = step_limit {
            let length_squared = step.norm_squared();
            if length_squared > limit * limit {
                step *= limit / length_squared.sqrt();
            }
        }
        mesh.set_position(v, position + step);
    }
}

/// Project the selection toward the plane through its centroid with its
/// average normal.
///
/// Each vertex moves by `signed distance × intensity × 0.3 × falloff`.
/// When a step limit is present the signed offset is clamped above by
/// it; the lower side is left open, matching the tuned sculpting
/// behavior. The subtractive flag does not apply to flatten.
pub fn flatten<M: SculptMesh>(mesh: &mut M, selection: &[VertexId], brush: &BrushContext) {
    let Some(plane_normal) = area_normal(mesh, selection) else {
        return;
    };
    let Some(plane_center) = area_center(mesh, selection) else {
        return;
    };
    let plane_normal = plane_normal.into_inner();
    let radius = brush.radius_squared.sqrt();
    let rate = brush.intensity * FLATTEN_RATE;
    for &v in selection {
        let position = mesh.position(v);
        let distance = (position - plane_center).dot(&plane_normal);
        let t = (position - brush.center).norm() / radius;
        let mut offset = distance * rate * falloff(t);
        if let Some(limit) = brush.step_limit {
            offset = offset.min(limit);
        }
        mesh.set_position(v, position - plane_normal * offset);
    }
}

/// Laplacian smoothing restricted to each vertex's tangent plane.
///
/// The displacement toward the Laplacian target is stripped of its
/// component along the vertex normal before blending by `intensity`, so
/// the surface relaxes without losing detail along the normal direction.
pub fn smooth_tangential<M: SculptMesh>(mesh: &mut M, selection: &[VertexId], intensity: f32) {
    let targets = laplacian_targets(mesh, selection);
    for (&v, target) in selection.iter().zip(&targets) {
        let position = mesh.position(v);
        let normal = mesh.normal(v);
        let displacement = target - position;
        let tangential = displacement - normal * displacement.dot(&normal);
        mesh.set_position(v, position + tangential * intensity);
    }
}
