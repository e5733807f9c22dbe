//! Region aggregates over a vertex selection.
//!
//! The brush and flatten operators deform every selected vertex relative
//! to one shared frame: the selection's average normal and centroid.
//! Both aggregates return `None` for degenerate input instead of a NaN
//! direction, and callers treat `None` as a silent no-op.

use nalgebra::{Point3, Unit, Vector3};

use crate::mesh::{SculptMesh, VertexId};

/// Average normal of a selection, normalized to unit length.
///
/// Returns `None` when the selection is empty or the summed normals
/// cancel out to a vanishing direction.
pub fn area_normal<M: SculptMesh>(mesh: &M, selection: &[VertexId]) -> Option<Unit<Vector3<f32>>> {
    if selection.is_empty() {
        return None;
    }
    let mut sum = Vector3::zeros();
    for &v in selection {
        sum += mesh.normal(v);
    }
    Unit::try_new(sum, 1.0e-8)
}

/// Arithmetic mean of the selection's positions.
///
/// Returns `None` when the selection is empty.
pub fn area_center<M: SculptMesh>(mesh: &M, selection: &[VertexId]) -> Option<Point3<f32>> {
    if selection.is_empty() {
        return None;
    }
    let mut sum = Vector3::zeros();
    for &v in selection {
        sum += mesh.position(v).coords;
    }
    Some(Point3::from(sum / selection.len() as f32))
}
