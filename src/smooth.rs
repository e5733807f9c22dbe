//! Boundary-aware Laplacian averaging.
//!
//! The smoothing operators move vertices toward a target computed from
//! their ring neighbors. Interior vertices average over the whole ring;
//! boundary vertices average only over neighbors that are themselves on
//! the boundary, so open edges and hole rims are not pulled inward by
//! interior geometry.

use nalgebra::{Point3, Vector3};

use crate::mesh::{SculptMesh, VertexId};

/// Laplacian target positions for a selection, one per selected vertex.
///
/// A boundary vertex with no boundary neighbors, or a vertex with an
/// empty ring, keeps its own position as the target.
pub fn laplacian_targets<M: SculptMesh>(mesh: &M, selection: &[VertexId]) -> Vec<Point3<f32>> {
    selection.iter().map(|&v| laplacian_target(mesh, v)).collect()
}

fn laplacian_target<M: SculptMesh>(mesh: &M, v: VertexId) -> Point3<f32> {
    let ring = mesh.ring(v);
    if ring.is_empty() {
        return mesh.position(v);
    }
    if mesh.is_boundary(v) {
        let mut sum = Vector3::zeros();
        let mut count = 0usize;
        for &neighbor in ring {
            if mesh.is_boundary(neighbor) {
                sum += mesh.position(neighbor).coords;
                count += 1;
            }
        }
        if count == 0 {
            return mesh.position(v);
        }
        Point3::from(sum / count as f32)
    } else {
        let mut sum = Vector3::zeros();
        for &neighbor in ring {
            sum += mesh.position(neighbor).coords;
        }
        Point3::from(sum / ring.len() as f32)
    }
}
