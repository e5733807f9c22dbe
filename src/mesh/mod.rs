//! Mesh access for sculpting.
//!
//! The deformation core does not own the mesh: positions, normals, and
//! adjacency are borrowed from the surrounding application through the
//! [`SculptMesh`] trait for the duration of a stroke step. The canonical
//! storage layout is a pair of flat `f32` buffers, three components per
//! vertex, indexed at `id * 3`.
//!
//! [`MeshBuffers`] is a compact reference implementation of the trait. It
//! builds adjacency rings from a triangle list and recomputes normals on
//! [`SculptMesh::update_region`], but performs no topology mutation; real
//! applications with subdivision or decimation supply their own mesh and
//! topology engine.
//!
//! # Boundary classification
//!
//! A vertex is a boundary vertex when its ring size differs from its
//! incident-triangle count. Interior vertices of a manifold mesh have one
//! incident triangle per ring neighbor; on an open edge the ring has one
//! extra vertex.

mod buffers;
mod index;

pub use buffers::MeshBuffers;
pub use index::{TriangleId, VertexId};

use nalgebra::{Point3, Vector3};

/// Mutable mesh access required by the deformation operators and the
/// stroke orchestrator.
///
/// Positions are exchanged by value so that implementations are free to
/// store flat buffers, structs of arrays, or anything else; the operators
/// never hold references into the mesh across a write.
pub trait SculptMesh {
    /// Number of vertices currently in the mesh.
    fn num_vertices(&self) -> usize;

    /// Position of a vertex.
    fn position(&self, v: VertexId) -> Point3<f32>;

    /// Overwrite the position of a vertex.
    fn set_position(&mut self, v: VertexId, position: Point3<f32>);

    /// Unit normal of a vertex, valid for the current topology.
    fn normal(&self, v: VertexId) -> Vector3<f32>;

    /// Ring neighbors of a vertex, in no particular order.
    fn ring(&self, v: VertexId) -> &[VertexId];

    /// Number of triangles incident to a vertex.
    fn incident_triangle_count(&self, v: VertexId) -> usize;

    /// Whether a vertex lies on a mesh edge or hole boundary.
    #[inline]
    fn is_boundary(&self, v: VertexId) -> bool {
        self.ring(v).len() != self.incident_triangle_count(v)
    }

    /// Stroke generation that last sculpted this vertex.
    fn sculpt_generation(&self, v: VertexId) -> u64;

    /// Record that a vertex was sculpted during `generation`.
    fn mark_sculpted(&mut self, v: VertexId, generation: u64);

    /// All triangles touching any of the given vertices, deduplicated.
    fn triangles_from_vertices(&self, vertices: &[VertexId]) -> Vec<TriangleId>;

    /// All vertices of the given triangles, deduplicated.
    fn vertices_from_triangles(&self, triangles: &[TriangleId]) -> Vec<VertexId>;

    /// Recompute derived geometry (normals, adjacency) for a region after
    /// deformation and topology refinement.
    fn update_region(&mut self, triangles: &[TriangleId], vertices: &[VertexId]);
}
