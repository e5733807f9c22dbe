//! Flat-buffer reference mesh.

use std::collections::HashSet;

use nalgebra::{Point3, Vector3};

use crate::error::{Result, SculptError};

use super::{SculptMesh, TriangleId, VertexId};

/// Owned flat-buffer triangle mesh implementing [`SculptMesh`].
///
/// Positions and normals are stored as flat `f32` buffers, three
/// components per vertex at `id * 3`. Adjacency rings and per-vertex
/// incident-triangle lists are built once at construction; connectivity
/// is never mutated afterwards, so this implementation pairs with
/// [`StaticTopology`](crate::stroke::StaticTopology) (or any topology
/// engine that leaves ids stable).
///
/// # Example
///
/// ```
/// use chisel::mesh::{MeshBuffers, SculptMesh, VertexId};
///
/// let positions = vec![
///     0.0, 0.0, 0.0,
///     1.0, 0.0, 0.0,
///     0.5, 1.0, 0.0,
/// ];
/// let mesh = MeshBuffers::from_triangles(positions, vec![[0, 1, 2]]).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert!(mesh.is_boundary(VertexId::new(0)));
/// ```
#[derive(Debug, Clone)]
pub struct MeshBuffers {
    positions: Vec<f32>,
    normals: Vec<f32>,
    triangles: Vec<[VertexId; 3]>,
    rings: Vec<Vec<VertexId>>,
    incident: Vec<Vec<TriangleId>>,
    generations: Vec<u64>,
}

impl MeshBuffers {
    /// Build a mesh from a flat position buffer and a triangle list.
    ///
    /// Validates the buffers, builds the adjacency rings, and computes
    /// area-weighted vertex normals.
    pub fn from_triangles(positions: Vec<f32>, triangles: Vec<[u32; 3]>) -> Result<Self> {
        if triangles.is_empty() {
            return Err(SculptError::EmptyMesh);
        }
        if positions.len() % 3 != 0 {
            return Err(SculptError::RaggedPositions {
                len: positions.len(),
            });
        }
        let num_vertices = positions.len() / 3;

        for (t, corners) in triangles.iter().enumerate() {
            for &c in corners {
                if c as usize >= num_vertices {
                    return Err(SculptError::InvalidVertexIndex {
                        triangle: t,
                        vertex: c as usize,
                    });
                }
            }
            if corners[0] == corners[1] || corners[1] == corners[2] || corners[0] == corners[2] {
                return Err(SculptError::DegenerateTriangle { triangle: t });
            }
        }

        let triangles: Vec<[VertexId; 3]> = triangles
            .iter()
            .map(|&[a, b, c]| [VertexId::from(a), VertexId::from(b), VertexId::from(c)])
            .collect();

        let mut rings: Vec<Vec<VertexId>> = vec![Vec::new(); num_vertices];
        let mut incident: Vec<Vec<TriangleId>> = vec![Vec::new(); num_vertices];
        for (t, corners) in triangles.iter().enumerate() {
            let tid = TriangleId::new(t);
            for (i, &v) in corners.iter().enumerate() {
                incident[v.index()].push(tid);
                for &neighbor in [corners[(i + 1) % 3], corners[(i + 2) % 3]].iter() {
                    let ring = &mut rings[v.index()];
                    if !ring.contains(&neighbor) {
                        ring.push(neighbor);
                    }
                }
            }
        }

        let mut mesh = Self {
            positions,
            normals: vec![0.0; num_vertices * 3],
            triangles,
            rings,
            incident,
            generations: vec![0; num_vertices],
        };
        for v in 0..num_vertices {
            mesh.recompute_normal(VertexId::new(v));
        }
        Ok(mesh)
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Corner vertices of a triangle.
    pub fn triangle(&self, t: TriangleId) -> [VertexId; 3] {
        self.triangles[t.index()]
    }

    /// The flat position buffer, `num_vertices * 3` components.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// The flat normal buffer, parallel to [`positions`](Self::positions).
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Area-weighted (unnormalized) normal of a triangle.
    fn triangle_normal(&self, t: TriangleId) -> Vector3<f32> {
        let [a, b, c] = self.triangles[t.index()];
        let pa = self.position(a);
        let e1 = self.position(b) - pa;
        let e2 = self.position(c) - pa;
        e1.cross(&e2)
    }

    fn recompute_normal(&mut self, v: VertexId) {
        let mut normal = Vector3::zeros();
        for &t in &self.incident[v.index()] {
            normal += self.triangle_normal(t);
        }
        let len = normal.norm();
        if len > 1.0e-10 {
            normal /= len;
        }
        let i = v.index() * 3;
        self.normals[i] = normal.x;
        self.normals[i + 1] = normal.y;
        self.normals[i + 2] = normal.z;
    }
}

impl SculptMesh for MeshBuffers {
    fn num_vertices(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    fn position(&self, v: VertexId) -> Point3<f32> {
        let i = v.index() * 3;
        Point3::new(self.positions[i], self.positions[i + 1], self.positions[i + 2])
    }

    #[inline]
    fn set_position(&mut self, v: VertexId, position: Point3<f32>) {
        let i = v.index() * 3;
        self.positions[i] = position.x;
        self.positions[i + 1] = position.y;
        self.positions[i + 2] = position.z;
    }

    #[inline]
    fn normal(&self, v: VertexId) -> Vector3<f32> {
        let i = v.index() * 3;
        Vector3::new(self.normals[i], self.normals[i + 1], self.normals[i + 2])
    }

    fn ring(&self, v: VertexId) -> &[VertexId] {
        &self.rings[v.index()]
    }

    fn incident_triangle_count(&self, v: VertexId) -> usize {
        self.incident[v.index()].len()
    }

    fn sculpt_generation(&self, v: VertexId) -> u64 {
        self.generations[v.index()]
    }

    fn mark_sculpted(&mut self, v: VertexId, generation: u64) {
        self.generations[v.index()] = generation;
    }

    fn triangles_from_vertices(&self, vertices: &[VertexId]) -> Vec<TriangleId> {
        let mut seen = HashSet::new();
        let mut triangles = Vec::new();
        for &v in vertices {
            for &t in &self.incident[v.index()] {
                if seen.insert(t) {
                    triangles.push(t);
                }
            }
        }
        triangles
    }

    fn vertices_from_triangles(&self, triangles: &[TriangleId]) -> Vec<VertexId> {
        let mut seen = HashSet::new();
        let mut vertices = Vec::new();
        for &t in triangles {
            for &v in &self.triangles[t.index()] {
                if seen.insert(v) {
                    vertices.push(v);
                }
            }
        }
        vertices
    }

    fn update_region(&mut self, _triangles: &[TriangleId], vertices: &[VertexId]) {
        for &v in vertices {
            self.recompute_normal(v);
        }
    }
}
