//! Error types for chisel.

use thiserror::Error;

/// Result type alias using [`SculptError`].
pub type Result<T> = std::result::Result<T, SculptError>;

/// Errors that can occur while constructing sculptable mesh data.
///
/// Deformation itself never fails: degenerate inputs (empty selections,
/// vanishing aggregate normals, rotations inside the pivot dead zone)
/// resolve as silent no-ops instead of errors.
#[derive(Error, Debug)]
pub enum SculptError {
    /// The mesh has no triangles.
    #[error("mesh has no triangles")]
    EmptyMesh,

    /// The flat position buffer is not a whole number of 3-component tuples.
    #[error("position buffer length {len} is not a multiple of 3")]
    RaggedPositions {
        /// Length of the offending buffer.
        len: usize,
    },

    /// A triangle references a vertex index outside the position buffer.
    #[error("triangle {triangle} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The triangle index.
        triangle: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A triangle lists the same vertex twice.
    #[error("triangle {triangle} is degenerate (has duplicate vertices)")]
    DegenerateTriangle {
        /// The triangle index.
        triangle: usize,
    },
}
