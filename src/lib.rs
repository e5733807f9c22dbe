//! # Chisel
//!
//! The deformation core of an interactive freeform mesh-sculpting tool.
//!
//! Given a user-picked region of a triangle mesh, chisel computes new
//! vertex positions according to the selected brush behavior while
//! cooperating with a topology-refinement stage, so mesh resolution
//! adapts to the area being sculpted. The mesh itself, the topology
//! engine, picking, and the undo store are collaborators supplied by the
//! surrounding application through traits.
//!
//! ## Features
//!
//! - **Five sculpting tools**: brush, inflate, rotate, smooth, flatten,
//!   plus a tangent-plane smoothing operator
//! - **Smooth quartic falloff** from the brush center to the brush radius
//! - **Boundary-aware Laplacian smoothing** that keeps hole rims in place
//! - **Adaptive refinement thresholds** derived from one detail setting
//! - **Per-step generation stamps** so no vertex is sculpted twice in a
//!   single stroke step, however the topology engine reshuffles the region
//!
//! ## Quick Start
//!
//! ```
//! use chisel::prelude::*;
//! use nalgebra::Point3;
//!
//! // A single triangle to sculpt on.
//! let positions = vec![
//!     0.0, 0.0, 0.0,
//!     1.0, 0.0, 0.0,
//!     0.5, 1.0, 0.0,
//! ];
//! let mut mesh = MeshBuffers::from_triangles(positions, vec![[0, 1, 2]]).unwrap();
//!
//! // Inflate the whole triangle around its first corner.
//! let selection = vec![VertexId::new(0), VertexId::new(1), VertexId::new(2)];
//! let brush = BrushContext::new(Point3::new(0.5, 0.3, 0.0), 4.0, 0.75);
//! chisel::deform::inflate(&mut mesh, &selection, &brush);
//! ```
//!
//! ## Driving a full stroke
//!
//! [`stroke::Sculptor`] runs the per-input-event pipeline: undo snapshot,
//! threshold derivation, topology refinement, generation-filtered
//! selection, tool dispatch, adaptive cleanup, and the final region
//! update. See the [`stroke`] module for a worked example.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adaptive;
pub mod deform;
pub mod error;
pub mod falloff;
pub mod geom;
pub mod mesh;
pub mod params;
pub mod region;
pub mod smooth;
pub mod stroke;

/// Prelude module for convenient imports.
///
/// ```
/// use chisel::prelude::*;
/// ```
pub mod prelude {
    pub use crate::adaptive::AdaptiveThresholds;
    pub use crate::deform::{BrushContext, RotateGesture};
    pub use crate::error::{Result, SculptError};
    pub use crate::mesh::{MeshBuffers, SculptMesh, TriangleId, VertexId};
    pub use crate::params::{SculptParams, Tool, TopologyMode};
    pub use crate::stroke::{PickInput, Sculptor, StaticTopology, TopologyEngine, UndoStore};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
