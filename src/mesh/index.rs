//! Typed ids for mesh elements.
//!
//! Vertex and triangle ids are `u32` newtypes so a triangle id can never
//! be used to index the position buffer and vice versa. Topology
//! refinement invalidates ids wholesale; the stroke orchestrator always
//! recomputes its selection after a refinement pass instead of holding on
//! to stale ids.

use std::fmt;

/// Identifies a vertex; indexes the flat position and normal buffers at
/// `index() * 3`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId(u32);

/// Identifies a triangle.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct TriangleId(u32);

macro_rules! impl_id_type {
    ($name:ident, $prefix:literal) => {
        impl $name {
            /// Create an id from a raw index.
            #[inline]
            pub fn new(index: usize) -> Self {
                debug_assert!(index <= u32::MAX as usize, "index {} overflows u32", index);
                Self(index as u32)
            }

            /// The raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            #[inline]
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }
    };
}

impl_id_type!(VertexId, "V");
impl_id_type!(TriangleId, "T");
