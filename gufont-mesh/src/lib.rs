//! Turning glyph outlines into triangle meshes
//!
//! A glyph is filled by an interior triangulation of its straight-line
//! polygon plus one "curve triangle" per quadratic segment. Curve triangles
//! carry texture coordinates such that the implicit test `u² - v` evaluated
//! by a shader reproduces the curve exactly, so no curve is ever flattened.
//!
//! The pipeline, per glyph:
//!
//! 1. [`outline`] splits each contour into an inner polygon and curve
//!    triangles.
//! 2. [`resolve`] subdivides curve triangles that overlap each other.
//! 3. [`winding`] decides whether each curve triangle adds to or carves out
//!    of the polygon.
//! 4. [`union`] merges the polygons into a nested forest and finds a seed
//!    point inside every hole.
//! 5. [`triangulate`] fills the forest with a constrained Delaunay
//!    triangulation.
//! 6. [`GlyphMesher`] assembles the interior and curve triangles into a
//!    [`Mesh`].
//!
//! Polygon union and triangulation are delegated to external crates behind
//! the [`PolygonUnion`] and [`Triangulator`] traits.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod assemble;
pub mod curve;
mod mesh;
pub mod outline;
pub mod resolve;
#[cfg(test)]
mod testing;
pub mod triangulate;
pub mod union;
pub mod winding;

pub use assemble::{triangulate_glyph, GlyphMesher, MeshOptions};
pub use mesh::{Mesh, Vertex, VertexKind};
#[cfg(feature = "bytemuck")]
pub use mesh::GpuVertex;
pub use triangulate::{SpadeTriangulator, Triangulator};
pub use union::{IOverlayUnion, PolygonUnion};

/// Public re-export of the gufont-read crate.
pub extern crate gufont_read as read;

/// Public re-export of the gufont-types crate.
pub use read::types;
