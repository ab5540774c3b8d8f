//! Triangulated fonts
//!
//! A gufont file stores, for every glyph of a TrueType font, a triangle
//! mesh that a GPU can render at any size without flattening curves (see
//! [`gufont_mesh`](mesh) for how the meshes are built).
//!
//! # Container layout
//!
//! All values are little-endian.
//!
//! | field            | type                                              |
//! |------------------|---------------------------------------------------|
//! | magic            | 6 bytes, `gufont`                                 |
//! | name             | `i32` length, UTF-8 bytes                         |
//! | style            | `i32`, the `macStyle` bits                        |
//! | units per em, ascender, descender, line gap | `i32` each             |
//! | glyph map        | `i32` count, then `(u16 code unit, i32 glyph)`    |
//! | glyphs           | `i32` count, then one record per glyph            |
//!
//! A glyph record is the advance width and left side bearing (`i32`), an
//! `i32` index count followed by `i32` indices, and an `i32` vertex count
//! followed by the vertices: `f32` x and y, a flag byte (0 interior,
//! 1 outside curve, 2 inside curve) and, for curve vertices only, `f32` u
//! and v.
//!
//! # Example
//!
//! ```no_run
//! use gufont::{convert, ConvertOptions, read::TrueTypeFont};
//! # fn main() -> Result<(), gufont::Error> {
//! let ttf = std::fs::read("MyFont.ttf")?;
//! let font = convert(&TrueTypeFont::read(&ttf)?, &ConvertOptions::default());
//! font.save("MyFont.guf")?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod convert;
mod error;
mod font;
mod load;
mod write;

pub use convert::{convert, ConvertOptions};
pub use error::Error;
pub use font::{Font, FontSummary};
pub use load::load;
pub use write::{dump, ContainerWrite, ContainerWriter};

/// Public re-export of the gufont-mesh crate.
pub extern crate gufont_mesh as mesh;

pub use mesh::{read, types};

/// The first bytes of every gufont file.
pub const MAGIC: [u8; 6] = *b"gufont";
