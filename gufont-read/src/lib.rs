//! Reading TrueType tables
//!
//! This crate provides memory safe parsing of the subset of a TrueType font
//! that is needed to produce gufont meshes: the table directory and the
//! `head`, `name`, `cmap`, `hhea`, `hmtx`, `maxp`, `loca` and `glyf` tables.
//!
//! Tables are exposed as thin views over the font bytes (see [`FontRef`] and
//! [`TableProvider`]); [`TrueTypeFont`] decodes everything up front into owned
//! values for the conversion pipeline.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! use gufont_read::{FontRef, TableProvider};
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let font = FontRef::new(&font_bytes).expect("failed to read font data");
//! let head = font.head().expect("missing 'head' table");
//! let maxp = font.maxp().expect("missing 'maxp' table");
//!
//! println!("{} units per em, {} glyphs", head.units_per_em(), maxp.num_glyphs());
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod array;
mod font_data;
mod font_ref;
mod read;
mod table_provider;
pub mod tables;
mod truetype;

pub use array::BeArray;
pub use font_data::{Cursor, FontData};
pub use font_ref::{FontRef, TableDirectory, TableRecord};
pub use read::{FontRead, FontReadWithArgs, ReadArgs, ReadError};
pub use table_provider::{TableProvider, TopLevelTable};
pub use truetype::{TrueTypeFont, REQUIRED_TABLES};

/// Public re-export of the gufont-types crate.
pub extern crate gufont_types as types;
