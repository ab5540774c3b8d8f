//! test data shared between various gufont crates.
//!
//! Rather than checking in binary fixtures, tests describe the fonts they
//! need with [`TestFont`] and build the sfnt bytes on the fly.

pub mod bebuffer;
pub mod cmap;
mod font_builder;
pub mod glyphs;

pub use font_builder::{FontBuilder, TestFont, TestGlyph};
