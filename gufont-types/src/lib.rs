//! Common scalar and geometric types used across the gufont crates
//!
//! The scalar types follow the [OpenType data types][data types]; the
//! geometric types describe TrueType outlines in font units.
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod bbox;
mod fixed;
mod glyph_id;
mod name_id;
mod pen;
mod point;
mod raw;
mod style;
mod tag;
mod version;


pub use bbox::BoundingBox;
pub use fixed::F2Dot14;
pub use glyph_id::GlyphId;
pub use name_id::NameId;
pub use pen::Pen;
pub use point::ControlPoint;
pub use raw::Scalar;
pub use style::{FontStyle, HeadFlags};
pub use tag::Tag;
pub use version::MajorMinor;

/// The sfnt version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
/// The sfnt version used by some legacy Apple TrueType fonts (`'true'`).
pub const TRUE_SFNT_VERSION: u32 = 0x74727565;
