use std::fmt::{Debug, Display, Formatter};

/// An OpenType tag.
///
/// [In OpenType][otff], a tag is a 4-byte array where each byte is in the
/// printable ASCII range `(0x20..=0x7E)`.
///
/// Tags read from a font are not validated, since invalid tags exist in the
/// wild and still need to be representable.
///
/// [otff]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#data-types
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tag([u8; 4]);

impl Tag {
    /// Construct a `Tag` from raw bytes.
    pub const fn new(src: &[u8; 4]) -> Tag {
        Tag(*src)
    }

    /// Create a tag from raw big-endian bytes.
    pub const fn from_be_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Return the memory representation of this tag.
    pub const fn to_be_bytes(self) -> [u8; 4] {
        self.0
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            if (0x20..=0x7E).contains(&byte) {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "{{0x{byte:02X}}}")?;
            }
        }
        Ok(())
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({self})")
    }
}

impl PartialEq<&[u8; 4]> for Tag {
    fn eq(&self, other: &&[u8; 4]) -> bool {
        &self.0 == *other
    }
}

crate::newtype_scalar!(Tag, [u8; 4]);

// [u8; 4] is its own raw form
impl crate::Scalar for [u8; 4] {
    type Raw = [u8; 4];
    fn to_raw(self) -> [u8; 4] {
        self
    }
    fn from_raw(raw: [u8; 4]) -> Self {
        raw
    }
}
