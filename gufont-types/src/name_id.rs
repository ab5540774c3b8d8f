//! Name identifiers

/// Identifier for an informational string in the `name` table.
///
/// See <https://learn.microsoft.com/en-us/typography/opentype/spec/name#name-ids>
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NameId(u16);

impl NameId {
    /// Font family name.
    pub const FAMILY_NAME: Self = Self(1);

    /// Font subfamily name, e.g. "Regular" or "Bold Italic".
    pub const SUBFAMILY_NAME: Self = Self(2);

    /// Full font name; the family and subfamily combined.
    pub const FULL_NAME: Self = Self(4);

    /// Create a new identifier from a raw u16 value.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Return the identifier as a u16.
    pub const fn to_u16(self) -> u16 {
        self.0
    }
}

impl std::fmt::Debug for NameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::FAMILY_NAME => write!(f, "FAMILY_NAME"),
            Self::SUBFAMILY_NAME => write!(f, "SUBFAMILY_NAME"),
            Self::FULL_NAME => write!(f, "FULL_NAME"),
            _ => write!(f, "{}", self.0),
        }
    }
}

impl std::fmt::Display for NameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

crate::newtype_scalar!(NameId, [u8; 2]);
