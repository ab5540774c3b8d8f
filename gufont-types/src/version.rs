/// A version made of two 16-bit parts, such as `head.majorVersion` and
/// `head.minorVersion`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MajorMinor {
    pub major: u16,
    pub minor: u16,
}

impl MajorMinor {
    pub const fn new(major: u16, minor: u16) -> Self {
        MajorMinor { major, minor }
    }
}

impl std::fmt::Display for MajorMinor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl crate::Scalar for MajorMinor {
    type Raw = [u8; 4];

    fn from_raw(raw: Self::Raw) -> Self {
        let [a, b, c, d] = raw;
        MajorMinor::new(u16::from_be_bytes([a, b]), u16::from_be_bytes([c, d]))
    }

    fn to_raw(self) -> Self::Raw {
        let [a, b] = self.major.to_be_bytes();
        let [c, d] = self.minor.to_be_bytes();
        [a, b, c, d]
    }
}
