//! Style and header flags

bitflags::bitflags! {
    /// Style bits from the `head` table's `macStyle` field.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct FontStyle: u16 {
        const BOLD = 0x0001;
        const ITALIC = 0x0002;
        const UNDERLINE = 0x0004;
        const OUTLINE = 0x0008;
        const SHADOW = 0x0010;
        const CONDENSED = 0x0020;
        const EXTENDED = 0x0040;
    }
}

bitflags::bitflags! {
    /// The subset of `head` table flags we keep.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct HeadFlags: u16 {
        /// Baseline for font at y=0.
        const BASELINE_AT_ZERO = 0x0001;
        /// Left sidebearing point at x=0.
        const LSB_AT_ZERO = 0x0002;
        /// Instructions may depend on point size.
        const INSTRUCTIONS_DEPEND_ON_SIZE = 0x0004;
        /// Force ppem to integer values.
        const FORCE_INTEGER_PPEM = 0x0008;
    }
}

impl FontStyle {
    /// Style flags from a raw `macStyle` value; unknown bits are dropped.
    pub fn from_mac_style(raw: u16) -> Self {
        Self::from_bits_truncate(raw)
    }
}

impl HeadFlags {
    /// Flags from a raw `head.flags` value; bits above 3 are dropped.
    pub fn from_head_flags(raw: u16) -> Self {
        Self::from_bits_truncate(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_bits_are_dropped() {
        let style = FontStyle::from_mac_style(0x8003);
        assert_eq!(style, FontStyle::BOLD | FontStyle::ITALIC);
        assert_eq!(style.bits(), 3);
        assert_eq!(HeadFlags::from_head_flags(0x001B).bits(), 0x0B);
    }
}
