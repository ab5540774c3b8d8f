//! a trait for things that can serve font tables

use types::Tag;

use crate::{tables, FontData, FontRead, FontReadWithArgs, ReadError};

/// A table that has an associated tag.
///
/// This is true of top-level tables, but not their various subtables.
pub trait TopLevelTable {
    /// The table's tag.
    const TAG: Tag;
}

/// An interface for accessing tables from a font (or font-like object)
pub trait TableProvider<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>>;

    fn expect_data_for_tag(&self, tag: Tag) -> Result<FontData<'a>, ReadError> {
        self.data_for_tag(tag).ok_or(ReadError::TableIsMissing(tag))
    }

    fn expect_table<T: TopLevelTable + FontRead<'a>>(&self) -> Result<T, ReadError> {
        self.expect_data_for_tag(T::TAG).and_then(FontRead::read)
    }

    fn head(&self) -> Result<tables::head::Head<'a>, ReadError> {
        self.expect_table()
    }

    fn name(&self) -> Result<tables::name::Name<'a>, ReadError> {
        self.expect_table()
    }

    fn hhea(&self) -> Result<tables::hhea::Hhea<'a>, ReadError> {
        self.expect_table()
    }

    fn hmtx(&self) -> Result<tables::hmtx::Hmtx<'a>, ReadError> {
        let num_glyphs = self.maxp().map(|maxp| maxp.num_glyphs())?;
        let number_of_h_metrics = self.hhea().map(|hhea| hhea.number_of_h_metrics())?;
        self.expect_data_for_tag(tables::hmtx::Hmtx::TAG)
            .and_then(|data| {
                FontReadWithArgs::read_with_args(data, &(number_of_h_metrics, num_glyphs))
            })
    }

    fn maxp(&self) -> Result<tables::maxp::Maxp<'a>, ReadError> {
        self.expect_table()
    }

    fn cmap(&self) -> Result<tables::cmap::Cmap<'a>, ReadError> {
        self.expect_table()
    }

    /// is_long can be optionally provided, if known, otherwise we look it up in head.
    fn loca(&self, is_long: impl Into<Option<bool>>) -> Result<tables::loca::Loca<'a>, ReadError> {
        let is_long = match is_long.into() {
            Some(val) => val,
            None => self.head()?.index_to_loc_format() != 0,
        };
        self.expect_data_for_tag(tables::loca::Loca::TAG)
            .and_then(|data| FontReadWithArgs::read_with_args(data, &is_long))
    }

    fn glyf(&self) -> Result<tables::glyf::Glyf<'a>, ReadError> {
        self.expect_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gufont_test_data::TestFont;

    /// A provider over a fixed set of (tag, bytes) pairs.
    struct DummyProvider<'a>(Vec<(Tag, &'a [u8])>);

    impl<'a> TableProvider<'a> for DummyProvider<'a> {
        fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>> {
            self.0
                .iter()
                .find(|(t, _)| *t == tag)
                .map(|(_, data)| FontData::new(data))
        }
    }

    #[test]
    fn missing_table_is_reported_by_tag() {
        let provider = DummyProvider(Vec::new());
        assert_eq!(
            provider.head().err(),
            Some(ReadError::TableIsMissing(Tag::new(b"head")))
        );
    }

    #[test]
    fn hmtx_needs_hhea_and_maxp() {
        let font = TestFont::default().build();
        let font = crate::FontRef::new(&font).unwrap();
        let hmtx_only = DummyProvider(vec![(
            Tag::new(b"hmtx"),
            font.data_for_tag(Tag::new(b"hmtx")).unwrap().as_bytes(),
        )]);
        assert_eq!(
            hmtx_only.hmtx().err(),
            Some(ReadError::TableIsMissing(Tag::new(b"maxp")))
        );
        assert!(font.hmtx().is_ok());
    }
}
