//! End to end: synthetic TrueType font in, gufont bytes out and back.

use gufont::{
    convert, dump, load,
    read::{ReadError, TrueTypeFont},
    types::{FontStyle, GlyphId, Tag},
    ConvertOptions, Error, Font,
};
use gufont_test_data::{cmap, glyphs, TestFont, TestGlyph};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_font() -> TestFont {
    let mut font = TestFont::new("Mesh Sans");
    font.mac_style = 0x0003;
    font.push_char(' ', TestGlyph::Empty);
    font.push_char('O', TestGlyph::Simple(glyphs::square_ring(600, 120)));
    font.push_char(
        'o',
        TestGlyph::Simple(vec![glyphs::four_point_circle(300, 300, 200)]),
    );
    font.push_char('v', TestGlyph::Simple(vec![glyphs::square_with_dent(500, 150)]));
    font.push_char('Ö', TestGlyph::Compound(vec![(2, 0, 0)]));
    font.push_char(
        'Δ',
        TestGlyph::Simple(glyphs::square_with_triangular_counter(1000, 200)),
    );
    font
}

fn convert_bytes(ttf: &[u8]) -> Result<Font, Error> {
    let font = TrueTypeFont::read(ttf)?;
    Ok(convert(&font, &ConvertOptions::default()))
}

#[test]
fn round_trip_is_byte_exact() {
    init_logging();
    let font = convert_bytes(&sample_font().build()).unwrap();
    assert_eq!(font.name, "Mesh Sans");
    assert_eq!(font.style, FontStyle::BOLD | FontStyle::ITALIC);
    assert_eq!(
        (font.units_per_em, font.ascender, font.descender, font.line_gap),
        (1000, 800, -200, 90)
    );

    let bytes = dump(&font).unwrap();
    let loaded = load(&bytes).unwrap();
    assert_eq!(loaded.name, font.name);
    assert_eq!(loaded.style, font.style);
    assert_eq!(loaded.glyph_map, font.glyph_map);
    for (a, b) in loaded.glyphs.iter().zip(&font.glyphs) {
        assert_eq!(a.indices, b.indices);
        assert_eq!(a.vertices, b.vertices);
    }
    assert_eq!(loaded, font);
    assert_eq!(dump(&loaded).unwrap(), bytes);
}

#[test]
fn glyphs_have_geometry() {
    let font = convert_bytes(&sample_font().build()).unwrap();
    let ring = font.mesh_for_char('O').unwrap();
    assert!((ring.covered_area() - (600.0 * 600.0 - 360.0 * 360.0)).abs() < 1e-2);
    let circle = font.mesh_for_char('o').unwrap();
    assert!((circle.covered_area() - 10.0 * 200.0 * 200.0 / 3.0).abs() < 1e-2);
    let dent = font.mesh_for_char('v').unwrap();
    assert!(dent.vertices.iter().any(|v| v.kind.flags() == 2));
    let counter = font.mesh_for_char('Δ').unwrap();
    assert!((counter.covered_area() - (1_000_000.0 - 180_000.0)).abs() < 1e-2);
    // compounds are not flattened
    assert!(font.mesh_for_char('Ö').unwrap().is_empty());
}

#[test]
fn empty_glyph_keeps_metrics() {
    let mut test_font = sample_font();
    test_font.metrics(1, 260, -3);
    let font = convert_bytes(&test_font.build()).unwrap();
    let space = font.mesh_for_char(' ').unwrap();
    assert!(space.vertices.is_empty());
    assert!(space.indices.is_empty());
    assert_eq!((space.advance_width, space.left_side_bearing), (260, -3));
}

#[test]
fn unmapped_chars_use_notdef() {
    let font = convert_bytes(&sample_font().build()).unwrap();
    assert_eq!(font.glyph_for_char('x'), GlyphId::NOTDEF);
    assert_eq!(
        font.mesh_for_char('x').map(|mesh| mesh.advance_width),
        Some(500)
    );
}

#[test]
fn uppercase_segment() {
    let mut test_font = TestFont::new("Caps");
    for _ in 0..26 {
        test_font.push_glyph(TestGlyph::Simple(vec![glyphs::square(0, 0, 100)]));
    }
    let mut builder = test_font.builder();
    builder.add_table(Tag::new(b"cmap"), cmap::uppercase_cmap4().into_vec());
    let font = convert_bytes(&builder.build()).unwrap();
    assert_eq!(font.glyph_map.len(), 26);
    assert_eq!(font.glyph_for_char('A'), GlyphId::new(1));
    assert_eq!(font.glyph_for_char('Z'), GlyphId::new(26));
    assert_eq!(font.mesh_for_char('Z').unwrap().advance_width, 760);
}

#[test]
fn loca_formats_convert_identically() {
    let short = sample_font();
    let mut long = sample_font();
    long.long_loca = true;
    assert_ne!(short.build(), long.build());
    assert_eq!(
        convert_bytes(&short.build()).unwrap(),
        convert_bytes(&long.build()).unwrap()
    );
}

#[test]
fn serial_and_parallel_agree() {
    let font = TrueTypeFont::read(&sample_font().build()).unwrap();
    let serial = ConvertOptions {
        parallel: false,
        ..Default::default()
    };
    assert_eq!(
        convert(&font, &serial),
        convert(&font, &ConvertOptions::default())
    );
}

#[rstest]
#[case(b"glyf")]
#[case(b"loca")]
#[case(b"name")]
#[case(b"cmap")]
fn missing_table_fails(#[case] tag: &[u8; 4]) {
    let mut builder = sample_font().builder();
    builder.remove_table(Tag::new(tag));
    let err = convert_bytes(&builder.build()).unwrap_err();
    assert!(
        matches!(err, Error::Read(ReadError::TableIsMissing(missing)) if missing == Tag::new(tag)),
        "{err}"
    );
}

#[test]
fn cmap_without_windows_unicode_fails() {
    let mut builder = sample_font().builder();
    builder.add_table(Tag::new(b"cmap"), cmap::mac_only_cmap().into_vec());
    assert!(matches!(
        convert_bytes(&builder.build()),
        Err(Error::Read(ReadError::MissingUnicodeCmap))
    ));
}

#[test]
fn save_and_open() {
    let font = convert_bytes(&sample_font().build()).unwrap();
    let path = std::env::temp_dir().join(format!("gufont-test-{}.guf", std::process::id()));
    font.save(&path).unwrap();
    let opened = Font::open(&path);
    let _ = std::fs::remove_file(&path);
    assert_eq!(opened.unwrap(), font);
}
