//! Converting a parsed TrueType font

use log::debug;
use rayon::prelude::*;

use crate::{
    mesh::{GlyphMesher, Mesh, MeshOptions},
    read::{tables::glyf::Glyph, TrueTypeFont},
    Font,
};

/// Settings for [`convert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    pub mesh: MeshOptions,
    /// Mesh glyphs on the rayon thread pool.
    pub parallel: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            mesh: MeshOptions::default(),
            parallel: true,
        }
    }
}

/// Mesh every glyph of `font`.
///
/// Glyph `i` of the result is built from glyph `i` and horizontal metric
/// `i` of the source.
pub fn convert(font: &TrueTypeFont, options: &ConvertOptions) -> Font {
    let mesher = GlyphMesher::new(options.mesh);
    let mesh_glyph = |(gid, glyph): (usize, &Glyph)| -> Mesh {
        let metric = font.metrics.get(gid).copied().unwrap_or_default();
        mesher.mesh(glyph, metric)
    };
    let glyphs: Vec<Mesh> = if options.parallel {
        font.glyphs.par_iter().enumerate().map(&mesh_glyph).collect()
    } else {
        font.glyphs.iter().enumerate().map(&mesh_glyph).collect()
    };
    debug!(
        "converted '{}': {} glyphs, {} vertices",
        font.family_name,
        glyphs.len(),
        glyphs.iter().map(|mesh| mesh.vertices.len()).sum::<usize>()
    );

    Font {
        name: font.family_name.clone(),
        style: font.style,
        units_per_em: font.units_per_em.into(),
        ascender: font.ascender.into(),
        descender: font.descender.into(),
        line_gap: font.line_gap.into(),
        glyph_map: font.char_map.clone(),
        glyphs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::tables::hmtx::LongMetric;

    #[test]
    fn metrics_follow_glyph_order() {
        let font = TrueTypeFont {
            family_name: "Blank".into(),
            units_per_em: 1000,
            descender: -250,
            metrics: vec![
                LongMetric {
                    advance: 100,
                    side_bearing: 1,
                },
                LongMetric {
                    advance: 200,
                    side_bearing: -2,
                },
            ],
            glyphs: vec![Glyph::Empty, Glyph::Empty],
            ..Default::default()
        };
        for parallel in [true, false] {
            let options = ConvertOptions {
                parallel,
                ..Default::default()
            };
            let converted = convert(&font, &options);
            assert_eq!(converted.name, "Blank");
            assert_eq!(converted.descender, -250);
            let metrics = converted
                .glyphs
                .iter()
                .map(|mesh| (mesh.advance_width, mesh.left_side_bearing))
                .collect::<Vec<_>>();
            assert_eq!(metrics, vec![(100, 1), (200, -2)]);
        }
    }
}
