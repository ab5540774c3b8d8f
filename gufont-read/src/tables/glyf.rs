//! The [glyf (Glyph Data)](https://docs.microsoft.com/en-us/typography/opentype/spec/glyf) table
//!
//! Glyphs are decoded into owned outlines: the conversion pipeline visits
//! every glyph exactly once and keeps the results.

use types::{BoundingBox, ControlPoint, F2Dot14, GlyphId, Pen, Tag};

use super::loca::Loca;
use crate::{Cursor, FontData, FontRead, ReadError, TopLevelTable};

bitflags::bitflags! {
    /// Flags used in [`SimpleGlyph`]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct SimpleGlyphFlags: u8 {
        /// Bit 0: If set, the point is on the curve; otherwise, it is off
        /// the curve.
        const ON_CURVE_POINT = 0x01;
        /// Bit 1: If set, the corresponding x-coordinate is 1 byte long,
        /// and the sign is determined by the
        /// X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR flag. If not set, its
        /// interpretation depends on the
        /// X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR flag: If that other flag
        /// is set, the x-coordinate is the same as the previous
        /// x-coordinate, and no element is added to the xCoordinates
        /// array. If both flags are not set, the corresponding element in
        /// the xCoordinates array is two bytes and interpreted as a signed
        /// integer.
        const X_SHORT_VECTOR = 0x02;
        /// Bit 2: If set, the corresponding y-coordinate is 1 byte long,
        /// and the sign is determined by the
        /// Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR flag.
        const Y_SHORT_VECTOR = 0x04;
        /// Bit 3: If set, the next byte (read as unsigned) specifies the
        /// number of additional times this flag byte is to be repeated in
        /// the logical flags array.
        const REPEAT_FLAG = 0x08;
        /// Bit 4: This flag has two meanings, depending on how the
        /// X_SHORT_VECTOR flag is set.
        const X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR = 0x10;
        /// Bit 5: This flag has two meanings, depending on how the
        /// Y_SHORT_VECTOR flag is set.
        const Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR = 0x20;
        /// Bit 6: If set, contours in the glyph description may overlap.
        const OVERLAP_SIMPLE = 0x40;
    }
}

bitflags::bitflags! {
    /// Flags used in [`Component`]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct CompositeGlyphFlags: u16 {
        /// Bit 0: If this is set, the arguments are 16-bit (uint16 or
        /// int16); otherwise, they are bytes (uint8 or int8).
        const ARG_1_AND_2_ARE_WORDS = 0x0001;
        /// Bit 1: If this is set, the arguments are signed xy values;
        /// otherwise, they are unsigned point numbers.
        const ARGS_ARE_XY_VALUES = 0x0002;
        /// Bit 2: For the xy values if the preceding is true.
        const ROUND_XY_TO_GRID = 0x0004;
        /// Bit 3: This indicates that there is a simple scale for the
        /// component. Otherwise, scale = 1.0.
        const WE_HAVE_A_SCALE = 0x0008;
        /// Bit 5: Indicates at least one more glyph after this one.
        const MORE_COMPONENTS = 0x0020;
        /// Bit 6: The x direction will use a different scale from the y
        /// direction.
        const WE_HAVE_AN_X_AND_Y_SCALE = 0x0040;
        /// Bit 7: There is a 2 by 2 transformation that will be used to
        /// scale the component.
        const WE_HAVE_A_TWO_BY_TWO = 0x0080;
        /// Bit 8: Following the last component are instructions for the
        /// composite character.
        const WE_HAVE_INSTRUCTIONS = 0x0100;
        /// Bit 9: If set, this forces the aw and lsb (and rsb) for the
        /// composite to be equal to those from this component glyph.
        const USE_MY_METRICS = 0x0200;
        /// Bit 10: If set, the components of the compound glyph overlap.
        const OVERLAP_COMPOUND = 0x0400;
    }
}

/// The glyf table.
#[derive(Clone, Debug)]
pub struct Glyf<'a> {
    data: FontData<'a>,
}

impl TopLevelTable for Glyf<'_> {
    const TAG: Tag = Tag::new(b"glyf");
}

impl<'a> Glyf<'a> {
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    /// Decode the glyph with the given id, using `loca` to find it.
    pub fn glyph(&self, loca: &Loca, gid: GlyphId) -> Result<Glyph, ReadError> {
        let Some(range) = loca.glyph_range(gid)? else {
            return Ok(Glyph::Empty);
        };
        self.data.expect_slice(range).and_then(Glyph::read)
    }
}

impl<'a> FontRead<'a> for Glyf<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        Ok(Glyf { data })
    }
}

/// One closed loop of an outline.
///
/// The last point implicitly connects back to the first.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contour {
    points: Vec<ControlPoint>,
}

impl Contour {
    pub fn new(points: Vec<ControlPoint>) -> Self {
        Contour { points }
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Pairs of consecutive points, including the closing pair.
    pub fn edges(&self) -> impl Iterator<Item = (ControlPoint, ControlPoint)> + '_ {
        let next = self.points.iter().cycle().skip(1);
        self.points.iter().copied().zip(next.copied())
    }

    /// Draw the contour, resolving implied on-curve points.
    pub fn draw(&self, pen: &mut impl Pen) {
        let points = &self.points;
        let Some(last) = points.last() else {
            return;
        };
        let (start, rest): (ControlPoint, Vec<ControlPoint>) =
            match points.iter().position(|p| p.on_curve) {
                Some(i) => {
                    let rest = points[i + 1..].iter().chain(&points[..i]).copied();
                    (points[i], rest.collect())
                }
                None => (last.midpoint(points[0]), points.clone()),
            };
        pen.move_to(start.x as f32, start.y as f32);
        let mut control: Option<ControlPoint> = None;
        for point in rest {
            match (point.on_curve, control.take()) {
                (true, Some(c)) => pen.quad_to(c.x as f32, c.y as f32, point.x as f32, point.y as f32),
                (true, None) => pen.line_to(point.x as f32, point.y as f32),
                (false, prev) => {
                    if let Some(c) = prev {
                        let mid = c.midpoint(point);
                        pen.quad_to(c.x as f32, c.y as f32, mid.x as f32, mid.y as f32);
                    }
                    control = Some(point);
                }
            }
        }
        if let Some(c) = control {
            pen.quad_to(c.x as f32, c.y as f32, start.x as f32, start.y as f32);
        }
        pen.close();
    }
}

impl From<Vec<ControlPoint>> for Contour {
    fn from(points: Vec<ControlPoint>) -> Self {
        Contour::new(points)
    }
}

/// A decoded glyph.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Glyph {
    /// A glyph with no outline data, such as a space.
    #[default]
    Empty,
    Simple(SimpleGlyph),
    Compound(CompoundGlyph),
}

impl Glyph {
    /// The contours of a simple glyph; empty for all other glyphs.
    pub fn contours(&self) -> &[Contour] {
        match self {
            Glyph::Simple(simple) => &simple.contours,
            _ => &[],
        }
    }

    pub fn bounding_box(&self) -> Option<BoundingBox<i16>> {
        match self {
            Glyph::Empty => None,
            Glyph::Simple(simple) => Some(simple.bbox),
            Glyph::Compound(compound) => Some(compound.bbox),
        }
    }

    /// Draw the outline of a simple glyph. Compound glyphs are not flattened
    /// and draw nothing.
    pub fn draw(&self, pen: &mut impl Pen) {
        for contour in self.contours() {
            contour.draw(pen);
        }
    }
}

impl<'a> FontRead<'a> for Glyph {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let number_of_contours: i16 = cursor.read()?;
        let bbox = BoundingBox {
            x_min: cursor.read()?,
            y_min: cursor.read()?,
            x_max: cursor.read()?,
            y_max: cursor.read()?,
        };
        if number_of_contours < 0 {
            read_compound(cursor, bbox).map(Glyph::Compound)
        } else {
            read_simple(cursor, bbox, number_of_contours as usize).map(Glyph::Simple)
        }
    }
}

/// A glyph made of contours.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimpleGlyph {
    pub bbox: BoundingBox<i16>,
    pub contours: Vec<Contour>,
}

impl SimpleGlyph {
    /// Returns the total number of points.
    pub fn num_points(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }
}

fn read_simple(
    mut cursor: Cursor,
    bbox: BoundingBox<i16>,
    number_of_contours: usize,
) -> Result<SimpleGlyph, ReadError> {
    let end_pts = cursor.read_array::<u16>(number_of_contours)?;
    let mut last_end: Option<u16> = None;
    for end in end_pts.iter() {
        if last_end.is_some_and(|last| end <= last) {
            return Err(ReadError::MalformedData(
                "contour end points are not increasing",
            ));
        }
        last_end = Some(end);
    }
    let n_points = last_end.map(|end| end as usize + 1).unwrap_or(0);
    let instruction_length: u16 = cursor.read()?;
    // hinting is not supported
    cursor.advance_by(instruction_length as usize);

    let mut flags = vec![SimpleGlyphFlags::empty(); n_points];
    let mut i = 0;
    while i < n_points {
        let flag = SimpleGlyphFlags::from_bits_truncate(cursor.read::<u8>()?);
        if flag.contains(SimpleGlyphFlags::REPEAT_FLAG) {
            let count = cursor.read::<u8>()? as usize + 1;
            let run = flags
                .get_mut(i..i + count)
                .ok_or(ReadError::MalformedData("flag repeat count overflows points"))?;
            run.fill(flag);
            i += count;
        } else {
            flags[i] = flag;
            i += 1;
        }
    }

    let xs = read_coordinates(
        &mut cursor,
        &flags,
        SimpleGlyphFlags::X_SHORT_VECTOR,
        SimpleGlyphFlags::X_IS_SAME_OR_POSITIVE_X_SHORT_VECTOR,
    )?;
    let ys = read_coordinates(
        &mut cursor,
        &flags,
        SimpleGlyphFlags::Y_SHORT_VECTOR,
        SimpleGlyphFlags::Y_IS_SAME_OR_POSITIVE_Y_SHORT_VECTOR,
    )?;
    let mut points = flags.iter().zip(xs.into_iter().zip(ys)).map(|(flag, (x, y))| {
        ControlPoint::new(
            x as f64,
            y as f64,
            flag.contains(SimpleGlyphFlags::ON_CURVE_POINT),
        )
    });

    let mut contours = Vec::with_capacity(number_of_contours);
    let mut start = 0usize;
    for end in end_pts.iter() {
        let end = end as usize + 1;
        contours.push(Contour::new(points.by_ref().take(end - start).collect()));
        start = end;
    }
    Ok(SimpleGlyph { bbox, contours })
}

fn read_coordinates(
    cursor: &mut Cursor,
    flags: &[SimpleGlyphFlags],
    short: SimpleGlyphFlags,
    same_or_positive: SimpleGlyphFlags,
) -> Result<Vec<i32>, ReadError> {
    let mut value = 0i32;
    let mut coords = Vec::with_capacity(flags.len());
    for flag in flags {
        let mut delta = 0i32;
        if flag.contains(short) {
            delta = cursor.read::<u8>()? as i32;
            if !flag.contains(same_or_positive) {
                delta = -delta;
            }
        } else if !flag.contains(same_or_positive) {
            delta = cursor.read::<i16>()? as i32;
        }
        value = value.wrapping_add(delta);
        coords.push(value);
    }
    Ok(coords)
}

/// A glyph assembled from other glyphs.
///
/// The components are not flattened into contours.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompoundGlyph {
    pub bbox: BoundingBox<i16>,
    pub components: Vec<Component>,
}

/// A reference to another glyph, placed with an anchor and a transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Component {
    pub glyph: GlyphId,
    pub flags: CompositeGlyphFlags,
    pub anchor: Anchor,
    pub transform: Transform,
}

/// How a component is positioned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// An x, y offset.
    Offset { x: i16, y: i16 },
    /// Align a point of the parent (`base`) with a point of the component.
    Point { base: u16, component: u16 },
}

/// A 2x2 transformation matrix, in the order of the `WE_HAVE_A_TWO_BY_TWO`
/// fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transform {
    pub xx: F2Dot14,
    pub yx: F2Dot14,
    pub xy: F2Dot14,
    pub yy: F2Dot14,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            xx: F2Dot14::ONE,
            yx: F2Dot14::ZERO,
            xy: F2Dot14::ZERO,
            yy: F2Dot14::ONE,
        }
    }
}

fn read_compound(mut cursor: Cursor, bbox: BoundingBox<i16>) -> Result<CompoundGlyph, ReadError> {
    use CompositeGlyphFlags as F;

    let mut components = Vec::new();
    loop {
        let flags = F::from_bits_truncate(cursor.read::<u16>()?);
        let glyph = GlyphId::new(cursor.read()?);
        let words = flags.contains(F::ARG_1_AND_2_ARE_WORDS);
        let anchor = if flags.contains(F::ARGS_ARE_XY_VALUES) {
            let (x, y) = if words {
                (cursor.read::<i16>()?, cursor.read::<i16>()?)
            } else {
                (cursor.read::<i8>()? as i16, cursor.read::<i8>()? as i16)
            };
            Anchor::Offset { x, y }
        } else {
            let (base, component) = if words {
                (cursor.read::<u16>()?, cursor.read::<u16>()?)
            } else {
                (cursor.read::<u8>()? as u16, cursor.read::<u8>()? as u16)
            };
            Anchor::Point { base, component }
        };
        let mut transform = Transform::default();
        if flags.contains(F::WE_HAVE_A_SCALE) {
            transform.xx = cursor.read()?;
            transform.yy = transform.xx;
        } else if flags.contains(F::WE_HAVE_AN_X_AND_Y_SCALE) {
            transform.xx = cursor.read()?;
            transform.yy = cursor.read()?;
        } else if flags.contains(F::WE_HAVE_A_TWO_BY_TWO) {
            transform.xx = cursor.read()?;
            transform.yx = cursor.read()?;
            transform.xy = cursor.read()?;
            transform.yy = cursor.read()?;
        }
        components.push(Component {
            glyph,
            flags,
            anchor,
            transform,
        });
        if !flags.contains(F::MORE_COMPONENTS) {
            break;
        }
    }
    Ok(CompoundGlyph { bbox, components })
}
