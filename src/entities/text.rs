//! TEXT interpreter.

use super::{parse_f64, parse_i64, ParseContext, RenderContext};
use crate::error::MalformedNumber;
use crate::geometry::Shape;
use crate::glyph::GlyphRequest;
use crate::types::Transform2D;

/// Single-line text entity. Glyph outlines come from the injected
/// [`GlyphOutliner`](crate::glyph::GlyphOutliner); this interpreter decodes
/// `%%` control codes and applies justification, rotation and placement.
#[derive(Debug, Clone, Default)]
pub struct Text {
    /// Decoded text (group 1)
    pub text: Option<String>,
    /// Insertion point, in inches
    pub ix: f64,
    pub iy: f64,
    /// Second alignment point, in inches
    pub ix2: f64,
    pub iy2: f64,
    /// Nominal text height, in inches (group 40)
    pub height: f64,
    /// Rotation angle in degrees (group 50)
    pub rotation: f64,
    /// Horizontal justification (group 72): 0 left, 1 center, 2 right
    pub h_adjust: i64,
    /// Vertical justification (group 73): 0 baseline, 1 bottom, 2 middle, 3 top
    pub v_adjust: i64,
}

/// Decode `%%` control code sequences: `%%d` degree, `%%p` plus/minus,
/// `%%c` diameter, `%%u`/`%%o` (underscore/overscore toggles) dropped,
/// `%%<digits>` replaced by U+FFFD.
pub fn decode_control_codes(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c != '%' {
            out.push(c);
            i += 1;
            continue;
        }
        if i + 2 >= chars.len() {
            break;
        }
        i += 2;
        let cc = chars[i];
        if cc.is_ascii_digit() {
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            out.push('\u{FFFD}');
        } else {
            match cc {
                'd' => out.push('\u{00B0}'),
                'p' => out.push('\u{00B1}'),
                'c' => out.push('\u{00D8}'),
                // underscore / overscore toggles
                'u' | 'o' => {}
                _ => {}
            }
            i += 1;
        }
    }
    out
}

/// Justification offset shared by TEXT (hAdjust/vAdjust pair) and MTEXT
/// (attachment point), in terms of the outline's raw bounds.
pub(crate) fn justification_offset(
    vertical: i64,
    horizontal: i64,
    width: f64,
    height: f64,
) -> (f64, f64) {
    match (vertical, horizontal) {
        (3, 0) => (0.0, height),
        (3, 1) => (-width / 2.0, height),
        (3, 2) => (-width, height),
        (2, 0) => (0.0, height / 2.0),
        (2, 1) => (-width / 2.0, height / 2.0),
        (2, 2) => (-width, height / 2.0),
        (1, 0) => (0.0, 0.0),
        (1, 1) => (-width / 2.0, 0.0),
        (1, 2) => (-width, 0.0),
        _ => (0.0, 0.0),
    }
}

impl Text {
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        match code {
            1 => self.text = Some(decode_control_codes(value)),
            10 => self.ix = parse_f64(code, value)? * ctx.unit_scale,
            20 => self.iy = parse_f64(code, value)? * ctx.unit_scale,
            11 => self.ix2 = parse_f64(code, value)? * ctx.unit_scale,
            21 => self.iy2 = parse_f64(code, value)? * ctx.unit_scale,
            40 => self.height = parse_f64(code, value)? * ctx.unit_scale,
            50 => self.rotation = parse_f64(code, value)?,
            72 => self.h_adjust = parse_i64(code, value)?,
            73 => self.v_adjust = parse_i64(code, value)?,
            _ => {}
        }
        Ok(false)
    }

    pub fn shape(&self, ctx: &RenderContext<'_>) -> Option<Shape> {
        let text = self.text.as_deref()?;
        if text.is_empty() {
            return None;
        }
        // Outline precision needs the 10x point-size overscale; the
        // placement transform compensates with a 0.1 downscale.
        let outline = ctx.outliner.outline(&GlyphRequest {
            text,
            family: "Helvetica",
            point_size: self.height * 10.0,
            kerning: true,
            ligatures: true,
            tracking: 0.1,
        });
        let bounds = outline.bounds()?;

        let (tx, ty) =
            justification_offset(self.v_adjust, self.h_adjust, bounds.width(), bounds.height());
        let mut path = outline.transform(&Transform2D::from_translation(tx, ty));

        let mut place = Transform2D::identity();
        place.rotate(self.rotation.to_radians());
        place.scale(0.1, -0.1);
        path = path.transform(&place);

        let target = if self.h_adjust != 0 || self.v_adjust != 0 {
            (self.ix2, self.iy2)
        } else {
            (self.ix, self.iy)
        };
        path = path.transform(&Transform2D::from_translation(target.0, target.1));
        Some(Shape::Path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Block, Filters};
    use crate::glyph::PlaceholderOutliner;
    use indexmap::IndexMap;

    #[test]
    fn test_control_codes() {
        assert_eq!(decode_control_codes("90%%d"), "90\u{00B0}");
        assert_eq!(decode_control_codes("%%p0.5"), "\u{00B1}0.5");
        assert_eq!(decode_control_codes("%%c12"), "\u{00D8}12");
        assert_eq!(decode_control_codes("%%uunder%%u"), "under");
        assert_eq!(decode_control_codes("a%%127b"), "a\u{FFFD}b");
        assert_eq!(decode_control_codes("plain"), "plain");
    }

    #[test]
    fn test_truncated_control_code() {
        assert_eq!(decode_control_codes("abc%%"), "abc");
    }

    #[test]
    fn test_shape_placement() {
        let blocks: IndexMap<String, Block> = IndexMap::new();
        let outliner = PlaceholderOutliner;
        let ctx = RenderContext::new(&blocks, Filters::default(), &outliner);

        let parse_ctx = ParseContext { unit_scale: 1.0 };
        let mut t = Text::default();
        t.add_parm(1, "HI", &parse_ctx).unwrap();
        t.add_parm(10, "5", &parse_ctx).unwrap();
        t.add_parm(20, "7", &parse_ctx).unwrap();
        t.add_parm(40, "0.5", &parse_ctx).unwrap();
        let shape = t.shape(&ctx).expect("shape");
        let bounds = shape.bounds().unwrap();
        // outline lands above the baseline at the insertion point
        assert!(bounds.min.x >= 5.0 - 1e-9);
        assert!(bounds.min.y >= 7.0 - 1e-9);
        assert!(bounds.height() <= 0.5 + 1e-9);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let blocks: IndexMap<String, Block> = IndexMap::new();
        let outliner = PlaceholderOutliner;
        let ctx = RenderContext::new(&blocks, Filters::default(), &outliner);
        let t = Text::default();
        assert!(t.shape(&ctx).is_none());
    }
}
