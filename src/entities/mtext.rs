//! MTEXT interpreter.

use super::text::justification_offset;
use super::{parse_f64, parse_i64, ParseContext, RenderContext};
use crate::error::MalformedNumber;
use crate::geometry::Shape;
use crate::glyph::GlyphRequest;
use crate::types::Transform2D;

/// Multi-line text entity. The group 1 string carries backslash format
/// codes; most are stripped, stacked fractions are composed, and only the
/// first resulting line is rendered.
#[derive(Debug, Clone, Default)]
pub struct MText {
    /// First decoded line (group 1)
    pub text: Option<String>,
    /// Text style name (group 7)
    pub style: Option<String>,
    /// Insertion point, in inches
    pub ix: f64,
    pub iy: f64,
    /// Nominal text height, in inches (group 40)
    pub height: f64,
    /// Reference rectangle width, in inches (group 41)
    pub ref_width: f64,
    /// Rotation unit vector (groups 11/21)
    pub x_rot: f64,
    pub y_rot: f64,
    /// Attachment point (group 71): 1..=9 for TL, TC, TR, ML, MC, MR, BL, BC, BR
    pub attach_point: i64,
}

fn stacked_fraction(fraction: &str, out: &mut String) {
    match fraction {
        "1/2" => out.push('\u{00BD}'),
        "1/3" => out.push('\u{2153}'),
        "1/4" => out.push('\u{00BC}'),
        "2/3" => out.push('\u{2154}'),
        "3/4" => out.push('\u{00BE}'),
        _ => {
            let parts: Vec<&str> = fraction.split('/').collect();
            if parts.len() == 2 {
                out.push_str(parts[0]);
                out.push('\u{2044}');
                out.push_str(parts[1]);
            }
        }
    }
}

/// Decode MTEXT format codes into logical lines.
pub fn decode_format_codes(value: &str) -> Vec<String> {
    let chars: Vec<char> = value.chars().collect();
    let mut lines = Vec::new();
    let mut buf = String::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '\\' {
            i += 1;
            let Some(&cc) = chars.get(i) else { break };
            match cc {
                // parameterized codes, value runs to the next semicolon
                'A' | 'C' | 'F' | 'H' | 'Q' | 'S' | 'T' | 'W' => {
                    let Some(end) = chars[i..].iter().position(|&c| c == ';').map(|p| p + i)
                    else {
                        break;
                    };
                    if cc == 'S' {
                        let fraction: String = chars[i + 1..end].iter().collect();
                        stacked_fraction(&fraction, &mut buf);
                    }
                    i = end;
                }
                'P' => {
                    lines.push(std::mem::take(&mut buf));
                }
                '\\' | '{' | '}' => buf.push(cc),
                _ => {}
            }
            i += 1;
        } else if c == '{' || c == '}' {
            // grouping markers, stripped
            i += 1;
        } else {
            buf.push(c);
            i += 1;
        }
    }
    lines.push(buf);
    lines
}

impl MText {
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        match code {
            1 => {
                let lines = decode_format_codes(value);
                let mut first = lines.into_iter().next().unwrap_or_default();
                if first.chars().count() > 30 && self.ref_width > 0.0 {
                    first = first.chars().take(30).collect::<String>() + "...";
                }
                self.text = Some(first);
            }
            7 => self.style = Some(value.to_string()),
            10 => self.ix = parse_f64(code, value)? * ctx.unit_scale,
            20 => self.iy = parse_f64(code, value)? * ctx.unit_scale,
            11 => self.x_rot = parse_f64(code, value)?,
            21 => self.y_rot = parse_f64(code, value)?,
            40 => self.height = parse_f64(code, value)? * ctx.unit_scale,
            41 => self.ref_width = parse_f64(code, value)? * ctx.unit_scale,
            71 => self.attach_point = parse_i64(code, value)?,
            _ => {}
        }
        Ok(false)
    }

    pub fn shape(&self, ctx: &RenderContext<'_>) -> Option<Shape> {
        let text = self.text.as_deref()?;
        if text.is_empty() {
            return None;
        }
        let outline = ctx.outliner.outline(&GlyphRequest {
            text,
            family: "Helvetica",
            point_size: self.height * 10.0,
            kerning: true,
            ligatures: true,
            tracking: 0.1,
        });
        let bounds = outline.bounds()?;

        // attachment points 1..=9 map onto the TEXT justification grid
        let (vertical, horizontal) = match self.attach_point {
            1..=3 => (3, self.attach_point - 1),
            4..=6 => (2, self.attach_point - 4),
            7..=9 => (1, self.attach_point - 7),
            _ => (0, 0),
        };
        let (tx, ty) = justification_offset(vertical, horizontal, bounds.width(), bounds.height());
        let mut path = outline.transform(&Transform2D::from_translation(tx, ty));

        let mut place = Transform2D::identity();
        place.rotate(self.y_rot.atan2(self.x_rot));
        place.scale(0.1, -0.1);
        path = path.transform(&place);

        path = path.transform(&Transform2D::from_translation(self.ix, self.iy));
        Some(Shape::Path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_break() {
        let lines = decode_format_codes("BOLLARD,\\PFOR W.H.\\PPROTECTION");
        assert_eq!(lines, vec!["BOLLARD,", "FOR W.H.", "PROTECTION"]);
    }

    #[test]
    fn test_format_codes_stripped() {
        let lines = decode_format_codes("\\A1;6'-10{\\H0.750000x;\\S1/2;}\"");
        assert_eq!(lines, vec!["6'-10\u{00BD}\""]);
    }

    #[test]
    fn test_stacked_fractions() {
        assert_eq!(decode_format_codes("\\S1/4;")[0], "\u{00BC}");
        assert_eq!(decode_format_codes("\\S3/4;")[0], "\u{00BE}");
        assert_eq!(decode_format_codes("\\S5/8;")[0], "5\u{2044}8");
        assert_eq!(decode_format_codes("\\Sodd;")[0], "");
    }

    #[test]
    fn test_escapes_and_braces() {
        assert_eq!(decode_format_codes("\\\\path\\{x\\}")[0], "\\path{x}");
        assert_eq!(decode_format_codes("{grouped}")[0], "grouped");
    }

    #[test]
    fn test_unterminated_code() {
        assert_eq!(decode_format_codes("\\Farchquik.shx|c0")[0], "");
        assert_eq!(decode_format_codes("tail\\")[0], "tail");
    }

    #[test]
    fn test_first_line_truncation() {
        let ctx = ParseContext { unit_scale: 1.0 };
        let mut m = MText::default();
        m.add_parm(41, "5", &ctx).unwrap();
        let long = "ABCDEFGHIJKLMNOPQRSTUVWXYZABCDEFGH";
        m.add_parm(1, long, &ctx).unwrap();
        let text = m.text.as_deref().unwrap();
        assert_eq!(text.chars().count(), 33);
        assert!(text.ends_with("..."));

        // no reference width: kept in full
        let mut m2 = MText::default();
        m2.add_parm(1, long, &ctx).unwrap();
        assert_eq!(m2.text.as_deref(), Some(long));
    }

    #[test]
    fn test_rotation_vector() {
        let ctx = ParseContext { unit_scale: 1.0 };
        let mut m = MText::default();
        m.add_parm(11, "0", &ctx).unwrap();
        m.add_parm(21, "1", &ctx).unwrap();
        assert!((m.y_rot.atan2(m.x_rot) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }
}
