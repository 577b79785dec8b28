//! Glyph outline bridge.
//!
//! TEXT and MTEXT entities do not rasterize fonts themselves; they hand a
//! [`GlyphRequest`] to an injected [`GlyphOutliner`] and place whatever
//! outline comes back. Outlines are expected in font space: Y grows
//! downward, the baseline sits at `y = 0`, and coordinates are in points.

use crate::geometry::Path;
use crate::types::Vector2;

/// A request for the vector outline of a run of text.
#[derive(Debug, Clone)]
pub struct GlyphRequest<'a> {
    /// The text to outline (control codes already decoded)
    pub text: &'a str,
    /// Font family name
    pub family: &'a str,
    /// Point size of the requested outline
    pub point_size: f64,
    /// Whether pair kerning should be applied
    pub kerning: bool,
    /// Whether ligature substitution should be applied
    pub ligatures: bool,
    /// Additional tracking (letter spacing) as a fraction of the point size
    pub tracking: f64,
}

/// Converts text to vector outlines. Implementations typically wrap a
/// platform font stack; [`PlaceholderOutliner`] is used when none is
/// available.
pub trait GlyphOutliner {
    /// Produce the outline path for a text run, in font space.
    fn outline(&self, request: &GlyphRequest<'_>) -> Path;
}

/// Fallback outliner that draws an X-shaped box per character. Keeps text
/// placement, justification and bounds meaningful without a font stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderOutliner;

impl GlyphOutliner for PlaceholderOutliner {
    fn outline(&self, request: &GlyphRequest<'_>) -> Path {
        let size = request.point_size;
        let advance = size * 0.7;
        let width = size * 0.5;
        let height = size * 0.7;
        let mut path = Path::new();
        for (i, ch) in request.text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x0 = advance * i as f64;
            path.move_to(Vector2::new(x0, -height));
            path.line_to(Vector2::new(x0 + width, 0.0));
            path.move_to(Vector2::new(x0 + width, -height));
            path.line_to(Vector2::new(x0, 0.0));
        }
        path
    }
}
