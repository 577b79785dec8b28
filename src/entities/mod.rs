//! Entity interpreters.
//!
//! One module per supported DXF object type. Each interpreter consumes the
//! tagged groups of its entity, finalizes geometry in `close()`, and — for
//! drawable types — resolves a [`Shape`] on demand. The driver owns
//! in-progress interpreters on its stack; ownership transfers to the
//! top-level draw list or an enclosing block when an entity is popped.

use std::cell::{Cell, RefCell};

use indexmap::IndexMap;

use crate::error::MalformedNumber;
use crate::geometry::Shape;
use crate::glyph::GlyphOutliner;
use crate::notification::{NotificationCollection, NotificationType};

pub mod arc;
pub mod block;
pub mod circle;
pub mod dimension;
pub mod ellipse;
pub mod hatch;
pub mod insert;
pub mod line;
pub mod lwpolyline;
pub mod mtext;
pub mod polyline;
pub mod section;
pub mod spline;
pub mod text;

pub use arc::Arc;
pub use block::{Block, BlockFlags};
pub use circle::Circle;
pub use dimension::Dimension;
pub use ellipse::Ellipse;
pub use hatch::Hatch;
pub use insert::Insert;
pub use line::Line;
pub use lwpolyline::{LwPolyline, LwSegment};
pub use mtext::MText;
pub use polyline::{Polyline, Vertex};
pub use section::Section;
pub use spline::Spline;
pub use text::Text;

/// Block reference nesting limit; a reference chain deeper than this (a
/// definition cycle in practice) resolves to no geometry.
pub const MAX_BLOCK_DEPTH: usize = 32;

/// Per-parse context handed to `add_parm`.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext {
    /// Inches per drawing unit; multiplies every coordinate as it is read
    pub unit_scale: f64,
}

/// Inclusion filters for entity kinds that are off by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct Filters {
    pub text: bool,
    pub mtext: bool,
    pub dimension: bool,
}

impl Filters {
    /// Whether the entity participates in shape output
    pub fn allows(&self, entity: &EntityState) -> bool {
        match entity {
            EntityState::Text(_) => self.text,
            EntityState::MText(_) => self.mtext,
            EntityState::Dimension(_) => self.dimension,
            _ => true,
        }
    }
}

/// Context for shape resolution: the finished block dictionary, inclusion
/// filters, the glyph outliner, and the block recursion depth.
pub struct RenderContext<'a> {
    pub blocks: &'a IndexMap<String, Block>,
    pub filters: Filters,
    pub outliner: &'a dyn GlyphOutliner,
    pub(crate) depth: Cell<usize>,
    pub(crate) notes: RefCell<NotificationCollection>,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        blocks: &'a IndexMap<String, Block>,
        filters: Filters,
        outliner: &'a dyn GlyphOutliner,
    ) -> Self {
        RenderContext {
            blocks,
            filters,
            outliner,
            depth: Cell::new(0),
            notes: RefCell::new(NotificationCollection::new()),
        }
    }

    pub(crate) fn warn(&self, message: impl Into<String>) {
        self.notes
            .borrow_mut()
            .notify(NotificationType::Warning, message);
    }

    pub(crate) fn into_notifications(self) -> NotificationCollection {
        self.notes.into_inner()
    }
}

pub(crate) fn parse_f64(code: i32, value: &str) -> Result<f64, MalformedNumber> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| MalformedNumber::new(code, value))
}

pub(crate) fn parse_i64(code: i32, value: &str) -> Result<i64, MalformedNumber> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| MalformedNumber::new(code, value))
}

/// Opaque container for TABLE/ENDTAB ranges; absorbs groups, keeps the
/// stack balanced, produces nothing.
#[derive(Debug, Clone, Default)]
pub struct Container;

/// Sink for unknown entity types: swallows every group and pops on the next
/// type keyword, so an unrecognized entity cannot disturb whatever is being
/// assembled around it.
#[derive(Debug, Clone, Default)]
pub struct Skipped;

/// All interpreter variants as a flat sum type. The driver dispatches on
/// this explicitly; drawable variants answer `shape()`.
#[derive(Debug, Clone)]
pub enum EntityState {
    Section(Section),
    Block(Block),
    Container(Container),
    Skipped(Skipped),
    Vertex(Vertex),
    Polyline(Polyline),
    LwPolyline(LwPolyline),
    Spline(Spline),
    Line(Line),
    Circle(Circle),
    Arc(Arc),
    Ellipse(Ellipse),
    Text(Text),
    MText(MText),
    Insert(Insert),
    Dimension(Dimension),
    Hatch(Hatch),
}

impl EntityState {
    /// Registry of entity type keywords handled by `addEntity` dispatch.
    /// Structural keywords (SECTION, BLOCK, POLYLINE, VERTEX, ...) are
    /// handled by the driver directly and are not listed here.
    pub fn from_keyword(keyword: &str) -> Option<EntityState> {
        Some(match keyword {
            "SPLINE" => EntityState::Spline(Spline::default()),
            "INSERT" => EntityState::Insert(Insert::default()),
            "TEXT" => EntityState::Text(Text::default()),
            "MTEXT" => EntityState::MText(MText::default()),
            "HATCH" => EntityState::Hatch(Hatch::default()),
            "CIRCLE" => EntityState::Circle(Circle::default()),
            "ELLIPSE" => EntityState::Ellipse(Ellipse::default()),
            "ARC" => EntityState::Arc(Arc::default()),
            "LINE" => EntityState::Line(Line::default()),
            "DIMENSION" => EntityState::Dimension(Dimension::default()),
            "LWPOLYLINE" => EntityState::LwPolyline(LwPolyline::default()),
            _ => return None,
        })
    }

    /// Whether the interpreter terminates implicitly at the next type
    /// keyword. POLYLINE does not; it waits for SEQEND.
    pub fn auto_pop(&self) -> bool {
        matches!(
            self,
            EntityState::Skipped(_)
                | EntityState::LwPolyline(_)
                | EntityState::Spline(_)
                | EntityState::Line(_)
                | EntityState::Circle(_)
                | EntityState::Arc(_)
                | EntityState::Ellipse(_)
                | EntityState::Text(_)
                | EntityState::MText(_)
                | EntityState::Insert(_)
                | EntityState::Dimension(_)
                | EntityState::Hatch(_)
        )
    }

    /// DXF type name, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityState::Section(_) => "SECTION",
            EntityState::Block(_) => "BLOCK",
            EntityState::Container(_) => "TABLE",
            EntityState::Skipped(_) => "UNKNOWN",
            EntityState::Vertex(_) => "VERTEX",
            EntityState::Polyline(_) => "POLYLINE",
            EntityState::LwPolyline(_) => "LWPOLYLINE",
            EntityState::Spline(_) => "SPLINE",
            EntityState::Line(_) => "LINE",
            EntityState::Circle(_) => "CIRCLE",
            EntityState::Arc(_) => "ARC",
            EntityState::Ellipse(_) => "ELLIPSE",
            EntityState::Text(_) => "TEXT",
            EntityState::MText(_) => "MTEXT",
            EntityState::Insert(_) => "INSERT",
            EntityState::Dimension(_) => "DIMENSION",
            EntityState::Hatch(_) => "HATCH",
        }
    }

    /// Consume a non-structural group. Returns `true` when the entity is
    /// complete immediately after this group (self-terminating).
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        match self {
            EntityState::Section(e) => e.add_parm(code, value, ctx),
            EntityState::Block(e) => e.add_parm(code, value, ctx),
            EntityState::Container(_) | EntityState::Skipped(_) | EntityState::Hatch(_) => {
                Ok(false)
            }
            EntityState::Vertex(e) => e.add_parm(code, value, ctx),
            EntityState::Polyline(e) => e.add_parm(code, value, ctx),
            EntityState::LwPolyline(e) => e.add_parm(code, value, ctx),
            EntityState::Spline(e) => e.add_parm(code, value, ctx),
            EntityState::Line(e) => e.add_parm(code, value, ctx),
            EntityState::Circle(e) => e.add_parm(code, value, ctx),
            EntityState::Arc(e) => e.add_parm(code, value, ctx),
            EntityState::Ellipse(e) => e.add_parm(code, value, ctx),
            EntityState::Text(e) => e.add_parm(code, value, ctx),
            EntityState::MText(e) => e.add_parm(code, value, ctx),
            EntityState::Insert(e) => e.add_parm(code, value, ctx),
            EntityState::Dimension(e) => e.add_parm(code, value, ctx),
        }
    }

    /// Adopt a completed sub-entity. Only POLYLINE adopts VERTEX children;
    /// every other pairing is dropped.
    pub fn add_child(&mut self, child: EntityState) {
        if let (EntityState::Polyline(polyline), EntityState::Vertex(vertex)) = (self, child) {
            polyline.add_child(vertex);
        }
    }

    /// Finalize internal geometry. Invoked exactly once when the driver
    /// pops the entity.
    pub fn close(&mut self) {
        match self {
            EntityState::Polyline(e) => e.close(),
            EntityState::LwPolyline(e) => e.close(),
            EntityState::Spline(e) => e.close(),
            EntityState::Line(e) => e.close(),
            EntityState::Circle(e) => e.close(),
            EntityState::Arc(e) => e.close(),
            EntityState::Ellipse(e) => e.close(),
            _ => {}
        }
    }

    /// Whether this variant can produce a shape
    pub fn is_draw_item(&self) -> bool {
        !matches!(
            self,
            EntityState::Section(_)
                | EntityState::Block(_)
                | EntityState::Container(_)
                | EntityState::Skipped(_)
                | EntityState::Vertex(_)
        )
    }

    /// Resolve the planar shape, or `None` when the entity produced no
    /// geometry.
    pub fn shape(&self, ctx: &RenderContext<'_>) -> Option<Shape> {
        match self {
            EntityState::Polyline(e) => e.shape(),
            EntityState::LwPolyline(e) => e.shape(),
            EntityState::Spline(e) => e.shape(),
            EntityState::Line(e) => e.shape(),
            EntityState::Circle(e) => e.shape(),
            EntityState::Arc(e) => e.shape(),
            EntityState::Ellipse(e) => e.shape(),
            EntityState::Text(e) => e.shape(ctx),
            EntityState::MText(e) => e.shape(ctx),
            EntityState::Insert(e) => e.shape(ctx),
            EntityState::Dimension(e) => e.shape(ctx),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_known_keywords() {
        for keyword in [
            "SPLINE",
            "INSERT",
            "TEXT",
            "MTEXT",
            "HATCH",
            "CIRCLE",
            "ELLIPSE",
            "ARC",
            "LINE",
            "DIMENSION",
            "LWPOLYLINE",
        ] {
            let e = EntityState::from_keyword(keyword).expect(keyword);
            assert_eq!(e.type_name(), keyword);
            assert!(e.auto_pop(), "{keyword} should auto-pop");
        }
        assert!(EntityState::from_keyword("POINT").is_none());
        assert!(EntityState::from_keyword("POLYLINE").is_none());
    }

    #[test]
    fn test_polyline_waits_for_seqend() {
        let polyline = EntityState::Polyline(Polyline::default());
        assert!(!polyline.auto_pop());
        assert!(polyline.is_draw_item());
        let vertex = EntityState::Vertex(Vertex::default());
        assert!(!vertex.is_draw_item());
    }

    #[test]
    fn test_filters_default_off() {
        let filters = Filters::default();
        assert!(!filters.allows(&EntityState::Text(Text::default())));
        assert!(!filters.allows(&EntityState::MText(MText::default())));
        assert!(!filters.allows(&EntityState::Dimension(Dimension::default())));
        assert!(filters.allows(&EntityState::Line(Line::default())));
    }
}
