//! DXF parser: configuration, the interpreter stack driver, and the
//! finalizer.
//!
//! The driver walks the tag stream with a stack of in-progress entities.
//! An entity is created on its opening type keyword, mutated only by its
//! own `add_parm`/`add_child`, closed exactly once when popped, and then
//! routed to the top-level draw list or the enclosing block. A terminal
//! sweep closes whatever is still open at EOF.

use std::fs::File;
use std::io::Read;
use std::path::Path as FilePath;

use encoding_rs::Encoding;
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::document::{Drawing, Header};
use crate::entities::{
    Block, Container, EntityState, Filters, ParseContext, Polyline, RenderContext, Section,
    Skipped, Vertex,
};
use crate::error::Result;
use crate::glyph::{GlyphOutliner, PlaceholderOutliner};
use crate::io::pair_reader::DxfPairReader;
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::units::INCHES_PER_MM;
use crate::types::{BoundingBox2D, Transform2D, Units};

/// Configurable DXF to vector path parser.
///
/// A parser value is consumed by a single parse; concurrent parses use
/// distinct instances.
pub struct DxfParser {
    draw_text: bool,
    draw_mtext: bool,
    draw_dimen: bool,
    use_millimeters: bool,
    encoding: Option<&'static Encoding>,
    outliner: Box<dyn GlyphOutliner>,
}

impl Default for DxfParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DxfParser {
    /// Create a parser with default settings: text, mtext and dimension
    /// output disabled, unitless drawings interpreted as millimeters.
    pub fn new() -> Self {
        DxfParser {
            draw_text: false,
            draw_mtext: false,
            draw_dimen: false,
            use_millimeters: true,
            encoding: None,
            outliner: Box::new(PlaceholderOutliner),
        }
    }

    /// Enable drawing of TEXT entities (disabled by default)
    pub fn set_draw_text(&mut self, enable: bool) {
        self.draw_text = enable;
    }

    /// Enable drawing of MTEXT entities (disabled by default)
    pub fn set_draw_mtext(&mut self, enable: bool) {
        self.draw_mtext = enable;
    }

    /// Enable drawing of DIMENSION entities (disabled by default)
    pub fn set_draw_dimen(&mut self, enable: bool) {
        self.draw_dimen = enable;
    }

    /// Select how unitless drawings (`$INSUNITS` = 0 or absent) are
    /// interpreted: millimeters when `true` (the default), inches otherwise.
    pub fn set_use_millimeters(&mut self, enable: bool) {
        self.use_millimeters = enable;
    }

    /// Use a custom glyph outliner for TEXT/MTEXT rendering.
    pub fn with_outliner(mut self, outliner: Box<dyn GlyphOutliner>) -> Self {
        self.outliner = outliner;
        self
    }

    /// Set the fallback encoding for non-UTF8 value lines.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Parse a DXF stream into shapes. When the drawing's longest axis
    /// exceeds `max_size` inches it is scaled down to fit; when it is
    /// smaller than `min_size` it is scaled up. A value `<= 0` disables the
    /// respective adjustment.
    pub fn parse<R: Read>(self, source: R, max_size: f64, min_size: f64) -> Result<Drawing> {
        let mut pairs = DxfPairReader::new(source);
        if let Some(encoding) = self.encoding {
            pairs.set_encoding(encoding);
        }
        let mut driver = Driver::new(self.use_millimeters);
        driver.run(&mut pairs)?;
        let filters = Filters {
            text: self.draw_text,
            mtext: self.draw_mtext,
            dimension: self.draw_dimen,
        };
        Ok(driver.finalize(filters, self.outliner.as_ref(), max_size, min_size))
    }

    /// [`parse`](Self::parse) with upscaling disabled.
    pub fn parse_with_max<R: Read>(self, source: R, max_size: f64) -> Result<Drawing> {
        self.parse(source, max_size, 0.0)
    }

    /// Parse a DXF file from disk.
    pub fn parse_file<P: AsRef<FilePath>>(
        self,
        path: P,
        max_size: f64,
        min_size: f64,
    ) -> Result<Drawing> {
        let file = File::open(path)?;
        self.parse(file, max_size, min_size)
    }
}

/// The interpreter stack driver. Owns every in-progress entity; finished
/// entities move to `items` or into a block definition.
struct Driver {
    stack: Vec<Option<EntityState>>,
    current: Option<EntityState>,
    items: Vec<EntityState>,
    blocks: IndexMap<String, Block>,
    header: Header,
    unit_scale: f64,
    units: Option<Units>,
    use_millimeters: bool,
    notifications: NotificationCollection,
}

impl Driver {
    fn new(use_millimeters: bool) -> Self {
        Driver {
            stack: Vec::new(),
            current: None,
            items: Vec::new(),
            blocks: IndexMap::new(),
            header: Header::default(),
            unit_scale: INCHES_PER_MM,
            units: None,
            use_millimeters,
            notifications: NotificationCollection::new(),
        }
    }

    fn run<R: Read>(&mut self, pairs: &mut DxfPairReader<R>) -> Result<()> {
        while let Some(pair) = pairs.read_pair()? {
            if pair.code == 0 {
                self.handle_keyword(&pair.value);
            } else {
                self.handle_group(pair.code, &pair.value);
            }
        }
        self.finish();
        Ok(())
    }

    fn handle_keyword(&mut self, keyword: &str) {
        if self.current.as_ref().is_some_and(EntityState::auto_pop) {
            self.pop();
        }
        trace!(depth = self.stack.len(), keyword, "entity keyword");
        match keyword {
            "SECTION" => {
                self.current = Some(EntityState::Section(Section::default()));
            }
            "ENDSEC" => self.end_section(),
            "TABLE" => {
                self.push_current();
                self.current = Some(EntityState::Container(Container));
            }
            "ENDTAB" => self.pop(),
            "BLOCK" => {
                self.push_current();
                self.current = Some(EntityState::Block(Block::default()));
            }
            "ENDBLK" => {
                self.pop();
                while matches!(self.current, Some(EntityState::Block(_))) {
                    self.pop();
                }
            }
            "POLYLINE" => self.add_entity(EntityState::Polyline(Polyline::default())),
            "VERTEX" => {
                match self.current.take() {
                    // a finished vertex transfers into the polyline below it
                    Some(EntityState::Vertex(vertex)) => {
                        self.child_to_top(EntityState::Vertex(vertex))
                    }
                    Some(other) => self.stack.push(Some(other)),
                    None => {}
                }
                self.current = Some(EntityState::Vertex(Vertex::default()));
            }
            "SEQEND" => {
                while !self.stack.is_empty()
                    && !matches!(self.current, Some(EntityState::Block(_)))
                {
                    self.pop();
                }
            }
            "EOF" => {}
            _ => match EntityState::from_keyword(keyword) {
                Some(entity) => self.add_entity(entity),
                None => {
                    debug!(keyword, "unknown entity type skipped");
                    self.notifications.notify(
                        NotificationType::NotImplemented,
                        format!("unknown entity type '{keyword}' skipped"),
                    );
                    self.push_current();
                    self.current = Some(EntityState::Skipped(Skipped));
                }
            },
        }
    }

    fn handle_group(&mut self, code: i32, value: &str) {
        let ctx = ParseContext {
            unit_scale: self.unit_scale,
        };
        if let Some(entity) = self.current.as_mut() {
            match entity.add_parm(code, value, &ctx) {
                Ok(false) => {}
                Ok(true) => self.pop(),
                Err(err) => {
                    let name = entity.type_name();
                    debug!(entity = name, %err, "entity discarded");
                    self.notifications
                        .notify(NotificationType::Error, format!("{name} discarded: {err}"));
                    self.current = None;
                }
            }
        }
    }

    fn push_current(&mut self) {
        self.stack.push(self.current.take());
    }

    fn add_entity(&mut self, entity: EntityState) {
        self.push_current();
        self.current = Some(entity);
    }

    /// Close the current entity, transfer its ownership, and resume the
    /// entity below it.
    fn pop(&mut self) {
        if let Some(mut entity) = self.current.take() {
            entity.close();
            self.route(entity);
        }
        self.current = self.stack.pop().flatten();
    }

    fn route(&mut self, entity: EntityState) {
        match entity {
            EntityState::Vertex(vertex) => self.child_to_top(EntityState::Vertex(vertex)),
            EntityState::Block(block) => match &block.name {
                Some(name) => {
                    self.blocks.insert(name.clone(), block);
                }
                None => self
                    .notifications
                    .notify(NotificationType::Warning, "unnamed BLOCK dropped"),
            },
            EntityState::Section(_) | EntityState::Container(_) | EntityState::Skipped(_) => {}
            draw_item => {
                // An INSERT inside an anonymous dimension block is promoted
                // to the top-level draw list.
                let promote = matches!(
                    (self.stack.last(), &draw_item),
                    (Some(Some(EntityState::Block(block))), EntityState::Insert(_))
                        if block.promotes_inserts()
                );
                match self.stack.last_mut() {
                    Some(Some(EntityState::Block(block))) if !promote => {
                        block.children.push(draw_item)
                    }
                    _ => self.items.push(draw_item),
                }
            }
        }
    }

    fn child_to_top(&mut self, child: EntityState) {
        if let Some(Some(top)) = self.stack.last_mut() {
            top.add_child(child);
        }
    }

    fn end_section(&mut self) {
        if let Some(EntityState::Section(section)) = self.current.take() {
            if section.is_header() {
                if let Some(value) = section.header.variable_code("$INSUNITS", 70) {
                    self.set_units(value.to_string());
                }
                if let Some(value) = section.header.variable_code("$LUNITS", 70) {
                    self.set_units(value.to_string());
                }
                self.header = section.header;
            }
        }
        self.stack.clear();
    }

    fn set_units(&mut self, value: String) {
        let Ok(code) = value.trim().parse::<i32>() else {
            self.notifications.notify(
                NotificationType::Error,
                format!("cannot parse units value '{value}'"),
            );
            return;
        };
        if let Some(units) = Units::from_code(code) {
            self.units = Some(units);
            self.unit_scale = units.inches_per_unit(self.use_millimeters);
            debug!(
                units = units.label(),
                scale = self.unit_scale,
                "resolved drawing units"
            );
        }
    }

    /// Terminal sweep: close every still-open entity in pop order, so
    /// polylines without a trailing SEQEND still flush.
    fn finish(&mut self) {
        while self.current.is_some() || !self.stack.is_empty() {
            self.pop();
        }
    }

    /// Resolve shapes, union their bounds, and fit the drawing into the
    /// requested size window with a Y flip.
    fn finalize(
        mut self,
        filters: Filters,
        outliner: &dyn GlyphOutliner,
        max_size: f64,
        min_size: f64,
    ) -> Drawing {
        let ctx = RenderContext::new(&self.blocks, filters, outliner);
        let mut shapes = Vec::new();
        for item in &self.items {
            if !filters.allows(item) {
                continue;
            }
            if let Some(shape) = item.shape(&ctx) {
                if shape.bounds().is_some() {
                    shapes.push(shape);
                }
            }
        }
        for note in &ctx.into_notifications() {
            self.notifications
                .notify(note.notification_type, note.message.clone());
        }

        let mut bounds: Option<BoundingBox2D> = None;
        for shape in &shapes {
            if let Some(b) = shape.bounds() {
                bounds = Some(match bounds {
                    Some(prev) => prev.merge(&b),
                    None => b,
                });
            }
        }
        let Some(bounds) = bounds else {
            self.notifications
                .notify(NotificationType::EmptyResult, "no drawable entities in file");
            return Drawing {
                shapes: Vec::new(),
                bounds: None,
                units: self.units,
                scaled: false,
                notifications: self.notifications,
                header: self.header,
            };
        };

        let max_axis = bounds.max_axis();
        let mut scale = 1.0;
        let mut scaled = false;
        if max_size > 0.0 && max_axis > max_size {
            scale = max_size / max_axis;
            scaled = true;
        }
        if min_size > 0.0 && max_axis > 0.0 && max_axis < min_size {
            scale = min_size / max_axis;
            scaled = true;
        }

        let mut fit = Transform2D::identity();
        fit.scale(scale, -scale);
        fit.translate(-bounds.min.x, -bounds.height() - bounds.min.y);
        let shapes = shapes.iter().map(|shape| shape.transform(&fit)).collect();

        Drawing {
            shapes,
            bounds: Some(bounds),
            units: self.units,
            scaled,
            notifications: self.notifications,
            header: self.header,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn dxf(pairs: &[(&str, &str)]) -> Cursor<Vec<u8>> {
        let mut data = String::new();
        for (code, value) in pairs {
            data.push_str(code);
            data.push('\n');
            data.push_str(value);
            data.push('\n');
        }
        Cursor::new(data.into_bytes())
    }

    fn run_driver(pairs: &[(&str, &str)]) -> Driver {
        let mut driver = Driver::new(true);
        let mut reader = DxfPairReader::new(dxf(pairs));
        driver.run(&mut reader).unwrap();
        driver
    }

    #[test]
    fn test_stack_returns_to_zero() {
        let driver = run_driver(&[
            ("0", "SECTION"),
            ("2", "ENTITIES"),
            ("0", "LINE"),
            ("10", "0"),
            ("20", "0"),
            ("11", "1"),
            ("21", "1"),
            ("0", "ENDSEC"),
            ("0", "EOF"),
        ]);
        assert!(driver.stack.is_empty());
        assert!(driver.current.is_none());
        assert_eq!(driver.items.len(), 1);
    }

    #[test]
    fn test_polyline_without_seqend_is_flushed() {
        let driver = run_driver(&[
            ("0", "SECTION"),
            ("2", "ENTITIES"),
            ("0", "POLYLINE"),
            ("0", "VERTEX"),
            ("10", "0"),
            ("20", "0"),
            ("0", "VERTEX"),
            ("10", "1"),
            ("20", "0"),
        ]);
        assert_eq!(driver.items.len(), 1);
        match &driver.items[0] {
            EntityState::Polyline(p) => assert_eq!(p.vertices.len(), 2),
            other => panic!("expected polyline, got {}", other.type_name()),
        }
    }

    #[test]
    fn test_unknown_entity_inside_block_is_contained() {
        let driver = run_driver(&[
            ("0", "SECTION"),
            ("2", "BLOCKS"),
            ("0", "BLOCK"),
            ("2", "B1"),
            ("0", "LINE"),
            ("10", "0"),
            ("20", "0"),
            ("11", "1"),
            ("21", "0"),
            ("0", "POINT"),
            ("10", "99"),
            ("20", "99"),
            ("0", "LINE"),
            ("10", "0"),
            ("20", "1"),
            ("11", "1"),
            ("21", "1"),
            ("0", "ENDBLK"),
            ("0", "ENDSEC"),
        ]);
        let block = driver.blocks.get("B1").expect("block registered");
        assert_eq!(block.children.len(), 2);
        // the unknown POINT's coordinates went nowhere
        assert_eq!(block.base.x, 0.0);
        assert!(driver
            .notifications
            .has_type(NotificationType::NotImplemented));
    }

    #[test]
    fn test_malformed_numeric_discards_entity_only() {
        let driver = run_driver(&[
            ("0", "SECTION"),
            ("2", "ENTITIES"),
            ("0", "LINE"),
            ("10", "garbage"),
            ("0", "CIRCLE"),
            ("10", "0"),
            ("20", "0"),
            ("40", "1"),
            ("0", "ENDSEC"),
        ]);
        assert_eq!(driver.items.len(), 1);
        assert!(matches!(driver.items[0], EntityState::Circle(_)));
        assert!(driver.notifications.has_type(NotificationType::Error));
    }

    #[test]
    fn test_units_resolution_timing() {
        let driver = run_driver(&[
            ("0", "SECTION"),
            ("2", "HEADER"),
            ("9", "$INSUNITS"),
            ("70", "1"),
            ("0", "ENDSEC"),
            ("0", "SECTION"),
            ("2", "ENTITIES"),
            ("0", "LINE"),
            ("10", "0"),
            ("20", "0"),
            ("11", "2"),
            ("21", "0"),
            ("0", "ENDSEC"),
        ]);
        assert_eq!(driver.units, Some(Units::Inches));
        assert_eq!(driver.unit_scale, 1.0);
        match &driver.items[0] {
            EntityState::Line(line) => assert_eq!(line.end.x, 2.0),
            other => panic!("expected line, got {}", other.type_name()),
        }
    }
}
