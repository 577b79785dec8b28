//! DIMENSION interpreter.

use super::{parse_f64, parse_i64, ParseContext, RenderContext, MAX_BLOCK_DEPTH};
use crate::error::MalformedNumber;
use crate::geometry::{Path, Shape};
use crate::types::Vector2;

/// Dimension entity. The rendered graphics live in an anonymous block the
/// dimension references by name; its children are appended unmodified.
#[derive(Debug, Clone, Default)]
pub struct Dimension {
    /// Name of the block holding the dimension graphics (group 2)
    pub block_name: Option<String>,
    /// Handle of that block (group 5)
    pub block_handle: Option<String>,
    /// Definition point, in inches
    pub definition_point: Vector2,
    /// Text middle point, in inches
    pub mid_point: Vector2,
    /// Dimension type (group 70)
    pub dimension_type: i64,
    /// Attachment orientation 1..=9 (group 71)
    pub orientation: i64,
}

impl Dimension {
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        match code {
            2 => self.block_name = Some(value.to_string()),
            5 => self.block_handle = Some(value.to_string()),
            10 => self.definition_point.x = parse_f64(code, value)? * ctx.unit_scale,
            20 => self.definition_point.y = parse_f64(code, value)? * ctx.unit_scale,
            11 => self.mid_point.x = parse_f64(code, value)? * ctx.unit_scale,
            21 => self.mid_point.y = parse_f64(code, value)? * ctx.unit_scale,
            70 => self.dimension_type = parse_i64(code, value)?,
            71 => self.orientation = parse_i64(code, value)?,
            _ => {}
        }
        Ok(false)
    }

    pub fn shape(&self, ctx: &RenderContext<'_>) -> Option<Shape> {
        let name = self.block_name.as_deref()?;
        let block = ctx.blocks.get(name)?;
        if block.children.is_empty() || ctx.depth.get() >= MAX_BLOCK_DEPTH {
            return None;
        }
        ctx.depth.set(ctx.depth.get() + 1);
        let mut path = Path::new();
        for child in &block.children {
            if let Some(shape) = child.shape(ctx) {
                path.append_shape(&shape);
            }
        }
        ctx.depth.set(ctx.depth.get() - 1);
        if path.is_empty() {
            None
        } else {
            Some(Shape::Path(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Block, EntityState, Filters, Line};
    use crate::geometry::PathCommand;
    use crate::glyph::PlaceholderOutliner;
    use indexmap::IndexMap;

    #[test]
    fn test_appends_block_children_unmodified() {
        let mut line = Line {
            start: Vector2::new(1.0, 2.0),
            end: Vector2::new(3.0, 4.0),
            ..Default::default()
        };
        line.close();
        let mut blocks = IndexMap::new();
        blocks.insert(
            "*D1".to_string(),
            Block {
                name: Some("*D1".to_string()),
                children: vec![EntityState::Line(line)],
                ..Default::default()
            },
        );
        let outliner = PlaceholderOutliner;
        let ctx = RenderContext::new(&blocks, Filters::default(), &outliner);

        let dim = Dimension {
            block_name: Some("*D1".to_string()),
            ..Default::default()
        };
        let shape = dim.shape(&ctx).expect("shape");
        match shape {
            Shape::Path(p) => {
                assert_eq!(p.commands[0], PathCommand::MoveTo(Vector2::new(1.0, 2.0)));
                assert_eq!(p.commands[1], PathCommand::LineTo(Vector2::new(3.0, 4.0)));
            }
            other => panic!("expected path, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_block_yields_nothing() {
        let blocks = IndexMap::new();
        let outliner = PlaceholderOutliner;
        let ctx = RenderContext::new(&blocks, Filters::default(), &outliner);
        let dim = Dimension::default();
        assert!(dim.shape(&ctx).is_none());
    }
}
