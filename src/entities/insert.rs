//! INSERT interpreter (block reference).

use super::{parse_f64, ParseContext, RenderContext, MAX_BLOCK_DEPTH};
use crate::error::MalformedNumber;
use crate::geometry::{Path, Shape};
use crate::types::Transform2D;

/// Places an instance of a named block with an affine placement. The block
/// is resolved lazily during finalization, so a definition may legally
/// appear after its reference in the file.
#[derive(Debug, Clone)]
pub struct Insert {
    /// Referenced block name (group 2)
    pub block_name: Option<String>,
    /// Referenced block handle (group 5)
    pub block_handle: Option<String>,
    /// Insertion point, in inches
    pub ix: f64,
    pub iy: f64,
    pub x_scale: f64,
    pub y_scale: f64,
    /// A negative Z scale mirrors the placement across the Y axis
    pub z_scale: f64,
    /// Rotation angle in degrees (group 50)
    pub rotation: f64,
}

impl Default for Insert {
    fn default() -> Self {
        Insert {
            block_name: None,
            block_handle: None,
            ix: 0.0,
            iy: 0.0,
            x_scale: 1.0,
            y_scale: 1.0,
            z_scale: 1.0,
            rotation: 0.0,
        }
    }
}

impl Insert {
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        match code {
            2 => self.block_name = Some(value.to_string()),
            5 => self.block_handle = Some(value.to_string()),
            10 => self.ix = parse_f64(code, value)? * ctx.unit_scale,
            20 => self.iy = parse_f64(code, value)? * ctx.unit_scale,
            41 => self.x_scale = parse_f64(code, value)?,
            42 => self.y_scale = parse_f64(code, value)?,
            43 => self.z_scale = parse_f64(code, value)?,
            50 => self.rotation = parse_f64(code, value)?,
            _ => {}
        }
        Ok(false)
    }

    pub fn shape(&self, ctx: &RenderContext<'_>) -> Option<Shape> {
        let name = self.block_name.as_deref()?;
        let Some(block) = ctx.blocks.get(name) else {
            ctx.warn(format!("INSERT references undefined block '{name}'"));
            return None;
        };
        if block.children.is_empty() {
            return None;
        }
        if ctx.depth.get() >= MAX_BLOCK_DEPTH {
            ctx.warn(format!("block reference depth limit reached at '{name}'"));
            return None;
        }

        let base = (block.base.x != 0.0 || block.base.y != 0.0)
            .then(|| Transform2D::from_translation(block.base.x, block.base.y));

        let mut placement = Transform2D::identity();
        if self.z_scale < 0.0 {
            placement.translate(-self.ix, self.iy);
            placement.scale(-self.x_scale, self.y_scale);
        } else {
            placement.translate(self.ix, self.iy);
            placement.scale(self.x_scale, self.y_scale);
        }
        let rotation = if self.x_scale < 0.0 {
            -self.rotation
        } else {
            self.rotation
        };
        placement.rotate(rotation.to_radians());

        ctx.depth.set(ctx.depth.get() + 1);
        let mut path = Path::new();
        for child in &block.children {
            if !ctx.filters.allows(child) {
                continue;
            }
            if let Some(mut shape) = child.shape(ctx) {
                if let Some(base) = &base {
                    shape = shape.transform(base);
                }
                shape = shape.transform(&placement);
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
