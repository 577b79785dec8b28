//! BLOCK interpreter.

use bitflags::bitflags;

use super::{parse_f64, parse_i64, EntityState, ParseContext};
use crate::error::MalformedNumber;
use crate::types::Vector2;

bitflags! {
    /// Block type flags (group code 70)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BlockFlags: u16 {
        const ANONYMOUS = 1;
        const HAS_ATTRIBUTES = 2;
        const XREF = 4;
        const XREF_OVERLAY = 8;
        const EXTERNALLY_DEPENDENT = 16;
        const RESOLVED_XREF = 32;
    }
}

/// A named, reusable group of entities. Registered into the block
/// dictionary when the definition closes; INSERT entities resolve it by
/// name during finalization.
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// Block name (group 2)
    pub name: Option<String>,
    /// Block handle (group 5)
    pub handle: Option<String>,
    /// Base point, in inches
    pub base: Vector2,
    /// Block type flags
    pub flags: BlockFlags,
    /// Completed member entities, in file order
    pub children: Vec<EntityState>,
}

impl Block {
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        match code {
            2 => self.name = Some(value.to_string()),
            5 => self.handle = Some(value.to_string()),
            10 => self.base.x = parse_f64(code, value)? * ctx.unit_scale,
            20 => self.base.y = parse_f64(code, value)? * ctx.unit_scale,
            70 => self.flags = BlockFlags::from_bits_retain(parse_i64(code, value)? as u16),
            _ => {}
        }
        Ok(false)
    }

    /// Whether an INSERT appearing inside this block should be promoted to
    /// the top-level draw list (anonymous block generated by a DIMENSION).
    pub fn promotes_inserts(&self) -> bool {
        self.flags.contains(BlockFlags::HAS_ATTRIBUTES)
    }
}
