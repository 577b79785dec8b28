//! SECTION interpreter.

use super::ParseContext;
use crate::document::Header;
use crate::error::MalformedNumber;

/// Interprets a SECTION ... ENDSEC range. Group 2 names the section; group 9
/// opens a named header-variable slot and subsequent groups store into it.
/// Only the HEADER section's variables are consumed downstream, where the
/// driver resolves `$INSUNITS`/`$LUNITS` when the section ends.
#[derive(Debug, Clone, Default)]
pub struct Section {
    /// Section name from group 2 (HEADER, TABLES, BLOCKS, ENTITIES, ...)
    pub s_type: Option<String>,
    /// Accumulated header variables
    pub header: Header,
}

impl Section {
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        _ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        if code == 2 && self.s_type.is_none() {
            self.s_type = Some(value.to_string());
        } else if code == 9 {
            self.header.open_variable(value);
        } else {
            self.header.add_value(code, value);
        }
        Ok(false)
    }

    /// Whether this is the HEADER section
    pub fn is_header(&self) -> bool {
        self.s_type.as_deref() == Some("HEADER")
    }
}
