//! Parse result and header variable map.

use indexmap::IndexMap;

use crate::geometry::Shape;
use crate::notification::NotificationCollection;
use crate::types::{BoundingBox2D, Units};

/// Header variables accumulated from the HEADER section. Group 9 opens a
/// named slot; subsequent groups store into it keyed by group code.
#[derive(Debug, Clone, Default)]
pub struct Header {
    variables: IndexMap<String, IndexMap<i32, String>>,
    open: Option<String>,
}

impl Header {
    /// Whether no variables were recorded
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub(crate) fn open_variable(&mut self, name: &str) {
        self.variables.insert(name.to_string(), IndexMap::new());
        self.open = Some(name.to_string());
    }

    pub(crate) fn add_value(&mut self, code: i32, value: &str) {
        if let Some(name) = &self.open {
            if let Some(slot) = self.variables.get_mut(name) {
                slot.insert(code, value.to_string());
            }
        }
    }

    /// First recorded value of a variable, e.g. `variable("$ACADVER")`
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables
            .get(name)?
            .values()
            .next()
            .map(String::as_str)
    }

    /// Value of a variable under a specific group code
    pub fn variable_code(&self, name: &str, code: i32) -> Option<&str> {
        self.variables.get(name)?.get(&code).map(String::as_str)
    }
}

/// The result of a parse: resolved shapes plus observable metadata.
#[derive(Debug, Clone)]
pub struct Drawing {
    /// Shapes in file order, in inches, Y-flipped and fit to the requested
    /// size window
    pub shapes: Vec<Shape>,
    /// Union bounds of the shapes before fitting, in inches; `None` when
    /// nothing was drawable
    pub bounds: Option<BoundingBox2D>,
    /// Drawing units resolved from the header, if any
    pub units: Option<Units>,
    /// Whether fit scaling was applied
    pub scaled: bool,
    /// Non-fatal diagnostics collected during the parse
    pub notifications: NotificationCollection,
    pub(crate) header: Header,
}

impl Drawing {
    /// Whether the parse produced no drawable geometry
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Human-readable unit name, `"unknown"` when the header resolved none
    pub fn units_label(&self) -> &'static str {
        self.units.map(Units::label).unwrap_or("unknown")
    }

    /// Look up a header variable's first value
    pub fn header_variable(&self, name: &str) -> Option<&str> {
        self.header.variable(name)
    }
}
