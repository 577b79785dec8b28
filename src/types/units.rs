//! Drawing unit resolution from the `$INSUNITS` header variable.

/// Inches per millimeter, the unit factor used when no header resolves one.
pub const INCHES_PER_MM: f64 = 0.039370078740157;

/// Drawing units as encoded by the `$INSUNITS` header variable (0..=20).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    /// Code 0: no unit recorded; interpreted as millimeters or inches
    /// depending on the parser's `use_millimeters` setting.
    Unitless,
    Inches,
    Feet,
    Miles,
    Millimeters,
    Centimeters,
    Meters,
    Kilometers,
    Microinches,
    Mils,
    Yards,
    Angstroms,
    Nanometers,
    Microns,
    Decimeters,
    Decameters,
    Hectometers,
    Gigameters,
    AstronomicalUnits,
    LightYears,
    Parsecs,
}

impl Units {
    /// Resolve a `$INSUNITS` (or `$LUNITS`) integer value. Unknown codes
    /// yield `None` and leave the previously resolved unit in effect.
    pub fn from_code(code: i32) -> Option<Units> {
        Some(match code {
            0 => Units::Unitless,
            1 => Units::Inches,
            2 => Units::Feet,
            3 => Units::Miles,
            4 => Units::Millimeters,
            5 => Units::Centimeters,
            6 => Units::Meters,
            7 => Units::Kilometers,
            8 => Units::Microinches,
            9 => Units::Mils,
            10 => Units::Yards,
            11 => Units::Angstroms,
            12 => Units::Nanometers,
            13 => Units::Microns,
            14 => Units::Decimeters,
            15 => Units::Decameters,
            16 => Units::Hectometers,
            17 => Units::Gigameters,
            18 => Units::AstronomicalUnits,
            19 => Units::LightYears,
            20 => Units::Parsecs,
            _ => return None,
        })
    }

    /// Inches per drawing unit. `use_millimeters` selects the fallback
    /// interpretation of `Unitless` drawings.
    pub fn inches_per_unit(self, use_millimeters: bool) -> f64 {
        match self {
            Units::Unitless => {
                if use_millimeters {
                    INCHES_PER_MM
                } else {
                    1.0
                }
            }
            Units::Inches => 1.0,
            Units::Feet => 1.0 / 12.0,
            Units::Miles => 63360.0,
            Units::Millimeters => 0.039370078740157,
            Units::Centimeters => 0.39370078740157,
            Units::Meters => 39.370078740157,
            Units::Kilometers => 39370.078740157,
            Units::Microinches => 0.000001,
            Units::Mils => 0.001,
            Units::Yards => 36.0,
            Units::Angstroms => 3.9370078740157e-9,
            Units::Nanometers => 3.9370078740157e-8,
            Units::Microns => 3.9370078740157e-5,
            Units::Decimeters => 3.9370078740157,
            Units::Decameters => 393.70078740157,
            Units::Hectometers => 3937.007878740157,
            Units::Gigameters => 39370078740.157,
            Units::AstronomicalUnits => 5.89e+12,
            Units::LightYears => 3.725e+17,
            Units::Parsecs => 1.215e+18,
        }
    }

    /// Human-readable unit name
    pub fn label(self) -> &'static str {
        match self {
            Units::Unitless => "unitless",
            Units::Inches => "inches",
            Units::Feet => "feet",
            Units::Miles => "miles",
            Units::Millimeters => "millimeters",
            Units::Centimeters => "centimeters",
            Units::Meters => "meters",
            Units::Kilometers => "kilometers",
            Units::Microinches => "microinches",
            Units::Mils => "mils",
            Units::Yards => "yards",
            Units::Angstroms => "angstroms",
            Units::Nanometers => "nanometers",
            Units::Microns => "microns",
            Units::Decimeters => "decimeters",
            Units::Decameters => "decameters",
            Units::Hectometers => "hectometers",
            Units::Gigameters => "gigameters",
            Units::AstronomicalUnits => "astronomical units",
            Units::LightYears => "light years",
            Units::Parsecs => "parsecs",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Units::from_code(4), Some(Units::Millimeters));
        assert_eq!(Units::from_code(1), Some(Units::Inches));
        assert_eq!(Units::from_code(21), None);
        assert_eq!(Units::from_code(-1), None);
    }

    #[test]
    fn test_unitless_fallback() {
        assert_eq!(Units::Unitless.inches_per_unit(true), INCHES_PER_MM);
        assert_eq!(Units::Unitless.inches_per_unit(false), 1.0);
    }

    #[test]
    fn test_scale_table() {
        assert_eq!(Units::Millimeters.inches_per_unit(true), INCHES_PER_MM);
        assert_eq!(Units::Feet.inches_per_unit(true), 1.0 / 12.0);
        assert_eq!(Units::Yards.inches_per_unit(true), 36.0);
        assert_eq!(Units::Mils.inches_per_unit(true), 0.001);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Units::Millimeters.label(), "millimeters");
        assert_eq!(Units::AstronomicalUnits.label(), "astronomical units");
    }
}
