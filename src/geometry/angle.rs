use std::f64::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Unit in which an [`Angle`] stores its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AngleUnit {
    Radians,
    #[default]
    Degrees,
}

impl AngleUnit {
    /// Length of one full turn in this unit.
    #[must_use]
    pub fn full_turn(self) -> f64 {
        match self {
            Self::Radians => TAU,
            Self::Degrees => 360.0,
        }
    }

    /// Converts `value`, expressed in `self`, into `target`.
    #[must_use]
    pub fn convert(self, value: f64, target: AngleUnit) -> f64 {
        match (self, target) {
            (Self::Degrees, Self::Radians) => value * PI / 180.0,
            (Self::Radians, Self::Degrees) => value * 180.0 / PI,
            _ => value,
        }
    }
}

impl FromStr for AngleUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "radians" => Ok(Self::Radians),
            "degrees" => Ok(Self::Degrees),
            other => Err(Error::invalid_type(format!(
                "angle unit must be \"radians\" or \"degrees\", got \"{other}\""
            ))),
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Radians => "radians",
            Self::Degrees => "degrees",
        })
    }
}

/// A scalar angle kept normalized to its unit's canonical range.
///
/// The magnitude always lies in `[0, 360)` for degrees and `[0, 2π)` for
/// radians. The unit is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    magnitude: f64,
    unit: AngleUnit,
}

impl Angle {
    /// Creates a new angle, normalizing `magnitude` into the unit's range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `magnitude` is NaN or infinite.
    pub fn new(magnitude: f64, unit: AngleUnit) -> Result<Self> {
        Ok(Self {
            magnitude: normalize(magnitude, unit)?,
            unit,
        })
    }

    /// Creates an angle measured in radians.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_radians(value: f64) -> Result<Self> {
        Self::new(value, AngleUnit::Radians)
    }

    /// Creates an angle measured in degrees.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_degrees(value: f64) -> Result<Self> {
        Self::new(value, AngleUnit::Degrees)
    }

    /// Returns the normalized magnitude, in [`Self::unit`].
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Replaces the magnitude and normalizes it again.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `value` is not finite; the angle is
    /// left unchanged.
    pub fn set_magnitude(&mut self, value: f64) -> Result<()> {
        self.magnitude = normalize(value, self.unit)?;
        Ok(())
    }

    /// Returns the unit the magnitude is expressed in.
    #[must_use]
    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// Returns the angle in radians, whatever the stored unit.
    #[must_use]
    pub fn to_radians(&self) -> f64 {
        self.unit.convert(self.magnitude, AngleUnit::Radians)
    }

    /// Returns the angle in degrees, whatever the stored unit.
    #[must_use]
    pub fn to_degrees(&self) -> f64 {
        self.unit.convert(self.magnitude, AngleUnit::Degrees)
    }

    /// Returns a new angle offset by `delta`, expressed in `unit`.
    ///
    /// The result keeps this angle's unit; `delta` is converted first when
    /// the units differ.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `delta` is not finite.
    pub fn add(&self, delta: f64, unit: AngleUnit) -> Result<Self> {
        Self::new(self.magnitude + unit.convert(delta, self.unit), self.unit)
    }
}

impl Default for Angle {
    fn default() -> Self {
        Self {
            magnitude: 0.0,
            unit: AngleUnit::default(),
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

/// Reduces `value` into `[0, full_turn)` for `unit`.
fn normalize(value: f64, unit: AngleUnit) -> Result<f64> {
    if !value.is_finite() {
        crate::log::debug!(value, "rejecting non-finite angle");
        return Err(Error::range(format!(
            "angle magnitude must be a finite number, got {value}"
        )));
    }
    let turn = unit.full_turn();
    let mut reduced = value % turn;
    if reduced < 0.0 {
        reduced += turn;
    }
    // -tiny % turn + turn rounds up to exactly one turn
    if reduced >= turn {
        reduced -= turn;
    }
    Ok(reduced)
}
