use std::f64::consts::PI;

use serde_json::Value;

use super::point::json_string;
use super::Point;
use crate::convert::{convert_to_circle, CircleRecord, FromRecord};
use crate::error::{Error, Result};

/// A circle given by its center and a strictly positive radius.
#[derive(Debug, Clone)]
pub struct Circle {
    center: Point,
    radius: f64,
    name: Option<String>,
}

impl Circle {
    /// Creates a circle, copying `center`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `radius` is not a positive finite number.
    pub fn new(center: &Point, radius: f64) -> Result<Self> {
        check_radius(radius)?;
        Ok(Self {
            center: center.clone(),
            radius,
            name: None,
        })
    }

    /// Creates a circle with an optional name.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_center_radius(center: &Point, radius: f64, name: Option<&str>) -> Result<Self> {
        let mut circle = Self::new(center, radius)?;
        circle.name = name.map(str::to_owned);
        Ok(circle)
    }

    /// Creates a circle from `[x, y, radius]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `values` does not hold exactly three
    /// numbers, the center is not finite or the radius is not positive.
    pub fn from_array(values: &[f64], name: Option<&str>) -> Result<Self> {
        let [x, y, radius] = *values else {
            return Err(Error::range(format!(
                "a circle needs exactly 3 numbers [x, y, radius], got {}",
                values.len()
            )));
        };
        Self::from_center_radius(&Point::new(x, y)?, radius, name)
    }

    /// Returns the center.
    #[must_use]
    pub fn center(&self) -> &Point {
        &self.center
    }

    /// Replaces the center with a copy of `center`.
    pub fn set_center(&mut self, center: &Point) {
        self.center = center.clone();
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sets the radius.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `radius` is not a positive finite
    /// number; the circle is left unchanged.
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        check_radius(radius)?;
        self.radius = radius;
        Ok(())
    }

    /// Returns the name, or an empty string when unset.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Sets the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Returns the area `πr²`.
    #[must_use]
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// Circumference `2πr`.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        2.0 * PI * self.radius
    }

    /// Whether `point` lies inside or on this circle.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        // the radius is positive, so the containment check cannot fail
        matches!(point.is_inside_circle(&self.center, self.radius), Ok(true))
    }

    /// JSON record: `{"center":<point>, "radius":<r>, "name":"<name>"}`.
    #[must_use]
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"center":{}, "radius":{}, "name":{}}}"#,
            self.center.to_json(),
            crate::math::format_number(self.radius),
            json_string(self.name())
        )
    }
}

impl FromRecord for Circle {
    type Record = CircleRecord;

    fn convert(data: &Value) -> Result<CircleRecord> {
        convert_to_circle(data)
    }

    fn from_record(record: CircleRecord) -> Result<Self> {
        let center = Point::from_record(record.center)?;
        Self::from_center_radius(&center, record.radius, record.name.as_deref())
    }
}

fn check_radius(radius: f64) -> Result<()> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        crate::log::debug!(radius, "rejecting circle radius");
        Err(Error::range(format!(
            "radius should be a positive number, got {radius}"
        )))
    }
}
