use std::fmt;

use serde_json::Value;

use super::point::json_string;
use super::{Angle, Point};
use crate::convert::{convert_to_line, FromRecord, LineRecord};
use crate::error::{Error, Result};

/// A segment between two distinct points, with an optional name.
///
/// The endpoints are owned copies and are never at the same location.
#[derive(Debug, Clone)]
pub struct Line {
    start: Point,
    end: Point,
    name: Option<String>,
}

impl Line {
    /// Creates a line, copying both endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `start` and `end` share a location.
    pub fn new(start: &Point, end: &Point) -> Result<Self> {
        ensure_distinct(start, end)?;
        Ok(Self {
            start: start.clone(),
            end: end.clone(),
            name: None,
        })
    }

    /// Creates a named line, copying both endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `start` and `end` share a location.
    pub fn named(start: &Point, end: &Point, name: impl Into<String>) -> Result<Self> {
        let mut line = Self::new(start, end)?;
        line.name = Some(name.into());
        Ok(line)
    }

    /// Returns an independent copy of `other`.
    #[must_use]
    pub fn from_line(other: &Line) -> Self {
        other.clone()
    }

    /// Creates an unnamed line from `[[x0, y0], [x1, y1]]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] for non-finite coordinates or
    /// coincident endpoints.
    pub fn from_array(coordinates: [[f64; 2]; 2]) -> Result<Self> {
        Self::new(
            &Point::from_array(coordinates[0])?,
            &Point::from_array(coordinates[1])?,
        )
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point {
        &self.end
    }

    /// Replaces the start point with a copy of `start`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `start` is at the end point's
    /// location; the line is left unchanged.
    pub fn set_start(&mut self, start: &Point) -> Result<()> {
        ensure_distinct(start, &self.end)?;
        self.start = start.clone();
        Ok(())
    }

    /// Replaces the end point with a copy of `end`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `end` is at the start point's
    /// location; the line is left unchanged.
    pub fn set_end(&mut self, end: &Point) -> Result<()> {
        ensure_distinct(&self.start, end)?;
        self.end = end.clone();
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

    /// Renames this line in place.
    pub fn rename(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_name(name);
        self
    }

    /// Returns the distance between the endpoints.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// Direction from start to end, in radians.
    ///
    /// # Errors
    ///
    /// See [`Point::angle_to`]. Fails only when the endpoints are so far
    /// apart that their difference overflows.
    pub fn angle(&self) -> Result<Angle> {
        self.start.angle_to(&self.end)
    }

    /// Slope `dy / dx`; `f64::INFINITY` for a vertical line.
    ///
    /// # Errors
    ///
    /// See [`Point::slope_to`]. Fails only when the endpoints are so far
    /// apart that their difference overflows.
    pub fn slope(&self) -> Result<f64> {
        self.start.slope_to(&self.end)
    }

    /// Formats as `name:((x0,y0),(x1,y1))`, or `name:(x0,y0,x1,y1)` without
    /// inner parentheses.
    #[must_use]
    pub fn to_string_with(&self, separator: &str, parens: bool, precision: i32) -> String {
        let start = self.start.to_string_with(separator, parens, precision);
        let end = self.end.to_string_with(separator, parens, precision);
        format!("{}:({start}{separator}{end})", self.name())
    }

    /// JSON record: `{"start":<point>, "end":<point>, "name":"<name>"}`.
    #[must_use]
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"start":{}, "end":{}, "name":{}}}"#,
            self.start.to_json(),
            self.end.to_json(),
            json_string(self.name())
        )
    }

    /// Whether both endpoints are at the same locations as `other`'s.
    #[must_use]
    pub fn is_same_location(&self, other: &Line) -> bool {
        self.start.is_same_location(&other.start) && self.end.is_same_location(&other.end)
    }

    /// Same location and same name.
    #[must_use]
    pub fn is_equal(&self, other: &Line) -> bool {
        self.is_same_location(other) && self.name() == other.name()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(",", true, 2))
    }
}

impl FromRecord for Line {
    type Record = LineRecord;

    fn convert(data: &Value) -> Result<LineRecord> {
        convert_to_line(data)
    }

    fn from_record(record: LineRecord) -> Result<Self> {
        let mut line = Self::new(
            &Point::from_record(record.start)?,
            &Point::from_record(record.end)?,
        )?;
        line.name = record.name;
        Ok(line)
    }
}

fn ensure_distinct(start: &Point, end: &Point) -> Result<()> {
    if start.is_same_location(end) {
        crate::log::debug!(start = %start.dump(), end = %end.dump(), "rejecting zero-length line");
        return Err(Error::range(format!(
            "line start {} should be at a different location from end {}",
            start.dump(),
            end.dump()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    fn pt(x: f64, y: f64, name: &str) -> Point {
        Point::named(x, y, name).unwrap()
    }

    #[test]
    fn constructor_stores_copies() {
        let po = pt(0.0, 0.0, "PO");
        let p1 = pt(1.0, 1.0, "P1");
        let l0 = Line::named(&po, &p1, "L0").unwrap();
        assert!(l0.start().is_equal(&po));
        assert!(l0.end().is_equal(&p1));
        assert_eq!(l0.name(), "L0");
        assert_eq!(Line::new(&po, &p1).unwrap().name(), "");
    }

    #[test]
    fn constructor_rejects_same_location() {
        let err = Line::new(&pt(0.0, 0.0, "PO"), &pt(0.0, 0.0, "PObis")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }

    #[test]
    fn setters_revalidate() {
        let mut l = Line::new(&pt(0.0, 0.0, "PO"), &pt(1.0, 1.0, "P1")).unwrap();
        l.set_start(&pt(2.0, 4.0, "P2")).unwrap();
        assert_eq!(l.start().name(), "P2");
        assert!(l.set_start(&pt(1.0, 1.0, "")).is_err());
        assert_eq!(l.start().name(), "P2");
        l.set_end(&pt(0.0, 0.0, "P3")).unwrap();
        assert!(l.set_end(&pt(2.0, 4.0, "")).is_err());
        assert_eq!(l.end().name(), "P3");
    }

    #[test]
    fn copies_are_independent() {
        let po = pt(0.0, 0.0, "PO");
        let l0 = Line::named(&po, &pt(1.0, 1.0, "P1"), "L0").unwrap();
        let mut l2 = Line::from_line(&l0);
        l2.set_start(&pt(0.5, 0.0, "moved")).unwrap();
        assert!(!l2.start().is_equal(l0.start()));
        assert_eq!(l0.start().to_array(), [0.0, 0.0]);
        assert_eq!(po.to_array(), [0.0, 0.0]);
    }

    #[test]
    fn derived_attributes() {
        let l = Line::from_array([[0.0, 0.0], [3.0, 4.0]]).unwrap();
        assert_eq!(l.length(), 5.0);
        assert_relative_eq!(l.slope().unwrap(), 4.0 / 3.0);
        assert_relative_eq!(l.angle().unwrap().to_radians(), 4.0_f64.atan2(3.0));
        let v = Line::from_array([[1.0, 0.0], [1.0, -2.0]]).unwrap();
        assert_eq!(v.slope().unwrap(), f64::INFINITY);
        assert_relative_eq!(v.angle().unwrap().to_degrees(), 270.0);
    }

    #[test]
    fn angle_and_slope_match_endpoint_queries() {
        let l = Line::from_array([[-2.0, 5.0], [4.0, -1.0]]).unwrap();
        assert_eq!(l.angle().unwrap(), l.start().angle_to(l.end()).unwrap());
        assert_eq!(l.slope().unwrap(), l.start().slope_to(l.end()).unwrap());
        let wide = Line::from_array([[-f64::MAX, 0.0], [f64::MAX, 0.0]]).unwrap();
        assert_eq!(wide.angle().unwrap_err().kind(), ErrorKind::InvalidRange);
        assert!(wide.slope().is_err());
    }

    #[test]
    fn from_array_rejects_degenerate() {
        assert!(Line::from_array([[1.0, 1.0], [1.0, 1.0]]).is_err());
        assert!(Line::from_array([[f64::NAN, 1.0], [1.0, 2.0]]).is_err());
    }

    #[test]
    fn json_decoding() {
        let l = Line::from_json(r#"{ "start": {"x":0, "y":0}, "end": {"x":1, "y":1}, "name": "L0" }"#)
            .unwrap();
        assert_eq!(l.end().to_array(), [1.0, 1.0]);
        assert_eq!(l.name(), "L0");
        let err = Line::from_json("{ start-it-up: [0, 0], end: [1, 1] }").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        let err = Line::from_json(r#"{"start": {"x":0, "y":0}, "end": {"x":0, "y":0}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }

    #[test]
    fn text_output() {
        let l = Line::named(&pt(0.0, 0.0, "PO"), &pt(1.0, 1.0, "P1"), "L0").unwrap();
        assert_eq!(l.to_string(), "L0:((0,0),(1,1))");
        assert_eq!(l.to_string_with(";", false, 2), "L0:(0;0;1;1)");
        let json = l.to_json();
        assert!(json.contains(r#""start":{"x":0,"y":0,"name":"PO"}"#));
        assert!(json.contains(r#""end":{"x":1,"y":1,"name":"P1"}"#));
        assert!(json.ends_with(r#""name":"L0"}"#));
        let back = Line::from_json(&json).unwrap();
        assert!(back.is_equal(&l));
    }

    #[test]
    fn comparisons_and_rename() {
        let a = Line::named(&pt(0.0, 0.0, ""), &pt(1.0, 1.0, ""), "A").unwrap();
        let mut b = a.clone();
        b.rename("B");
        assert!(a.is_same_location(&b));
        assert!(!a.is_equal(&b));
        b.rename("A");
        assert!(a.is_equal(&b));
    }
}
