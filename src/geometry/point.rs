use std::cmp::Ordering;
use std::fmt;

use nalgebra::Rotation2;
use serde_json::Value;

use super::Angle;
use crate::convert::{convert_to_point, FromRecord, PointRecord};
use crate::error::{Error, Result};
use crate::math::{
    format_number, parse_number_strict, round_number, Vector2, DEFAULT_SRID, EPSILON, PRECISION,
};

/// A point (or position vector) in 2D cartesian space, with an optional name.
///
/// Coordinates are always finite. Operations documented as returning a new
/// point leave `self` untouched and copy its name into the result; the
/// `move_*` family mutates in place and returns `&mut Self` for chaining.
#[derive(Debug, Clone, Default)]
pub struct Point {
    x: f64,
    y: f64,
    name: Option<String>,
}

impl Point {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Point = Point::raw(0.0, 0.0);

    /// Unit vector along the x axis `(1, 0)`.
    pub const UNIT_X: Point = Point::raw(1.0, 0.0);

    /// Unit vector along the y axis `(0, 1)`.
    pub const UNIT_Y: Point = Point::raw(0.0, 1.0);

    const fn raw(x: f64, y: f64) -> Self {
        Self { x, y, name: None }
    }

    /// Creates an unnamed point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if a coordinate is NaN or infinite.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        check_finite("x", x)?;
        check_finite("y", y)?;
        Ok(Self::raw(x, y))
    }

    /// Creates a named point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if a coordinate is NaN or infinite.
    pub fn named(x: f64, y: f64, name: impl Into<String>) -> Result<Self> {
        let mut point = Self::new(x, y)?;
        point.name = Some(name.into());
        Ok(point)
    }

    /// Builds a point from a vector, carrying over `name`.
    fn with_vector(v: Vector2, name: Option<String>) -> Result<Self> {
        let mut point = Self::new(v.x, v.y)?;
        point.name = name;
        Ok(point)
    }

    /// Creates a point from polar coordinates around the origin.
    ///
    /// Components within [`EPSILON`] of zero snap to exactly `0`; the others
    /// are rounded to [`PRECISION`] decimals.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `radius` is not finite.
    pub fn from_polar(radius: f64, theta: Angle, name: Option<&str>) -> Result<Self> {
        check_finite("radius", radius)?;
        let angle = theta.to_radians();
        let snap = |v: f64| {
            if v.abs() <= EPSILON {
                0.0
            } else {
                round_number(v, PRECISION)
            }
        };
        let mut point = Self::new(snap(radius * angle.cos()), snap(radius * angle.sin()))?;
        point.name = name.map(str::to_owned);
        Ok(point)
    }

    /// Returns an independent copy of `other`, name included.
    #[must_use]
    pub fn from_point(other: &Point) -> Self {
        other.clone()
    }

    /// Creates an unnamed point from `[x, y]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if a coordinate is NaN or infinite.
    pub fn from_array(coordinates: [f64; 2]) -> Result<Self> {
        Self::new(coordinates[0], coordinates[1])
    }

    /// Creates an unnamed point from a slice holding exactly `[x, y]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidType`] if the slice does not hold two values,
    /// [`Error::InvalidRange`] if a coordinate is not finite.
    pub fn from_slice(coordinates: &[f64]) -> Result<Self> {
        match *coordinates {
            [x, y] => Self::new(x, y),
            _ => Err(Error::invalid_type(format!(
                "a point needs exactly 2 coordinates [x, y], got {}",
                coordinates.len()
            ))),
        }
    }

    /// Returns the x coordinate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y coordinate.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Sets the x coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `value` is not finite.
    pub fn set_x(&mut self, value: f64) -> Result<()> {
        check_finite("x", value)?;
        self.x = value;
        Ok(())
    }

    /// Sets the y coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `value` is not finite.
    pub fn set_y(&mut self, value: f64) -> Result<()> {
        check_finite("y", value)?;
        self.y = value;
        Ok(())
    }

    /// Sets the x coordinate from a decimal string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNumberFormat`] if `input` is not a finite number.
    pub fn set_x_str(&mut self, input: &str) -> Result<()> {
        self.x = parse_number_strict(input)?;
        Ok(())
    }

    /// Sets the y coordinate from a decimal string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNumberFormat`] if `input` is not a finite number.
    pub fn set_y_str(&mut self, input: &str) -> Result<()> {
        self.y = parse_number_strict(input)?;
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

    /// Renames this point in place.
    pub fn rename(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_name(name);
        self
    }

    fn vector(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    // ── serialization ──

    /// Debugging representation with full precision: `Point[name](x, y)`.
    #[must_use]
    pub fn dump(&self) -> String {
        format!("Point[{}]({}, {})", self.name(), self.x, self.y)
    }

    /// Formats the coordinates rounded to `precision` decimals, joined by
    /// `separator` and optionally wrapped in parentheses.
    #[must_use]
    pub fn to_string_with(&self, separator: &str, parens: bool, precision: i32) -> String {
        let x = format_number(round_number(self.x, precision));
        let y = format_number(round_number(self.y, precision));
        if parens {
            format!("({x}{separator}{y})")
        } else {
            format!("{x}{separator}{y}")
        }
    }

    /// Returns the coordinates as `[x, y]`.
    #[must_use]
    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// OGC Well-Known Text: `POINT(x y)`.
    #[must_use]
    pub fn to_wkt(&self) -> String {
        format!("POINT({} {})", format_number(self.x), format_number(self.y))
    }

    /// PostGIS Extended WKT: `SRID=<srid>;POINT(x y)`.
    #[must_use]
    pub fn to_ewkt(&self, srid: u32) -> String {
        format!("SRID={srid};{}", self.to_wkt())
    }

    /// [`Self::to_ewkt`] with [`DEFAULT_SRID`].
    #[must_use]
    pub fn to_default_ewkt(&self) -> String {
        self.to_ewkt(DEFAULT_SRID)
    }

    /// GeoJSON geometry: `{"type":"Point","coordinates":[x,y]}`.
    #[must_use]
    pub fn to_geo_json(&self) -> String {
        format!(
            r#"{{"type":"Point","coordinates":[{},{}]}}"#,
            format_number(self.x),
            format_number(self.y)
        )
    }

    /// JSON record: `{"x":<x>,"y":<y>,"name":"<name>"}`. Coordinates are not
    /// rounded, so [`FromRecord::from_json`] restores them exactly.
    #[must_use]
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"x":{},"y":{},"name":{}}}"#,
            format_number(self.x),
            format_number(self.y),
            json_string(self.name())
        )
    }

    // ── position vector ──

    /// Length of the vector from the origin to this point.
    #[must_use]
    pub fn distance_from_origin(&self) -> f64 {
        length(self.vector())
    }

    /// Angle in radians between the x axis and the position vector, in `(-π, π]`.
    #[must_use]
    pub fn angle_rad(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Angle in degrees between the x axis and the position vector, in `(-180, 180]`.
    #[must_use]
    pub fn angle_deg(&self) -> f64 {
        self.angle_rad().to_degrees()
    }

    // ── vector algebra ──

    /// Vector sum `self + other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if the sum overflows.
    pub fn add(&self, other: &Point) -> Result<Point> {
        Self::with_vector(self.vector() + other.vector(), self.name.clone())
    }

    /// Vector difference `self - other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if the difference overflows.
    pub fn subtract(&self, other: &Point) -> Result<Point> {
        Self::with_vector(self.vector() - other.vector(), self.name.clone())
    }

    /// Scales the vector by `factor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `factor` is not finite or the
    /// product overflows.
    pub fn multiply(&self, factor: f64) -> Result<Point> {
        check_finite("factor", factor)?;
        Self::with_vector(self.vector() * factor, self.name.clone())
    }

    /// Divides the vector by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `|divisor| <= EPSILON` or the
    /// quotient overflows.
    pub fn divide(&self, divisor: f64) -> Result<Point> {
        if divisor.is_nan() || divisor.abs() <= EPSILON {
            return Err(Error::range(format!("division by zero (divisor {divisor})")));
        }
        Self::with_vector(self.vector() / divisor, self.name.clone())
    }

    /// Scalar dot product.
    #[must_use]
    pub fn dot(&self, other: &Point) -> f64 {
        self.vector().dot(&other.vector())
    }

    /// Scalar 2D cross product `self.x * other.y - self.y * other.x`.
    #[must_use]
    pub fn cross(&self, other: &Point) -> f64 {
        self.vector().perp(&other.vector())
    }

    /// Unit vector with the same direction, or the origin when this vector's
    /// length is within [`EPSILON`] of zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if the result is not finite.
    pub fn normalize(&self) -> Result<Point> {
        let v = self.vector();
        let unit = if length(v) <= EPSILON {
            Vector2::zeros()
        } else {
            unit_vector(v)
        };
        Self::with_vector(unit, self.name.clone())
    }

    /// Rotates counter-clockwise around the origin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if the rotated coordinates overflow.
    pub fn rotate(&self, angle: Angle) -> Result<Point> {
        let v = Rotation2::new(angle.to_radians()) * self.vector();
        Self::with_vector(v, self.name.clone())
    }

    /// Rotates counter-clockwise around `center`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if the rotated coordinates overflow.
    pub fn rotate_around(&self, angle: Angle, center: &Point) -> Result<Point> {
        let c = center.vector();
        let v = Rotation2::new(angle.to_radians()) * (self.vector() - c) + c;
        Self::with_vector(v, self.name.clone())
    }

    /// Orthogonal projection onto the infinite line through `p` and `q`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `p` and `q` share a location.
    pub fn project(&self, p: &Point, q: &Point) -> Result<Point> {
        let (origin, dir) = line_direction(p, q)?;
        let unit = unit_vector(dir);
        let t = (self.vector() - origin).dot(&unit);
        Self::with_vector(origin + unit * t, self.name.clone())
    }

    /// Mirror image across the infinite line through `p` and `q`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `p` and `q` share a location.
    pub fn reflect(&self, p: &Point, q: &Point) -> Result<Point> {
        let foot = self.project(p, q)?.vector();
        Self::with_vector(foot * 2.0 - self.vector(), self.name.clone())
    }

    /// Point halfway between `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if the result is not finite.
    pub fn mid_point(&self, other: &Point) -> Result<Point> {
        let v = self.vector() * 0.5 + other.vector() * 0.5;
        Self::with_vector(v, self.name.clone())
    }

    /// Point at `length` from `other`, perpendicular to the segment
    /// `self → other` (counter-clockwise side for positive `length`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `self` and `other` share a location
    /// or `length` is not finite.
    pub fn perpendicular(&self, other: &Point, length: f64) -> Result<Point> {
        check_finite("length", length)?;
        let (_, dir) = line_direction(self, other)?;
        let unit = unit_vector(dir);
        let normal = Vector2::new(-unit.y, unit.x);
        Self::with_vector(other.vector() + normal * length, self.name.clone())
    }

    // ── in-place movers ──

    /// Moves this point to `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if a coordinate is not finite; the
    /// point is left unchanged.
    pub fn move_to(&mut self, x: f64, y: f64) -> Result<&mut Self> {
        check_finite("x", x)?;
        check_finite("y", y)?;
        self.x = x;
        self.y = y;
        Ok(self)
    }

    /// Moves this point by `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if the displacement or the resulting
    /// coordinates are not finite; the point is left unchanged.
    pub fn move_rel(&mut self, dx: f64, dy: f64) -> Result<&mut Self> {
        check_finite("dx", dx)?;
        check_finite("dy", dy)?;
        self.move_to(self.x + dx, self.y + dy)
    }

    /// Moves this point to `[x, y]`.
    ///
    /// # Errors
    ///
    /// See [`Self::move_to`].
    pub fn move_to_array(&mut self, coordinates: [f64; 2]) -> Result<&mut Self> {
        self.move_to(coordinates[0], coordinates[1])
    }

    /// Moves this point by `[dx, dy]`.
    ///
    /// # Errors
    ///
    /// See [`Self::move_rel`].
    pub fn move_rel_array(&mut self, delta: [f64; 2]) -> Result<&mut Self> {
        self.move_rel(delta[0], delta[1])
    }

    /// Moves this point by the polar displacement `(radius, theta)`.
    ///
    /// # Errors
    ///
    /// See [`Self::from_polar`] and [`Self::move_rel`].
    pub fn move_rel_polar(&mut self, radius: f64, theta: Angle) -> Result<&mut Self> {
        let delta = Self::from_polar(radius, theta, None)?;
        self.move_rel(delta.x, delta.y)
    }

    // ── copy movers ──

    /// Returns a copy displaced by `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// See [`Self::move_rel`].
    pub fn copy_rel(&self, dx: f64, dy: f64) -> Result<Point> {
        let mut copy = self.clone();
        copy.move_rel(dx, dy)?;
        Ok(copy)
    }

    /// Returns a copy displaced by `[dx, dy]`.
    ///
    /// # Errors
    ///
    /// See [`Self::move_rel`].
    pub fn copy_rel_array(&self, delta: [f64; 2]) -> Result<Point> {
        self.copy_rel(delta[0], delta[1])
    }

    /// Returns a copy displaced by the polar vector `(radius, theta)`.
    ///
    /// # Errors
    ///
    /// See [`Self::move_rel_polar`].
    pub fn copy_rel_polar(&self, radius: f64, theta: Angle) -> Result<Point> {
        let mut copy = self.clone();
        copy.move_rel_polar(radius, theta)?;
        Ok(copy)
    }

    // ── distances and directions ──

    /// Euclidean distance, reported as exactly `0` when within [`EPSILON`].
    #[must_use]
    pub fn distance_to(&self, other: &Point) -> f64 {
        let d = length(self.vector() - other.vector());
        if d <= EPSILON {
            0.0
        } else {
            d
        }
    }

    /// Squared Euclidean distance.
    #[must_use]
    pub fn distance_squared_to(&self, other: &Point) -> f64 {
        (self.vector() - other.vector()).norm_squared()
    }

    /// Perpendicular distance to the infinite line through `p` and `q`.
    ///
    /// Falls back to the distance to `p` when `p` and `q` coincide.
    #[must_use]
    pub fn distance_to_segment(&self, p: &Point, q: &Point) -> f64 {
        let dir = q.vector() - p.vector();
        if length(dir) <= EPSILON {
            return self.distance_to(p);
        }
        unit_vector(dir).perp(&(self.vector() - p.vector())).abs()
    }

    /// Direction from this point to `other`, as an angle in radians.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if both points share a location.
    pub fn angle_to(&self, other: &Point) -> Result<Angle> {
        let (_, dir) = line_direction(self, other)?;
        Angle::from_radians(dir.y.atan2(dir.x))
    }

    /// Slope `dy / dx` towards `other`; `f64::INFINITY` for a vertical run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if both points share a location.
    pub fn slope_to(&self, other: &Point) -> Result<f64> {
        let (_, dir) = line_direction(self, other)?;
        if dir.x.abs() <= EPSILON {
            Ok(f64::INFINITY)
        } else {
            Ok(dir.y / dir.x)
        }
    }

    // ── comparison ──

    /// Whether both coordinates are within [`EPSILON`] of `other`'s.
    #[must_use]
    pub fn is_same_location(&self, other: &Point) -> bool {
        (self.x - other.x).abs() <= EPSILON && (self.y - other.y).abs() <= EPSILON
    }

    /// Whether both coordinates are within `tolerance` of `other`'s.
    /// An absent `other` is never at the same location.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `tolerance` is negative or NaN.
    pub fn is_same_location_within(&self, other: Option<&Point>, tolerance: f64) -> Result<bool> {
        if tolerance.is_nan() || tolerance < 0.0 {
            return Err(Error::range(format!(
                "tolerance must not be negative, got {tolerance}"
            )));
        }
        Ok(other.is_some_and(|o| {
            (self.x - o.x).abs() <= tolerance && (self.y - o.y).abs() <= tolerance
        }))
    }

    /// Same location and same name.
    #[must_use]
    pub fn is_equal(&self, other: &Point) -> bool {
        self.is_same_location(other) && self.name() == other.name()
    }

    /// Lexicographic order on `(x, y)`, coordinates within [`EPSILON`]
    /// counting as equal.
    #[must_use]
    pub fn compare(&self, other: &Point) -> Ordering {
        let cmp = |a: f64, b: f64| {
            if (a - b).abs() <= EPSILON {
                Ordering::Equal
            } else if a < b {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        };
        cmp(self.x, other.x).then_with(|| cmp(self.y, other.y))
    }

    /// Whether [`Self::compare`] is `Less`.
    #[must_use]
    pub fn less_than(&self, other: &Point) -> bool {
        self.compare(other) == Ordering::Less
    }

    /// Whether [`Self::compare`] is not `Greater`.
    #[must_use]
    pub fn less_than_or_equal(&self, other: &Point) -> bool {
        self.compare(other) != Ordering::Greater
    }

    /// Whether [`Self::compare`] is `Greater`.
    #[must_use]
    pub fn greater_than(&self, other: &Point) -> bool {
        self.compare(other) == Ordering::Greater
    }

    /// Whether [`Self::compare`] is not `Less`.
    #[must_use]
    pub fn greater_than_or_equal(&self, other: &Point) -> bool {
        self.compare(other) != Ordering::Less
    }

    // ── containment ──

    /// Whether this point lies inside or on the circle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `radius` is negative or NaN.
    pub fn is_inside_circle(&self, center: &Point, radius: f64) -> Result<bool> {
        if radius.is_nan() || radius < 0.0 {
            return Err(Error::range(format!(
                "radius must not be negative, got {radius}"
            )));
        }
        Ok(self.distance_to(center) <= radius)
    }

    /// Whether this point lies inside or on the axis-aligned rectangle with
    /// opposite corners `p1` and `p2`.
    #[must_use]
    pub fn is_inside_rectangle(&self, p1: &Point, p2: &Point) -> bool {
        let (min_x, max_x) = (p1.x.min(p2.x), p1.x.max(p2.x));
        let (min_y, max_y) = (p1.y.min(p2.y), p1.y.max(p2.y));
        (min_x..=max_x).contains(&self.x) && (min_y..=max_y).contains(&self.y)
    }

    // ── predicates over three points ──

    /// Twice the signed area of the triangle `p1 p2 p3`; positive when the
    /// vertices run counter-clockwise.
    #[must_use]
    pub fn determinant(p1: &Point, p2: &Point, p3: &Point) -> f64 {
        (p2.vector() - p1.vector()).perp(&(p3.vector() - p1.vector()))
    }

    /// Whether `|determinant| <= EPSILON`.
    #[must_use]
    pub fn is_collinear(p1: &Point, p2: &Point, p3: &Point) -> bool {
        Self::determinant(p1, p2, p3).abs() <= EPSILON
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(",", true, 2))
    }
}

impl FromRecord for Point {
    type Record = PointRecord;

    fn convert(data: &Value) -> Result<PointRecord> {
        convert_to_point(data)
    }

    fn from_record(record: PointRecord) -> Result<Self> {
        let mut point = Self::new(record.x, record.y)?;
        point.name = record.name;
        Ok(point)
    }
}

fn check_finite(what: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        crate::log::debug!(what, value, "rejecting non-finite value");
        Err(Error::range(format!("{what} must be a finite number, got {value}")))
    }
}

/// Euclidean length without intermediate overflow.
fn length(v: Vector2) -> f64 {
    v.x.hypot(v.y)
}

/// Unit vector of a non-zero `v`, scaled by its largest component first so
/// that squaring cannot overflow or underflow.
fn unit_vector(v: Vector2) -> Vector2 {
    let scale = v.x.abs().max(v.y.abs());
    if scale <= 0.0 || !scale.is_finite() {
        return Vector2::zeros();
    }
    let scaled = v / scale;
    scaled / scaled.norm()
}

/// Returns `p` and the vector `q - p`, rejecting coincident points and
/// directions that overflow.
fn line_direction(p: &Point, q: &Point) -> Result<(Vector2, Vector2)> {
    if p.is_same_location(q) {
        return Err(Error::range(format!(
            "direction undefined: {} and {} share a location",
            p.dump(),
            q.dump()
        )));
    }
    let dir = q.vector() - p.vector();
    check_finite("direction x", dir.x)?;
    check_finite("direction y", dir.y)?;
    Ok((p.vector(), dir))
}

/// Quotes and escapes `text` as a JSON string literal.
pub(crate) fn json_string(text: &str) -> String {
    Value::from(text).to_string()
}
