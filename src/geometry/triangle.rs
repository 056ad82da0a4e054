use std::fmt;

use serde_json::Value;

use super::point::json_string;
use super::{Angle, Point};
use crate::convert::{convert_to_triangle, FromRecord, TriangleRecord};
use crate::error::{Error, Result};
use crate::math::EPSILON;

/// A non-degenerate triangle with vertices `pA`, `pB`, `pC`.
///
/// Sides are named after the opposite vertex: `a = |pB pC|`,
/// `b = |pA pC|`, `c = |pA pB|`. The vertices are owned copies, pairwise
/// distinct and never collinear.
#[derive(Debug, Clone)]
pub struct Triangle {
    p_a: Point,
    p_b: Point,
    p_c: Point,
    name: Option<String>,
}

impl Triangle {
    /// Creates a triangle, copying the three vertices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if two vertices share a location or
    /// the three are collinear.
    pub fn new(p_a: &Point, p_b: &Point, p_c: &Point) -> Result<Self> {
        validate(p_a, p_b, p_c)?;
        Ok(Self {
            p_a: p_a.clone(),
            p_b: p_b.clone(),
            p_c: p_c.clone(),
            name: None,
        })
    }

    /// Creates a named triangle, copying the three vertices.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn named(p_a: &Point, p_b: &Point, p_c: &Point, name: impl Into<String>) -> Result<Self> {
        let mut triangle = Self::new(p_a, p_b, p_c)?;
        triangle.name = Some(name.into());
        Ok(triangle)
    }

    /// Returns an independent copy of `other`.
    #[must_use]
    pub fn from_triangle(other: &Triangle) -> Self {
        other.clone()
    }

    /// Creates an unnamed triangle from `[[xA, yA], [xB, yB], [xC, yC]]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] for non-finite coordinates or a
    /// degenerate triangle.
    pub fn from_array(coordinates: [[f64; 2]; 3]) -> Result<Self> {
        Self::new(
            &Point::from_array(coordinates[0])?,
            &Point::from_array(coordinates[1])?,
            &Point::from_array(coordinates[2])?,
        )
    }

    /// Returns vertex A.
    #[must_use]
    pub fn p_a(&self) -> &Point {
        &self.p_a
    }

    /// Returns vertex B.
    #[must_use]
    pub fn p_b(&self) -> &Point {
        &self.p_b
    }

    /// Returns vertex C.
    #[must_use]
    pub fn p_c(&self) -> &Point {
        &self.p_c
    }

    /// Replaces vertex `pA` with a copy of `p`.
    ///
    /// # Errors
    ///
    /// See [`Self::new`]; the triangle is left unchanged on error.
    pub fn set_p_a(&mut self, p: &Point) -> Result<()> {
        validate(p, &self.p_b, &self.p_c)?;
        self.p_a = p.clone();
        Ok(())
    }

    /// Replaces vertex `pB` with a copy of `p`.
    ///
    /// # Errors
    ///
    /// See [`Self::new`]; the triangle is left unchanged on error.
    pub fn set_p_b(&mut self, p: &Point) -> Result<()> {
        validate(&self.p_a, p, &self.p_c)?;
        self.p_b = p.clone();
        Ok(())
    }

    /// Replaces vertex `pC` with a copy of `p`.
    ///
    /// # Errors
    ///
    /// See [`Self::new`]; the triangle is left unchanged on error.
    pub fn set_p_c(&mut self, p: &Point) -> Result<()> {
        validate(&self.p_a, &self.p_b, p)?;
        self.p_c = p.clone();
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

    /// Renames this triangle in place.
    pub fn rename(&mut self, name: impl Into<String>) -> &mut Self {
        self.set_name(name);
        self
    }

    /// Side opposite `pA`.
    #[must_use]
    pub fn a(&self) -> f64 {
        self.p_b.distance_to(&self.p_c)
    }

    /// Side opposite `pB`.
    #[must_use]
    pub fn b(&self) -> f64 {
        self.p_a.distance_to(&self.p_c)
    }

    /// Side opposite `pC`.
    #[must_use]
    pub fn c(&self) -> f64 {
        self.p_a.distance_to(&self.p_b)
    }

    /// Interior angle at `pA`, in radians.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if a side length overflows.
    pub fn angle_a(&self) -> Result<Angle> {
        law_of_cosines(self.a(), self.b(), self.c())
    }

    /// Interior angle at `pB`, in radians.
    ///
    /// # Errors
    ///
    /// See [`Self::angle_a`].
    pub fn angle_b(&self) -> Result<Angle> {
        law_of_cosines(self.b(), self.a(), self.c())
    }

    /// Interior angle at `pC`, in radians.
    ///
    /// # Errors
    ///
    /// See [`Self::angle_a`].
    pub fn angle_c(&self) -> Result<Angle> {
        law_of_cosines(self.c(), self.a(), self.b())
    }

    /// Area by the shoelace formula.
    #[must_use]
    pub fn area(&self) -> f64 {
        Point::determinant(&self.p_a, &self.p_b, &self.p_c).abs() / 2.0
    }

    /// Returns the sum of the three sides.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.a() + self.b() + self.c()
    }

    /// Whether all sides are equal within [`EPSILON`].
    #[must_use]
    pub fn is_equilateral(&self) -> bool {
        let (a, b, c) = (self.a(), self.b(), self.c());
        (a - b).abs() <= EPSILON && (b - c).abs() <= EPSILON && (a - c).abs() <= EPSILON
    }

    /// Whether three lengths satisfy the strict triangle inequality.
    #[must_use]
    pub fn is_valid_triangle_sides(a: f64, b: f64, c: f64) -> bool {
        a + b > c && a + c > b && b + c > a
    }

    /// Formats the three vertices, optionally prefixed with `name:`.
    ///
    /// With `parens` the output reads `T:((xA,yA),(xB,yB),(xC,yC))`,
    /// without it `T:(xA,yA,xB,yB,xC,yC)`.
    #[must_use]
    pub fn to_string_with(
        &self,
        separator: &str,
        parens: bool,
        precision: i32,
        with_name: bool,
    ) -> String {
        let vertices = [&self.p_a, &self.p_b, &self.p_c]
            .iter()
            .map(|p| p.to_string_with(separator, parens, precision))
            .collect::<Vec<_>>()
            .join(separator);
        if with_name {
            format!("{}:({vertices})", self.name())
        } else {
            format!("({vertices})")
        }
    }

    /// JSON record: `{"pA":<point>, "pB":<point>, "pC":<point>, "name":"<name>"}`.
    #[must_use]
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"pA":{}, "pB":{}, "pC":{}, "name":{}}}"#,
            self.p_a.to_json(),
            self.p_b.to_json(),
            self.p_c.to_json(),
            json_string(self.name())
        )
    }

    /// Whether each vertex is at the same location as `other`'s matching vertex.
    #[must_use]
    pub fn is_same_location(&self, other: &Triangle) -> bool {
        self.p_a.is_same_location(&other.p_a)
            && self.p_b.is_same_location(&other.p_b)
            && self.p_c.is_same_location(&other.p_c)
    }

    /// Same location and same name.
    #[must_use]
    pub fn is_equal(&self, other: &Triangle) -> bool {
        self.is_same_location(other) && self.name() == other.name()
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(",", true, 2, true))
    }
}

impl FromRecord for Triangle {
    type Record = TriangleRecord;

    fn convert(data: &Value) -> Result<TriangleRecord> {
        convert_to_triangle(data)
    }

    fn from_record(record: TriangleRecord) -> Result<Self> {
        let mut triangle = Self::new(
            &Point::from_record(record.p_a)?,
            &Point::from_record(record.p_b)?,
            &Point::from_record(record.p_c)?,
        )?;
        triangle.name = record.name;
        Ok(triangle)
    }
}

/// Angle opposite side `opposite`, given the two adjacent sides.
fn law_of_cosines(opposite: f64, adj1: f64, adj2: f64) -> Result<Angle> {
    // sides are scaled into [0, 1] so the squares cannot overflow
    let scale = opposite.max(adj1).max(adj2);
    let (o, a, b) = (opposite / scale, adj1 / scale, adj2 / scale);
    let cos = (a * a + b * b - o * o) / (2.0 * a * b);
    Angle::from_radians(cos.clamp(-1.0, 1.0).acos())
}

fn validate(p_a: &Point, p_b: &Point, p_c: &Point) -> Result<()> {
    let pairs = [
        ("pA", p_a, "pB", p_b),
        ("pA", p_a, "pC", p_c),
        ("pB", p_b, "pC", p_c),
    ];
    for (label, p, other, q) in pairs {
        if p.is_same_location(q) {
            crate::log::debug!(vertex = label, other, "rejecting coincident triangle vertices");
            return Err(Error::range(format!(
                "{label}:'{}' should be at a different location from {other}:'{}'",
                p.dump(),
                q.dump()
            )));
        }
    }
    if Point::is_collinear(p_a, p_b, p_c) {
        crate::log::debug!("rejecting collinear triangle vertices");
        return Err(Error::range(format!(
            "degenerate triangle: {}, {} and {} are collinear",
            p_a.dump(),
            p_b.dump(),
            p_c.dump()
        )));
    }
    Ok(())
}
