//! Strict conversion of loosely typed data records into the wire shapes
//! consumed by each shape's `from_object` constructor.
//!
//! A record must be a JSON object carrying every required field; missing
//! or `null` fields are rejected instead of being replaced by a zeroed
//! placeholder. Coordinates may be JSON numbers or numeric strings.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::math::parse_number_strict;

/// Wire shape of a point: `{"x": .., "y": .., "name"?: ..}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    pub name: Option<String>,
}

/// Wire shape of a line: `{"start": <point>, "end": <point>, "name"?: ..}`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRecord {
    pub start: PointRecord,
    pub end: PointRecord,
    pub name: Option<String>,
}

/// Wire shape of a triangle: `{"pA": <point>, "pB": <point>, "pC": <point>, "name"?: ..}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleRecord {
    pub p_a: PointRecord,
    pub p_b: PointRecord,
    pub p_c: PointRecord,
    pub name: Option<String>,
}

/// Wire shape of a circle: `{"center": <point>, "radius": .., "name"?: ..}`.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleRecord {
    pub center: PointRecord,
    pub radius: f64,
    pub name: Option<String>,
}

/// Decoding of a shape from a data record or from JSON text.
pub trait FromRecord: Sized {
    /// Wire shape this type is built from.
    type Record;

    /// Validates the shape of `data` and extracts the record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] for missing fields and
    /// [`Error::InvalidType`] for fields of the wrong type.
    fn convert(data: &Value) -> Result<Self::Record>;

    /// Builds the value from an already extracted record.
    ///
    /// # Errors
    ///
    /// Returns the constructor's own validation errors.
    fn from_record(record: Self::Record) -> Result<Self>;

    /// Builds the value from a data record.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::convert`] and [`Self::from_record`].
    fn from_object(data: &Value) -> Result<Self> {
        Self::from_record(Self::convert(data)?)
    }

    /// Builds the value from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] carrying `json` when the text does
    /// not parse or does not have the expected shape. Geometric invariant
    /// violations are reported as by the constructor.
    fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| {
            crate::log::debug!(json, error = %e, "rejecting unparsable JSON");
            Error::malformed(json, e.to_string())
        })?;
        let record = Self::convert(&value).map_err(|e| {
            crate::log::debug!(json, error = %e, "rejecting JSON record");
            Error::malformed(json, e.to_string())
        })?;
        Self::from_record(record)
    }
}

/// Extracts a point record.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] if `data` is null or lacks `x`/`y`,
/// [`Error::InvalidType`] if it is not an object or a field has the wrong
/// type, [`Error::InvalidNumberFormat`] for a non-numeric coordinate string.
pub fn convert_to_point(data: &Value) -> Result<PointRecord> {
    let fields = as_object(data, "point")?;
    Ok(PointRecord {
        x: number_field(fields, data, "x")?,
        y: number_field(fields, data, "y")?,
        name: name_field(fields)?,
    })
}

/// Extracts a line record.
///
/// # Errors
///
/// As [`convert_to_point`], for the record and both endpoints.
pub fn convert_to_line(data: &Value) -> Result<LineRecord> {
    let fields = as_object(data, "line")?;
    Ok(LineRecord {
        start: convert_to_point(required(fields, data, "start")?)?,
        end: convert_to_point(required(fields, data, "end")?)?,
        name: name_field(fields)?,
    })
}

/// Extracts a triangle record.
///
/// # Errors
///
/// As [`convert_to_point`], for the record and its three vertices.
pub fn convert_to_triangle(data: &Value) -> Result<TriangleRecord> {
    let fields = as_object(data, "triangle")?;
    Ok(TriangleRecord {
        p_a: convert_to_point(required(fields, data, "pA")?)?,
        p_b: convert_to_point(required(fields, data, "pB")?)?,
        p_c: convert_to_point(required(fields, data, "pC")?)?,
        name: name_field(fields)?,
    })
}

/// Extracts a circle record.
///
/// # Errors
///
/// As [`convert_to_point`], for the record and its center.
pub fn convert_to_circle(data: &Value) -> Result<CircleRecord> {
    let fields = as_object(data, "circle")?;
    Ok(CircleRecord {
        center: convert_to_point(required(fields, data, "center")?)?,
        radius: number_field(fields, data, "radius")?,
        name: name_field(fields)?,
    })
}

/// Converts every element of a JSON array into a point record.
///
/// # Errors
///
/// Returns [`Error::InvalidType`] if `data` is not an array, or the first
/// element conversion error.
pub fn convert_to_point_array(data: &Value) -> Result<Vec<PointRecord>> {
    as_array(data)?.iter().map(convert_to_point).collect()
}

/// Converts every element of a JSON array into a line record.
///
/// # Errors
///
/// See [`convert_to_point_array`].
pub fn convert_to_line_array(data: &Value) -> Result<Vec<LineRecord>> {
    as_array(data)?.iter().map(convert_to_line).collect()
}

/// Converts every element of a JSON array into a triangle record.
///
/// # Errors
///
/// See [`convert_to_point_array`].
pub fn convert_to_triangle_array(data: &Value) -> Result<Vec<TriangleRecord>> {
    as_array(data)?.iter().map(convert_to_triangle).collect()
}

fn as_object<'a>(data: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    match data {
        Value::Object(fields) => Ok(fields),
        Value::Null => Err(Error::malformed("null", format!("expected a {what} record"))),
        other => Err(Error::invalid_type(format!(
            "expected a {what} record, got {other}"
        ))),
    }
}

fn as_array(data: &Value) -> Result<&Vec<Value>> {
    data.as_array()
        .ok_or_else(|| Error::invalid_type(format!("expected an array, got {data}")))
}

fn required<'a>(fields: &'a Map<String, Value>, data: &Value, key: &str) -> Result<&'a Value> {
    match fields.get(key) {
        Some(Value::Null) | None => Err(Error::malformed(
            data.to_string(),
            format!("missing required field \"{key}\""),
        )),
        Some(value) => Ok(value),
    }
}

fn number_field(fields: &Map<String, Value>, data: &Value, key: &str) -> Result<f64> {
    match required(fields, data, key)? {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            Error::invalid_type(format!("field \"{key}\" is not representable as f64"))
        }),
        Value::String(s) => parse_number_strict(s),
        other => Err(Error::invalid_type(format!(
            "field \"{key}\" must be a number, got {other}"
        ))),
    }
}

fn name_field(fields: &Map<String, Value>) -> Result<Option<String>> {
    match fields.get("name") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(Error::invalid_type(format!(
            "field \"name\" must be a string, got {other}"
        ))),
    }
}
