//! 2D geometry primitives: points, angles, lines, triangles and circles in
//! cartesian space, with vector algebra, polar conversions, distance, angle
//! and area queries, and text serialization (JSON, WKT/EWKT, GeoJSON).
//!
//! Every floating-point "same value" test compares against [`EPSILON`].

pub mod convert;
pub mod error;
pub mod geometry;
pub mod log;
pub mod math;

pub use convert::FromRecord;
pub use error::{Error, ErrorKind, Result};
pub use geometry::{Angle, AngleUnit, Circle, Line, Point, Triangle};
pub use math::{
    fix_dec, is_numeric, parse_number_strict, round_number, DEFAULT_SRID, DIGITIZE_PRECISION,
    EPSILON, PRECISION,
};
