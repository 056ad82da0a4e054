pub mod numeric;

pub use numeric::{fix_dec, format_number, is_numeric, parse_number_strict, round_number};

/// 2D vector type backing the point algebra.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Number of decimal digits kept by [`round_number`] by default.
pub const PRECISION: i32 = 9;

/// Global tolerance for floating-point "same value" comparisons (`10^-PRECISION`).
pub const EPSILON: f64 = 1e-9;

/// Number of decimals kept when digitizing screen coordinates.
pub const DIGITIZE_PRECISION: i32 = 2;

/// Default spatial reference identifier for EWKT output (Swiss LV95 / MN95).
pub const DEFAULT_SRID: u32 = 2056;
