mod angle;
mod circle;
mod line;
mod point;
mod triangle;

pub use angle::{Angle, AngleUnit};
pub use circle::Circle;
pub use line::Line;
pub use point::Point;
pub use triangle::Triangle;
