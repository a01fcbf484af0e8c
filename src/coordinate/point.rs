//! Point structure for representing pixel coordinates

use serde::Serialize;
use std::fmt;

/// A point in image pixel space
///
/// Serialises as `{"X": x, "Y": y}` in metadata records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Point {
    /// X coordinate (column, growing to the right)
    #[serde(rename = "X")]
    pub x: i64,
    /// Y coordinate (row, growing downwards)
    #[serde(rename = "Y")]
    pub y: i64,
}

impl Point {
    /// Create a new point
    pub fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Point::new(x, y)
    }
}
