//! Geometry in image pixel space
//!
//! This module provides the point, rectangle and polygon types used to
//! describe annotated regions and their crop areas.

mod bbox;
mod point;
mod polygon;

// Re-export key types
pub use self::bbox::BoundingRectangle;
pub use self::point::Point;
pub use self::polygon::{Polygon, PolygonMode, MIN_VERTICES};
