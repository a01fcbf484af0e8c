//! Bounding rectangle structure for defining crop areas

use std::fmt;

use super::point::Point;

/// An axis-aligned rectangle in pixel space
///
/// Computed from a polygon's extrema. When used as a crop area the
/// maximum corner is exclusive, so a rectangle `(0,0)-(W,H)` covers an
/// entire `W`x`H` image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingRectangle {
    /// Minimum corner
    pub min: Point,
    /// Maximum corner
    pub max: Point,
}

impl BoundingRectangle {
    /// Create a new bounding rectangle from its corners
    pub fn new(min: Point, max: Point) -> Self {
        BoundingRectangle { min, max }
    }

    /// Get the width of the rectangle, zero if the corners are inverted
    pub fn width(&self) -> i64 {
        self.max.x.saturating_sub(self.min.x).max(0)
    }

    /// Get the height of the rectangle, zero if the corners are inverted
    pub fn height(&self) -> i64 {
        self.max.y.saturating_sub(self.min.y).max(0)
    }

    /// Whether the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Check if a point lies within the rectangle, borders included
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
            point.y >= self.min.y && point.y <= self.max.y
    }

    /// Grow the rectangle by `padding` pixels and clamp it to an image
    ///
    /// The minimum corner is floored at `(0,0)` and the maximum corner is
    /// capped at `(image_width, image_height)`. Each edge is clamped on
    /// its own, so a rectangle near one border grows asymmetrically.
    ///
    /// # Arguments
    /// * `padding` - Pixels to add on every side
    /// * `image_width` - Width of the source image
    /// * `image_height` - Height of the source image
    ///
    /// # Returns
    /// The padded and clamped rectangle
    pub fn pad_and_clamp(&self, padding: u32, image_width: u32, image_height: u32) -> Self {
        let padding = i64::from(padding);
        let min = Point::new(
            self.min.x.saturating_sub(padding).max(0),
            self.min.y.saturating_sub(padding).max(0),
        );
        let max = Point::new(
            self.max.x.saturating_add(padding).min(i64::from(image_width)),
            self.max.y.saturating_add(padding).min(i64::from(image_height)),
        );
        BoundingRectangle { min, max }
    }
}

impl fmt::Display for BoundingRectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
