//! Region structure for defining the crop area
//!
//! This module defines the Region structure that specifies a rectangular
//! area of the source image to copy for one annotated region. The
//! coordinates are in pixels and follow the typical image coordinate
//! system where (0,0) is the top-left corner of the image.

use crate::coordinate::{BoundingRectangle, Point};

/// Crop area in pixel coordinates
///
/// Represents a rectangular area defined by its top-left corner coordinates
/// and dimensions. Unlike [`BoundingRectangle`] it can only describe areas
/// inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// X-coordinate of the top-left corner (pixels from left)
    pub x: u32,

    /// Y-coordinate of the top-left corner (pixels from top)
    pub y: u32,

    /// Width of the region in pixels
    pub width: u32,

    /// Height of the region in pixels
    pub height: u32,
}

impl Region {
    /// Create a new region
    ///
    /// # Arguments
    /// * `x` - X-coordinate of the top-left corner
    /// * `y` - Y-coordinate of the top-left corner
    /// * `width` - Width of the region in pixels
    /// * `height` - Height of the region in pixels
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Region { x, y, width, height }
    }

    /// Convert a clamped rectangle into a crop region
    ///
    /// The rectangle's maximum corner is exclusive.
    ///
    /// # Returns
    /// `None` if the rectangle covers no pixels or does not fit into
    /// unsigned pixel coordinates
    pub fn from_rectangle(rect: &BoundingRectangle) -> Option<Self> {
        if rect.is_empty() {
            return None;
        }
        Some(Region {
            x: u32::try_from(rect.min.x).ok()?,
            y: u32::try_from(rect.min.y).ok()?,
            width: u32::try_from(rect.width()).ok()?,
            height: u32::try_from(rect.height()).ok()?,
        })
    }

    /// The top-left corner in source image coordinates
    pub fn origin(&self) -> Point {
        Point::new(i64::from(self.x), i64::from(self.y))
    }
}
