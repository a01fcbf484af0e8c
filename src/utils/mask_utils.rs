//! Image masking utilities
//!
//! This module provides the polygon mask applied to every cropped region:
//! pixels outside the region's outline are painted white.

use image::{Rgba, RgbaImage};

use crate::coordinate::{Point, Polygon};

/// Fill colour for pixels outside the polygon
pub const MASK_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Apply a polygon mask to a cropped image
///
/// Pixel `(x, y)` of `image` corresponds to `(origin.x + x, origin.y + y)`
/// in the source image, which is the space the polygon is defined in.
/// Pixels whose source coordinate lies outside the polygon are
/// overwritten with [`MASK_FILL`]; inside pixels are left untouched.
///
/// # Arguments
/// * `image` - The cropped image, modified in place
/// * `polygon` - Outline in source image coordinates
/// * `origin` - Source coordinate of the crop's top-left pixel
///
/// # Returns
/// The number of masked pixels
pub fn apply_polygon_mask(image: &mut RgbaImage, polygon: &Polygon, origin: Point) -> usize {
    let mut masked = 0;
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let source = Point::new(origin.x + i64::from(x), origin.y + i64::from(y));
        if !polygon.contains(source) {
            *pixel = MASK_FILL;
            masked += 1;
        }
    }
    masked
}
