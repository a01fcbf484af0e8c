//! Region rasterizer
//!
//! Cuts one region out of an already decoded page image: the polygon's
//! bounding rectangle is padded, clamped to the image, copied pixel by
//! pixel and then masked with the polygon.

use std::path::Path;

use image::{imageops, ImageReader, RgbaImage};
use log::{debug, info};

use crate::annotation::RegionDescriptor;
use crate::coordinate::BoundingRectangle;
use crate::errors::{SegError, SegResult};
use crate::utils::mask_utils;

use super::region::Region;

/// Decode a page image into an RGBA pixel grid
///
/// The format is guessed from the file content, so any format the
/// `image` crate was built with (PNG, JPEG, TIFF, ...) is accepted.
///
/// # Arguments
/// * `path` - Path to the image file
///
/// # Returns
/// The decoded image or an I/O or decode error
pub fn decode_image(path: &Path) -> SegResult<RgbaImage> {
    info!("Decoding image {}", path.display());
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!("Decoded {}x{} image ({:?})", image.width(), image.height(), image.color());
    Ok(image.to_rgba8())
}

/// Produces masked crops for region descriptors
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionRasterizer {
    /// Pixels added around each bounding rectangle
    padding: u32,
}

impl RegionRasterizer {
    /// Create a new rasterizer
    ///
    /// # Arguments
    /// * `padding` - Pixels added on every side of a region's bounding box
    pub fn new(padding: u32) -> Self {
        RegionRasterizer { padding }
    }

    /// Compute the padded crop rectangle of a region, clamped to an image
    ///
    /// # Arguments
    /// * `descriptor` - The region
    /// * `image_width` - Width of the source image
    /// * `image_height` - Height of the source image
    ///
    /// # Returns
    /// The crop rectangle (maximum corner exclusive)
    pub fn crop_rectangle(&self, descriptor: &RegionDescriptor,
                          image_width: u32, image_height: u32) -> SegResult<BoundingRectangle> {
        let rect = descriptor.polygon.bounding_rectangle()?;
        Ok(rect.pad_and_clamp(self.padding, image_width, image_height))
    }

    /// Cut and mask one region
    ///
    /// The output has exactly the size of the padded, clamped rectangle.
    /// Pixels are copied unscaled; pixels outside the polygon become white.
    ///
    /// # Arguments
    /// * `image` - The decoded source image
    /// * `descriptor` - The region to cut
    ///
    /// # Returns
    /// The masked crop, or `SegError::EmptyRegion` if the region does not
    /// overlap the image
    pub fn rasterize(&self, image: &RgbaImage, descriptor: &RegionDescriptor) -> SegResult<RgbaImage> {
        let (width, height) = image.dimensions();
        let rect = self.crop_rectangle(descriptor, width, height)?;
        let region = Region::from_rectangle(&rect).ok_or_else(|| SegError::EmptyRegion {
            region: descriptor.label(),
            width,
            height,
        })?;

        debug!("Region {}: crop x={}, y={}, width={}, height={}",
               descriptor.label(), region.x, region.y, region.width, region.height);

        let mut crop = imageops::crop_imm(image, region.x, region.y, region.width, region.height).to_image();
        let masked = mask_utils::apply_polygon_mask(&mut crop, &descriptor.polygon, region.origin());

        debug!("Region {}: masked {} of {} pixels",
               descriptor.label(), masked, u64::from(region.width) * u64::from(region.height));
        Ok(crop)
    }
}
