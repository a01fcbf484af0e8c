use std::path::Path;

use image::RgbaImage;
use log::info;

use crate::annotation::{AnnotationReader, RegionDescriptor, RegionSet};
use crate::config::ExtractionConfig;
use crate::errors::SegResult;
use crate::extractor::{decode_image, ExtractionScheduler, ExtractionSummary, RegionRasterizer};
use crate::utils::logger::Logger;

/// Main interface to the segregs library
pub struct Segregs {
    config: ExtractionConfig,
    logger: Logger,
}

impl Segregs {
    /// Create a new Segregs instance
    ///
    /// # Arguments
    /// * `config` - Configuration used for every operation
    ///
    /// # Returns
    /// A Segregs instance or `SegError::Config` if the configuration is invalid
    pub fn new(config: ExtractionConfig) -> SegResult<Self> {
        config.validate()?;
        Ok(Segregs {
            config,
            logger: Logger::disabled(),
        })
    }

    /// Record every written region in a run log file
    ///
    /// # Arguments
    /// * `log_file` - Path of the log file, truncated if it exists
    pub fn with_log_file(mut self, log_file: &Path) -> SegResult<Self> {
        self.logger = Logger::new(log_file)?;
        Ok(self)
    }

    /// The configuration used by this instance
    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Read the region descriptors of an annotation file
    ///
    /// # Arguments
    /// * `annotation_path` - PAGE XML file
    ///
    /// # Returns
    /// The usable regions in document order
    pub fn read_regions(&self, annotation_path: &Path) -> SegResult<RegionSet> {
        AnnotationReader::new(self.config.granularity, self.config.polygon_mode).read_file(annotation_path)
    }

    /// Decode a page image
    pub fn load_image(&self, image_path: &Path) -> SegResult<RgbaImage> {
        decode_image(image_path)
    }

    /// Cut and mask a single region out of a decoded image
    ///
    /// # Arguments
    /// * `image` - The decoded page image
    /// * `descriptor` - The region to cut
    ///
    /// # Returns
    /// The masked crop
    pub fn rasterize(&self, image: &RgbaImage, descriptor: &RegionDescriptor) -> SegResult<RgbaImage> {
        RegionRasterizer::new(self.config.padding).rasterize(image, descriptor)
    }

    /// Extract every region of a page and write the outputs
    ///
    /// # Arguments
    /// * `annotation_path` - PAGE XML file
    /// * `image_path` - Page image
    /// * `out_base` - Output directory (line mode) or prefix (region mode)
    ///
    /// # Returns
    /// A summary of the run or an error
    pub fn extract(&self, annotation_path: &Path, image_path: &Path,
                   out_base: &Path) -> SegResult<ExtractionSummary> {
        info!("Extracting {} into {}", annotation_path.display(), out_base.display());
        ExtractionScheduler::new(&self.config, &self.logger).run(annotation_path, image_path, out_base)
    }
}
