//! Region image extraction
//!
//! This module cuts masked region images out of a decoded page and drives
//! the concurrent write-out of a whole annotation.

mod region;
mod rasterizer;
mod scheduler;

// Public exports
pub use region::Region;
pub use rasterizer::{decode_image, RegionRasterizer};
pub use scheduler::{ExtractionScheduler, ExtractionSummary, RegionOutput};
