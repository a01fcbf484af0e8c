pub mod annotation;
pub mod api;
pub mod commands;
pub mod config;
pub mod coordinate;
pub mod errors;
pub mod extractor;
pub mod utils;

pub use crate::api::Segregs;

pub use annotation::{AnnotationReader, Attributes, RegionDescriptor, RegionSet};
pub use config::{ExtractionConfig, FailurePolicy, Granularity};
pub use coordinate::{BoundingRectangle, Point, Polygon, PolygonMode};
pub use errors::{SegError, SegResult};
pub use extractor::{ExtractionScheduler, ExtractionSummary, RegionOutput, RegionRasterizer};
