//! Error types for region extraction
//!
//! Every fallible operation in the crate returns [`SegResult`]. Whether an
//! error aborts the run or only skips one region is decided by the caller;
//! see [`SegError::is_region_skip`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading annotations, cutting regions or writing output
#[derive(Debug, Error)]
pub enum SegError {
    /// Malformed coordinate data (bad pair shape, non-integer component,
    /// too few vertices)
    #[error("invalid coordinates for polygon: {0}")]
    Format(String),

    /// A region has no usable polygon source
    #[error("cannot find polygon for region {region}: {reason}")]
    MissingData { region: String, reason: String },

    /// A region has no text-content node
    #[error("cannot find text for region {0}")]
    MissingText(String),

    /// Bounding rectangle requested for a polygon without vertices
    #[error("polygon has no vertices")]
    EmptyPolygon,

    /// The padded and clamped crop rectangle has no pixels
    #[error("region {region} does not overlap the image ({width}x{height})")]
    EmptyRegion {
        region: String,
        width: u32,
        height: u32,
    },

    /// An attribute required for output naming is absent
    #[error("region {region} has no '{key}' attribute")]
    AttributeLookup { key: String, region: String },

    /// An attribute value cannot be used as part of a file name
    #[error("region {region}: '{value}' is not usable as a file name")]
    UnsafeName { region: String, value: String },

    /// I/O failure reading input or writing output
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Image decode or encode failure
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Annotation document is not well-formed XML
    #[error("failed to parse annotation {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// Metadata record could not be serialised
    #[error("failed to write metadata {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid configuration value from the command line or a config file
    #[error("configuration error: {0}")]
    Config(String),

    /// Some regions failed while running with the continue policy
    #[error("{failed} of {total} region(s) failed")]
    WorkersFailed { failed: usize, total: usize },
}

impl SegError {
    /// Whether this error only disqualifies a single region
    ///
    /// Missing polygon sources and missing text are recovered by skipping
    /// the region. Everything else is fatal.
    pub fn is_region_skip(&self) -> bool {
        matches!(self, SegError::MissingData { .. } | SegError::MissingText(_))
    }
}

/// Result type for region extraction operations
pub type SegResult<T> = Result<T, SegError>;
