//! Run configuration
//!
//! All tunables of an extraction run live in one immutable
//! [`ExtractionConfig`] that is passed down to the scheduler and shared by
//! reference with every worker. Values come from built-in defaults, an
//! optional TOML file and the command line, in increasing precedence.

use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::coordinate::PolygonMode;
use crate::errors::{SegError, SegResult};

/// Keys accepted in a TOML configuration file
const CONFIG_KEYS: [&str; 6] = [
    "padding",
    "workers",
    "lines",
    "two_point_rectangles",
    "keep_going",
    "progress",
];

/// Which annotation elements are extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    /// `TextRegion` elements, written as `<prefix>_<id>.*`
    #[default]
    Region,
    /// `TextLine` elements, written as `<prefix>/<index>.*`
    Line,
}

impl Granularity {
    /// Local element name selected by this granularity
    pub fn element_name(&self) -> &'static str {
        match self {
            Granularity::Region => "TextRegion",
            Granularity::Line => "TextLine",
        }
    }
}

/// What happens when a region fails to rasterize or write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop dispatching and fail the run with the first error
    #[default]
    Abort,
    /// Log the failure, finish the remaining regions, fail at the end
    Continue,
}

/// Immutable configuration for one extraction run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Pixels added around each region's bounding rectangle
    pub padding: u32,
    /// Number of concurrent workers, at least one
    pub workers: usize,
    /// Region or line extraction
    pub granularity: Granularity,
    /// Construction mode for compact coordinate strings
    pub polygon_mode: PolygonMode,
    /// Handling of per-region failures
    pub failure_policy: FailurePolicy,
    /// Whether to draw a progress bar
    pub show_progress: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            padding: 0,
            workers: default_workers(),
            granularity: Granularity::default(),
            polygon_mode: PolygonMode::default(),
            failure_policy: FailurePolicy::default(),
            show_progress: false,
        }
    }
}

/// Number of workers used when none is configured
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

impl ExtractionConfig {
    /// Override fields with the values of a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML file
    ///
    /// # Returns
    /// The configuration or an error if the file is unreadable or invalid
    pub fn merge_toml_file(self, path: &Path) -> SegResult<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path)?;
        self.merge_toml(&content)
    }

    /// Override fields with the values of a TOML document
    ///
    /// Unknown keys are ignored with a warning; keys with the wrong type
    /// are rejected.
    pub fn merge_toml(mut self, content: &str) -> SegResult<Self> {
        let toml_value: toml::Value = match content.parse() {
            Ok(value) => value,
            Err(e) => return Err(SegError::Config(format!("Failed to parse TOML: {}", e))),
        };
        let Some(table) = toml_value.as_table() else {
            return Err(SegError::Config("configuration must be a TOML table".to_string()));
        };

        for key in table.keys() {
            if !CONFIG_KEYS.contains(&key.as_str()) {
                warn!("Ignoring unknown configuration key '{}'", key);
            }
        }

        if let Some(value) = table.get("padding") {
            let padding = toml_integer(value, "padding")?;
            self.padding = u32::try_from(padding)
                .map_err(|_| SegError::Config(format!("padding out of range: {}", padding)))?;
        }
        if let Some(value) = table.get("workers") {
            let workers = toml_integer(value, "workers")?;
            self.workers = usize::try_from(workers)
                .map_err(|_| SegError::Config(format!("workers out of range: {}", workers)))?;
        }
        if let Some(value) = table.get("lines") {
            self.granularity = if toml_bool(value, "lines")? {
                Granularity::Line
            } else {
                Granularity::Region
            };
        }
        if let Some(value) = table.get("two_point_rectangles") {
            self.polygon_mode = if toml_bool(value, "two_point_rectangles")? {
                PolygonMode::TwoPointRectangle
            } else {
                PolygonMode::Strict
            };
        }
        if let Some(value) = table.get("keep_going") {
            self.failure_policy = if toml_bool(value, "keep_going")? {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            };
        }
        if let Some(value) = table.get("progress") {
            self.show_progress = toml_bool(value, "progress")?;
        }

        Ok(self)
    }

    /// Check invariants that the type system does not enforce
    pub fn validate(&self) -> SegResult<()> {
        if self.workers == 0 {
            return Err(SegError::Config("workers must be at least 1".to_string()));
        }
        Ok(())
    }
}

fn toml_integer(value: &toml::Value, key: &str) -> SegResult<i64> {
    value
        .as_integer()
        .ok_or_else(|| SegError::Config(format!("'{}' must be an integer", key)))
}

fn toml_bool(value: &toml::Value, key: &str) -> SegResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| SegError::Config(format!("'{}' must be a boolean", key)))
}
