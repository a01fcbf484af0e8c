//! Region descriptor structure
//!
//! A descriptor is everything needed to cut and write one region. It is
//! built once by the annotation reader and read-only afterwards.

use crate::coordinate::Polygon;

use super::attributes::Attributes;

/// One extractable region or line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionDescriptor {
    /// 1-based position among the matched elements in document order
    pub index: usize,
    /// Outline in source image coordinates
    pub polygon: Polygon,
    /// Transcription
    pub text: String,
    /// Attributes of the region element in source order
    pub attributes: Attributes,
}

impl RegionDescriptor {
    /// Create a new descriptor
    pub fn new(index: usize, polygon: Polygon, text: String, attributes: Attributes) -> Self {
        RegionDescriptor { index, polygon, text, attributes }
    }

    /// The region identifier attribute, if any
    pub fn id(&self) -> Option<&str> {
        self.attributes.id()
    }

    /// The region type attribute, if any
    pub fn region_type(&self) -> Option<&str> {
        self.attributes.region_type()
    }

    /// The language attribute, if any
    pub fn language(&self) -> Option<&str> {
        self.attributes.language()
    }

    /// Human readable label for log messages: the id or `#<index>`
    pub fn label(&self) -> String {
        match self.id() {
            Some(id) => id.to_string(),
            None => format!("#{}", self.index),
        }
    }
}
