//! Annotation reading
//!
//! This module turns a PAGE-style XML annotation document into an ordered
//! list of [`RegionDescriptor`]s, one per usable region or line element.

mod attributes;
mod descriptor;
mod reader;
#[cfg(test)]
mod tests;

pub use attributes::{Attributes, ID_KEY};
pub use descriptor::RegionDescriptor;
pub use reader::{AnnotationReader, RegionSet};
