//! PAGE-style XML annotation reader
//!
//! Region elements are selected by local name (`TextRegion` or
//! `TextLine`), so documents with and without the PAGE namespace are both
//! accepted. For every element the reader looks up
//!
//! - a polygon: the `Point` children (`x`/`y` attributes) of the element's
//!   `Coords` node, or failing that the compact `points` attribute of the
//!   same node;
//! - a transcription: the `Unicode` node of the element's own
//!   `TextEquiv`, or failing that the first `Unicode` descendant;
//! - all attributes of the element itself.
//!
//! Elements without a polygon source or without text are skipped. A
//! malformed coordinate is fatal.

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use roxmltree::{Document, Node};

use crate::config::Granularity;
use crate::coordinate::{Point, Polygon, PolygonMode};
use crate::errors::{SegError, SegResult};

use super::attributes::{Attributes, ID_KEY};
use super::descriptor::RegionDescriptor;

const COORDS_TAG: &str = "Coords";
const POINT_TAG: &str = "Point";
const POINTS_ATTR: &str = "points";
const TEXT_EQUIV_TAG: &str = "TextEquiv";
const UNICODE_TAG: &str = "Unicode";

/// Descriptors read from one annotation document
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    /// Usable regions in document order
    pub descriptors: Vec<RegionDescriptor>,
    /// Number of matching elements, including skipped ones
    pub candidates: usize,
}

impl RegionSet {
    /// Number of matching elements that were skipped
    pub fn skipped(&self) -> usize {
        self.candidates.saturating_sub(self.descriptors.len())
    }
}

/// Reader producing region descriptors from an annotation document
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotationReader {
    granularity: Granularity,
    polygon_mode: PolygonMode,
}

impl AnnotationReader {
    /// Create a new reader
    ///
    /// # Arguments
    /// * `granularity` - Whether regions or lines are selected
    /// * `polygon_mode` - How compact coordinate strings are interpreted
    pub fn new(granularity: Granularity, polygon_mode: PolygonMode) -> Self {
        AnnotationReader { granularity, polygon_mode }
    }

    /// Read all usable regions from an annotation file
    ///
    /// # Arguments
    /// * `path` - Path to the XML file
    ///
    /// # Returns
    /// The regions in document order, or an error if the file cannot be
    /// read or contains malformed data
    pub fn read_file(&self, path: &Path) -> SegResult<RegionSet> {
        info!("Reading annotation {}", path.display());
        let xml = fs::read_to_string(path)?;
        self.parse(&xml, path)
    }

    /// Read all usable regions from an annotation held in memory
    pub fn read_str(&self, xml: &str) -> SegResult<RegionSet> {
        self.parse(xml, Path::new("<string>"))
    }

    fn parse(&self, xml: &str, path: &Path) -> SegResult<RegionSet> {
        let document = Document::parse(xml).map_err(|source| SegError::Xml {
            path: path.to_path_buf(),
            source,
        })?;

        let element_name = self.granularity.element_name();
        let mut set = RegionSet::default();

        for (position, node) in document
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == element_name)
            .enumerate()
        {
            set.candidates += 1;
            match self.read_region(node, position + 1) {
                Ok(descriptor) => set.descriptors.push(descriptor),
                Err(SegError::MissingText(region)) => {
                    debug!("Skipping {} {}: no text", element_name, region);
                }
                Err(e) if e.is_region_skip() => warn!("Skipping {}: {}", element_name, e),
                Err(e) => return Err(e),
            }
        }

        info!("Found {} {} element(s), {} usable",
              set.candidates, element_name, set.descriptors.len());
        Ok(set)
    }

    /// Build the descriptor of a single region element
    ///
    /// # Arguments
    /// * `node` - The region element
    /// * `index` - 1-based position among the matched elements
    ///
    /// # Returns
    /// The descriptor, a skip error (`MissingData`, `MissingText`) or a
    /// fatal error
    fn read_region(&self, node: Node, index: usize) -> SegResult<RegionDescriptor> {
        let label = node
            .attribute(ID_KEY)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index));

        let polygon = self.read_polygon(node, &label)?;
        let text = read_text(node).ok_or_else(|| SegError::MissingText(label.clone()))?;
        let attributes: Attributes = node
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect();

        debug!("Region {} (index {}): {} vertices, {} attribute(s)",
               label, index, polygon.len(), attributes.len());
        Ok(RegionDescriptor::new(index, polygon, text, attributes))
    }

    /// Locate and build the polygon of a region element
    fn read_polygon(&self, node: Node, label: &str) -> SegResult<Polygon> {
        let Some(coords) = first_child_or_descendant(node, COORDS_TAG) else {
            return Err(SegError::MissingData {
                region: label.to_string(),
                reason: format!("no {} element", COORDS_TAG),
            });
        };

        let point_nodes: Vec<Node> = coords
            .children()
            .filter(|n| is_element_named(n, POINT_TAG))
            .collect();
        if !point_nodes.is_empty() {
            let points = point_nodes
                .iter()
                .map(|point| read_point(*point))
                .collect::<SegResult<Vec<Point>>>()?;
            let polygon = Polygon::from_points(points);
            if !polygon.is_valid() {
                return Err(SegError::MissingData {
                    region: label.to_string(),
                    reason: format!("only {} point(s)", polygon.len()),
                });
            }
            return Ok(polygon);
        }

        match coords.attribute(POINTS_ATTR) {
            Some(points) => Polygon::parse_with_mode(points, self.polygon_mode),
            None => Err(SegError::MissingData {
                region: label.to_string(),
                reason: format!("{} has neither {} children nor a '{}' attribute",
                                COORDS_TAG, POINT_TAG, POINTS_ATTR),
            }),
        }
    }
}

/// Parse the `x`/`y` attributes of a `Point` node
fn read_point(node: Node) -> SegResult<Point> {
    let coordinate = |key: &str| -> SegResult<i64> {
        let value = node.attribute(key).ok_or_else(|| {
            SegError::Format(format!("Point without '{}' attribute", key))
        })?;
        value
            .parse::<i64>()
            .map_err(|_| SegError::Format(format!("Point {}=\"{}\"", key, value)))
    };
    Ok(Point::new(coordinate("x")?, coordinate("y")?))
}

/// Extract the transcription of a region element
fn read_text(node: Node) -> Option<String> {
    let own = node
        .children()
        .filter(|n| is_element_named(n, TEXT_EQUIV_TAG))
        .find_map(|equiv| equiv.children().find(is_unicode));
    let unicode = own.or_else(|| node.descendants().find(is_unicode))?;

    Some(
        unicode
            .descendants()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect(),
    )
}

fn is_unicode(node: &Node) -> bool {
    node.is_element() && node.tag_name().name().eq_ignore_ascii_case(UNICODE_TAG)
}

fn is_element_named(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

fn first_child_or_descendant<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| is_element_named(n, name))
        .or_else(|| node.descendants().skip(1).find(|n| is_element_named(n, name)))
}
