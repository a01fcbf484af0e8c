//! Closed polygons describing annotated regions
//!
//! A polygon is an ordered list of vertices; the last vertex connects back
//! to the first. Topology is not checked, self-intersecting outlines are
//! accepted as they come.
//!
//! Two construction modes exist for the compact `"x1,y1 x2,y2 ..."`
//! encoding, see [`PolygonMode`]. The default is [`PolygonMode::Strict`].

use std::fmt;
use std::str::FromStr;

use crate::errors::{SegError, SegResult};

use super::bbox::BoundingRectangle;
use super::point::Point;

/// Minimum number of vertices of a usable polygon
pub const MIN_VERTICES: usize = 3;

/// How the compact coordinate string is turned into a polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolygonMode {
    /// At least three points are required
    #[default]
    Strict,
    /// Two points are read as opposite corners of an axis-aligned
    /// rectangle; three or more points behave like `Strict`
    TwoPointRectangle,
}

/// A closed polygon in image pixel space
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from already parsed vertices
    ///
    /// No validation happens here; use [`Polygon::is_valid`] when the
    /// three-vertex minimum matters.
    pub fn from_points(points: Vec<Point>) -> Self {
        Polygon { points }
    }

    /// Parse a compact coordinate string in strict mode
    ///
    /// # Arguments
    /// * `coordinates` - Space separated `x,y` pairs, e.g. `"1,2 3,4 5,6"`
    ///
    /// # Returns
    /// The polygon, or `SegError::Format` for malformed input or fewer
    /// than three points
    pub fn parse(coordinates: &str) -> SegResult<Self> {
        Self::parse_with_mode(coordinates, PolygonMode::Strict)
    }

    /// Parse a compact coordinate string with an explicit construction mode
    ///
    /// Pairs are separated by single spaces and components by a comma.
    /// Every pair must have exactly two integer components.
    ///
    /// # Arguments
    /// * `coordinates` - Space separated `x,y` pairs
    /// * `mode` - Whether two points may stand for a rectangle
    ///
    /// # Returns
    /// The polygon or `SegError::Format`
    pub fn parse_with_mode(coordinates: &str, mode: PolygonMode) -> SegResult<Self> {
        let invalid = || SegError::Format(coordinates.to_string());

        let mut points = Vec::new();
        for pair in coordinates.split(' ') {
            let xy: Vec<&str> = pair.split(',').collect();
            if xy.len() != 2 {
                return Err(invalid());
            }
            let x = xy[0].parse::<i64>().map_err(|_| invalid())?;
            let y = xy[1].parse::<i64>().map_err(|_| invalid())?;
            points.push(Point::new(x, y));
        }

        if mode == PolygonMode::TwoPointRectangle && points.len() == 2 {
            let (a, b) = (points[0], points[1]);
            points = vec![a, Point::new(b.x, a.y), b, Point::new(a.x, b.y)];
        }

        if points.len() < MIN_VERTICES {
            return Err(invalid());
        }
        Ok(Polygon { points })
    }

    /// The vertices in their original order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no vertices
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the polygon has enough vertices to enclose an area
    pub fn is_valid(&self) -> bool {
        self.points.len() >= MIN_VERTICES
    }

    /// Compute the minimal axis-aligned rectangle containing all vertices
    ///
    /// # Returns
    /// The rectangle, or `SegError::EmptyPolygon` if there are no vertices
    pub fn bounding_rectangle(&self) -> SegResult<BoundingRectangle> {
        let (first, rest) = self.points.split_first().ok_or(SegError::EmptyPolygon)?;

        let mut min = *first;
        let mut max = *first;
        for point in rest {
            min.x = min.x.min(point.x);
            min.y = min.y.min(point.y);
            max.x = max.x.max(point.x);
            max.y = max.y.max(point.y);
        }
        Ok(BoundingRectangle::new(min, max))
    }

    /// Check whether a point lies inside the polygon
    ///
    /// Casts a ray from the point towards positive X and counts edge
    /// crossings; an odd count means inside. Points outside the bounding
    /// rectangle are rejected up front. Classification of points exactly
    /// on the outline is not defined and may go either way.
    pub fn contains(&self, point: Point) -> bool {
        let Ok(rect) = self.bounding_rectangle() else {
            return false;
        };
        if !rect.contains(point) {
            return false;
        }

        let mut inside = false;
        let mut j = self.points.len() - 1;
        for (i, pi) in self.points.iter().enumerate() {
            let pj = self.points[j];
            if (pi.y > point.y) != (pj.y > point.y) {
                // widened before subtracting; integer division truncates towards zero
                let crossing = (i128::from(pj.x) - i128::from(pi.x))
                    * (i128::from(point.y) - i128::from(pi.y))
                    / (i128::from(pj.y) - i128::from(pi.y))
                    + i128::from(pi.x);
                if i128::from(point.x) < crossing {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

impl fmt::Display for Polygon {
    /// Renders the vertices as `(x,y)-(x,y)-...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{}", point)?;
        }
        Ok(())
    }
}

impl FromStr for Polygon {
    type Err = SegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Polygon::parse(s)
    }
}
