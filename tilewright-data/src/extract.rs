//! Per-tile feature extraction.
//!
//! Points are kept when their location lies in the closed tile window. Ways
//! are kept when their bounding box overlaps the window; this broad phase
//! admits some features that never reach the tile, which the renderer draws
//! harmlessly outside the viewport. Areas assembled from relations are tested
//! polygon by polygon against the window rectangle.

use geo::{Area, BoundingRect, Intersects, LineString, Point, Polygon, Rect};
use log::debug;
use thiserror::Error;
use tilewright_core::{
    Category, Classification, Feature, FeatureBucket, GeoBounds, Geometry, Tags, classify,
};

use crate::ids::{ElementKind, describe_element_id};
use crate::model::{ElementSink, MalformedElement, OsmArea, OsmNode, OsmSource, OsmWay, SourceError};

/// A single element that could not become a feature. Extraction continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {reason}", describe_element_id(*.element))]
pub struct FeatureParseError {
    /// Encoded element id.
    pub element: u64,
    /// Element type.
    pub kind: ElementKind,
    /// What went wrong.
    pub reason: String,
}

/// Features for one tile plus the elements skipped on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Classified features bucketed by category, in scan order.
    pub bucket: FeatureBucket,
    /// Per-element failures for classified elements touching the tile.
    pub issues: Vec<FeatureParseError>,
}

/// Scan `source` and keep the features relevant to `window`.
///
/// # Errors
/// Returns [`SourceError`] when the dataset itself cannot be read; individual
/// malformed elements are reported in [`Extraction::issues`] instead.
///
/// # Examples
/// ```
/// use tilewright_core::{Category, GeoBounds};
/// use tilewright_data::{MemorySource, extract_features};
///
/// let source = MemorySource::new()
///     .node(1, 43.6405, -79.3795, &[("amenity", "hospital"), ("name", "St. X")]);
/// let window = GeoBounds::new(43.65, 43.64, -79.37, -79.38)?;
/// let extraction = extract_features(&source, &window)?;
/// assert_eq!(extraction.bucket.features(Category::Healthcare).len(), 1);
/// assert!(extraction.issues.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn extract_features(
    source: &dyn OsmSource,
    window: &GeoBounds,
) -> Result<Extraction, SourceError> {
    let mut extractor = TileExtractor {
        window: *window,
        rect: window.to_rect(),
        extraction: Extraction::default(),
    };
    source.scan(&mut extractor)?;
    debug!(
        "{}: kept {} features, skipped {} elements",
        source.describe(),
        extractor.extraction.bucket.len(),
        extractor.extraction.issues.len()
    );
    Ok(extractor.extraction)
}

struct TileExtractor {
    window: GeoBounds,
    rect: Rect<f64>,
    extraction: Extraction,
}

impl TileExtractor {
    fn push(&mut self, id: u64, geometry: Geometry, tags: Tags, class: Classification) {
        self.extraction
            .bucket
            .push(Feature::new(id, geometry, tags, class));
    }

    fn reject(&mut self, element: u64, kind: ElementKind, reason: impl Into<String>) {
        self.extraction.issues.push(FeatureParseError {
            element,
            kind,
            reason: reason.into(),
        });
    }
}

impl ElementSink for TileExtractor {
    fn node(&mut self, node: OsmNode) {
        let Some(class) = classify(&node.tags) else {
            return;
        };
        if class.category == Category::Roads {
            return;
        }
        if !self.window.contains(node.location.y, node.location.x) {
            return;
        }
        self.push(
            node.id,
            Geometry::Point(Point::from(node.location)),
            node.tags,
            class,
        );
    }

    fn way(&mut self, way: OsmWay) {
        let Some(class) = classify(&way.tags) else {
            return;
        };
        let line = LineString::new(way.coords);
        let Some(extent) = line.bounding_rect() else {
            return;
        };
        if !self.window.overlaps_rect(&extent) {
            return;
        }
        match way_geometry(line, way.closed, &class) {
            Ok(geometry) => self.push(way.id, geometry, way.tags, class),
            Err(reason) => self.reject(way.id, ElementKind::Way, reason),
        }
    }

    fn area(&mut self, area: OsmArea) {
        let Some(class) = classify(&area.tags) else {
            return;
        };
        for polygon in area.polygons {
            let touches = polygon
                .bounding_rect()
                .is_some_and(|extent| self.window.overlaps_rect(&extent));
            if !touches {
                continue;
            }
            if let Err(reason) = validate_polygon(&polygon) {
                self.reject(area.id, ElementKind::Relation, reason);
                continue;
            }
            if polygon.intersects(&self.rect) {
                self.push(
                    area.id,
                    Geometry::Polygon(polygon),
                    area.tags.clone(),
                    class.clone(),
                );
            }
        }
    }

    fn malformed(&mut self, element: MalformedElement) {
        if classify(&element.tags).is_none() {
            return;
        }
        let touches = element
            .extent
            .is_none_or(|extent| self.window.overlaps_rect(&extent));
        if touches {
            self.reject(element.id, element.kind, element.reason);
        }
    }
}

/// Decide how a classified way is drawn.
///
/// Linear styles stay lines even when closed (a roundabout is still a road).
/// Closed ways of area styles become polygons. Buildings and parks must be
/// closed; other open ways degrade to lines.
fn way_geometry(
    line: LineString<f64>,
    closed: bool,
    class: &Classification,
) -> Result<Geometry, String> {
    if line.0.len() < 2 {
        return Err(format!("line has {} coordinates", line.0.len()));
    }
    if line.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err("line has non-finite coordinates".to_owned());
    }
    if class.is_linear() {
        return Ok(Geometry::LineString(line));
    }
    if closed {
        let polygon = Polygon::new(line, Vec::new());
        validate_polygon(&polygon)?;
        return Ok(Geometry::Polygon(polygon));
    }
    match class.category {
        Category::Buildings | Category::Parks => {
            Err(format!("{} area is not closed", class.category))
        }
        _ => Ok(Geometry::LineString(line)),
    }
}

fn validate_polygon(polygon: &Polygon<f64>) -> Result<(), String> {
    let ring = polygon.exterior();
    if ring.0.len() < 4 {
        return Err(format!(
            "polygon ring has {} coordinates, need at least 4",
            ring.0.len()
        ));
    }
    if ring.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err("polygon has non-finite coordinates".to_owned());
    }
    if polygon.unsigned_area() <= 0.0 {
        return Err("polygon has zero area".to_owned());
    }
    Ok(())
}
