//! Classified geometries and their per-category buckets.

use std::collections::BTreeMap;

use geo::{BoundingRect, LineString, Point, Polygon, Rect};

use crate::category::Category;
use crate::classify::Classification;

/// Raw OpenStreetMap key/value pairs. Ordered so iteration is deterministic.
pub type Tags = BTreeMap<String, String>;

/// Geometry of a feature. Coordinates are `(longitude, latitude)` ordered.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single node.
    Point(Point<f64>),
    /// An open or linear way.
    LineString(LineString<f64>),
    /// A closed area with optional interior rings.
    Polygon(Polygon<f64>),
}

impl Geometry {
    /// Axis-aligned bounding box, or `None` for an empty geometry.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        match self {
            Self::Point(point) => Some(point.bounding_rect()),
            Self::LineString(line) => line.bounding_rect(),
            Self::Polygon(polygon) => polygon.bounding_rect(),
        }
    }

    /// Short name of the geometry kind for logs and error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Point(_) => "point",
            Self::LineString(_) => "line",
            Self::Polygon(_) => "polygon",
        }
    }
}

/// A classified OSM geometry ready for rendering.
///
/// `category` and `subtype` are derived from `tags` and can always be
/// recomputed with [`crate::classify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Type-prefixed OSM identifier (see `tilewright-data`).
    pub id: u64,
    /// Reconstructed geometry.
    pub geometry: Geometry,
    /// Raw tags.
    pub tags: Tags,
    /// Derived category.
    pub category: Category,
    /// Derived style subtype.
    pub subtype: String,
}

impl Feature {
    /// Assemble a feature from its parts and classification.
    pub fn new(id: u64, geometry: Geometry, tags: Tags, classification: Classification) -> Self {
        Self {
            id,
            geometry,
            tags,
            category: classification.category,
            subtype: classification.subtype,
        }
    }

    /// The `name` tag, when present and non-empty.
    pub fn name(&self) -> Option<&str> {
        self.tags
            .get("name")
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}

/// Features grouped by category, each group kept in insertion order.
///
/// # Examples
/// ```
/// use geo::Point;
/// use tilewright_core::{Category, Feature, FeatureBucket, Geometry, Tags, classify};
///
/// let tags = Tags::from([("amenity".to_owned(), "bench".to_owned())]);
/// let classification = classify(&tags).expect("benches are public facilities");
/// let mut bucket = FeatureBucket::new();
/// bucket.push(Feature::new(1, Geometry::Point(Point::new(0.0, 0.0)), tags, classification));
/// assert_eq!(bucket.features(Category::PublicFacilities).len(), 1);
/// assert_eq!(bucket.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureBucket {
    groups: BTreeMap<Category, Vec<Feature>>,
}

impl FeatureBucket {
    /// An empty bucket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a feature to the end of its category group.
    pub fn push(&mut self, feature: Feature) {
        self.groups.entry(feature.category).or_default().push(feature);
    }

    /// Features recorded under `category`, in insertion order.
    pub fn features(&self, category: Category) -> &[Feature] {
        self.groups.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Non-empty groups in render order.
    pub fn groups(&self) -> impl Iterator<Item = (Category, &[Feature])> {
        self.groups
            .iter()
            .filter(|(_, features)| !features.is_empty())
            .map(|(category, features)| (*category, features.as_slice()))
    }

    /// Total number of features across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Whether no feature has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
