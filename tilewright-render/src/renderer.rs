//! SVG serialisation of a tile's feature bucket.

use geo::{LineString, Polygon};
use log::debug;
use svg::node::element::{Circle, Group, Path, Polygon as SvgPolygon, Style, Title};
use svg::{Document, Node};
use thiserror::Error;
use tilewright_core::{
    Category, DEFAULT_SVG_SIZE, Feature, FeatureBucket, GeoBounds, Geometry, Projector,
    StyleRule, TileCoordinate, style_for,
};

use crate::label::feature_label;

/// Stylesheet embedded in every tile.
pub const TILE_CSS: &str = "
.feature-group { pointer-events: all; }
.buildings polygon { opacity: 0.8; }
.roads path { stroke-linecap: round; stroke-linejoin: round; }
.water polygon, .water path { opacity: 0.7; }
.parks polygon { opacity: 0.6; }
.transit circle { opacity: 0.9; }
";

const DEFAULT_MARKER_RADIUS: f64 = 3.0;
const DEFAULT_MARKER_FILL: &str = "#ff0000";
const DEFAULT_AREA_FILL: &str = "#cccccc";
const DEFAULT_STROKE: &str = "#000000";
const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Why a single feature produced no drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RenderFailure {
    /// The geometry has fewer vertices than its primitive needs.
    #[error("{kind} has {found} vertices, at least {needed} are required")]
    TooFewVertices {
        /// Geometry kind.
        kind: &'static str,
        /// Vertices present.
        found: usize,
        /// Vertices required.
        needed: usize,
    },
    /// A vertex projected to a non-finite image coordinate.
    #[error("vertex projects to a non-finite image coordinate")]
    NonFiniteCoordinate,
}

/// A feature omitted from a rendered tile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("feature {feature} ({category}): {reason}")]
pub struct RenderError {
    /// Encoded element id of the feature.
    pub feature: u64,
    /// Category the feature was bucketed under.
    pub category: Category,
    /// What went wrong.
    #[source]
    pub reason: RenderFailure,
}

/// Output of [`TileRenderer::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTile {
    /// Serialised SVG document.
    pub document: String,
    /// Features left out of the document.
    pub issues: Vec<RenderError>,
}

/// Renders feature buckets into square SVG documents.
///
/// # Examples
/// ```
/// use tilewright_core::{FeatureBucket, TileCoordinate};
/// use tilewright_render::TileRenderer;
///
/// let tile = TileCoordinate::new(43.64, -79.39);
/// let bounds = tile.bounds(0.01)?;
/// let rendered = TileRenderer::default().render(tile, &bounds, &FeatureBucket::new());
/// assert!(rendered.document.contains("viewBox=\"0 0 1000 1000\""));
/// assert!(rendered.issues.is_empty());
/// # Ok::<(), tilewright_core::InvalidBounds>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRenderer {
    svg_size: u32,
}

impl Default for TileRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SVG_SIZE)
    }
}

impl TileRenderer {
    /// Renderer producing `svg_size` x `svg_size` documents.
    #[must_use]
    pub const fn new(svg_size: u32) -> Self {
        Self { svg_size }
    }

    /// Edge length of rendered documents.
    #[must_use]
    pub const fn svg_size(&self) -> u32 {
        self.svg_size
    }

    /// Render `bucket` for the tile whose window is `bounds`.
    ///
    /// Every category gets a group, in render order, even when empty. A
    /// feature that cannot be drawn is left out and reported in
    /// [`RenderedTile::issues`].
    #[must_use]
    pub fn render(
        &self,
        tile: TileCoordinate,
        bounds: &GeoBounds,
        bucket: &FeatureBucket,
    ) -> RenderedTile {
        let projector = Projector::new(*bounds, self.svg_size);
        let mut issues = Vec::new();
        let mut document = Document::new()
            .set("viewBox", format!("0 0 {0} {0}", self.svg_size))
            .set("data-tile-lat", format!("{:.3}", tile.lat()))
            .set("data-tile-lng", format!("{:.3}", tile.lng()))
            .add(Style::new(TILE_CSS));

        for category in Category::RENDER_ORDER {
            let mut group = Group::new()
                .set("id", category.as_str())
                .set("class", format!("feature-group {category}"));
            for feature in bucket.features(category) {
                match primitive(&projector, feature) {
                    Ok(node) => group.append(node),
                    Err(reason) => issues.push(RenderError {
                        feature: feature.id,
                        category,
                        reason,
                    }),
                }
            }
            document.append(group);
        }

        debug!(
            "tile {}: rendered {} features, {} omitted",
            tile.key(),
            bucket.len().saturating_sub(issues.len()),
            issues.len()
        );
        RenderedTile {
            document: document.to_string(),
            issues,
        }
    }
}

fn primitive(projector: &Projector, feature: &Feature) -> Result<Box<dyn Node>, RenderFailure> {
    let style = style_for(feature.category, &feature.subtype);
    let label = feature_label(&feature.tags);
    match &feature.geometry {
        Geometry::Point(point) => marker(projector, point.x(), point.y(), style, &label),
        Geometry::LineString(line) => {
            let data = path_data(projector, line, 2, "line", false)?;
            Ok(stroke_path(feature.category, &data, style, &label))
        }
        Geometry::Polygon(polygon) => area(projector, polygon, style, &label),
    }
}

fn marker(
    projector: &Projector,
    lng: f64,
    lat: f64,
    style: &StyleRule,
    label: &str,
) -> Result<Box<dyn Node>, RenderFailure> {
    let (x, y) = project(projector, lng, lat)?;
    let mut circle = Circle::new()
        .set("cx", format!("{x:.1}"))
        .set("cy", format!("{y:.1}"))
        .set("r", style.radius.unwrap_or(DEFAULT_MARKER_RADIUS))
        .set("fill", style.fill.unwrap_or(DEFAULT_MARKER_FILL));
    paint_stroke(&mut circle, style);
    describe(&mut circle, label);
    Ok(Box::new(circle))
}

fn stroke_path(category: Category, data: &str, style: &StyleRule, label: &str) -> Box<dyn Node> {
    let mut path = Path::new().set("d", data).set("fill", "none");
    paint_stroke(&mut path, style);
    path.assign("role", "img");
    path.assign("aria-label", label);

    match style.casing {
        Some(casing) if category == Category::Roads => {
            let under = Path::new()
                .set("d", data)
                .set("fill", "none")
                .set("stroke", casing.color)
                .set("stroke-width", casing.width);
            let mut group = Group::new();
            describe(&mut group, label);
            group.append(under);
            group.append(path);
            Box::new(group)
        }
        _ => {
            path.append(Title::new(label));
            Box::new(path)
        }
    }
}

fn area(
    projector: &Projector,
    polygon: &Polygon<f64>,
    style: &StyleRule,
    label: &str,
) -> Result<Box<dyn Node>, RenderFailure> {
    let fill = style.fill.unwrap_or(DEFAULT_AREA_FILL);
    if polygon.interiors().is_empty() {
        let points = vertex_list(projector, polygon.exterior(), 3, "polygon")?;
        let mut shape = SvgPolygon::new().set("points", points).set("fill", fill);
        paint_stroke(&mut shape, style);
        describe(&mut shape, label);
        return Ok(Box::new(shape));
    }

    let mut data = path_data(projector, polygon.exterior(), 3, "polygon", true)?;
    for ring in polygon.interiors() {
        let hole = path_data(projector, ring, 3, "interior ring", true)?;
        data.push(' ');
        data.push_str(&hole);
    }
    let mut shape = Path::new()
        .set("d", data)
        .set("fill", fill)
        .set("fill-rule", "evenodd");
    paint_stroke(&mut shape, style);
    describe(&mut shape, label);
    Ok(Box::new(shape))
}

/// Stroke, dash pattern and opacity shared by every primitive.
fn paint_stroke<N: Node>(node: &mut N, style: &StyleRule) {
    node.assign("stroke", style.stroke.unwrap_or(DEFAULT_STROKE));
    node.assign(
        "stroke-width",
        style.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH),
    );
    if let Some(pattern) = style.dasharray {
        node.assign("stroke-dasharray", pattern);
    }
    if let Some(opacity) = style.opacity {
        node.assign("opacity", opacity);
    }
}

/// Accessibility attributes plus the leading tooltip title.
fn describe<N: Node>(node: &mut N, label: &str) {
    node.assign("role", "img");
    node.assign("aria-label", label);
    node.append(Title::new(label));
}

fn project(projector: &Projector, lng: f64, lat: f64) -> Result<(f64, f64), RenderFailure> {
    let (x, y) = projector.project(lat, lng);
    if x.is_finite() && y.is_finite() {
        Ok((x, y))
    } else {
        Err(RenderFailure::NonFiniteCoordinate)
    }
}

fn projected(
    projector: &Projector,
    ring: &LineString<f64>,
    needed: usize,
    kind: &'static str,
) -> Result<Vec<String>, RenderFailure> {
    let found = ring.0.len();
    if found < needed {
        return Err(RenderFailure::TooFewVertices {
            kind,
            found,
            needed,
        });
    }
    ring.0
        .iter()
        .map(|coord| project(projector, coord.x, coord.y).map(|(x, y)| format!("{x:.1},{y:.1}")))
        .collect()
}

/// `points` attribute: `x,y` pairs separated by spaces.
fn vertex_list(
    projector: &Projector,
    ring: &LineString<f64>,
    needed: usize,
    kind: &'static str,
) -> Result<String, RenderFailure> {
    Ok(projected(projector, ring, needed, kind)?.join(" "))
}

/// Path data `Mx,y Lx,y ...`, optionally closed with `Z`.
fn path_data(
    projector: &Projector,
    ring: &LineString<f64>,
    needed: usize,
    kind: &'static str,
    close: bool,
) -> Result<String, RenderFailure> {
    let vertices = projected(projector, ring, needed, kind)?;
    let mut data = vertices
        .iter()
        .enumerate()
        .map(|(index, vertex)| {
            let command = if index == 0 { 'M' } else { 'L' };
            format!("{command}{vertex}")
        })
        .collect::<Vec<_>>()
        .join(" ");
    if close {
        data.push_str(" Z");
    }
    Ok(data)
}
