//! Unit tests for extraction, dataset reading and the regional cache.

use super::*;
use camino::{Utf8Path, Utf8PathBuf};
use geo::Coord;
use rstest::{fixture, rstest};
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tilewright_core::{Category, GeoBounds, Geometry};


/// The tile `43.640_-79.390` at the default tile size.
#[fixture]
fn window() -> GeoBounds {
    GeoBounds::new(43.65, 43.64, -79.38, -79.39).expect("valid window")
}

fn square(source: MemorySource, first_node: i64, south: f64, west: f64, size: f64) -> MemorySource {
    source
        .node(first_node, south, west, &[])
        .node(first_node + 1, south, west + size, &[])
        .node(first_node + 2, south + size, west + size, &[])
        .node(first_node + 3, south + size, west, &[])
}

fn extract(source: &MemorySource, window: &GeoBounds) -> Extraction {
    extract_features(source, window).expect("memory sources never fail")
}

#[rstest]
fn closed_building_way_becomes_polygon(window: GeoBounds) {
    let source = square(MemorySource::new(), 1, 43.642, -79.388, 0.001)
        .way(10, &[1, 2, 3, 4, 1], &[("building", "yes")]);
    let extraction = extract(&source, &window);
    let buildings = extraction.bucket.features(Category::Buildings);
    assert_eq!(buildings.len(), 1);
    let feature = buildings.first().expect("one building");
    assert_eq!(feature.subtype, "yes");
    assert_eq!(feature.id, encode_element_id(ElementKind::Way, 10).expect("id"));
    assert!(matches!(feature.geometry, Geometry::Polygon(_)));
    assert!(extraction.issues.is_empty());
}

#[rstest]
fn unclosed_building_is_reported_and_skipped(window: GeoBounds) {
    let source = square(MemorySource::new(), 1, 43.642, -79.388, 0.001)
        .way(10, &[1, 2, 3, 4], &[("building", "yes")]);
    let extraction = extract(&source, &window);
    assert!(extraction.bucket.is_empty());
    let issue = extraction.issues.first().expect("one issue");
    assert_eq!(issue.kind, ElementKind::Way);
    assert!(issue.reason.contains("not closed"), "reason: {}", issue.reason);
    assert_eq!(issue.to_string(), format!("way/10: {}", issue.reason));
}

#[rstest]
fn closed_roads_stay_lines(window: GeoBounds) {
    let source = square(MemorySource::new(), 1, 43.642, -79.388, 0.001)
        .way(10, &[1, 2, 3, 4, 1], &[("highway", "primary"), ("junction", "roundabout")]);
    let extraction = extract(&source, &window);
    let roads = extraction.bucket.features(Category::Roads);
    assert!(matches!(
        roads.first().map(|feature| &feature.geometry),
        Some(Geometry::LineString(_))
    ));
}

#[rstest]
fn ways_crossing_the_tile_are_kept_by_bounding_box(window: GeoBounds) {
    let source = MemorySource::new()
        .node(1, 43.645, -79.40, &[])
        .node(2, 43.645, -79.37, &[])
        .way(10, &[1, 2], &[("highway", "residential")]);
    let extraction = extract(&source, &window);
    assert_eq!(extraction.bucket.features(Category::Roads).len(), 1);
}

#[rstest]
fn distant_features_are_ignored_silently(window: GeoBounds) {
    let source = square(MemorySource::new(), 1, 43.70, -79.30, 0.001)
        .way(10, &[1, 2, 3, 4], &[("building", "yes")])
        .node(20, 43.70, -79.30, &[("amenity", "cafe")]);
    let extraction = extract(&source, &window);
    assert!(extraction.bucket.is_empty());
    assert!(extraction.issues.is_empty());
}

#[rstest]
fn road_nodes_are_not_points(window: GeoBounds) {
    let source = MemorySource::new().node(1, 43.645, -79.385, &[("highway", "residential")]);
    assert!(extract(&source, &window).bucket.is_empty());
}

#[rstest]
#[case(43.64, -79.385)]
#[case(43.65, -79.385)]
#[case(43.645, -79.39)]
#[case(43.645, -79.38)]
fn points_on_the_edge_are_inside(window: GeoBounds, #[case] lat: f64, #[case] lng: f64) {
    let source = MemorySource::new().node(1, lat, lng, &[("amenity", "bench")]);
    assert_eq!(
        extract(&source, &window)
            .bucket
            .features(Category::PublicFacilities)
            .len(),
        1
    );
}

#[rstest]
fn shared_edge_points_belong_to_both_tiles(window: GeoBounds) {
    let south_neighbour = GeoBounds::new(43.64, 43.63, -79.38, -79.39).expect("valid window");
    let source = MemorySource::new().node(1, 43.64, -79.385, &[("amenity", "atm")]);
    for tile in [window, south_neighbour] {
        let extraction = extract(&source, &tile);
        assert_eq!(extraction.bucket.features(Category::FinancialServices).len(), 1);
    }
}

#[rstest]
fn multipolygon_relations_carry_holes(window: GeoBounds) {
    let source = square(MemorySource::new(), 1, 43.641, -79.389, 0.008);
    let source = square(source, 11, 43.644, -79.386, 0.002)
        .way(100, &[1, 2, 3], &[])
        .way(101, &[3, 4, 1], &[])
        .way(102, &[11, 12, 13, 14, 11], &[])
        .relation(
            500,
            &[("type", "multipolygon"), ("leisure", "park"), ("name", "Grange")],
            &[(100, "outer"), (101, "outer"), (102, "inner")],
        );
    let extraction = extract(&source, &window);
    let parks = extraction.bucket.features(Category::Parks);
    assert_eq!(parks.len(), 1, "issues: {:?}", extraction.issues);
    let Some(Geometry::Polygon(polygon)) = parks.first().map(|feature| &feature.geometry) else {
        panic!("expected a polygon park");
    };
    assert_eq!(polygon.interiors().len(), 1);
    assert_eq!(polygon.exterior().0.len(), 5);
}

#[rstest]
fn broken_relations_are_reported(window: GeoBounds) {
    let source = square(MemorySource::new(), 1, 43.641, -79.389, 0.008)
        .way(100, &[1, 2, 3], &[])
        .relation(
            500,
            &[("type", "multipolygon"), ("leisure", "park")],
            &[(100, "outer")],
        );
    let extraction = extract(&source, &window);
    assert!(extraction.bucket.is_empty());
    let issue = extraction.issues.first().expect("one issue");
    assert_eq!(issue.kind, ElementKind::Relation);
}

#[rstest]
fn unresolved_nodes_only_matter_for_classified_ways(window: GeoBounds) {
    let source = MemorySource::new()
        .node(1, 43.645, -79.385, &[])
        .way(10, &[1, 2], &[("highway", "footway")])
        .way(11, &[1, 3], &[("note", "unclassified")]);
    let extraction = extract(&source, &window);
    assert_eq!(extraction.issues.len(), 1);
    let issue = extraction.issues.first().expect("one issue");
    assert_eq!(
        issue.element,
        encode_element_id(ElementKind::Way, 10).expect("id")
    );
}

#[rstest]
fn extraction_is_deterministic(window: GeoBounds) {
    let source = square(MemorySource::new(), 1, 43.642, -79.388, 0.001)
        .way(10, &[1, 2, 3, 4, 1], &[("building", "house")])
        .node(20, 43.643, -79.383, &[("amenity", "cafe")])
        .node(21, 43.644, -79.384, &[("shop", "florist")]);
    assert_eq!(extract(&source, &window), extract(&source, &window));
}

#[rstest]
fn point_features_use_lng_lat_order(window: GeoBounds) {
    let source = MemorySource::new().node(1, 43.645, -79.385, &[("amenity", "hospital")]);
    let extraction = extract(&source, &window);
    let feature = extraction
        .bucket
        .features(Category::Healthcare)
        .first()
        .cloned()
        .expect("one hospital");
    assert_eq!(
        feature.geometry,
        Geometry::Point(Coord { x: -79.385, y: 43.645 }.into())
    );
}

#[fixture]
fn scratch() -> (TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
    (dir, root)
}


#[rstest]
fn missing_pbf_is_an_open_error(scratch: (TempDir, Utf8PathBuf), window: GeoBounds) {
    let (_guard, root) = scratch;
    let source = PbfSource::new(root.join("missing.osm.pbf"));
    match extract_features(&source, &window) {
        Err(SourceError::Open { path, .. }) => assert!(path.ends_with("missing.osm.pbf")),
        other => panic!("expected an open error, got {other:?}"),
    }
}

#[rstest]
fn corrupt_pbf_is_a_decode_error(scratch: (TempDir, Utf8PathBuf), window: GeoBounds) {
    let (_guard, root) = scratch;
    let path = root.join("corrupt.osm.pbf");
    let mut file = std::fs::File::create(&path).expect("create corrupt file");
    file.write_all(b"\x00\x00\x00\x0cnot a protobuf blob at all")
        .expect("write garbage");
    drop(file);
    let source = PbfSource::new(path);
    match extract_features(&source, &window) {
        Err(SourceError::Decode { .. }) => {}
        other => panic!("expected a decode error, got {other:?}"),
    }
}

/// Writes a fixed number of bytes and records each invocation.
#[derive(Debug, Default)]
struct FakePrefilter {
    bytes: usize,
    fail: bool,
    calls: AtomicUsize,
    last_bounds: Mutex<Option<GeoBounds>>,
}

impl RegionalPrefilter for FakePrefilter {
    fn extract(
        &self,
        _source: &Utf8Path,
        output: &Utf8Path,
        bounds: &GeoBounds,
    ) -> Result<(), PrefilterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_bounds.lock().expect("bounds lock") = Some(*bounds);
        if self.fail {
            return Err(PrefilterError::ToolMissing {
                program: "fake".to_owned(),
            });
        }
        std::fs::write(output, vec![b'x'; self.bytes]).map_err(|source| PrefilterError::Io {
            path: output.to_path_buf(),
            source,
        })
    }
}

fn seeded_source(root: &Utf8Path) -> Utf8PathBuf {
    let source = root.join("ontario.osm.pbf");
    std::fs::write(&source, b"source dataset").expect("write source");
    source
}

fn cache_with(root: &Utf8Path, prefilter: &Arc<FakePrefilter>) -> DatasetCache {
    let shared: Arc<dyn RegionalPrefilter> = prefilter.clone();
    DatasetCache::new(root.join("cache")).with_prefilter(shared)
}

#[rstest]
fn cache_reports_missing_source(scratch: (TempDir, Utf8PathBuf), window: GeoBounds) {
    let (_guard, root) = scratch;
    let cache = DatasetCache::new(root.join("cache"));
    let outcome = cache.resolve("toronto", &root.join("absent.osm.pbf"), &window);
    assert!(matches!(outcome, Err(DatasetUnavailable::Missing { .. })));
}

#[rstest]
fn cache_builds_once_and_reuses(scratch: (TempDir, Utf8PathBuf), window: GeoBounds) {
    let (_guard, root) = scratch;
    let source = seeded_source(&root);
    let prefilter = Arc::new(FakePrefilter {
        bytes: 2048,
        ..FakePrefilter::default()
    });
    let cache = cache_with(&root, &prefilter);

    let first = cache.resolve("toronto", &source, &window).expect("resolves");
    let second = cache.resolve("toronto", &source, &window).expect("resolves");
    assert_eq!(first, cache.filtered_path("toronto", &window));
    assert_eq!(second, first);
    assert_eq!(prefilter.calls.load(Ordering::SeqCst), 1);

    let status = cache.status().expect("status");
    assert_eq!(status.len(), 1);
    let entry = status.first().expect("one dataset");
    assert_eq!(
        entry.name,
        "toronto-43.6550_43.6350_-79.3750_-79.3950-filtered.osm.pbf"
    );
    assert_eq!(entry.size, 2048);
    assert!(entry.fresh);
}

#[rstest]
fn changed_bounds_get_their_own_extract(scratch: (TempDir, Utf8PathBuf), window: GeoBounds) {
    let (_guard, root) = scratch;
    let source = seeded_source(&root);
    let prefilter = Arc::new(FakePrefilter {
        bytes: 2048,
        ..FakePrefilter::default()
    });
    let cache = cache_with(&root, &prefilter);
    let wider = GeoBounds::new(43.68, 43.62, -79.34, -79.40).expect("valid bounds");

    let narrow_path = cache.resolve("toronto", &source, &window).expect("resolves");
    let wide_path = cache.resolve("toronto", &source, &wider).expect("resolves");
    assert_ne!(narrow_path, wide_path);
    assert_eq!(wide_path, cache.filtered_path("toronto", &wider));
    assert_eq!(prefilter.calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        prefilter.last_bounds.lock().expect("bounds lock").as_ref(),
        Some(&wider.expanded(crate::cache::DEFAULT_PREFILTER_BUFFER))
    );

    let again = cache.resolve("toronto", &source, &window).expect("resolves");
    assert_eq!(again, narrow_path);
    assert_eq!(prefilter.calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.status().expect("status").len(), 2);
}

#[rstest]
#[case(FakePrefilter { bytes: 10, ..FakePrefilter::default() })]
#[case(FakePrefilter { fail: true, ..FakePrefilter::default() })]
fn cache_falls_back_to_source(
    scratch: (TempDir, Utf8PathBuf),
    window: GeoBounds,
    #[case] prefilter: FakePrefilter,
) {
    let (_guard, root) = scratch;
    let source = seeded_source(&root);
    let cache = cache_with(&root, &Arc::new(prefilter));
    let resolved = cache.resolve("toronto", &source, &window).expect("resolves");
    assert_eq!(resolved, source);
    let leftovers = tilewright_fs::list_dir(cache.cache_dir()).expect("list cache");
    assert!(leftovers.is_empty(), "partial datasets remain: {leftovers:?}");
}

#[rstest]
fn clear_removes_cached_datasets(scratch: (TempDir, Utf8PathBuf), window: GeoBounds) {
    let (_guard, root) = scratch;
    let source = seeded_source(&root);
    let prefilter = Arc::new(FakePrefilter {
        bytes: 1500,
        ..FakePrefilter::default()
    });
    let cache = cache_with(&root, &prefilter);
    cache.resolve("toronto", &source, &window).expect("resolves");
    cache.resolve("ottawa", &source, &window).expect("resolves");

    let summary = cache.clear().expect("clear");
    assert_eq!(summary, ClearSummary { removed: 2, bytes: 3000 });
    assert!(cache.status().expect("status").is_empty());
}
