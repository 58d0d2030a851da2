//! Behavioural tests for region generation.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;
use tilewright_core::GeoBounds;
use tilewright_data::MemorySource;
use tilewright_pipeline::{
    GenerationResult, GeneratorConfig, RunStatus, SharedDataset, TileGenerator, read_metadata,
    read_tile,
};

struct GenerateWorld {
    _dir: TempDir,
    root: Utf8PathBuf,
    source: RefCell<Option<MemorySource>>,
    result: RefCell<Option<GenerationResult>>,
}

#[fixture]
fn world() -> GenerateWorld {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
    GenerateWorld {
        _dir: dir,
        root,
        source: RefCell::new(None),
        result: RefCell::new(None),
    }
}

/// Corners of a small square whose south-west corner is `(lat, lng)`.
fn corners(lat: f64, lng: f64) -> MemorySource {
    MemorySource::new()
        .node(1, lat, lng, &[])
        .node(2, lat, lng + 0.001, &[])
        .node(3, lat + 0.001, lng + 0.001, &[])
        .node(4, lat + 0.001, lng, &[])
}

#[given("a dataset with a bench inside tile 43.640_-79.380")]
fn bench(world: &GenerateWorld) {
    let source = MemorySource::new().node(1, 43.6405, -79.3795, &[("amenity", "bench")]);
    world.source.replace(Some(source));
}

#[given("a dataset with a closed way tagged building=yes inside tile 43.640_-79.390")]
fn closed_building(world: &GenerateWorld) {
    let source = corners(43.642, -79.388).way(10, &[1, 2, 3, 4, 1], &[("building", "yes")]);
    world.source.replace(Some(source));
}

#[given("a dataset with an open way tagged building=yes inside tile 43.650_-79.390")]
fn open_building(world: &GenerateWorld) {
    let source = corners(43.652, -79.388).way(10, &[1, 2, 3, 4], &[("building", "yes")]);
    world.source.replace(Some(source));
}

#[given("the output path of tile {key} in region {region} is blocked")]
fn blocked_tile(world: &GenerateWorld, key: String, region: String) {
    let path = world.root.join(&region).join(format!("{key}.svg.gz"));
    std::fs::create_dir_all(&path).expect("create blocking directory");
}

#[when("I generate region {region} for bounds {north} {south} {east} {west}")]
fn generate(world: &GenerateWorld, region: String, north: f64, south: f64, east: f64, west: f64) {
    let bounds = GeoBounds::new(north, south, east, west).expect("valid bounds");
    let source = world.source.borrow_mut().take().expect("dataset prepared");
    let generator = TileGenerator::new(GeneratorConfig::new(world.root.clone()), SharedDataset::new(source));
    world.result.replace(Some(generator.generate(&region, &bounds)));
}

fn result(world: &GenerateWorld) -> GenerationResult {
    world.result.borrow().clone().expect("generation ran")
}

#[then("the run completed with {successful} successful and {failed} failed tiles")]
fn completed_with(world: &GenerateWorld, successful: usize, failed: usize) {
    let result = result(world);
    assert_eq!(result.status, RunStatus::Completed, "run errored: {:?}", result.error);
    assert_eq!(result.successful_tiles, successful);
    assert_eq!(result.failed_tiles, failed);
    assert_eq!(result.total_tiles, successful + failed);
    assert_eq!(
        result.failures.iter().filter(|failure| failure.tile.is_some()).count(),
        failed
    );
}

#[then("tile {key} of region {region} is on disk")]
fn tile_on_disk(world: &GenerateWorld, key: String, region: String) {
    let path = world.root.join(&region).join(format!("{key}.svg.gz"));
    let document = read_tile(&path).expect("tile readable");
    assert!(document.starts_with("<svg"), "unexpected document: {document}");
}

#[then("tile {key} of region {region} contains a polygon filled with {fill}")]
fn tile_has_polygon(world: &GenerateWorld, key: String, region: String, fill: String) {
    let path = world.root.join(&region).join(format!("{key}.svg.gz"));
    let document = read_tile(&path).expect("tile readable");
    assert!(document.contains("<polygon"), "no polygon in {document}");
    assert!(document.contains(&format!("fill=\"{fill}\"")));
}

#[then("the metadata of region {region} records a tile count of {count}")]
fn metadata_count(world: &GenerateWorld, region: String, count: usize) {
    let metadata =
        read_metadata(&world.root.join(&region).join("metadata.json")).expect("metadata readable");
    assert_eq!(metadata.name, region);
    assert_eq!(metadata.tile_count, count);
}

#[then("{count} skipped feature was reported for tile {key}")]
fn skipped_in_tile(world: &GenerateWorld, count: usize, key: String) {
    let result = result(world);
    assert_eq!(result.skipped_features.len(), count);
    assert!(result.skipped_features.iter().all(|skipped| skipped.tile == key));
    assert!(
        result
            .skipped_features
            .iter()
            .all(|skipped| skipped.element == "way/10")
    );
}

#[then("the run failed mentioning \"{text}\"")]
fn failed_mentioning(world: &GenerateWorld, text: String) {
    let result = result(world);
    assert_eq!(result.status, RunStatus::Error);
    assert_eq!(result.successful_tiles + result.failed_tiles, result.total_tiles);
    let error = result.error.expect("error message");
    assert!(error.contains(&text), "unexpected error: {error}");
}

#[scenario(path = "tests/features/generate_region.feature", index = 0)]
fn single_tile_region(world: GenerateWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/generate_region.feature", index = 1)]
fn building_region(world: GenerateWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/generate_region.feature", index = 2)]
fn malformed_element(world: GenerateWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/generate_region.feature", index = 3)]
fn blocked_tile_output(world: GenerateWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/generate_region.feature", index = 4)]
fn unsafe_region_name(world: GenerateWorld) {
    let _ = world;
}
