//! Unit tests for region generation and the region catalog.

use std::num::NonZeroUsize;
use std::sync::Arc;

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use tempfile::TempDir;
use tilewright_core::GeoBounds;
use tilewright_data::{DatasetUnavailable, MemorySource, OsmSource};

use crate::{
    DatasetProvider, GenerateError, GenerationStatus, GeneratorConfig, ProgressStore, RegionName,
    RunStatus, SharedDataset, TileGenerator, read_metadata, read_tile,
};

mod catalog;

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
    Workspace { _dir: dir, root }
}

/// Four tiles: 43.640 and 43.650 by -79.390 and -79.380.
fn downtown() -> GeoBounds {
    GeoBounds::new(43.66, 43.64, -79.37, -79.39).expect("valid bounds")
}

fn dataset() -> MemorySource {
    MemorySource::new()
        .node(1, 43.642, -79.388, &[])
        .node(2, 43.642, -79.387, &[])
        .node(3, 43.643, -79.387, &[])
        .node(4, 43.643, -79.388, &[])
        .way(10, &[1, 2, 3, 4, 1], &[("building", "yes")])
        .node(20, 43.655, -79.375, &[("amenity", "hospital"), ("name", "St. X")])
}

fn generator(root: &Utf8PathBuf) -> TileGenerator {
    TileGenerator::new(GeneratorConfig::new(root.clone()), SharedDataset::new(dataset()))
}

struct MissingDataset;

impl DatasetProvider for MissingDataset {
    fn open(
        &self,
        _region: &RegionName,
        _bounds: &GeoBounds,
    ) -> Result<Arc<dyn OsmSource>, DatasetUnavailable> {
        Err(DatasetUnavailable::Missing {
            path: "absent.osm.pbf".into(),
        })
    }
}

#[rstest]
fn every_tile_of_the_grid_is_written(workspace: Workspace) {
    let result = generator(&workspace.root).generate("downtown", &downtown());

    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(result.total_tiles, 4);
    assert_eq!(result.successful_tiles, 4);
    assert!(result.failures.is_empty());
    for key in ["43.640_-79.390", "43.640_-79.380", "43.650_-79.390", "43.650_-79.380"] {
        let path = workspace.root.join(format!("downtown/{key}.svg.gz"));
        let document = read_tile(&path).expect("tile written");
        assert!(document.contains("data-tile-lat"), "not a tile: {document}");
    }
}

#[rstest]
fn tiles_hold_their_own_features(workspace: Workspace) {
    let result = generator(&workspace.root).generate("downtown", &downtown());
    assert_eq!(result.successful_tiles, 4);

    let hospital = read_tile(&workspace.root.join("downtown/43.650_-79.380.svg.gz"))
        .expect("hospital tile");
    assert!(hospital.contains("aria-label=\"St. X, hospital\""));
    let empty = read_tile(&workspace.root.join("downtown/43.650_-79.390.svg.gz"))
        .expect("empty tile");
    assert!(!empty.contains("<circle"));
    assert!(!empty.contains("<polygon"));
}

#[rstest]
fn metadata_records_the_run(workspace: Workspace) {
    let config = GeneratorConfig::new(workspace.root.clone()).with_svg_size(512);
    let result = TileGenerator::new(config, SharedDataset::new(dataset()))
        .generate("downtown", &downtown());
    assert_eq!(result.status, RunStatus::Completed);

    let metadata =
        read_metadata(&workspace.root.join("downtown/metadata.json")).expect("metadata");
    assert_eq!(metadata.name, "downtown");
    assert_eq!(metadata.bounds, downtown());
    assert_eq!(metadata.tile_count, 4);
    assert_eq!(metadata.svg_size, 512);
}

#[rstest]
fn output_is_identical_across_worker_counts(workspace: Workspace) {
    let single = GeneratorConfig::new(workspace.root.join("single")).with_workers(NonZeroUsize::MIN);
    let pooled = GeneratorConfig::new(workspace.root.join("pooled"))
        .with_workers(NonZeroUsize::new(4).expect("non-zero"));
    for config in [single, pooled] {
        let result = TileGenerator::new(config, SharedDataset::new(dataset()))
            .generate("downtown", &downtown());
        assert_eq!(result.successful_tiles, 4);
    }

    for key in ["43.640_-79.390", "43.650_-79.380"] {
        let name = format!("downtown/{key}.svg.gz");
        assert_eq!(
            read_tile(&workspace.root.join("single").join(&name)).expect("single"),
            read_tile(&workspace.root.join("pooled").join(&name)).expect("pooled"),
        );
    }
}

#[rstest]
fn missing_dataset_aborts_the_run(workspace: Workspace) {
    let progress = ProgressStore::default();
    let generator = TileGenerator::new(GeneratorConfig::new(workspace.root.clone()), MissingDataset)
        .with_progress(progress.clone());

    let err = generator
        .try_generate("downtown", &downtown())
        .expect_err("dataset is missing");
    assert!(matches!(err, GenerateError::DatasetUnavailable { .. }));

    let snapshot = progress.snapshot("downtown").expect("run recorded");
    assert_eq!(snapshot.status, GenerationStatus::Error);
    assert!(snapshot.error.is_some_and(|message| message.contains("absent.osm.pbf")));
    assert!(!workspace.root.join("downtown").exists());
}

#[rstest]
fn fatal_errors_fold_into_the_result(workspace: Workspace) {
    let generator = TileGenerator::new(GeneratorConfig::new(workspace.root.clone()), MissingDataset);
    let result = generator.generate("downtown", &downtown());
    assert_eq!(result.status, RunStatus::Error);
    assert_eq!(result.total_tiles, 0);
    assert!(result.error.is_some_and(|message| message.contains("downtown")));
}

#[rstest]
#[case("")]
#[case("../escape")]
#[case("Upper")]
fn unsafe_region_names_are_rejected(workspace: Workspace, #[case] region: &str) {
    let progress = ProgressStore::default();
    let generator = generator(&workspace.root).with_progress(progress.clone());
    let err = generator
        .try_generate(region, &downtown())
        .expect_err("name rejected");
    assert!(matches!(err, GenerateError::InvalidRegionName(_)));
    assert!(progress.snapshots().is_empty());
}

#[rstest]
fn unusable_tile_size_is_fatal(workspace: Workspace) {
    let config = GeneratorConfig::new(workspace.root.clone()).with_tile_size(0.0);
    let err = TileGenerator::new(config, SharedDataset::new(dataset()))
        .try_generate("downtown", &downtown())
        .expect_err("tile size rejected");
    assert!(matches!(err, GenerateError::InvalidBounds(_)));
}

#[rstest]
fn progress_reaches_completed(workspace: Workspace) {
    let progress = ProgressStore::default();
    let generator = generator(&workspace.root).with_progress(progress.clone());
    let result = generator.generate("downtown", &downtown());
    assert_eq!(result.status, RunStatus::Completed);

    let snapshot = progress.snapshot("downtown").expect("run recorded");
    assert_eq!(snapshot.status, GenerationStatus::Completed);
    assert_eq!(snapshot.total_tiles, 4);
    assert_eq!(snapshot.completed_tiles, 4);
    assert!(snapshot.current_tile.is_none());
    assert!(snapshot.finished_at.is_some());
}

#[rstest]
fn metadata_failure_is_reported_without_failing_tiles(workspace: Workspace) {
    std::fs::create_dir_all(workspace.root.join("downtown/metadata.json"))
        .expect("block metadata path");
    let result = generator(&workspace.root).generate("downtown", &downtown());

    assert_eq!(result.status, RunStatus::Completed);
    assert_eq!(result.successful_tiles, 4);
    assert_eq!(result.failed_tiles, 0);
    let failure = result.failures.first().expect("metadata failure");
    assert!(failure.tile.is_none());
    assert!(failure.reason.contains("metadata"), "reason: {}", failure.reason);
}

#[rstest]
fn results_serialise_with_lower_case_status(workspace: Workspace) {
    let result = generator(&workspace.root).generate("downtown", &downtown());
    let json = serde_json::to_value(&result).expect("serialise result");
    assert_eq!(json["status"], "completed");
    assert_eq!(json["successful_tiles"], 4);
    assert!(json.get("error").is_none());
}
