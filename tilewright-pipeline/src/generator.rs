//! Region generation: grid, dataset resolution, per-tile extraction,
//! rendering and persistence.
//!
//! Tiles are independent of each other and are processed on a bounded worker
//! pool. Only an invalid request or an unavailable dataset aborts a run; a
//! tile that fails is logged, counted and reported while the others proceed.

use std::error::Error as StdError;
use std::sync::Arc;

use jiff::Timestamp;
use log::{debug, error, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilewright_core::{GeoBounds, InvalidBounds, TileCoordinate, tile_grid};
use tilewright_data::{
    DatasetUnavailable, OsmSource, SourceError, describe_element_id, extract_features,
};
use tilewright_render::TileRenderer;

use crate::config::GeneratorConfig;
use crate::dataset::DatasetProvider;
use crate::metadata::{PersistError, RegionMetadata, write_metadata, write_tile};
use crate::progress::{GenerationStatus, ProgressStore};
use crate::region::{InvalidRegionName, RegionName};

/// Terminal state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every tile was attempted; some may have failed.
    Completed,
    /// The run aborted before processing tiles.
    Error,
}

/// A feature left out of an otherwise successful tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFeature {
    /// Key of the tile the feature belonged to.
    pub tile: String,
    /// Element reference such as `way/42`.
    pub element: String,
    /// Why it was skipped.
    pub reason: String,
}

/// A tile that was not written, or a metadata document that was not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunFailure {
    /// Tile key; `None` for the region metadata document.
    pub tile: Option<String>,
    /// Error message including its causes.
    pub reason: String,
}

/// Outcome of one region generation run.
///
/// `successful_tiles + failed_tiles == total_tiles` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Terminal state.
    pub status: RunStatus,
    /// Requested region name.
    pub region: String,
    /// Tiles written.
    pub successful_tiles: usize,
    /// Tiles that could not be produced.
    pub failed_tiles: usize,
    /// Tiles in the region's grid.
    pub total_tiles: usize,
    /// Features omitted from successful tiles.
    pub skipped_features: Vec<SkippedFeature>,
    /// Tile and metadata failures.
    pub failures: Vec<RunFailure>,
    /// Run-fatal error, set when `status` is [`RunStatus::Error`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResult {
    fn started(region: &RegionName, total_tiles: usize) -> Self {
        Self {
            status: RunStatus::Completed,
            region: region.to_string(),
            successful_tiles: 0,
            failed_tiles: 0,
            total_tiles,
            skipped_features: Vec::new(),
            failures: Vec::new(),
            error: None,
        }
    }

    fn aborted(region: &str, err: &GenerateError) -> Self {
        Self {
            status: RunStatus::Error,
            region: region.to_owned(),
            successful_tiles: 0,
            failed_tiles: 0,
            total_tiles: 0,
            skipped_features: Vec::new(),
            failures: Vec::new(),
            error: Some(error_chain(err)),
        }
    }
}

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The region name is not a safe path component.
    #[error(transparent)]
    InvalidRegionName(#[from] InvalidRegionName),
    /// The bounds or tile size cannot produce a grid.
    #[error("invalid region bounds")]
    InvalidBounds(#[from] InvalidBounds),
    /// No dataset could be resolved for the region.
    #[error("no OSM dataset available for region {region}")]
    DatasetUnavailable {
        /// Region name.
        region: String,
        /// Underlying error.
        #[source]
        source: DatasetUnavailable,
    },
    /// The worker pool could not be created.
    #[error("failed to start the tile worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Error)]
enum TileError {
    #[error("invalid tile window")]
    Window(#[source] InvalidBounds),
    #[error("dataset scan failed")]
    Scan(#[source] SourceError),
    #[error(transparent)]
    Persist(PersistError),
}

struct TileOutcome {
    key: String,
    result: Result<Vec<SkippedFeature>, TileError>,
}

/// Generates and persists every tile of a region.
///
/// # Examples
/// ```
/// use camino::Utf8PathBuf;
/// use tilewright_core::GeoBounds;
/// use tilewright_data::MemorySource;
/// use tilewright_pipeline::{GeneratorConfig, RunStatus, SharedDataset, TileGenerator};
///
/// let dir = tempfile::tempdir()?;
/// let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
/// let dataset = MemorySource::new().node(1, 43.6405, -79.3795, &[("amenity", "bench")]);
/// let generator = TileGenerator::new(GeneratorConfig::new(root.clone()), SharedDataset::new(dataset));
///
/// let bounds = GeoBounds::new(43.641, 43.640, -79.379, -79.380)?;
/// let result = generator.generate("harbourfront", &bounds);
/// assert_eq!(result.status, RunStatus::Completed);
/// assert_eq!(result.successful_tiles, 1);
/// assert!(root.join("harbourfront/43.640_-79.380.svg.gz").is_file());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct TileGenerator {
    config: GeneratorConfig,
    provider: Arc<dyn DatasetProvider>,
    progress: ProgressStore,
}

impl std::fmt::Debug for TileGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileGenerator")
            .field("config", &self.config)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

impl TileGenerator {
    /// A generator writing under `config.tiles_dir` from `provider`'s data.
    #[must_use]
    pub fn new(config: GeneratorConfig, provider: impl DatasetProvider + 'static) -> Self {
        Self {
            config,
            provider: Arc::new(provider),
            progress: ProgressStore::default(),
        }
    }

    /// Report progress into `store` instead of a private one.
    #[must_use]
    pub fn with_progress(mut self, store: ProgressStore) -> Self {
        self.progress = store;
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Store receiving progress updates.
    #[must_use]
    pub const fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    /// Generate every tile of `region` within `bounds`.
    ///
    /// Never fails: run-fatal errors are reported as a result with
    /// [`RunStatus::Error`] and an error message.
    #[must_use]
    pub fn generate(&self, region: &str, bounds: &GeoBounds) -> GenerationResult {
        self.try_generate(region, bounds)
            .unwrap_or_else(|err| GenerationResult::aborted(region, &err))
    }

    /// Generate every tile of `region` within `bounds`.
    ///
    /// # Errors
    /// Returns [`GenerateError`] when the run cannot start: an unsafe region
    /// name, an unusable tile size, an unavailable dataset or a worker pool
    /// failure. Per-tile failures are reported in the result instead.
    pub fn try_generate(
        &self,
        region: &str,
        bounds: &GeoBounds,
    ) -> Result<GenerationResult, GenerateError> {
        let name = RegionName::new(region)?;
        info!("{name}: starting tile generation");
        let reaped = self.progress.reap();
        if reaped > 0 {
            debug!("dropped {reaped} expired progress entries");
        }
        self.progress.start(name.as_str());
        match self.run(&name, bounds) {
            Ok(result) => {
                self.progress
                    .finish(name.as_str(), GenerationStatus::Completed, None);
                info!(
                    "{name}: generation complete, {} successful, {} failed",
                    result.successful_tiles, result.failed_tiles
                );
                Ok(result)
            }
            Err(err) => {
                let message = error_chain(&err);
                error!("{name}: generation failed: {message}");
                self.progress
                    .finish(name.as_str(), GenerationStatus::Error, Some(message));
                Err(err)
            }
        }
    }

    fn run(&self, name: &RegionName, bounds: &GeoBounds) -> Result<GenerationResult, GenerateError> {
        let tiles = tile_grid(bounds, self.config.tile_size_degrees)?;
        info!("{name}: {} tiles to generate", tiles.len());
        self.progress.update(name.as_str(), |progress| {
            progress.total_tiles = tiles.len();
            progress.status = GenerationStatus::DownloadingData;
        });

        let source = self.provider.open(name, bounds).map_err(|source| {
            GenerateError::DatasetUnavailable {
                region: name.to_string(),
                source,
            }
        })?;
        info!("{name}: scanning {}", source.describe());
        self.progress.update(name.as_str(), |progress| {
            progress.status = GenerationStatus::Processing;
        });

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers.map_or(0, std::num::NonZeroUsize::get))
            .build()?;
        let renderer = TileRenderer::new(self.config.svg_size);
        let outcomes: Vec<TileOutcome> = pool.install(|| {
            tiles
                .par_iter()
                .map(|tile| self.process_tile(name, *tile, source.as_ref(), &renderer))
                .collect()
        });

        let mut result = GenerationResult::started(name, tiles.len());
        for TileOutcome { key, result: outcome } in outcomes {
            match outcome {
                Ok(skipped) => {
                    result.successful_tiles += 1;
                    result.skipped_features.extend(skipped);
                }
                Err(err) => {
                    let reason = error_chain(&err);
                    error!("{name}: tile {key} failed: {reason}");
                    result.failed_tiles += 1;
                    result.failures.push(RunFailure {
                        tile: Some(key),
                        reason,
                    });
                }
            }
        }

        self.persist_metadata(name, bounds, &mut result);
        Ok(result)
    }

    fn process_tile(
        &self,
        region: &RegionName,
        tile: TileCoordinate,
        source: &dyn OsmSource,
        renderer: &TileRenderer,
    ) -> TileOutcome {
        let key = tile.key();
        self.progress.update(region.as_str(), |progress| {
            progress.status = GenerationStatus::ProcessingOsm;
            progress.current_tile = Some(key.clone());
        });
        let result = self.build_tile(region, tile, &key, source, renderer);
        self.progress.update(region.as_str(), |progress| {
            progress.completed_tiles = progress.completed_tiles.saturating_add(1);
        });
        TileOutcome { key, result }
    }

    fn build_tile(
        &self,
        region: &RegionName,
        tile: TileCoordinate,
        key: &str,
        source: &dyn OsmSource,
        renderer: &TileRenderer,
    ) -> Result<Vec<SkippedFeature>, TileError> {
        let window = tile
            .bounds(self.config.tile_size_degrees)
            .map_err(TileError::Window)?;
        let extraction = extract_features(source, &window).map_err(TileError::Scan)?;
        let mut skipped = Vec::with_capacity(extraction.issues.len());
        for issue in &extraction.issues {
            warn!("{region}: tile {key}: skipped {issue}");
            skipped.push(SkippedFeature {
                tile: key.to_owned(),
                element: describe_element_id(issue.element),
                reason: issue.reason.clone(),
            });
        }

        self.progress.update(region.as_str(), |progress| {
            progress.status = GenerationStatus::RenderingTile;
        });
        let rendered = renderer.render(tile, &window, &extraction.bucket);
        for issue in rendered.issues {
            warn!("{region}: tile {key}: not rendered: {issue}");
            skipped.push(SkippedFeature {
                tile: key.to_owned(),
                element: describe_element_id(issue.feature),
                reason: issue.reason.to_string(),
            });
        }

        let path = self.config.region_dir(region).join(tile.file_name());
        write_tile(&path, &rendered.document).map_err(TileError::Persist)?;
        debug!("{region}: wrote {path}");
        Ok(skipped)
    }

    fn persist_metadata(&self, name: &RegionName, bounds: &GeoBounds, result: &mut GenerationResult) {
        let metadata = RegionMetadata {
            name: name.to_string(),
            bounds: *bounds,
            tile_count: result.successful_tiles,
            created_at: Timestamp::now(),
            tile_size_degrees: self.config.tile_size_degrees,
            svg_size: self.config.svg_size,
        };
        let path = self.config.metadata_path(name);
        if let Err(err) = write_metadata(&path, &metadata) {
            let reason = error_chain(&err);
            error!("{name}: {reason}");
            result.failures.push(RunFailure { tile: None, reason });
        }
    }
}

/// Display an error followed by each of its causes.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }
    message
}
