//! Generator settings.

use std::num::NonZeroUsize;

use camino::Utf8PathBuf;
use tilewright_core::{DEFAULT_SVG_SIZE, DEFAULT_TILE_SIZE_DEGREES};

use crate::region::RegionName;

/// Name of the per-region metadata document.
pub const METADATA_FILE: &str = "metadata.json";

/// Where and how tiles are generated.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use tilewright_pipeline::GeneratorConfig;
///
/// let config = GeneratorConfig::new("tiles").with_workers(NonZeroUsize::MIN);
/// assert_eq!(config.tile_size_degrees, 0.01);
/// assert_eq!(config.svg_size, 1000);
/// assert_eq!(config.workers, Some(NonZeroUsize::MIN));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Root directory holding one sub-directory per region.
    pub tiles_dir: Utf8PathBuf,
    /// Tile edge length in degrees.
    pub tile_size_degrees: f64,
    /// Rendered tile edge length in image units.
    pub svg_size: u32,
    /// Worker threads; `None` uses one per CPU core.
    pub workers: Option<NonZeroUsize>,
}

impl GeneratorConfig {
    /// Defaults rooted at `tiles_dir`.
    #[must_use]
    pub fn new(tiles_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            tiles_dir: tiles_dir.into(),
            tile_size_degrees: DEFAULT_TILE_SIZE_DEGREES,
            svg_size: DEFAULT_SVG_SIZE,
            workers: None,
        }
    }

    /// Override the tile edge length.
    #[must_use]
    pub const fn with_tile_size(mut self, degrees: f64) -> Self {
        self.tile_size_degrees = degrees;
        self
    }

    /// Override the rendered image size.
    #[must_use]
    pub const fn with_svg_size(mut self, svg_size: u32) -> Self {
        self.svg_size = svg_size;
        self
    }

    /// Bound the worker pool.
    #[must_use]
    pub const fn with_workers(mut self, workers: NonZeroUsize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Directory holding a region's tiles and metadata.
    #[must_use]
    pub fn region_dir(&self, region: &RegionName) -> Utf8PathBuf {
        self.tiles_dir.join(region.as_str())
    }

    /// Path of a region's metadata document.
    #[must_use]
    pub fn metadata_path(&self, region: &RegionName) -> Utf8PathBuf {
        self.region_dir(region).join(METADATA_FILE)
    }
}
