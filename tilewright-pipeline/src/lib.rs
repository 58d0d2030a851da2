//! Region tile generation for tilewright.
//!
//! Responsibilities:
//! - Validate region requests and compute their tile grid.
//! - Resolve the regional dataset, then extract, render and persist every
//!   tile on a bounded worker pool.
//! - Track run progress and report per-tile failures without aborting.
//! - List and delete generated regions.
//!
//! Output layout under the tiles directory:
//!
//! ```text
//! <tiles_dir>/<region>/metadata.json
//! <tiles_dir>/<region>/<lat>_<lng>.svg.gz
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod generator;
pub mod metadata;
pub mod progress;
pub mod region;

pub use catalog::{CatalogError, RegionCatalog, RegionSummary, TileEntry};
pub use config::{GeneratorConfig, METADATA_FILE};
pub use dataset::{DatasetProvider, PbfDatasetProvider, SharedDataset};
pub use generator::{
    GenerateError, GenerationResult, RunFailure, RunStatus, SkippedFeature, TileGenerator,
};
pub use metadata::{
    PersistError, RegionMetadata, read_metadata, read_tile, write_metadata, write_tile,
};
pub use progress::{DEFAULT_PROGRESS_TTL, GenerationStatus, ProgressSnapshot, ProgressStore};
pub use region::{InvalidRegionName, RegionName};

#[cfg(test)]
mod tests;
