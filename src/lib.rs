//! Facade crate for the tilewright SVG tile generator.
//!
//! This crate re-exports the domain types, dataset access and rendering, and
//! exposes the region generation pipeline behind the `pipeline` feature.

#![forbid(unsafe_code)]

pub use tilewright_core::{
    Category, Classification, Feature, FeatureBucket, GeoBounds, Geometry, InvalidBounds,
    Projector, StyleRule, Tags, TileCoordinate, classify, style_for, tile_grid,
};

pub use tilewright_data::{
    DatasetCache, DatasetUnavailable, Extraction, FeatureParseError, MemorySource, OsmSource,
    PbfSource, SourceError, extract_features,
};

pub use tilewright_render::{RenderError, RenderedTile, TileRenderer, feature_label};

#[cfg(feature = "pipeline")]
pub use tilewright_pipeline::{
    GenerateError, GenerationResult, GenerationStatus, GeneratorConfig, PbfDatasetProvider,
    ProgressStore, RegionCatalog, RegionName, RunStatus, SharedDataset, TileGenerator,
};
