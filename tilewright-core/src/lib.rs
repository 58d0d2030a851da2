//! Core domain types for tilewright.
//!
//! Responsibilities:
//! - Model geographic rectangles, tile coordinates and the tile grid.
//! - Classify OSM tag sets into renderable categories and subtypes.
//! - Hold the static style catalog and the geographic to image projection.
//!
//! Boundaries:
//! - No I/O. Dataset access lives in `tilewright-data`, serialization in
//!   `tilewright-render` and persistence in `tilewright-pipeline`.
//!
//! Invariants:
//! - Every function here is deterministic for identical inputs.

pub mod bounds;
pub mod category;
pub mod classify;
pub mod feature;
pub mod grid;
pub mod projector;
pub mod style;

pub use bounds::{GeoBounds, InvalidBounds};
pub use category::{Category, UnknownCategory};
pub use classify::{Classification, classify};
pub use feature::{Feature, FeatureBucket, Geometry, Tags};
pub use grid::{DEFAULT_TILE_SIZE_DEGREES, MAX_GRID_TILES, TileCoordinate, tile_grid};
pub use projector::{DEFAULT_SVG_SIZE, Projector};
pub use style::{Casing, StyleRule, style_for};
