//! SVG rendering of classified tile features.
//!
//! The renderer walks a [`FeatureBucket`](tilewright_core::FeatureBucket) in
//! category render order and converts every feature into a styled drawing
//! primitive: a circle for points, a stroked path for lines (roads gain a
//! wider casing underneath) and a filled polygon for areas. Each primitive
//! carries an accessible label derived from the feature's tags.
//!
//! Rendering never fails as a whole. Features that cannot be drawn are left
//! out and reported alongside the document.

#![forbid(unsafe_code)]

mod label;
mod renderer;

pub use label::{FALLBACK_LABEL, feature_label, noun_phrase};
pub use renderer::{RenderError, RenderFailure, RenderedTile, TILE_CSS, TileRenderer};
