//! The abstract dataset collaborator.
//!
//! An [`OsmSource`] enumerates resolved OSM elements into an
//! [`ElementSink`]: nodes with a location, ways with ordered coordinates and a
//! closed flag, and areas assembled from multipolygon relations. Elements that
//! cannot be resolved are reported as [`MalformedElement`] values so the
//! consumer decides how to surface them.

use camino::Utf8PathBuf;
use geo::{Coord, MultiPolygon, Rect};
use thiserror::Error;
use tilewright_core::Tags;

use crate::ids::ElementKind;

/// A tagged node with a valid WGS84 location.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmNode {
    /// Encoded element id.
    pub id: u64,
    /// `x = longitude`, `y = latitude`.
    pub location: Coord<f64>,
    /// Raw tags.
    pub tags: Tags,
}

/// A tagged way with every node reference resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmWay {
    /// Encoded element id.
    pub id: u64,
    /// Node coordinates in way order.
    pub coords: Vec<Coord<f64>>,
    /// Raw tags.
    pub tags: Tags,
    /// Whether the first and last node references are identical.
    pub closed: bool,
}

/// An area assembled from a multipolygon or boundary relation.
#[derive(Debug, Clone, PartialEq)]
pub struct OsmArea {
    /// Encoded relation id.
    pub id: u64,
    /// Outer rings with their holes.
    pub polygons: MultiPolygon<f64>,
    /// Relation tags.
    pub tags: Tags,
}

/// An element the source could not turn into geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedElement {
    /// Encoded element id.
    pub id: u64,
    /// Element type.
    pub kind: ElementKind,
    /// Raw tags, so consumers can tell whether the element mattered.
    pub tags: Tags,
    /// What went wrong.
    pub reason: String,
    /// Extent of whatever coordinates did resolve, used to attribute the
    /// failure to the tiles it touches.
    pub extent: Option<Rect<f64>>,
}

/// Receives elements from an [`OsmSource`] scan.
pub trait ElementSink {
    /// A tagged node.
    fn node(&mut self, node: OsmNode);
    /// A tagged way.
    fn way(&mut self, way: OsmWay);
    /// An assembled area.
    fn area(&mut self, area: OsmArea);
    /// An element that failed to resolve.
    fn malformed(&mut self, element: MalformedElement);
}

/// Errors affecting a whole dataset scan.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The dataset could not be opened.
    #[error("failed to open OSM dataset at {path}")]
    Open {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Reader error.
        #[source]
        source: osmpbf::Error,
    },
    /// The dataset could not be decoded.
    #[error("failed to decode OSM dataset at {path}")]
    Decode {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Reader error.
        #[source]
        source: osmpbf::Error,
    },
}

/// A readable OSM dataset.
///
/// Implementations must be deterministic: scanning the same dataset twice
/// delivers the same elements in the same order.
pub trait OsmSource: Send + Sync {
    /// Short description for logs, usually the dataset path.
    fn describe(&self) -> String;

    /// Enumerate every tagged node, tagged way and assembled area.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the dataset as a whole cannot be read.
    fn scan(&self, sink: &mut dyn ElementSink) -> Result<(), SourceError>;
}
