//! OSM dataset access for tilewright.
//!
//! The crate reads OSM PBF extracts, resolves ways and multipolygon
//! relations into geometry, and extracts the classified features relevant to
//! one tile. It also maintains pre-filtered regional copies of large
//! extracts.
//!
//! ```no_run
//! use tilewright_core::GeoBounds;
//! use tilewright_data::{PbfSource, extract_features};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = PbfSource::new("ontario-latest.osm.pbf");
//! let window = GeoBounds::new(43.65, 43.64, -79.37, -79.38)?;
//! let extraction = extract_features(&source, &window)?;
//! println!("{} features", extraction.bucket.len());
//! # Ok(())
//! # }
//! ```

mod assembler;
pub mod cache;
pub mod extract;
mod ids;
pub mod memory;
pub mod model;
pub mod pbf;
pub mod prefilter;
mod tags;

pub use cache::{CachedDataset, ClearSummary, DatasetCache, DatasetUnavailable};
pub use extract::{Extraction, FeatureParseError, extract_features};
pub use ids::{ElementKind, decode_element_id, describe_element_id, encode_element_id};
pub use memory::MemorySource;
pub use model::{ElementSink, MalformedElement, OsmArea, OsmNode, OsmSource, OsmWay, SourceError};
pub use pbf::PbfSource;
pub use prefilter::{OsmiumExtract, PrefilterError, RegionalPrefilter};

#[cfg(test)]
mod tests;
