//! Per-region metadata and compressed tile persistence.

use std::io::{self, Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tilewright_core::GeoBounds;
use tilewright_fs::{open_utf8_file, write_atomic};

/// Summary of a generated region, written to `metadata.json`.
///
/// Overwritten in full whenever the region is regenerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMetadata {
    /// Region name.
    pub name: String,
    /// Requested region bounds.
    pub bounds: GeoBounds,
    /// Tiles written successfully by the run.
    pub tile_count: usize,
    /// When the run finished.
    pub created_at: Timestamp,
    /// Tile edge length in degrees.
    pub tile_size_degrees: f64,
    /// Rendered tile edge length in image units.
    pub svg_size: u32,
}

/// A tile or metadata file could not be written or read back.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Writing a compressed tile failed.
    #[error("failed to write tile {path}")]
    Tile {
        /// Tile path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Writing or reading a metadata document failed.
    #[error("failed to access region metadata {path}")]
    Metadata {
        /// Metadata path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// A metadata document is not valid JSON for [`RegionMetadata`].
    #[error("malformed region metadata {path}")]
    Malformed {
        /// Metadata path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Gzip `document` into `path` atomically.
///
/// # Errors
/// Returns [`PersistError::Tile`] when the file cannot be staged, written or
/// renamed into place.
pub fn write_tile(path: &Utf8Path, document: &str) -> Result<(), PersistError> {
    write_atomic(path, |file| {
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(document.as_bytes())?;
        encoder.finish()?;
        Ok(())
    })
    .map_err(|source| PersistError::Tile {
        path: path.to_path_buf(),
        source,
    })
}

/// Decompress a tile written by [`write_tile`].
///
/// # Errors
/// Returns [`PersistError::Tile`] when the file cannot be opened or is not
/// valid gzip-compressed UTF-8.
pub fn read_tile(path: &Utf8Path) -> Result<String, PersistError> {
    let tile_error = |source| PersistError::Tile {
        path: path.to_path_buf(),
        source,
    };
    let file = open_utf8_file(path).map_err(tile_error)?;
    let mut document = String::new();
    GzDecoder::new(file)
        .read_to_string(&mut document)
        .map_err(tile_error)?;
    Ok(document)
}

/// Write `metadata` as pretty-printed JSON to `path` atomically.
///
/// # Errors
/// Returns [`PersistError::Metadata`] when the document cannot be written.
pub fn write_metadata(path: &Utf8Path, metadata: &RegionMetadata) -> Result<(), PersistError> {
    write_atomic(path, |file| {
        serde_json::to_writer_pretty(&mut *file, metadata).map_err(io::Error::other)?;
        file.write_all(b"\n")
    })
    .map_err(|source| PersistError::Metadata {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a metadata document.
///
/// # Errors
/// Returns [`PersistError::Metadata`] when the file cannot be read and
/// [`PersistError::Malformed`] when it does not parse.
pub fn read_metadata(path: &Utf8Path) -> Result<RegionMetadata, PersistError> {
    let file = open_utf8_file(path).map_err(|source| PersistError::Metadata {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(io::BufReader::new(file)).map_err(|source| PersistError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}
