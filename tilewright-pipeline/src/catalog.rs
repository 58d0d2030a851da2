//! Read-only listing and deletion of generated regions.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use serde::Serialize;
use thiserror::Error;
use tilewright_core::TileCoordinate;
use tilewright_fs::{DirEntryInfo, file_stat, list_dir, remove_dir_all};

use crate::config::METADATA_FILE;
use crate::metadata::{RegionMetadata, read_metadata};
use crate::region::{InvalidRegionName, RegionName};

const TILE_SUFFIX: &str = ".svg.gz";

/// Errors raised while inspecting the tiles directory.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested name is not a valid region name.
    #[error(transparent)]
    InvalidRegionName(#[from] InvalidRegionName),
    /// No directory exists for the region.
    #[error("region {0} has not been generated")]
    UnknownRegion(String),
    /// The filesystem could not be read or modified.
    #[error("failed to access {path}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// A generated region with its on-disk footprint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    /// Metadata recorded by the last run.
    pub metadata: RegionMetadata,
    /// Tile files currently present.
    pub tiles_on_disk: usize,
    /// Combined size of those tiles in bytes.
    pub total_bytes: u64,
}

/// One compressed tile on disk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileEntry {
    /// File name, such as `43.640_-79.390.svg.gz`.
    pub file_name: String,
    /// South-west corner decoded from the name.
    pub coordinate: TileCoordinate,
    /// Compressed size in bytes.
    pub size: u64,
}

/// View over a tiles directory holding one sub-directory per region.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    tiles_dir: Utf8PathBuf,
}

impl RegionCatalog {
    /// Catalog rooted at `tiles_dir`.
    #[must_use]
    pub fn new(tiles_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            tiles_dir: tiles_dir.into(),
        }
    }

    /// Regions with readable metadata, ordered by name.
    ///
    /// Directories without metadata are ignored; unreadable metadata is
    /// logged and skipped.
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] when a directory cannot be listed.
    pub fn list_regions(&self) -> Result<Vec<RegionSummary>, CatalogError> {
        let mut regions = Vec::new();
        for entry in entries(&self.tiles_dir)? {
            if !entry.is_dir {
                continue;
            }
            let dir = self.tiles_dir.join(&entry.name);
            let metadata_path = dir.join(METADATA_FILE);
            if !exists(&metadata_path)? {
                debug!("{dir}: no {METADATA_FILE}, not a region");
                continue;
            }
            let metadata = match read_metadata(&metadata_path) {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!("skipping region {}: {err}", entry.name);
                    continue;
                }
            };
            let tiles = tiles_in(&dir)?;
            regions.push(RegionSummary {
                metadata,
                tiles_on_disk: tiles.len(),
                total_bytes: tiles.iter().map(|tile| tile.size).sum(),
            });
        }
        Ok(regions)
    }

    /// Tiles of `region`, ordered by file name.
    ///
    /// # Errors
    /// Returns [`CatalogError::UnknownRegion`] when the region has no
    /// directory.
    pub fn list_tiles(&self, region: &str) -> Result<Vec<TileEntry>, CatalogError> {
        let dir = self.region_dir(region)?;
        if !exists(&dir)? {
            return Err(CatalogError::UnknownRegion(region.to_owned()));
        }
        tiles_in(&dir)
    }

    /// Remove a region's tiles and metadata. Returns whether anything was
    /// removed.
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] when the directory cannot be removed.
    pub fn delete_region(&self, region: &str) -> Result<bool, CatalogError> {
        let dir = self.region_dir(region)?;
        let removed = remove_dir_all(&dir).map_err(|source| CatalogError::Io {
            path: dir.clone(),
            source,
        })?;
        if removed {
            info!("deleted region {region}");
        }
        Ok(removed)
    }

    fn region_dir(&self, region: &str) -> Result<Utf8PathBuf, CatalogError> {
        let name = RegionName::new(region)?;
        Ok(self.tiles_dir.join(name.as_str()))
    }
}

fn tiles_in(dir: &Utf8Path) -> Result<Vec<TileEntry>, CatalogError> {
    Ok(entries(dir)?
        .into_iter()
        .filter(|entry| !entry.is_dir && entry.name.ends_with(TILE_SUFFIX))
        .filter_map(|entry| {
            let coordinate = TileCoordinate::parse(&entry.name)?;
            Some(TileEntry {
                file_name: entry.name,
                coordinate,
                size: entry.size,
            })
        })
        .collect())
}

fn entries(dir: &Utf8Path) -> Result<Vec<DirEntryInfo>, CatalogError> {
    list_dir(dir).map_err(|source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn exists(path: &Utf8Path) -> Result<bool, CatalogError> {
    file_stat(path)
        .map(|stat| stat.is_some())
        .map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })
}
