//! Regional dataset resolution with an on-disk pre-filtered copy.
//!
//! The filtered copy lives at
//! `<cache_dir>/<region>-<north>_<south>_<east>_<west>-filtered.osm.pbf`,
//! keyed by the buffered bounds handed to the pre-filter, so a region
//! requested with different bounds gets its own copy. It is rebuilt when
//! missing or older than the source dataset. Builds stage into a temporary file in the
//! cache directory and are renamed into place only once complete, so a
//! concurrent reader never observes a partial dataset.

use std::io;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info, warn};
use thiserror::Error;
use tilewright_core::GeoBounds;
use tilewright_fs::{FileStat, ensure_dir, file_stat, list_dir, remove_file};

use crate::prefilter::{OsmiumExtract, PrefilterError, RegionalPrefilter};

/// Buffer in degrees added around the region before pre-filtering.
pub const DEFAULT_PREFILTER_BUFFER: f64 = 0.005;

/// Filtered outputs smaller than this are treated as failed extractions.
pub const DEFAULT_MIN_FILTERED_BYTES: u64 = 1000;

/// Cached datasets younger than this are reported as fresh.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(28 * 24 * 60 * 60);

const DATASET_SUFFIX: &str = ".osm.pbf";

/// The regional dataset could not be resolved. Fatal for a generation run.
#[derive(Debug, Error)]
pub enum DatasetUnavailable {
    /// No dataset exists at the configured path.
    #[error("no OSM dataset found at {path}")]
    Missing {
        /// Expected dataset path.
        path: Utf8PathBuf,
    },
    /// The dataset path exists but could not be inspected.
    #[error("OSM dataset at {path} is not accessible")]
    Inaccessible {
        /// Dataset path.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// A dataset file in the cache directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedDataset {
    /// File name.
    pub name: String,
    /// Full path.
    pub path: Utf8PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
    /// Time since the last modification.
    pub age: Duration,
    /// Whether the file is younger than [`FRESHNESS_WINDOW`].
    pub fresh: bool,
}

/// Outcome of [`DatasetCache::clear`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearSummary {
    /// Files removed.
    pub removed: usize,
    /// Bytes freed.
    pub bytes: u64,
}

/// Resolves regional datasets, maintaining pre-filtered copies.
#[derive(Clone)]
pub struct DatasetCache {
    cache_dir: Utf8PathBuf,
    buffer: f64,
    min_filtered_bytes: u64,
    prefilter: Arc<dyn RegionalPrefilter>,
}

impl std::fmt::Debug for DatasetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetCache")
            .field("cache_dir", &self.cache_dir)
            .field("buffer", &self.buffer)
            .field("min_filtered_bytes", &self.min_filtered_bytes)
            .finish_non_exhaustive()
    }
}

impl DatasetCache {
    /// A cache in `cache_dir` that pre-filters with `osmium`.
    pub fn new(cache_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            buffer: DEFAULT_PREFILTER_BUFFER,
            min_filtered_bytes: DEFAULT_MIN_FILTERED_BYTES,
            prefilter: Arc::new(OsmiumExtract::default()),
        }
    }

    /// Replace the pre-filter implementation.
    #[must_use]
    pub fn with_prefilter(mut self, prefilter: Arc<dyn RegionalPrefilter>) -> Self {
        self.prefilter = prefilter;
        self
    }

    /// Override the buffer added around the region.
    #[must_use]
    pub const fn with_buffer(mut self, buffer: f64) -> Self {
        self.buffer = buffer;
        self
    }

    /// Override the minimum accepted filtered size.
    #[must_use]
    pub const fn with_min_filtered_bytes(mut self, bytes: u64) -> Self {
        self.min_filtered_bytes = bytes;
        self
    }

    /// Cache directory.
    pub fn cache_dir(&self) -> &Utf8Path {
        &self.cache_dir
    }

    /// Where the filtered copy for `region` within `bounds` lives.
    pub fn filtered_path(&self, region: &str, bounds: &GeoBounds) -> Utf8PathBuf {
        let buffered = bounds.expanded(self.buffer);
        self.cache_dir.join(format!(
            "{region}-{:.4}_{:.4}_{:.4}_{:.4}-filtered{DATASET_SUFFIX}",
            buffered.north(),
            buffered.south(),
            buffered.east(),
            buffered.west(),
        ))
    }

    /// Pick the dataset to scan for `region`.
    ///
    /// Returns the filtered copy when it is current or can be rebuilt, and
    /// the source dataset otherwise.
    ///
    /// # Errors
    /// Returns [`DatasetUnavailable`] when the source dataset is missing or
    /// cannot be inspected. Pre-filter failures are logged, not returned.
    pub fn resolve(
        &self,
        region: &str,
        source: &Utf8Path,
        bounds: &GeoBounds,
    ) -> Result<Utf8PathBuf, DatasetUnavailable> {
        let source_stat = file_stat(source)
            .map_err(|err| DatasetUnavailable::Inaccessible {
                path: source.to_path_buf(),
                source: err,
            })?
            .ok_or_else(|| DatasetUnavailable::Missing {
                path: source.to_path_buf(),
            })?;

        let filtered = self.filtered_path(region, bounds);
        if self.is_current(&filtered, &source_stat) {
            debug!("{region}: using cached dataset {filtered}");
            return Ok(filtered);
        }

        match self.rebuild(region, source, &filtered, bounds) {
            Ok(size) => {
                info!(
                    "{region}: pre-filtered {source} ({} bytes) into {filtered} ({size} bytes)",
                    source_stat.size
                );
                Ok(filtered)
            }
            Err(err) => {
                warn!("{region}: pre-filter failed, scanning the full dataset: {err}");
                Ok(source.to_path_buf())
            }
        }
    }

    fn is_current(&self, filtered: &Utf8Path, source: &FileStat) -> bool {
        match file_stat(filtered) {
            Ok(Some(stat)) => stat.modified >= source.modified,
            Ok(None) => false,
            Err(err) => {
                debug!("cannot inspect {filtered}: {err}");
                false
            }
        }
    }

    fn rebuild(
        &self,
        region: &str,
        source: &Utf8Path,
        filtered: &Utf8Path,
        bounds: &GeoBounds,
    ) -> Result<u64, PrefilterError> {
        let io_error = |path: &Utf8Path| {
            let path = path.to_path_buf();
            move |source: io::Error| PrefilterError::Io { path, source }
        };
        ensure_dir(&self.cache_dir).map_err(io_error(&self.cache_dir))?;
        let staged = tempfile::Builder::new()
            .prefix(&format!(".{region}-"))
            .suffix(DATASET_SUFFIX)
            .tempfile_in(self.cache_dir.as_std_path())
            .map_err(io_error(&self.cache_dir))?
            .into_temp_path();
        let staged_path = Utf8PathBuf::from_path_buf(staged.to_path_buf()).map_err(|path| {
            PrefilterError::Io {
                path: self.cache_dir.clone(),
                source: io::Error::other(format!("non-UTF-8 temporary path {}", path.display())),
            }
        })?;

        self.prefilter
            .extract(source, &staged_path, &bounds.expanded(self.buffer))?;

        let size = file_stat(&staged_path)
            .map_err(io_error(&staged_path))?
            .map_or(0, |stat| stat.size);
        if size < self.min_filtered_bytes {
            return Err(PrefilterError::TooSmall {
                path: staged_path,
                size,
                minimum: self.min_filtered_bytes,
            });
        }
        staged
            .persist(filtered.as_std_path())
            .map_err(|err| PrefilterError::Io {
                path: filtered.to_path_buf(),
                source: err.error,
            })?;
        Ok(size)
    }

    /// Datasets currently held in the cache directory, sorted by name.
    ///
    /// # Errors
    /// Returns an I/O error when the directory cannot be listed.
    pub fn status(&self) -> io::Result<Vec<CachedDataset>> {
        let now = SystemTime::now();
        Ok(list_dir(&self.cache_dir)?
            .into_iter()
            .filter(|entry| !entry.is_dir && is_dataset_name(&entry.name))
            .map(|entry| {
                let age = now.duration_since(entry.modified).unwrap_or_default();
                CachedDataset {
                    path: self.cache_dir.join(&entry.name),
                    name: entry.name,
                    size: entry.size,
                    modified: entry.modified,
                    age,
                    fresh: age < FRESHNESS_WINDOW,
                }
            })
            .collect())
    }

    /// Remove every dataset from the cache directory.
    ///
    /// # Errors
    /// Returns an I/O error when listing or removing fails.
    pub fn clear(&self) -> io::Result<ClearSummary> {
        let mut summary = ClearSummary::default();
        for dataset in self.status()? {
            if remove_file(&dataset.path)? {
                summary.removed += 1;
                summary.bytes += dataset.size;
            }
        }
        info!(
            "cleared {} cached datasets ({} bytes) from {}",
            summary.removed, summary.bytes, self.cache_dir
        );
        Ok(summary)
    }
}

fn is_dataset_name(name: &str) -> bool {
    name.ends_with(DATASET_SUFFIX) && !name.starts_with('.')
}
