//! Regional dataset resolution for a generation run.

use std::fmt;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use tilewright_core::GeoBounds;
use tilewright_data::{DatasetCache, DatasetUnavailable, OsmSource, PbfSource};
use tilewright_fs::file_stat;

use crate::region::RegionName;

/// Supplies the dataset scanned for every tile of a region.
///
/// Called once per run before any tile is processed. A failure aborts the
/// run.
pub trait DatasetProvider: Send + Sync {
    /// Resolve the dataset covering `bounds` for `region`.
    ///
    /// # Errors
    /// Returns [`DatasetUnavailable`] when no dataset can be found.
    fn open(
        &self,
        region: &RegionName,
        bounds: &GeoBounds,
    ) -> Result<Arc<dyn OsmSource>, DatasetUnavailable>;
}

/// Reads a PBF extract, optionally through a pre-filtering cache.
///
/// # Examples
/// ```no_run
/// use tilewright_data::DatasetCache;
/// use tilewright_pipeline::PbfDatasetProvider;
///
/// let provider = PbfDatasetProvider::new("ontario-latest.osm.pbf")
///     .with_cache(DatasetCache::new("data/osm_cache"));
/// assert_eq!(provider.source().as_str(), "ontario-latest.osm.pbf");
/// ```
#[derive(Debug, Clone)]
pub struct PbfDatasetProvider {
    source: Utf8PathBuf,
    cache: Option<DatasetCache>,
}

impl PbfDatasetProvider {
    /// Scan `source` directly.
    #[must_use]
    pub fn new(source: impl Into<Utf8PathBuf>) -> Self {
        Self {
            source: source.into(),
            cache: None,
        }
    }

    /// Resolve through `cache`, which keeps pre-filtered regional copies.
    #[must_use]
    pub fn with_cache(mut self, cache: DatasetCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Path of the unfiltered source dataset.
    #[must_use]
    pub fn source(&self) -> &Utf8Path {
        &self.source
    }
}

impl DatasetProvider for PbfDatasetProvider {
    fn open(
        &self,
        region: &RegionName,
        bounds: &GeoBounds,
    ) -> Result<Arc<dyn OsmSource>, DatasetUnavailable> {
        let path = match &self.cache {
            Some(cache) => cache.resolve(region.as_str(), &self.source, bounds)?,
            None => {
                let found = file_stat(&self.source).map_err(|source| {
                    DatasetUnavailable::Inaccessible {
                        path: self.source.clone(),
                        source,
                    }
                })?;
                if found.is_none() {
                    return Err(DatasetUnavailable::Missing {
                        path: self.source.clone(),
                    });
                }
                self.source.clone()
            }
        };
        Ok(Arc::new(PbfSource::new(path)))
    }
}

/// Serves one already-loaded dataset for every region.
///
/// Useful for embedding callers that hold a dataset in memory and for tests.
#[derive(Clone)]
pub struct SharedDataset {
    source: Arc<dyn OsmSource>,
}

impl SharedDataset {
    /// Wrap `source`.
    #[must_use]
    pub fn new(source: impl OsmSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

impl fmt::Debug for SharedDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedDataset")
            .field("source", &self.source.describe())
            .finish()
    }
}

impl DatasetProvider for SharedDataset {
    fn open(
        &self,
        _region: &RegionName,
        _bounds: &GeoBounds,
    ) -> Result<Arc<dyn OsmSource>, DatasetUnavailable> {
        Ok(Arc::clone(&self.source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tilewright_data::MemorySource;

    fn region() -> RegionName {
        RegionName::new("test-region").expect("valid name")
    }

    fn bounds() -> GeoBounds {
        GeoBounds::new(43.65, 43.64, -79.38, -79.39).expect("valid bounds")
    }

    #[rstest]
    fn missing_source_is_unavailable() {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
        let provider = PbfDatasetProvider::new(root.join("absent.osm.pbf"));
        let err = provider
            .open(&region(), &bounds())
            .err()
            .expect("missing dataset");
        assert!(matches!(err, DatasetUnavailable::Missing { .. }));
    }

    #[rstest]
    fn existing_source_is_scanned_directly() {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 path");
        let path = root.join("region.osm.pbf");
        std::fs::write(&path, b"not checked until scanned").expect("write dataset");
        let source = PbfDatasetProvider::new(path.clone())
            .open(&region(), &bounds())
            .expect("dataset resolves");
        assert_eq!(source.describe(), path.to_string());
    }

    #[rstest]
    fn shared_dataset_serves_every_region() {
        let provider = SharedDataset::new(MemorySource::new());
        let first = provider.open(&region(), &bounds()).expect("dataset");
        let second = provider.open(&region(), &bounds()).expect("dataset");
        assert!(Arc::ptr_eq(&first, &second));
    }
}
