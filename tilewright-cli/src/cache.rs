//! Commands inspecting and clearing the regional dataset cache.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tilewright_data::DatasetCache;

use crate::{CliError, DEFAULT_CACHE_DIR, write_line};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// CLI arguments shared by the `cache-status` and `cache-clear` subcommands.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "cache", about = "Inspect the regional dataset cache")]
#[ortho_config(prefix = "TILEWRIGHT")]
pub(crate) struct CacheArgs {
    /// Directory for pre-filtered regional extracts (default `data/osm_cache`).
    #[arg(long, value_name = "dir")]
    #[serde(default)]
    pub(crate) cache_dir: Option<Utf8PathBuf>,
}

impl CacheArgs {
    fn into_cache(self) -> Result<DatasetCache, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(DatasetCache::new(
            merged
                .cache_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CACHE_DIR)),
        ))
    }
}

fn cache_error(cache: &DatasetCache) -> impl FnOnce(std::io::Error) -> CliError + '_ {
    |source| CliError::Cache {
        path: cache.cache_dir().to_path_buf(),
        source,
    }
}

pub(crate) fn run_status_with(args: CacheArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let cache = args.into_cache()?;
    let datasets = cache.status().map_err(cache_error(&cache))?;
    if datasets.is_empty() {
        return write_line(writer, &format!("no datasets cached in {}", cache.cache_dir()));
    }
    for dataset in datasets {
        let freshness = if dataset.fresh { "fresh" } else { "stale" };
        write_line(
            writer,
            &format!(
                "{}\t{} bytes\t{} days old\t{freshness}",
                dataset.name,
                dataset.size,
                dataset.age.as_secs() / SECONDS_PER_DAY
            ),
        )?;
    }
    Ok(())
}

pub(crate) fn run_clear_with(args: CacheArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let cache = args.into_cache()?;
    let summary = cache.clear().map_err(cache_error(&cache))?;
    write_line(
        writer,
        &format!(
            "removed {} cached datasets, freed {} bytes",
            summary.removed, summary.bytes
        ),
    )
}
