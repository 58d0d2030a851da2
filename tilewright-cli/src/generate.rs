//! Generate command implementation for the tilewright CLI.

use std::io::Write;
use std::num::NonZeroUsize;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::warn;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tilewright_core::{DEFAULT_SVG_SIZE, DEFAULT_TILE_SIZE_DEGREES, GeoBounds};
use tilewright_data::{DatasetCache, OsmiumExtract};
use tilewright_pipeline::{
    GenerationResult, GeneratorConfig, PbfDatasetProvider, RunStatus, TileGenerator,
};

use crate::{
    ARG_EAST, ARG_NORTH, ARG_OSM_PBF, ARG_REGION, ARG_SOUTH, ARG_WEST, CliError,
    DEFAULT_CACHE_DIR, DEFAULT_TILES_DIR, ENV_GENERATE_EAST, ENV_GENERATE_NORTH,
    ENV_GENERATE_OSM_PBF, ENV_GENERATE_REGION, ENV_GENERATE_SOUTH, ENV_GENERATE_WEST, preset,
    write_json,
};

/// CLI arguments for the `generate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "generate",
    long_about = "Render every tile of a region from an OSM PBF extract. \
                 Bounds come from --north/--south/--east/--west, from a \
                 built-in --preset, or from both with explicit edges taking \
                 precedence. The region name defaults to the preset name.",
    about = "Generate the SVG tiles of a region"
)]
#[ortho_config(prefix = "TILEWRIGHT")]
pub(crate) struct GenerateArgs {
    /// Region name; becomes the output directory under the tiles directory.
    #[arg(value_name = "region")]
    #[serde(default)]
    pub(crate) region: Option<String>,
    /// Built-in region supplying default bounds.
    #[arg(long, value_name = "name")]
    #[serde(default)]
    pub(crate) preset: Option<String>,
    /// Northern latitude of the region.
    #[arg(long = ARG_NORTH, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) north: Option<f64>,
    /// Southern latitude of the region.
    #[arg(long = ARG_SOUTH, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) south: Option<f64>,
    /// Eastern longitude of the region.
    #[arg(long = ARG_EAST, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) east: Option<f64>,
    /// Western longitude of the region.
    #[arg(long = ARG_WEST, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) west: Option<f64>,
    /// Path to the OpenStreetMap PBF extract covering the region.
    #[arg(long = ARG_OSM_PBF, value_name = "path")]
    #[serde(default)]
    pub(crate) osm_pbf: Option<Utf8PathBuf>,
    /// Root directory for generated regions (default `tiles`).
    #[arg(long, value_name = "dir")]
    #[serde(default)]
    pub(crate) tiles_dir: Option<Utf8PathBuf>,
    /// Directory for pre-filtered regional extracts (default `data/osm_cache`).
    #[arg(long, value_name = "dir")]
    #[serde(default)]
    pub(crate) cache_dir: Option<Utf8PathBuf>,
    /// Executable used to pre-filter the extract (default `osmium`).
    #[arg(long, value_name = "program")]
    #[serde(default)]
    pub(crate) osmium: Option<String>,
    /// Tile edge length in degrees (default 0.01).
    #[arg(long, value_name = "degrees")]
    #[serde(default)]
    pub(crate) tile_size: Option<f64>,
    /// Rendered tile size in image units (default 1000).
    #[arg(long, value_name = "units")]
    #[serde(default)]
    pub(crate) svg_size: Option<u32>,
    /// Worker threads (default: one per CPU core).
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) workers: Option<usize>,
}

impl GenerateArgs {
    pub(crate) fn into_config(self) -> Result<GenerateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        GenerateConfig::try_from(merged)
    }
}

/// Resolved `generate` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GenerateConfig {
    pub(crate) region: String,
    pub(crate) bounds: GeoBounds,
    pub(crate) osm_pbf: Utf8PathBuf,
    pub(crate) tiles_dir: Utf8PathBuf,
    pub(crate) cache_dir: Utf8PathBuf,
    pub(crate) osmium: Option<String>,
    pub(crate) tile_size: f64,
    pub(crate) svg_size: u32,
    pub(crate) workers: Option<NonZeroUsize>,
}

impl GenerateConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.osm_pbf, ARG_OSM_PBF)
    }

    fn generator(&self) -> TileGenerator {
        let mut prefilter = OsmiumExtract::default();
        if let Some(program) = &self.osmium {
            prefilter = prefilter.with_program(program.clone());
        }
        let cache = DatasetCache::new(self.cache_dir.clone()).with_prefilter(Arc::new(prefilter));
        let provider = PbfDatasetProvider::new(self.osm_pbf.clone()).with_cache(cache);

        let mut config = GeneratorConfig::new(self.tiles_dir.clone())
            .with_tile_size(self.tile_size)
            .with_svg_size(self.svg_size);
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        TileGenerator::new(config, provider)
    }
}

pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match tilewright_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => match tilewright_fs::file_stat(path) {
            Ok(Some(_)) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Ok(None) => Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        },
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl TryFrom<GenerateArgs> for GenerateConfig {
    type Error = CliError;

    fn try_from(args: GenerateArgs) -> Result<Self, Self::Error> {
        let chosen = match args.preset.as_deref() {
            Some(name) => Some(preset::find(name).ok_or_else(|| CliError::UnknownPreset {
                name: name.to_owned(),
                known: preset::names(),
            })?),
            None => None,
        };

        let region = args
            .region
            .or_else(|| chosen.map(|found| found.name.to_owned()))
            .ok_or(CliError::MissingArgument {
                field: ARG_REGION,
                env: ENV_GENERATE_REGION,
            })?;

        let edge = |explicit: Option<f64>,
                    from_preset: fn(&preset::Preset) -> f64,
                    field: &'static str,
                    env: &'static str| {
            explicit
                .or_else(|| chosen.map(from_preset))
                .ok_or(CliError::MissingArgument { field, env })
        };
        let north = edge(args.north, |p| p.north, ARG_NORTH, ENV_GENERATE_NORTH)?;
        let south = edge(args.south, |p| p.south, ARG_SOUTH, ENV_GENERATE_SOUTH)?;
        let east = edge(args.east, |p| p.east, ARG_EAST, ENV_GENERATE_EAST)?;
        let west = edge(args.west, |p| p.west, ARG_WEST, ENV_GENERATE_WEST)?;
        let bounds = GeoBounds::new(north, south, east, west)?;

        let osm_pbf = args.osm_pbf.ok_or(CliError::MissingArgument {
            field: ARG_OSM_PBF,
            env: ENV_GENERATE_OSM_PBF,
        })?;

        let workers = match args.workers {
            Some(count) => Some(NonZeroUsize::new(count).ok_or(CliError::ZeroWorkers)?),
            None => None,
        };

        Ok(Self {
            region,
            bounds,
            osm_pbf,
            tiles_dir: args
                .tiles_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_TILES_DIR)),
            cache_dir: args
                .cache_dir
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CACHE_DIR)),
            osmium: args.osmium,
            tile_size: args.tile_size.unwrap_or(DEFAULT_TILE_SIZE_DEGREES),
            svg_size: args.svg_size.unwrap_or(DEFAULT_SVG_SIZE),
            workers,
        })
    }
}

pub(crate) fn run_generate_with(args: GenerateArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_generate_config(args)?;
    let result = config
        .generator()
        .generate(&config.region, &config.bounds);
    report(&result, writer)
}

pub(crate) fn resolve_generate_config(args: GenerateArgs) -> Result<GenerateConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Print `result` and map an aborted run to an error exit.
pub(crate) fn report(result: &GenerationResult, writer: &mut dyn Write) -> Result<(), CliError> {
    write_json(writer, result)?;
    match result.status {
        RunStatus::Completed => {
            if result.failed_tiles > 0 {
                warn!(
                    "{}: {} of {} tiles failed",
                    result.region, result.failed_tiles, result.total_tiles
                );
            }
            Ok(())
        }
        RunStatus::Error => Err(CliError::Generation {
            region: result.region.clone(),
            message: result
                .error
                .clone()
                .unwrap_or_else(|| "unknown error".to_owned()),
        }),
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<GenerateConfig, CliError> {
    let merged = GenerateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    GenerateConfig::try_from(merged)
}
