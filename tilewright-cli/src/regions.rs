//! Commands inspecting and deleting generated regions.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tilewright_pipeline::{CatalogError, RegionCatalog};

use crate::{ARG_REGION, CliError, DEFAULT_TILES_DIR, write_line};

const ENV_TILES_REGION: &str = "TILEWRIGHT_CMDS_TILES_REGION";
const ENV_DELETE_REGION: &str = "TILEWRIGHT_CMDS_DELETE_REGION_REGION";

/// CLI arguments for the `regions` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "regions", about = "List generated regions")]
#[ortho_config(prefix = "TILEWRIGHT")]
pub(crate) struct RegionsArgs {
    /// Root directory for generated regions (default `tiles`).
    #[arg(long, value_name = "dir")]
    #[serde(default)]
    pub(crate) tiles_dir: Option<Utf8PathBuf>,
}

/// CLI arguments for the `tiles` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "tiles", about = "List the tiles of a generated region")]
#[ortho_config(prefix = "TILEWRIGHT")]
pub(crate) struct TilesArgs {
    /// Region to list.
    #[arg(value_name = "region")]
    #[serde(default)]
    pub(crate) region: Option<String>,
    /// Root directory for generated regions (default `tiles`).
    #[arg(long, value_name = "dir")]
    #[serde(default)]
    pub(crate) tiles_dir: Option<Utf8PathBuf>,
}

/// CLI arguments for the `delete-region` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "delete-region", about = "Delete a generated region and its tiles")]
#[ortho_config(prefix = "TILEWRIGHT")]
pub(crate) struct DeleteRegionArgs {
    /// Region to delete.
    #[arg(value_name = "region")]
    #[serde(default)]
    pub(crate) region: Option<String>,
    /// Root directory for generated regions (default `tiles`).
    #[arg(long, value_name = "dir")]
    #[serde(default)]
    pub(crate) tiles_dir: Option<Utf8PathBuf>,
}

fn catalog(tiles_dir: Option<Utf8PathBuf>) -> RegionCatalog {
    RegionCatalog::new(tiles_dir.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_TILES_DIR)))
}

pub(crate) fn run_regions_with(args: RegionsArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let regions = catalog(merged.tiles_dir).list_regions()?;
    if regions.is_empty() {
        return write_line(writer, "no regions generated");
    }
    for summary in regions {
        let metadata = &summary.metadata;
        write_line(
            writer,
            &format!(
                "{}\t{} tiles\t{} on disk\t{} bytes\tcreated {}",
                metadata.name,
                metadata.tile_count,
                summary.tiles_on_disk,
                summary.total_bytes,
                metadata.created_at
            ),
        )?;
    }
    Ok(())
}

pub(crate) fn run_tiles_with(args: TilesArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let region = merged.region.ok_or(CliError::MissingArgument {
        field: ARG_REGION,
        env: ENV_TILES_REGION,
    })?;
    for tile in catalog(merged.tiles_dir).list_tiles(&region)? {
        write_line(writer, &format!("{}\t{} bytes", tile.file_name, tile.size))?;
    }
    Ok(())
}

pub(crate) fn run_delete_region_with(
    args: DeleteRegionArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let region = merged.region.ok_or(CliError::MissingArgument {
        field: ARG_REGION,
        env: ENV_DELETE_REGION,
    })?;
    if catalog(merged.tiles_dir).delete_region(&region)? {
        write_line(writer, &format!("deleted region {region}"))
    } else {
        Err(CatalogError::UnknownRegion(region).into())
    }
}
