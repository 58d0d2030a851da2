//! Command-line interface for generating and managing tilewright regions.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod cache;
mod error;
mod generate;
mod preset;
mod regions;

pub use error::CliError;

use cache::CacheArgs;
use generate::GenerateArgs;
use regions::{DeleteRegionArgs, RegionsArgs, TilesArgs};

const ARG_REGION: &str = "region";
const ARG_NORTH: &str = "north";
const ARG_SOUTH: &str = "south";
const ARG_EAST: &str = "east";
const ARG_WEST: &str = "west";
const ARG_OSM_PBF: &str = "osm-pbf";
const ENV_GENERATE_REGION: &str = "TILEWRIGHT_CMDS_GENERATE_REGION";
const ENV_GENERATE_NORTH: &str = "TILEWRIGHT_CMDS_GENERATE_NORTH";
const ENV_GENERATE_SOUTH: &str = "TILEWRIGHT_CMDS_GENERATE_SOUTH";
const ENV_GENERATE_EAST: &str = "TILEWRIGHT_CMDS_GENERATE_EAST";
const ENV_GENERATE_WEST: &str = "TILEWRIGHT_CMDS_GENERATE_WEST";
const ENV_GENERATE_OSM_PBF: &str = "TILEWRIGHT_CMDS_GENERATE_OSM_PBF";

const DEFAULT_TILES_DIR: &str = "tiles";
const DEFAULT_CACHE_DIR: &str = "data/osm_cache";

/// Run the tilewright CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Generate(args) => generate::run_generate_with(args, writer),
        Command::Presets => list_presets(writer),
        Command::Regions(args) => regions::run_regions_with(args, writer),
        Command::Tiles(args) => regions::run_tiles_with(args, writer),
        Command::DeleteRegion(args) => regions::run_delete_region_with(args, writer),
        Command::CacheStatus(args) => cache::run_status_with(args, writer),
        Command::CacheClear(args) => cache::run_clear_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tilewright",
    about = "Generate accessible SVG map tiles from OpenStreetMap extracts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render and store every tile of a region.
    Generate(GenerateArgs),
    /// List the built-in region presets.
    Presets,
    /// List generated regions.
    Regions(RegionsArgs),
    /// List the tiles of a generated region.
    Tiles(TilesArgs),
    /// Delete a generated region.
    DeleteRegion(DeleteRegionArgs),
    /// Show the datasets held in the regional cache.
    CacheStatus(CacheArgs),
    /// Remove every dataset from the regional cache.
    CacheClear(CacheArgs),
}

fn list_presets(writer: &mut dyn Write) -> Result<(), CliError> {
    for preset in &preset::PRESETS {
        write_line(
            writer,
            &format!(
                "{}\t{}\tN {} S {} E {} W {}",
                preset.name, preset.title, preset.north, preset.south, preset.east, preset.west
            ),
        )?;
    }
    Ok(())
}

fn write_line(writer: &mut dyn Write, line: &str) -> Result<(), CliError> {
    writer
        .write_all(line.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .map_err(CliError::WriteOutput)
}

fn write_json(writer: &mut dyn Write, value: &impl Serialize) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    write_line(writer, &payload)
}

#[cfg(test)]
mod tests;
