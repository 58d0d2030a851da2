//! Behaviour-driven step definitions driving the generate CLI scenarios.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

use super::helpers::{Workspace, merge_layers, parse_generate};
use crate::generate::GenerateConfig;
use crate::{ARG_OSM_PBF, CliError};

/// Aggregates generate scenario state so each step only needs a single world
/// argument.
struct GenerateWorld {
    workspace: Workspace,
    cli_args: RefCell<Vec<String>>,
    file_layer: RefCell<Option<Value>>,
    env_layer: RefCell<Option<Value>>,
    result: RefCell<Option<Result<GenerateConfig, CliError>>>,
}

#[fixture]
fn world() -> GenerateWorld {
    GenerateWorld {
        workspace: Workspace::new(),
        cli_args: RefCell::new(Vec::new()),
        file_layer: RefCell::new(None),
        env_layer: RefCell::new(None),
        result: RefCell::new(None),
    }
}

fn config(world: &GenerateWorld) -> GenerateConfig {
    let borrowed = world.result.borrow();
    borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect("expected success")
        .clone()
}

#[given("an OSM extract exists on disk")]
fn extract_exists(#[from(world)] world: &GenerateWorld) {
    assert!(world.workspace.extract().exists());
}

#[given("I pass the preset {preset} with the extract path")]
fn preset_with_extract(#[from(world)] world: &GenerateWorld, preset: String) {
    world.cli_args.borrow_mut().extend([
        "--preset".to_owned(),
        preset,
        format!("--{ARG_OSM_PBF}"),
        world.workspace.extract().to_string(),
    ]);
}

#[given("I pass the preset {preset} without an extract")]
fn preset_without_extract(#[from(world)] world: &GenerateWorld, preset: String) {
    world
        .cli_args
        .borrow_mut()
        .extend(["--preset".to_owned(), preset]);
}

#[given("I pass the preset {preset} with north {north}")]
fn preset_with_north(#[from(world)] world: &GenerateWorld, preset: String, north: String) {
    world
        .cli_args
        .borrow_mut()
        .extend(["--preset".to_owned(), preset, "--north".to_owned(), north]);
}

#[given(
    "the configuration file sets the extract path, tiles directory {tiles_dir} and {workers} workers"
)]
fn file_layer(#[from(world)] world: &GenerateWorld, tiles_dir: String, workers: usize) {
    world.file_layer.replace(Some(json!({
        "osm_pbf": world.workspace.extract().as_str(),
        "tiles_dir": tiles_dir,
        "workers": workers,
    })));
}

#[given("the environment sets the tiles directory {tiles_dir}")]
fn env_layer(#[from(world)] world: &GenerateWorld, tiles_dir: String) {
    world
        .env_layer
        .replace(Some(json!({ "tiles_dir": tiles_dir })));
}

#[when("I configure the generate command")]
fn configure_generate(#[from(world)] world: &GenerateWorld) {
    let args: Vec<String> = world.cli_args.borrow().clone();
    let borrowed: Vec<&str> = args.iter().map(String::as_str).collect();
    let cli = parse_generate(&borrowed);
    let file = world.file_layer.borrow().clone();
    let env = world.env_layer.borrow().clone();
    let outcome = merge_layers(&cli, file, env).and_then(|config| {
        config.validate_sources()?;
        Ok(config)
    });
    world.result.replace(Some(outcome));
}

#[then("the region is {region}")]
fn region_is(#[from(world)] world: &GenerateWorld, region: String) {
    assert_eq!(config(world).region, region);
}

#[then("the bounds are north {north} south {south} east {east} west {west}")]
fn bounds_are(
    #[from(world)] world: &GenerateWorld,
    north: f64,
    south: f64,
    east: f64,
    west: f64,
) {
    let bounds = config(world).bounds;
    assert_eq!(bounds.north(), north);
    assert_eq!(bounds.south(), south);
    assert_eq!(bounds.east(), east);
    assert_eq!(bounds.west(), west);
}

#[then("the CLI reports that the \"osm-pbf\" flag is missing")]
fn reports_missing_extract(#[from(world)] world: &GenerateWorld) {
    let borrowed = world.result.borrow();
    let error = borrowed
        .as_ref()
        .expect("result recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_OSM_PBF),
        other => panic!("unexpected error {other:?}"),
    }
}

#[then("the tiles directory is {tiles_dir}")]
fn tiles_dir_is(#[from(world)] world: &GenerateWorld, tiles_dir: String) {
    assert_eq!(config(world).tiles_dir.as_str(), tiles_dir);
}

#[then("the worker count is {workers}")]
fn workers_are(#[from(world)] world: &GenerateWorld, workers: usize) {
    assert_eq!(config(world).workers.map(std::num::NonZeroUsize::get), Some(workers));
}

#[scenario(path = "tests/features/generate_command.feature", index = 0)]
fn preset_selection(#[from(world)] world: GenerateWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/generate_command.feature", index = 1)]
fn rejecting_missing_extract(#[from(world)] world: GenerateWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/generate_command.feature", index = 2)]
fn layering_cli_env_file(#[from(world)] world: GenerateWorld) {
    let _ = world;
}
