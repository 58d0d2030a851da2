//! Focused unit tests covering generate configuration validation.

use super::helpers::{Workspace, merge_layers, parse_generate};
use crate::generate::{GenerateArgs, GenerateConfig, report};
use crate::*;
use rstest::rstest;
use serde_json::json;
use tilewright_pipeline::{GenerationResult, RunStatus};

fn args_with_extract(workspace: &Workspace) -> GenerateArgs {
    GenerateArgs {
        region: Some("harbourfront".into()),
        north: Some(43.641),
        south: Some(43.640),
        east: Some(-79.379),
        west: Some(-79.380),
        osm_pbf: Some(workspace.extract().clone()),
        ..GenerateArgs::default()
    }
}

#[rstest]
#[case(None, Some("43.68"), ARG_REGION, ENV_GENERATE_REGION)]
#[case(Some("downtown"), None, ARG_NORTH, ENV_GENERATE_NORTH)]
fn converting_without_required_fields_errors(
    #[case] region: Option<&str>,
    #[case] north: Option<&str>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = GenerateArgs {
        region: region.map(str::to_owned),
        north: north.map(|value| value.parse().expect("number")),
        south: Some(43.62),
        east: Some(-79.34),
        west: Some(-79.40),
        osm_pbf: Some("region.osm.pbf".into()),
        ..GenerateArgs::default()
    };
    let err = GenerateConfig::try_from(args).expect_err("missing field should error");
    match err {
        CliError::MissingArgument {
            field: missing,
            env,
        } => {
            assert_eq!(missing, field);
            assert_eq!(env, env_var);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn missing_extract_names_the_flag() {
    let args = GenerateArgs {
        preset: Some("calgary-downtown".into()),
        ..GenerateArgs::default()
    };
    match GenerateConfig::try_from(args).expect_err("extract required") {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_OSM_PBF);
            assert_eq!(env, ENV_GENERATE_OSM_PBF);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn defaults_fill_unset_options() {
    let workspace = Workspace::new();
    let config = GenerateConfig::try_from(args_with_extract(&workspace)).expect("valid config");
    assert_eq!(config.tiles_dir.as_str(), DEFAULT_TILES_DIR);
    assert_eq!(config.cache_dir.as_str(), DEFAULT_CACHE_DIR);
    assert_eq!(config.tile_size, 0.01);
    assert_eq!(config.svg_size, 1000);
    assert_eq!(config.workers, None);
    assert_eq!(config.osmium, None);
}

#[rstest]
fn presets_supply_region_and_bounds() {
    let args = parse_generate(&["--preset", "vancouver-downtown", "--osm-pbf", "bc.osm.pbf"]);
    let config = GenerateConfig::try_from(args).expect("valid config");
    assert_eq!(config.region, "vancouver-downtown");
    assert_eq!(config.bounds.north(), 49.31);
    assert_eq!(config.bounds.west(), -123.18);
}

#[rstest]
fn explicit_edges_override_the_preset() {
    let args = parse_generate(&[
        "core",
        "--preset",
        "toronto-downtown",
        "--south",
        "43.64",
        "--east",
        "-79.37",
        "--osm-pbf",
        "on.osm.pbf",
    ]);
    let config = GenerateConfig::try_from(args).expect("valid config");
    assert_eq!(config.region, "core");
    assert_eq!(config.bounds.north(), 43.68);
    assert_eq!(config.bounds.south(), 43.64);
    assert_eq!(config.bounds.east(), -79.37);
    assert_eq!(config.bounds.west(), -79.40);
}

#[rstest]
fn unknown_presets_list_the_known_ones() {
    let args = GenerateArgs {
        preset: Some("atlantis".into()),
        ..GenerateArgs::default()
    };
    match GenerateConfig::try_from(args).expect_err("unknown preset") {
        CliError::UnknownPreset { name, known } => {
            assert_eq!(name, "atlantis");
            assert!(known.contains("montreal-downtown"));
        }
        other => panic!("expected UnknownPreset, found {other:?}"),
    }
}

#[rstest]
fn inverted_bounds_are_rejected() {
    let workspace = Workspace::new();
    let args = GenerateArgs {
        north: Some(43.0),
        south: Some(44.0),
        ..args_with_extract(&workspace)
    };
    assert!(matches!(
        GenerateConfig::try_from(args),
        Err(CliError::InvalidBounds(_))
    ));
}

#[rstest]
fn zero_workers_are_rejected() {
    let workspace = Workspace::new();
    let args = GenerateArgs {
        workers: Some(0),
        ..args_with_extract(&workspace)
    };
    assert!(matches!(
        GenerateConfig::try_from(args),
        Err(CliError::ZeroWorkers)
    ));
}

#[rstest]
fn validate_sources_reports_missing_files() {
    let workspace = Workspace::new();
    let args = GenerateArgs {
        osm_pbf: Some(workspace.root().join("absent.osm.pbf")),
        ..args_with_extract(&workspace)
    };
    let config = GenerateConfig::try_from(args).expect("valid config");
    match config.validate_sources().expect_err("extract missing") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_OSM_PBF),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories() {
    let workspace = Workspace::new();
    let args = GenerateArgs {
        osm_pbf: Some(workspace.root().clone()),
        ..args_with_extract(&workspace)
    };
    let config = GenerateConfig::try_from(args).expect("valid config");
    match config.validate_sources().expect_err("directory rejected") {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_OSM_PBF),
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = ortho_config::MergeComposer::new();
    composer.push_cli(json!({ "north": "far" }));
    let err = crate::generate::config_from_layers_for_test(composer.layers())
        .expect_err("invalid layer should map to CliError::Configuration");
    assert!(matches!(err, CliError::Configuration(_)));
}

#[rstest]
fn merge_layers_honours_precedence() {
    let workspace = Workspace::new();
    let cli = parse_generate(&["--preset", "ottawa-downtown", "--svg-size", "512"]);
    let config = merge_layers(
        &cli,
        Some(json!({
            "osm_pbf": workspace.extract().as_str(),
            "svg_size": 256,
            "tile_size": 0.02,
        })),
        Some(json!({ "tile_size": 0.05 })),
    )
    .expect("merged config should build");
    assert_eq!(config.osm_pbf, *workspace.extract());
    assert_eq!(config.svg_size, 512);
    assert_eq!(config.tile_size, 0.05);
    assert_eq!(config.region, "ottawa-downtown");
}

fn result(status: RunStatus, error: Option<&str>) -> GenerationResult {
    GenerationResult {
        status,
        region: "downtown".into(),
        successful_tiles: 3,
        failed_tiles: 1,
        total_tiles: 4,
        skipped_features: Vec::new(),
        failures: Vec::new(),
        error: error.map(str::to_owned),
    }
}

#[rstest]
fn completed_runs_print_the_result() {
    let mut output = Vec::new();
    report(&result(RunStatus::Completed, None), &mut output).expect("completed run succeeds");
    let json: serde_json::Value = serde_json::from_slice(&output).expect("json output");
    assert_eq!(json["status"], "completed");
    assert_eq!(json["failed_tiles"], 1);
}

#[rstest]
fn aborted_runs_exit_with_an_error() {
    let mut output = Vec::new();
    let err = report(&result(RunStatus::Error, Some("no dataset")), &mut output)
        .expect_err("aborted run fails");
    match err {
        CliError::Generation { region, message } => {
            assert_eq!(region, "downtown");
            assert_eq!(message, "no dataset");
        }
        other => panic!("expected Generation, found {other:?}"),
    }
    assert!(!output.is_empty());
}
