//! Test helpers for composing layered configuration.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::MergeComposer;
use serde_json::Value;
use tempfile::TempDir;

use crate::generate::{GenerateArgs, GenerateConfig, config_from_layers_for_test};
use crate::CliError;

/// A temporary workspace holding a placeholder OSM extract.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
    extract: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let extract = root.join("region.osm.pbf");
        std::fs::write(&extract, b"extract contents").expect("write extract");
        Self {
            _dir: dir,
            root,
            extract,
        }
    }

    pub(super) fn root(&self) -> &Utf8PathBuf {
        &self.root
    }

    pub(super) fn extract(&self) -> &Utf8PathBuf {
        &self.extract
    }
}

/// Serialize CLI arguments as a merge layer, dropping unset options so they
/// do not mask lower layers.
pub(super) fn cli_layer(args: &GenerateArgs) -> Value {
    match serde_json::to_value(args).expect("serialise args") {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, value)| !value.is_null())
                .collect(),
        ),
        other => other,
    }
}

pub(super) fn merge_layers(
    cli: &GenerateArgs,
    file_layer: Option<Value>,
    env_layer: Option<Value>,
) -> Result<GenerateConfig, CliError> {
    let mut composer = MergeComposer::new();
    if let Some(file) = file_layer {
        composer.push_file(file, None);
    }
    if let Some(env) = env_layer {
        composer.push_environment(env);
    }
    composer.push_cli(cli_layer(cli));
    config_from_layers_for_test(composer.layers())
}

pub(super) fn parse_generate(args: &[&str]) -> GenerateArgs {
    let invocation = ["tilewright", "generate"].iter().chain(args).copied();
    match crate::Cli::try_parse_from(invocation).expect("arguments parse").command {
        crate::Command::Generate(args) => args,
        other => panic!("expected generate, parsed {other:?}"),
    }
}
