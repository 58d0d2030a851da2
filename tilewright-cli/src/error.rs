//! Error types emitted by the tilewright CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use tilewright_core::InvalidBounds;
use tilewright_pipeline::CatalogError;

/// Errors emitted by the tilewright CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// `--preset` names no built-in region.
    #[error("unknown preset {name:?}; expected one of: {known}")]
    UnknownPreset { name: String, known: String },
    /// The merged bounds do not describe a valid region.
    #[error("invalid region bounds: {0}")]
    InvalidBounds(#[from] InvalidBounds),
    /// `--workers` was zero.
    #[error("workers must be at least 1")]
    ZeroWorkers,
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The generation run aborted.
    #[error("generation of region {region} failed: {message}")]
    Generation { region: String, message: String },
    /// Listing or deleting generated regions failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Inspecting or clearing the dataset cache failed.
    #[error("failed to access dataset cache {path:?}: {source}")]
    Cache {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
