//! Error types emitted by the Roam CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use roam_core::{RouteRequestValidationError, SolveError};
use roam_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the Roam CLI.
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
    /// The `provider` option names no known travel time source.
    #[error("unknown provider {name:?}; use 'http' or 'straight-line'")]
    UnknownProvider { name: String },
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
    /// Opening the route request file failed.
    #[error("failed to open route request at {path:?}: {source}")]
    OpenRouteRequest {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Route request JSON could not be decoded.
    #[error("failed to parse route request JSON at {path:?}: {source}")]
    ParseRouteRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The route request payload failed validation.
    #[error("route request in {path:?} failed validation: {source}")]
    InvalidRouteRequest {
        path: Utf8PathBuf,
        #[source]
        source: RouteRequestValidationError,
    },
    /// Constructing the travel time provider failed.
    #[error("failed to build {provider} travel time provider: {source}")]
    BuildTravelTimeProvider {
        provider: &'static str,
        #[source]
        source: ProviderBuildError,
    },
    /// The planner rejected the request or its provider failed.
    #[error("planner failed: {source}")]
    Solve {
        #[source]
        source: SolveError,
    },
    /// Serialising the route response failed.
    #[error("failed to serialise route response: {0}")]
    SerialiseRouteResponse(#[source] serde_json::Error),
    /// Writing the route output failed.
    #[error("failed to write route output: {0}")]
    WriteRouteOutput(#[source] std::io::Error),
}
