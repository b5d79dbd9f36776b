//! Solve command implementation for the Roam CLI.

use std::io::{BufReader, Write};
use std::str::FromStr;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use roam_core::{Planner, RouteRequest, RouteResponse, TravelTimeProvider};
use roam_data::routing::{
    DEFAULT_WALKING_SPEED_KMH, HttpTravelTimeProvider, HttpTravelTimeProviderConfig,
    StraightLineTravelTimeProvider,
};
use roam_solver::{RoutePlanner, SearchConfig};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::{
    ARG_SOLVE_API_KEY, ARG_SOLVE_BASE_URL, ARG_SOLVE_MAX_EXPANSIONS, ARG_SOLVE_PROVIDER,
    ARG_SOLVE_REQUEST, ARG_SOLVE_SPEED_KMH, ARG_SOLVE_TIME_BUDGET_MS, ARG_SOLVE_TIMEOUT_SECS,
    CliError, ENV_SOLVE_API_KEY, ENV_SOLVE_REQUEST,
};

/// CLI arguments for the `solve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a route for a JSON-encoded RouteRequest. Travel times \
                 come from a distance-matrix service, or from straight-line \
                 estimates when running offline. Options can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Plan a time-budgeted route"
)]
#[ortho_config(prefix = "ROAM")]
pub(crate) struct SolveArgs {
    /// Path to a JSON file containing a RouteRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Travel time source: `http` or `straight-line`.
    #[arg(long = ARG_SOLVE_PROVIDER, value_name = "name")]
    #[serde(default)]
    pub(crate) provider: Option<String>,
    /// Distance-matrix endpoint for the `http` provider.
    #[arg(long = ARG_SOLVE_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// API key for the `http` provider.
    #[arg(long = ARG_SOLVE_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Request timeout for the `http` provider, in seconds.
    #[arg(long = ARG_SOLVE_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Travel speed for the `straight-line` provider, in km/h.
    #[arg(long = ARG_SOLVE_SPEED_KMH, value_name = "kmh")]
    #[serde(default)]
    pub(crate) speed_kmh: Option<f64>,
    /// Stop searching after this many state expansions.
    #[arg(long = ARG_SOLVE_MAX_EXPANSIONS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_expansions: Option<u64>,
    /// Stop searching after this many milliseconds.
    #[arg(long = ARG_SOLVE_TIME_BUDGET_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) time_budget_ms: Option<u64>,
}

impl SolveArgs {
    pub(crate) fn into_config(self) -> Result<SolveConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SolveConfig::try_from(merged)
    }
}

/// Travel time source selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ProviderKind {
    #[default]
    Http,
    StraightLine,
}

impl ProviderKind {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::StraightLine => "straight-line",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "straight-line" | "straight_line" => Ok(Self::StraightLine),
            _ => Err(CliError::UnknownProvider { name: s.to_owned() }),
        }
    }
}

/// Provider settings after configuration merging.
#[derive(Debug, Clone)]
pub(crate) enum ProviderSettings {
    Http(HttpTravelTimeProviderConfig),
    StraightLine { speed_kmh: f64 },
}

impl ProviderSettings {
    pub(crate) const fn kind(&self) -> ProviderKind {
        match self {
            Self::Http(_) => ProviderKind::Http,
            Self::StraightLine { .. } => ProviderKind::StraightLine,
        }
    }
}

/// Resolved `solve` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct SolveConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Travel time source.
    pub(crate) provider: ProviderSettings,
    /// Search tuning and caps.
    pub(crate) search: SearchConfig,
}

impl SolveConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_SOLVE_REQUEST)
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
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

impl TryFrom<SolveArgs> for SolveConfig {
    type Error = CliError;

    fn try_from(args: SolveArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_SOLVE_REQUEST,
            env: ENV_SOLVE_REQUEST,
        })?;

        let kind = args
            .provider
            .as_deref()
            .map(ProviderKind::from_str)
            .transpose()?
            .unwrap_or_default();
        let provider = match kind {
            ProviderKind::Http => {
                let api_key = args.api_key.ok_or(CliError::MissingArgument {
                    field: ARG_SOLVE_API_KEY,
                    env: ENV_SOLVE_API_KEY,
                })?;
                let mut http = HttpTravelTimeProviderConfig::new(api_key);
                if let Some(base_url) = args.base_url {
                    http = http.with_base_url(base_url);
                }
                if let Some(secs) = args.timeout_secs {
                    http = http.with_timeout(Duration::from_secs(secs));
                }
                ProviderSettings::Http(http)
            }
            ProviderKind::StraightLine => ProviderSettings::StraightLine {
                speed_kmh: args.speed_kmh.unwrap_or(DEFAULT_WALKING_SPEED_KMH),
            },
        };

        let mut search = SearchConfig::default();
        if let Some(max) = args.max_expansions {
            search = search.with_max_expansions(max);
        }
        if let Some(ms) = args.time_budget_ms {
            search = search.with_time_budget(Duration::from_millis(ms));
        }

        Ok(Self {
            request_path,
            provider,
            search,
        })
    }
}

/// Builds a planner for the current solve invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Planner>, CliError>;
}

pub(crate) struct DefaultPlannerBuilder;

type BoxedProvider = Box<dyn TravelTimeProvider + Send + Sync>;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, config: &SolveConfig) -> Result<Box<dyn Planner>, CliError> {
        let provider_error = |source| CliError::BuildTravelTimeProvider {
            provider: config.provider.kind().as_str(),
            source,
        };
        let provider: BoxedProvider = match &config.provider {
            ProviderSettings::Http(http) => Box::new(
                HttpTravelTimeProvider::with_config(http.clone()).map_err(provider_error)?,
            ),
            ProviderSettings::StraightLine { speed_kmh } => Box::new(
                StraightLineTravelTimeProvider::new(*speed_kmh).map_err(provider_error)?,
            ),
        };
        Ok(Box::new(RoutePlanner::with_config(
            provider,
            config.search.clone(),
        )))
    }
}

pub(crate) fn run_solve(args: SolveArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_solve_with(args, &DefaultPlannerBuilder, &mut stdout)
}

pub(crate) fn run_solve_with(
    args: SolveArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response = execute_solve(args, builder)?;
    write_route_response(writer, &response)
}

fn execute_solve(args: SolveArgs, builder: &dyn PlannerBuilder) -> Result<RouteResponse, CliError> {
    let config = resolve_solve_config(args)?;
    let request = load_route_request(&config.request_path)?;
    request
        .validate()
        .map_err(|source| CliError::InvalidRouteRequest {
            path: config.request_path.clone(),
            source,
        })?;
    log::debug!(
        "planning {} locations with the {} provider",
        request.locations.len(),
        config.provider.kind().as_str()
    );
    let planner = builder.build(&config)?;
    planner
        .plan(&request)
        .map_err(|source| CliError::Solve { source })
}

fn resolve_solve_config(args: SolveArgs) -> Result<SolveConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Loads a JSON-encoded [`RouteRequest`] from disk.
pub(crate) fn load_route_request(path: &Utf8Path) -> Result<RouteRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRouteRequest {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRouteRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_route_response(writer: &mut dyn Write, response: &RouteResponse) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(response).map_err(CliError::SerialiseRouteResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteRouteOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteRouteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SolveConfig, CliError> {
    let merged = SolveArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SolveConfig::try_from(merged)
}
