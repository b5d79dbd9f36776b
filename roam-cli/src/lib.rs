//! Command-line interface for planning Roam routes.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod solve;

pub use error::CliError;
use solve::{SolveArgs, run_solve};

const ARG_SOLVE_REQUEST: &str = "request";
const ARG_SOLVE_PROVIDER: &str = "provider";
const ARG_SOLVE_BASE_URL: &str = "base-url";
const ARG_SOLVE_API_KEY: &str = "api-key";
const ARG_SOLVE_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_SOLVE_SPEED_KMH: &str = "speed-kmh";
const ARG_SOLVE_MAX_EXPANSIONS: &str = "max-expansions";
const ARG_SOLVE_TIME_BUDGET_MS: &str = "time-budget-ms";
const ENV_SOLVE_REQUEST: &str = "ROAM_CMDS_SOLVE_REQUEST_PATH";
const ENV_SOLVE_API_KEY: &str = "ROAM_CMDS_SOLVE_API_KEY";

/// Run the Roam CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Solve(args) => run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "roam",
    about = "Plan time-budgeted sightseeing routes",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a route for a JSON-encoded request.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
