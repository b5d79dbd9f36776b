//! The planning boundary: the [`Planner`] trait, its response, and the
//! errors a plan can fail with.
//!
//! [`SolveError`] separates problems with the request itself from failures
//! of the planner's collaborators, so callers can decide what to report and
//! what to retry.

use std::time::Duration;

use thiserror::Error;

use crate::graph::{GraphError, MatrixError};
use crate::request::RouteRequestValidationError;
use crate::{Route, RouteRequest, TravelTimeError};

/// Search statistics for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent in the search.
    pub solve_time: Duration,
    /// Frontier states popped and expanded.
    pub expansions: u64,
    /// Child states pushed onto the frontier.
    pub enqueued: u64,
    /// Popped states dropped because they could no longer reach the target.
    pub pruned: u64,
    /// Terminal states compared against the incumbent.
    pub candidates: u64,
    /// `true` when the frontier emptied; `false` when a cap stopped the search.
    pub exhausted: bool,
    /// `true` when the caller abandoned the search.
    pub cancelled: bool,
}

/// Response from a successful plan.
///
/// Serialises as `{"route": [...], "total_minutes": .., "objective": .., "diagnostics": {..}}`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResponse {
    /// The chosen route; empty when no route fits the budget.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub route: Route,
    /// Objective value of the route, absent when it is empty.
    pub objective: Option<f64>,
    /// Search statistics.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Planner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// Request parameters were invalid; nothing was computed.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] RouteRequestValidationError),
    /// The travel-time provider failed.
    #[error("travel time provider unavailable: {0}")]
    UpstreamUnavailable(#[from] TravelTimeError),
    /// The provider returned a matrix that does not fit the request.
    #[error("failed to build route graph: {0}")]
    Matrix(#[from] MatrixError),
}

impl SolveError {
    /// Whether the caller sent a bad request (as opposed to a server fault).
    ///
    /// # Examples
    /// ```
    /// use roam_core::{RouteRequestValidationError, SolveError, TravelTimeError};
    ///
    /// let invalid = SolveError::from(RouteRequestValidationError::TooFewLocations { count: 1 });
    /// assert!(invalid.is_client_error());
    ///
    /// let upstream = SolveError::from(TravelTimeError::ParseError { message: "bad".into() });
    /// assert!(!upstream.is_client_error());
    /// assert!(upstream.is_retryable());
    /// ```
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Whether retrying the same request may succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }
}

impl From<GraphError> for SolveError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::InvalidInput(source) => Self::InvalidInput(source),
            GraphError::Matrix(source) => Self::Matrix(source),
        }
    }
}

/// Plan a route satisfying the caller's budget and objective.
///
/// Implementations must return [`SolveError::InvalidInput`] for invalid
/// parameters rather than panicking, and must report an infeasible budget as
/// an empty route rather than an error.
/// Planners must be `Send + Sync` so concurrent requests can share one.
pub trait Planner: Send + Sync {
    /// Plan a request, producing a route or an error.
    ///
    /// # Errors
    ///
    /// See [`SolveError`].
    fn plan(&self, request: &RouteRequest) -> Result<RouteResponse, SolveError>;
}
