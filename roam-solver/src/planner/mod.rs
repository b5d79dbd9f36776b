//! `RoutePlanner`: the request-to-route boundary.

use std::sync::atomic::AtomicBool;

use roam_core::{
    Planner, Route, RouteGraph, RouteRequest, RouteResponse, SolveError, TravelTimeProvider,
};

use crate::search::{Objective, SearchOutcome, search, search_with_cancellation};
use crate::{Potential, SearchConfig};

/// Plans routes with the best-first search.
///
/// The planner is generic over the travel-time provider. Each call fetches
/// a fresh matrix, builds a [`RouteGraph`], computes the [`Potential`] once
/// and runs the search selected by the request's algorithm once. Nothing is
/// shared between calls except the provider and the configuration.
///
/// # Examples
/// ```
/// use roam_core::test_support::{FixedMatrixTravelTimeProvider, locations};
/// use roam_core::{Planner, RouteRequest};
/// use roam_solver::RoutePlanner;
///
/// let provider = FixedMatrixTravelTimeProvider::from_minutes(&[
///     vec![0.0, 10.0, 15.0, 20.0],
///     vec![10.0, 0.0, 35.0, 25.0],
///     vec![15.0, 35.0, 0.0, 30.0],
///     vec![20.0, 25.0, 30.0, 0.0],
/// ]);
/// let planner = RoutePlanner::new(provider);
/// let request = RouteRequest::new(locations(4), 0, 3, 50.0);
///
/// let response = planner.plan(&request).expect("request is valid");
/// assert_eq!(response.route.stops(), &[0, 1, 3]);
/// ```
pub struct RoutePlanner<T>
where
    T: TravelTimeProvider,
{
    travel_time_provider: T,
    config: SearchConfig,
}

impl<T> RoutePlanner<T>
where
    T: TravelTimeProvider,
{
    /// Construct a planner using default configuration.
    pub fn new(travel_time_provider: T) -> Self {
        Self::with_config(travel_time_provider, SearchConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(travel_time_provider: T, config: SearchConfig) -> Self {
        Self {
            travel_time_provider,
            config,
        }
    }

    /// The search configuration in use.
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Plan a request, abandoning the search once `cancel` is set.
    ///
    /// A cancelled plan succeeds with an empty route and
    /// [`Diagnostics::cancelled`](roam_core::Diagnostics::cancelled) set.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::InvalidInput`] for malformed requests,
    /// [`SolveError::UpstreamUnavailable`] when the provider fails and
    /// [`SolveError::Matrix`] when its matrix does not fit the request.
    pub fn plan_with_cancellation(
        &self,
        request: &RouteRequest,
        cancel: &AtomicBool,
    ) -> Result<RouteResponse, SolveError> {
        self.plan_inner(request, Some(cancel))
    }

    fn plan_inner(
        &self,
        request: &RouteRequest,
        cancel: Option<&AtomicBool>,
    ) -> Result<RouteResponse, SolveError> {
        request.validate()?;
        let matrix = self
            .travel_time_provider
            .get_travel_time_matrix(&request.locations)
            .inspect_err(|err| log::warn!("travel time provider failed: {err}"))?;
        let graph = RouteGraph::build(request, &matrix)?;
        let potential = Potential::to_target(&graph);
        if !potential.reaches_target(graph.start()) {
            log::debug!(
                "target {} is unreachable from start {}",
                graph.target(),
                graph.start()
            );
        }

        let objective = Objective::for_request(request);
        let outcome = match cancel {
            Some(flag) => search_with_cancellation(&graph, &potential, objective, &self.config, flag),
            None => search(&graph, &potential, objective, &self.config),
        };
        Ok(into_response(outcome))
    }
}

impl<T> Planner for RoutePlanner<T>
where
    T: TravelTimeProvider + Send + Sync,
{
    fn plan(&self, request: &RouteRequest) -> Result<RouteResponse, SolveError> {
        self.plan_inner(request, None)
    }
}

fn into_response(outcome: SearchOutcome) -> RouteResponse {
    let SearchOutcome {
        path,
        objective,
        elapsed,
        diagnostics,
    } = outcome;
    RouteResponse {
        route: Route::new(path, elapsed),
        objective,
        diagnostics,
    }
}
