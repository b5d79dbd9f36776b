//! Facade crate for the Roam route planner.
//!
//! This crate re-exports the core domain types and exposes the search engine
//! and the travel time providers behind feature flags.

#![forbid(unsafe_code)]

pub use roam_core::{
    Algorithm, Diagnostics, Location, Planner, Route, RouteGraph, RouteRequest, RouteResponse,
    SolveError, TravelTimeError, TravelTimeMatrix, TravelTimeProvider,
};

#[cfg(feature = "solver")]
pub use roam_solver::{Objective, RoutePlanner, SearchConfig};

#[cfg(feature = "http")]
pub use roam_data::{
    HttpTravelTimeProvider, HttpTravelTimeProviderConfig, StraightLineTravelTimeProvider,
};
