//! Core domain types for the Roam route planner.
//!
//! The crate defines the request and response shapes, the per-request
//! [`RouteGraph`], the [`Planner`] trait implemented by search engines, and
//! the [`TravelTimeProvider`] boundary to external routing services.
//! Constructors and validators return `Result` so malformed input is rejected
//! before any computation.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod graph;
mod location;
mod planner;
pub mod request;
mod route;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod travel_time;

pub use graph::{GraphError, MatrixError, RouteGraph};
pub use location::Location;
pub use planner::{Diagnostics, Planner, RouteResponse, SolveError};
pub use request::{Algorithm, RouteRequest, RouteRequestValidationError, UnknownAlgorithmError};
pub use route::Route;
pub use travel_time::{TravelTimeError, TravelTimeMatrix, TravelTimeProvider, UNREACHABLE};
