//! Budget-constrained route search for Roam.
//!
//! This crate provides [`RoutePlanner`], the default implementation of the
//! [`Planner`](roam_core::Planner) trait. A request is planned in three steps:
//! the travel-time matrix is fetched from a
//! [`TravelTimeProvider`](roam_core::TravelTimeProvider) and wrapped in a
//! [`RouteGraph`](roam_core::RouteGraph), a backward [`Potential`] is computed
//! from the target, and a best-first [`search`] over simple paths picks the
//! route with the best [`Objective`] value that fits the time budget.
//!
//! The search is a heuristic. It explores frontier states in priority order
//! and, without caps, visits every state that can still reach the target in
//! time; the priority only decides the order. Caps in [`SearchConfig`] trade
//! completeness for bounded latency on dense graphs.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod planner;
mod potential;
mod search;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use config::SearchConfig;
pub use planner::RoutePlanner;
pub use potential::Potential;
pub use search::{Objective, SearchOutcome, search, search_with_cancellation};
