//! Travel-time collaborators for the Roam route planner.
//!
//! Responsibilities:
//! - Implement [`roam_core::TravelTimeProvider`] against external routing
//!   services and offline estimators.
//! - Translate transport and service failures into
//!   [`roam_core::TravelTimeError`].
//!
//! Boundaries:
//! - Do not encode search rules (live in `roam-solver`).
//! - Credentials are injected through configuration, never read from the
//!   environment here.
//!
//! Invariants:
//! - Providers always return an `n x n` matrix for `n` locations, or an error.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod routing;

pub use routing::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpTravelTimeProvider, HttpTravelTimeProviderConfig,
    ProviderBuildError, StraightLineTravelTimeProvider,
};
