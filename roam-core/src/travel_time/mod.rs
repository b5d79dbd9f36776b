//! Compute travel times between locations.
//!
//! The `TravelTimeProvider` trait abstracts the retrieval of pairwise travel
//! times between [`Location`](crate::Location) values. Callers supply a slice
//! of locations and receive an adjacency matrix of
//! [`Duration`](std::time::Duration) values, with [`UNREACHABLE`] marking
//! pairs the provider could not route.
//!
//! Errors are returned when inputs are invalid, e.g. an empty slice, or when
//! the upstream service fails.

mod error;
mod provider;

pub use error::TravelTimeError;
pub use provider::{TravelTimeMatrix, TravelTimeProvider, UNREACHABLE};
