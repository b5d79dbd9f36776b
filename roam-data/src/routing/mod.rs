//! Travel time providers backed by routing services.
//!
//! This module provides two implementations of
//! [`roam_core::TravelTimeProvider`]:
//!
//! - [`HttpTravelTimeProvider`] fetches a matrix from a distance-matrix HTTP
//!   endpoint. The synchronous trait is implemented by blocking on the async
//!   request internally, keeping the planner embeddable in synchronous
//!   contexts.
//! - [`StraightLineTravelTimeProvider`] estimates times from great-circle
//!   distance at a fixed speed. It needs no network and suits offline runs.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use roam_core::{Location, TravelTimeProvider};
//! use roam_data::routing::{HttpTravelTimeProvider, HttpTravelTimeProviderConfig};
//!
//! let config = HttpTravelTimeProviderConfig::new("my-api-key")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpTravelTimeProvider::with_config(config)?;
//!
//! let locations = vec![Location::new(51.5, -0.1), Location::new(51.6, -0.2)];
//! let matrix = provider.get_travel_time_matrix(&locations)?;
//! println!("Travel time: {:?}", matrix[0][1]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod distance_matrix;
mod provider;
mod straight_line;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpTravelTimeProvider, HttpTravelTimeProviderConfig,
    ProviderBuildError,
};
pub use straight_line::{DEFAULT_WALKING_SPEED_KMH, StraightLineTravelTimeProvider};
