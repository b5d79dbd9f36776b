//! HTTP-based `TravelTimeProvider` using a distance-matrix API.
//!
//! This module provides [`HttpTravelTimeProvider`], an implementation of the
//! [`TravelTimeProvider`] trait that fetches travel time matrices from a
//! distance-matrix service. Every location is sent as both an origin and a
//! destination, so one request yields the full `n x n` matrix.
//!
//! # Architecture
//!
//! The [`TravelTimeProvider`] trait is synchronous to keep the planner
//! embeddable in synchronous contexts. This provider bridges the async HTTP
//! call to the sync interface by blocking on a Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use roam_core::{Location, TravelTimeProvider};
//! use roam_data::routing::HttpTravelTimeProvider;
//!
//! let provider = HttpTravelTimeProvider::new("my-api-key")?;
//! let locations = vec![Location::new(51.5, -0.1), Location::new(51.6, -0.2)];
//!
//! let matrix = provider.get_travel_time_matrix(&locations)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use reqwest::Client;
use roam_core::{Location, TravelTimeError, TravelTimeMatrix, TravelTimeProvider};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::distance_matrix::DistanceMatrixResponse;

/// Error type for provider construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The configured base URL does not parse.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// URL as configured.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
    /// A straight-line speed that is not a positive finite number.
    #[error("speed must be positive and finite, got {speed_kmh} km/h")]
    InvalidSpeed {
        /// Speed as configured.
        speed_kmh: f64,
    },
}

/// Default distance-matrix endpoint.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

/// Default user agent for distance-matrix requests.
pub const DEFAULT_USER_AGENT: &str = "roam-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Placeholder substituted for the API key in URLs that leave the provider.
const REDACTED: &str = "REDACTED";

/// Configuration for [`HttpTravelTimeProvider`].
#[derive(Clone)]
pub struct HttpTravelTimeProviderConfig {
    /// Endpoint answering distance-matrix queries.
    pub base_url: String,
    /// API key sent as the `key` query parameter; omitted when empty.
    pub api_key: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpTravelTimeProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTravelTimeProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &REDACTED)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpTravelTimeProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpTravelTimeProviderConfig {
    /// Create a new configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Point the provider at a different endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based travel time provider using a distance-matrix API.
///
/// This provider implements the synchronous [`TravelTimeProvider`] trait
/// by internally blocking on asynchronous HTTP requests. It owns a Tokio
/// runtime that is reused across calls.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the provider uses its own
/// stored runtime. When called from within an existing multi-threaded Tokio
/// runtime, it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. Inside a
/// `current_thread` runtime it falls back to its own runtime, which blocks
/// the caller's executor for the duration of the request.
pub struct HttpTravelTimeProvider {
    client: Client,
    config: HttpTravelTimeProviderConfig,
    base_url: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpTravelTimeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTravelTimeProvider")
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpTravelTimeProvider {
    /// Create a provider for the default endpoint with the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpTravelTimeProviderConfig::new(api_key))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse, or if the HTTP client
    /// or Tokio runtime fails to build.
    pub fn with_config(config: HttpTravelTimeProviderConfig) -> Result<Self, ProviderBuildError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            base_url,
            runtime,
        })
    }

    /// Return the configuration this provider was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpTravelTimeProviderConfig {
        &self.config
    }

    /// Build the request URL for `locations`, signing it with `key`.
    ///
    /// Origins and destinations are the same `lat,lng` list joined with `|`.
    fn build_matrix_url(&self, locations: &[Location], key: &str) -> Url {
        let coordinates = locations
            .iter()
            .map(|location| format!("{},{}", location.lat, location.lng))
            .collect::<Vec<_>>()
            .join("|");

        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("origins", &coordinates)
                .append_pair("destinations", &coordinates);
            if !key.is_empty() {
                query.append_pair("key", key);
            }
        }
        url
    }

    /// URL safe to log or embed in errors.
    fn redacted_url(&self, locations: &[Location]) -> String {
        let key = if self.config.api_key.is_empty() {
            ""
        } else {
            REDACTED
        };
        self.build_matrix_url(locations, key).into()
    }

    /// Fetch the travel time matrix asynchronously.
    async fn fetch_matrix_async(
        &self,
        locations: &[Location],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        let url = self.build_matrix_url(locations, &self.config.api_key);
        let redacted = self.redacted_url(locations);
        log::debug!(
            "requesting travel times for {} locations from {redacted}",
            locations.len()
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &redacted))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &redacted))?;

        let body: DistanceMatrixResponse =
            response
                .json()
                .await
                .map_err(|err| TravelTimeError::ParseError {
                    message: err.without_url().to_string(),
                })?;

        body.into_matrix(locations.len())
            .inspect_err(|err| log::warn!("distance matrix request failed: {err}"))
    }

    /// Convert a reqwest error to a `TravelTimeError`.
    ///
    /// The error's own URL carries the API key, so it is stripped and the
    /// redacted URL reported instead.
    fn convert_reqwest_error(&self, error: reqwest::Error, url: &str) -> TravelTimeError {
        if error.is_timeout() {
            return TravelTimeError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        let status = error.status();
        let message = error.without_url().to_string();
        match status {
            Some(status) => TravelTimeError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message,
            },
            None => TravelTimeError::NetworkError {
                url: url.to_owned(),
                message,
            },
        }
    }
}

impl TravelTimeProvider for HttpTravelTimeProvider {
    /// Fetch the travel time matrix for the given locations.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime should
    /// be multi-threaded. Inside a `current_thread` runtime the method blocks
    /// on its own internal runtime instead.
    fn get_travel_time_matrix(
        &self,
        locations: &[Location],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        if locations.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }

        let future = self.fetch_matrix_async(locations);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const BASE_URL: &str = "https://maps.example.test/distancematrix/json";

    #[fixture]
    fn sample_locations() -> Vec<Location> {
        vec![Location::new(51.5, -0.1), Location::new(51.6, -0.2)]
    }

    fn provider(api_key: &str) -> HttpTravelTimeProvider {
        HttpTravelTimeProvider::with_config(
            HttpTravelTimeProviderConfig::new(api_key).with_base_url(BASE_URL),
        )
        .expect("provider should build")
    }

    #[rstest]
    fn build_matrix_url_encodes_coordinates(sample_locations: Vec<Location>) {
        let url = provider("secret").build_matrix_url(&sample_locations, "secret");

        assert_eq!(
            url.as_str(),
            "https://maps.example.test/distancematrix/json\
             ?origins=51.5%2C-0.1%7C51.6%2C-0.2\
             &destinations=51.5%2C-0.1%7C51.6%2C-0.2\
             &key=secret"
        );
    }

    #[rstest]
    fn redacted_url_hides_the_key(sample_locations: Vec<Location>) {
        let url = provider("secret").redacted_url(&sample_locations);

        assert!(url.contains("key=REDACTED"));
        assert!(!url.contains("secret"));
    }

    #[rstest]
    fn empty_key_is_omitted(sample_locations: Vec<Location>) {
        let url = provider("").redacted_url(&sample_locations);

        assert!(!url.contains("key="));
    }

    #[rstest]
    fn debug_output_hides_the_key() {
        let rendered = format!("{:?}", provider("secret"));

        assert!(!rendered.contains("secret"));
        assert!(rendered.contains(BASE_URL));
    }

    #[rstest]
    fn invalid_base_url_is_rejected() {
        let err = HttpTravelTimeProvider::with_config(
            HttpTravelTimeProviderConfig::new("secret").with_base_url("not a url"),
        )
        .expect_err("base URL should be rejected");

        assert!(matches!(err, ProviderBuildError::InvalidBaseUrl { .. }));
    }

    #[rstest]
    fn config_builders_apply() {
        let config = HttpTravelTimeProviderConfig::new("secret")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("roam-tests/1.0");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "roam-tests/1.0");
    }

    #[rstest]
    fn empty_input_returns_error() {
        let err = provider("secret")
            .get_travel_time_matrix(&[])
            .expect_err("should fail");

        assert_eq!(err, TravelTimeError::EmptyInput);
    }
}
