use thiserror::Error;

/// Errors from [`crate::travel_time::TravelTimeProvider::get_travel_time_matrix`].
///
/// Every variant other than [`TravelTimeError::EmptyInput`] describes an
/// upstream failure; callers may retry those.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TravelTimeError {
    /// No locations were provided.
    ///
    /// The provider requires at least one location to compute a matrix.
    #[error("at least one location is required")]
    EmptyInput,
    /// The request could not reach the service.
    #[error("network error requesting {url}: {message}")]
    NetworkError {
        /// Request URL with credentials redacted.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service did not answer within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL with credentials redacted.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Request URL with credentials redacted.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service answered but reported a top-level failure status.
    #[error("travel time service returned {code}: {message}")]
    ServiceError {
        /// Status code reported by the service.
        code: String,
        /// Optional detail supplied by the service.
        message: String,
    },
    /// The response body could not be interpreted.
    #[error("failed to parse travel time response: {message}")]
    ParseError {
        /// Parser error description.
        message: String,
    },
}
