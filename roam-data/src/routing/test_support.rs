//! Test doubles for travel time providers.
//!
//! [`StubTravelTimeProvider`] answers every non-empty request with a canned
//! matrix or error and never touches the network.

use std::time::Duration;

use roam_core::{Location, TravelTimeError, TravelTimeMatrix, TravelTimeProvider};

/// Stub `TravelTimeProvider` for testing.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use roam_core::{Location, TravelTimeProvider};
/// use roam_data::routing::test_support::StubTravelTimeProvider;
///
/// let provider = StubTravelTimeProvider::with_minutes(&[vec![0.0, 4.0], vec![4.0, 0.0]]);
/// let locations = [Location::new(0.0, 0.0), Location::new(1.0, 1.0)];
///
/// let matrix = provider.get_travel_time_matrix(&locations)?;
/// assert_eq!(matrix[0][1], Duration::from_secs(240));
/// # Ok::<(), roam_core::TravelTimeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StubTravelTimeProvider {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Matrix(TravelTimeMatrix),
    Error(TravelTimeError),
}

impl StubTravelTimeProvider {
    /// Create a provider that returns the given matrix for any non-empty
    /// input, whatever its length.
    #[must_use]
    pub fn with_matrix(matrix: TravelTimeMatrix) -> Self {
        Self {
            response: StubResponse::Matrix(matrix),
        }
    }

    /// Create a provider from whole or fractional minutes. Non-finite cells
    /// become unreachable.
    #[must_use]
    pub fn with_minutes(minutes: &[Vec<f64>]) -> Self {
        Self::with_matrix(
            minutes
                .iter()
                .map(|row| row.iter().copied().map(minutes_to_duration).collect())
                .collect(),
        )
    }

    /// Create a provider that returns the given error for any non-empty
    /// input. Empty input still returns `TravelTimeError::EmptyInput`.
    #[must_use]
    pub fn with_error(error: TravelTimeError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }
}

fn minutes_to_duration(minutes: f64) -> Duration {
    Duration::try_from_secs_f64(minutes * 60.0).unwrap_or(Duration::MAX)
}

impl TravelTimeProvider for StubTravelTimeProvider {
    fn get_travel_time_matrix(
        &self,
        locations: &[Location],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        if locations.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }

        match &self.response {
            StubResponse::Matrix(matrix) => Ok(matrix.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
