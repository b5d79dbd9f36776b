//! Test-only utilities for `roam-solver`.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).

use roam_core::{Location, TravelTimeError, TravelTimeMatrix, TravelTimeProvider};

/// The four-location symmetric matrix used throughout the tests, in minutes.
///
/// With start `0`, target `3` and a 50 minute budget, the max-nodes search
/// returns `[0, 1, 3]`.
#[must_use]
pub fn square_minutes() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 10.0, 15.0, 20.0],
        vec![10.0, 0.0, 35.0, 25.0],
        vec![15.0, 35.0, 0.0, 30.0],
        vec![20.0, 25.0, 30.0, 0.0],
    ]
}

/// A [`TravelTimeProvider`] that always fails with the same error.
///
/// # Examples
/// ```rust
/// use roam_core::test_support::locations;
/// use roam_core::{TravelTimeError, TravelTimeProvider};
/// use roam_solver::test_support::FailingTravelTimeProvider;
///
/// let provider = FailingTravelTimeProvider::service_error("OVER_QUERY_LIMIT");
/// let err = provider
///     .get_travel_time_matrix(&locations(2))
///     .expect_err("provider always fails");
/// assert!(matches!(err, TravelTimeError::ServiceError { .. }));
/// ```
#[derive(Debug, Clone)]
pub struct FailingTravelTimeProvider {
    error: TravelTimeError,
}

impl FailingTravelTimeProvider {
    /// Fail with `error`.
    #[must_use]
    pub const fn new(error: TravelTimeError) -> Self {
        Self { error }
    }

    /// Fail with a top-level service status such as `REQUEST_DENIED`.
    #[must_use]
    pub fn service_error(code: &str) -> Self {
        Self::new(TravelTimeError::ServiceError {
            code: code.to_owned(),
            message: format!("distance matrix returned {code}"),
        })
    }
}

impl TravelTimeProvider for FailingTravelTimeProvider {
    fn get_travel_time_matrix(
        &self,
        _locations: &[Location],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        Err(self.error.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn square_is_symmetric() {
        let matrix = square_minutes();
        for (i, row) in matrix.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                let mirrored = matrix.get(j).and_then(|other| other.get(i));
                assert_eq!(Some(value), mirrored);
            }
        }
    }

    #[rstest]
    fn failing_provider_returns_its_error() {
        let provider = FailingTravelTimeProvider::new(TravelTimeError::EmptyInput);
        let err = provider
            .get_travel_time_matrix(&[])
            .expect_err("provider always fails");
        assert_eq!(err, TravelTimeError::EmptyInput);
    }
}
