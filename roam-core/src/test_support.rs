//! Deterministic travel-time providers used by unit and behaviour tests.

use std::time::Duration;

use crate::{Location, TravelTimeError, TravelTimeMatrix, TravelTimeProvider};

/// `TravelTimeProvider` returning one-minute edges between every pair.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnitTravelTimeProvider;

impl TravelTimeProvider for UnitTravelTimeProvider {
    fn get_travel_time_matrix(
        &self,
        locations: &[Location],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        if locations.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }
        let n = locations.len();
        Ok((0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        if i == j {
                            Duration::ZERO
                        } else {
                            Duration::from_secs(60)
                        }
                    })
                    .collect()
            })
            .collect())
    }
}

/// A [`TravelTimeProvider`] returning a fixed matrix given in minutes.
///
/// Entries of `f64::INFINITY` become [`crate::UNREACHABLE`]. The matrix is
/// returned verbatim whatever the number of locations, so tests can exercise
/// shape checks downstream.
#[derive(Debug, Clone)]
pub struct FixedMatrixTravelTimeProvider {
    matrix: TravelTimeMatrix,
}

impl FixedMatrixTravelTimeProvider {
    /// Wrap a pre-built matrix.
    pub const fn new(matrix: TravelTimeMatrix) -> Self {
        Self { matrix }
    }

    /// Build from minutes, treating entries that are not a valid duration as
    /// unreachable.
    pub fn from_minutes(minutes: &[Vec<f64>]) -> Self {
        let matrix = minutes
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&m| {
                        Duration::try_from_secs_f64(m * 60.0).unwrap_or(crate::UNREACHABLE)
                    })
                    .collect()
            })
            .collect();
        Self { matrix }
    }
}

impl TravelTimeProvider for FixedMatrixTravelTimeProvider {
    fn get_travel_time_matrix(
        &self,
        locations: &[Location],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        if locations.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }
        Ok(self.matrix.clone())
    }
}

/// Build `count` distinct, valid locations along the equator.
pub fn locations(count: usize) -> Vec<Location> {
    (0..count)
        .map(|i| Location::new(0.0, i as f64 * 0.01))
        .collect()
}
