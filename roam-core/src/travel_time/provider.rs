//! Travel-time provider trait and adjacency-matrix alias for location pairs.

use std::time::Duration;

use crate::Location;

use super::error::TravelTimeError;

/// Adjacency matrix of travel times.
pub type TravelTimeMatrix = Vec<Vec<Duration>>;

/// Sentinel marking a pair the provider could not route.
pub const UNREACHABLE: Duration = Duration::MAX;

/// Fetch pairwise travel times for a set of locations.
///
/// Implementers must return a square `n x n` matrix where
/// `n == locations.len()`. `matrix[i][j]` is the travel time from
/// `locations[i]` to `locations[j]`, or [`UNREACHABLE`] when no route exists.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use roam_core::{Location, TravelTimeError, TravelTimeMatrix, TravelTimeProvider};
///
/// struct UnitProvider;
///
/// impl TravelTimeProvider for UnitProvider {
///     fn get_travel_time_matrix(
///         &self,
///         locations: &[Location],
///     ) -> Result<TravelTimeMatrix, TravelTimeError> {
///         if locations.is_empty() {
///             return Err(TravelTimeError::EmptyInput);
///         }
///         let n = locations.len();
///         Ok((0..n)
///             .map(|i| {
///                 (0..n)
///                     .map(|j| if i == j { Duration::ZERO } else { Duration::from_secs(60) })
///                     .collect::<Vec<_>>()
///             })
///             .collect())
///     }
/// }
///
/// let matrix = UnitProvider.get_travel_time_matrix(&[Location::new(0.0, 0.0)])?;
/// assert_eq!(matrix.len(), 1);
/// # Ok::<(), TravelTimeError>(())
/// ```
pub trait TravelTimeProvider {
    /// Return a matrix of travel times for `locations`.
    ///
    /// Implementations must return `Err(TravelTimeError::EmptyInput)` when
    /// `locations` is empty.
    fn get_travel_time_matrix(
        &self,
        locations: &[Location],
    ) -> Result<TravelTimeMatrix, TravelTimeError>;
}

impl<T: TravelTimeProvider + ?Sized> TravelTimeProvider for Box<T> {
    fn get_travel_time_matrix(
        &self,
        locations: &[Location],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        (**self).get_travel_time_matrix(locations)
    }
}
