//! Offline travel time estimates from great-circle distance.

use std::time::Duration;

use geo::{Coord, Distance, Haversine, Point};
use roam_core::{Location, TravelTimeError, TravelTimeMatrix, TravelTimeProvider, UNREACHABLE};

use super::provider::ProviderBuildError;

/// Typical walking pace in kilometres per hour.
pub const DEFAULT_WALKING_SPEED_KMH: f64 = 5.0;

const METRES_PER_SECOND_PER_KMH: f64 = 1000.0 / 3600.0;

/// Estimates travel times from haversine distance at a constant speed.
///
/// Real paths are longer than the great circle, so a `detour_factor` above
/// one stretches every distance before it is converted to time. The matrix
/// is symmetric with a zero diagonal.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use roam_core::{Location, TravelTimeProvider};
/// use roam_data::routing::StraightLineTravelTimeProvider;
///
/// let provider = StraightLineTravelTimeProvider::new(5.0)?;
/// let locations = [Location::new(51.5, -0.1), Location::new(51.51, -0.1)];
/// let matrix = provider.get_travel_time_matrix(&locations)?;
///
/// assert_eq!(matrix[0][0], Duration::ZERO);
/// assert_eq!(matrix[0][1], matrix[1][0]);
/// // Roughly 1.1 km at 5 km/h.
/// assert!((790..=810).contains(&matrix[0][1].as_secs()));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightLineTravelTimeProvider {
    speed_kmh: f64,
    detour_factor: f64,
}

impl Default for StraightLineTravelTimeProvider {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_WALKING_SPEED_KMH,
            detour_factor: 1.0,
        }
    }
}

impl StraightLineTravelTimeProvider {
    /// Create a provider travelling at `speed_kmh`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderBuildError::InvalidSpeed`] unless the speed is
    /// positive, finite and not subnormal once converted to metres per
    /// second.
    pub fn new(speed_kmh: f64) -> Result<Self, ProviderBuildError> {
        let metres_per_second = speed_kmh * METRES_PER_SECOND_PER_KMH;
        if !(metres_per_second.is_normal() && metres_per_second > 0.0) {
            return Err(ProviderBuildError::InvalidSpeed { speed_kmh });
        }
        Ok(Self {
            speed_kmh,
            ..Self::default()
        })
    }

    /// Multiply every distance by `factor`. Non-finite or non-positive
    /// factors are ignored.
    #[must_use]
    pub fn with_detour_factor(mut self, factor: f64) -> Self {
        if factor.is_finite() && factor > 0.0 {
            self.detour_factor = factor;
        }
        self
    }

    /// Configured speed in kilometres per hour.
    #[must_use]
    pub const fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    /// Times too long for a [`Duration`] are reported as [`UNREACHABLE`].
    fn travel_time(&self, from: Location, to: Location) -> Duration {
        let metres = Haversine.distance(
            Point::from(Coord::from(from)),
            Point::from(Coord::from(to)),
        );
        let seconds = metres * self.detour_factor / (self.speed_kmh * METRES_PER_SECOND_PER_KMH);
        Duration::try_from_secs_f64(seconds).unwrap_or(UNREACHABLE)
    }
}

impl TravelTimeProvider for StraightLineTravelTimeProvider {
    fn get_travel_time_matrix(
        &self,
        locations: &[Location],
    ) -> Result<TravelTimeMatrix, TravelTimeError> {
        if locations.is_empty() {
            return Err(TravelTimeError::EmptyInput);
        }
        if let Some(index) = locations.iter().position(|location| !location.is_valid()) {
            return Err(TravelTimeError::ParseError {
                message: format!("location {index} has invalid coordinates"),
            });
        }

        Ok(locations
            .iter()
            .map(|&from| {
                locations
                    .iter()
                    .map(|&to| {
                        if from == to {
                            Duration::ZERO
                        } else {
                            self.travel_time(from, to)
                        }
                    })
                    .collect()
            })
            .collect())
    }
}
