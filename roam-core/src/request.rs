//! Route requests as received from callers, and their validation.
//!
//! A [`RouteRequest`] mirrors the inbound payload: locations, the start and
//! target indices, a time budget in minutes, optional per-location dwell times
//! in hours and optional per-location scores. Validation happens before any
//! travel-time lookup so malformed requests never reach the provider.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::Location;

/// Minutes per hour, used to convert dwell times.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Blend coefficient applied by [`Algorithm::Hybrid`] when none is supplied.
pub const DEFAULT_BETA: f64 = 0.5;

/// Objective optimised by the route search.
///
/// Parsing is case-insensitive and accepts the wire names `max_nodes`,
/// `max_score` and `hybrid`.
///
/// # Examples
/// ```
/// use roam_core::Algorithm;
///
/// let algorithm: Algorithm = "MAX_SCORE".parse()?;
/// assert_eq!(algorithm, Algorithm::MaxScore);
/// assert_eq!(algorithm.to_string(), "max_score");
/// # Ok::<(), roam_core::UnknownAlgorithmError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Algorithm {
    /// Visit as many locations as possible.
    #[default]
    MaxNodes,
    /// Collect as much score as possible.
    MaxScore,
    /// Blend node count and score with a coefficient `beta`.
    Hybrid,
}

impl Algorithm {
    /// Wire name of the algorithm.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MaxNodes => "max_nodes",
            Self::MaxScore => "max_score",
            Self::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an algorithm name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm {name:?}; use 'max_nodes', 'max_score', or 'hybrid'")]
pub struct UnknownAlgorithmError {
    /// The rejected name.
    pub name: String,
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max_nodes" => Ok(Self::MaxNodes),
            "max_score" => Ok(Self::MaxScore),
            "hybrid" => Ok(Self::Hybrid),
            _ => Err(UnknownAlgorithmError { name: s.to_owned() }),
        }
    }
}

impl TryFrom<String> for Algorithm {
    type Error = UnknownAlgorithmError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Algorithm> for String {
    fn from(algorithm: Algorithm) -> Self {
        algorithm.as_str().to_owned()
    }
}

/// Reasons a [`RouteRequest`] is rejected before any computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteRequestValidationError {
    /// Fewer than two locations were supplied.
    #[error("at least two locations are required, got {count}")]
    TooFewLocations {
        /// Number of locations supplied.
        count: usize,
    },
    /// A location had non-finite or out-of-range coordinates.
    #[error("location {index} has invalid coordinates")]
    InvalidLocation {
        /// Offending location index.
        index: usize,
    },
    /// The start index does not name a location.
    #[error("start index {start} is out of range for {len} locations")]
    StartOutOfRange {
        /// Requested start index.
        start: usize,
        /// Number of locations.
        len: usize,
    },
    /// The target index does not name a location.
    #[error("target index {target} is out of range for {len} locations")]
    TargetOutOfRange {
        /// Requested target index.
        target: usize,
        /// Number of locations.
        len: usize,
    },
    /// The time limit was zero, negative or not finite.
    #[error("time limit must be a positive number of minutes, got {time_limit}")]
    InvalidTimeLimit {
        /// Rejected time limit.
        time_limit: f64,
    },
    /// `switch_weights` did not have one entry per location.
    #[error("expected {expected} switch weights, got {actual}")]
    SwitchWeightsLength {
        /// Number of locations.
        expected: usize,
        /// Number of weights supplied.
        actual: usize,
    },
    /// A switch weight was negative or not finite.
    #[error("switch weight {index} must be finite and non-negative, got {value}")]
    InvalidSwitchWeight {
        /// Offending location index.
        index: usize,
        /// Rejected weight.
        value: f64,
    },
    /// `scores` did not have one entry per location.
    #[error("expected {expected} scores, got {actual}")]
    ScoresLength {
        /// Number of locations.
        expected: usize,
        /// Number of scores supplied.
        actual: usize,
    },
    /// A score was negative or not finite.
    #[error("score {index} must be finite and non-negative, got {value}")]
    InvalidScore {
        /// Offending location index.
        index: usize,
        /// Rejected score.
        value: f64,
    },
    /// The hybrid blend coefficient was outside `[0, 1]`.
    #[error("beta must lie in [0, 1], got {beta}")]
    BetaOutOfRange {
        /// Rejected coefficient.
        beta: f64,
    },
}

/// Inbound route request.
///
/// `time_limit` is in minutes. `switch_weights` are dwell times in **hours**
/// and are converted to minutes once, when the graph is built.
///
/// # Examples
/// ```
/// use roam_core::{Algorithm, Location, RouteRequest};
///
/// let request = RouteRequest::new(
///     vec![Location::new(51.50, -0.12), Location::new(51.51, -0.13)],
///     0,
///     1,
///     45.0,
/// )
/// .with_algorithm(Algorithm::MaxScore)
/// .with_scores(vec![0.0, 4.5]);
///
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    /// Candidate stops, indexed `0..V`.
    pub locations: Vec<Location>,
    /// Index of the first stop.
    pub start: usize,
    /// Index of the final stop.
    pub target: usize,
    /// Travel and dwell budget in minutes.
    pub time_limit: f64,
    /// Optional dwell time per location, in hours.
    #[cfg_attr(feature = "serde", serde(default))]
    pub switch_weights: Option<Vec<f64>>,
    /// Optional value per location; defaults to `1.0` everywhere.
    #[cfg_attr(feature = "serde", serde(default))]
    pub scores: Option<Vec<f64>>,
    /// Objective to optimise.
    #[cfg_attr(feature = "serde", serde(default))]
    pub algorithm: Algorithm,
    /// Weight of node count against score for [`Algorithm::Hybrid`].
    #[cfg_attr(feature = "serde", serde(default = "default_beta"))]
    pub beta: f64,
}

#[cfg(feature = "serde")]
const fn default_beta() -> f64 {
    DEFAULT_BETA
}

impl RouteRequest {
    /// Construct a `max_nodes` request without dwell times or scores.
    pub fn new(locations: Vec<Location>, start: usize, target: usize, time_limit: f64) -> Self {
        Self {
            locations,
            start,
            target,
            time_limit,
            switch_weights: None,
            scores: None,
            algorithm: Algorithm::MaxNodes,
            beta: DEFAULT_BETA,
        }
    }

    /// Set per-location dwell times, in hours.
    #[must_use]
    pub fn with_switch_weights(mut self, hours: Vec<f64>) -> Self {
        self.switch_weights = Some(hours);
        self
    }

    /// Set per-location scores.
    #[must_use]
    pub fn with_scores(mut self, scores: Vec<f64>) -> Self {
        self.scores = Some(scores);
        self
    }

    /// Select the objective.
    #[must_use]
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the hybrid blend coefficient.
    #[must_use]
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Check the request shape and parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`RouteRequestValidationError`] found.
    pub fn validate(&self) -> Result<(), RouteRequestValidationError> {
        let len = self.locations.len();
        if len < 2 {
            return Err(RouteRequestValidationError::TooFewLocations { count: len });
        }
        if let Some(index) = self.locations.iter().position(|loc| !loc.is_valid()) {
            return Err(RouteRequestValidationError::InvalidLocation { index });
        }
        if self.start >= len {
            return Err(RouteRequestValidationError::StartOutOfRange {
                start: self.start,
                len,
            });
        }
        if self.target >= len {
            return Err(RouteRequestValidationError::TargetOutOfRange {
                target: self.target,
                len,
            });
        }
        if !(self.time_limit.is_finite() && self.time_limit > 0.0) {
            return Err(RouteRequestValidationError::InvalidTimeLimit {
                time_limit: self.time_limit,
            });
        }
        if let Some(weights) = &self.switch_weights {
            if weights.len() != len {
                return Err(RouteRequestValidationError::SwitchWeightsLength {
                    expected: len,
                    actual: weights.len(),
                });
            }
            if let Some((index, &value)) = first_invalid(weights) {
                return Err(RouteRequestValidationError::InvalidSwitchWeight { index, value });
            }
        }
        if let Some(scores) = &self.scores {
            if scores.len() != len {
                return Err(RouteRequestValidationError::ScoresLength {
                    expected: len,
                    actual: scores.len(),
                });
            }
            if let Some((index, &value)) = first_invalid(scores) {
                return Err(RouteRequestValidationError::InvalidScore { index, value });
            }
        }
        if !(0.0..=1.0).contains(&self.beta) {
            return Err(RouteRequestValidationError::BetaOutOfRange { beta: self.beta });
        }
        Ok(())
    }

    /// Dwell time per location in minutes, zero where none was supplied.
    pub fn switch_weights_minutes(&self) -> Vec<f64> {
        self.switch_weights.as_ref().map_or_else(
            || vec![0.0; self.locations.len()],
            |hours| hours.iter().map(|h| h * MINUTES_PER_HOUR).collect(),
        )
    }

    /// Score per location, `1.0` where none was supplied.
    pub fn scores_or_default(&self) -> Vec<f64> {
        self.scores
            .clone()
            .unwrap_or_else(|| vec![1.0; self.locations.len()])
    }
}

fn first_invalid(values: &[f64]) -> Option<(usize, &f64)> {
    values
        .iter()
        .enumerate()
        .find(|(_, value)| !(value.is_finite() && **value >= 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> RouteRequest {
        RouteRequest::new(
            vec![
                Location::new(0.0, 0.0),
                Location::new(0.0, 0.1),
                Location::new(0.1, 0.1),
            ],
            0,
            2,
            60.0,
        )
    }

    #[rstest]
    fn accepts_minimal_request(request: RouteRequest) {
        assert_eq!(request.validate(), Ok(()));
    }

    #[rstest]
    fn rejects_single_location(mut request: RouteRequest) {
        request.locations.truncate(1);
        request.start = 0;
        request.target = 0;
        assert_eq!(
            request.validate(),
            Err(RouteRequestValidationError::TooFewLocations { count: 1 })
        );
    }

    #[rstest]
    fn rejects_out_of_range_indices(mut request: RouteRequest) {
        request.start = 3;
        assert!(matches!(
            request.validate(),
            Err(RouteRequestValidationError::StartOutOfRange { start: 3, len: 3 })
        ));
        request.start = 0;
        request.target = 7;
        assert!(matches!(
            request.validate(),
            Err(RouteRequestValidationError::TargetOutOfRange { target: 7, len: 3 })
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_bad_time_limit(mut request: RouteRequest, #[case] time_limit: f64) {
        request.time_limit = time_limit;
        assert!(matches!(
            request.validate(),
            Err(RouteRequestValidationError::InvalidTimeLimit { .. })
        ));
    }

    #[rstest]
    fn rejects_mismatched_weight_lengths(request: RouteRequest) {
        let weights = request.clone().with_switch_weights(vec![0.5]);
        assert_eq!(
            weights.validate(),
            Err(RouteRequestValidationError::SwitchWeightsLength {
                expected: 3,
                actual: 1
            })
        );
        let scores = request.with_scores(vec![1.0, 2.0]);
        assert_eq!(
            scores.validate(),
            Err(RouteRequestValidationError::ScoresLength {
                expected: 3,
                actual: 2
            })
        );
    }

    #[rstest]
    fn rejects_negative_values(request: RouteRequest) {
        let weights = request.clone().with_switch_weights(vec![0.0, -1.0, 0.0]);
        assert!(matches!(
            weights.validate(),
            Err(RouteRequestValidationError::InvalidSwitchWeight { index: 1, .. })
        ));
        let scores = request.with_scores(vec![0.0, 1.0, f64::NAN]);
        assert!(matches!(
            scores.validate(),
            Err(RouteRequestValidationError::InvalidScore { index: 2, .. })
        ));
    }

    #[rstest]
    #[case(-0.1, false)]
    #[case(0.0, true)]
    #[case(1.0, true)]
    #[case(1.5, false)]
    fn beta_must_lie_in_unit_interval(
        request: RouteRequest,
        #[case] beta: f64,
        #[case] valid: bool,
    ) {
        assert_eq!(request.with_beta(beta).validate().is_ok(), valid);
    }

    #[rstest]
    fn converts_hours_to_minutes(request: RouteRequest) {
        let request = request.with_switch_weights(vec![0.0, 0.5, 1.25]);
        assert_eq!(request.switch_weights_minutes(), vec![0.0, 30.0, 75.0]);
    }

    #[rstest]
    fn defaults_weights_and_scores(request: RouteRequest) {
        assert_eq!(request.switch_weights_minutes(), vec![0.0; 3]);
        assert_eq!(request.scores_or_default(), vec![1.0; 3]);
    }

    #[rstest]
    #[case("max_nodes", Algorithm::MaxNodes)]
    #[case("Max_Score", Algorithm::MaxScore)]
    #[case(" HYBRID ", Algorithm::Hybrid)]
    fn parses_algorithm_names(#[case] name: &str, #[case] expected: Algorithm) {
        assert_eq!(name.parse::<Algorithm>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_algorithm() {
        let err = "fastest".parse::<Algorithm>().expect_err("unknown name");
        assert_eq!(err.name, "fastest");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialises_wire_payload() {
        let json = r#"{
            "locations": [{"lat": 0.0, "lng": 0.0}, {"lat": 1.0, "lng": 1.0}],
            "start": 0,
            "target": 1,
            "time_limit": 30,
            "switch_weights": [0.0, 0.5],
            "algorithm": "Hybrid"
        }"#;
        let request: RouteRequest = serde_json::from_str(json).expect("payload should parse");
        assert_eq!(request.algorithm, Algorithm::Hybrid);
        assert_eq!(request.beta, DEFAULT_BETA);
        assert!(request.scores.is_none());
        assert_eq!(request.switch_weights_minutes(), vec![0.0, 30.0]);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn unknown_algorithm_fails_to_deserialise() {
        let json = r#"{
            "locations": [{"lat": 0.0, "lng": 0.0}, {"lat": 1.0, "lng": 1.0}],
            "start": 0,
            "target": 1,
            "time_limit": 30,
            "algorithm": "shortest"
        }"#;
        let err = serde_json::from_str::<RouteRequest>(json).expect_err("unknown algorithm");
        assert!(err.to_string().contains("unknown algorithm"));
    }
}
