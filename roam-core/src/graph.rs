//! Dense, per-request graph model consumed by the route search.
//!
//! [`RouteGraph`] owns the travel-time matrix, dwell ("switch") costs and
//! scores in minutes. It is built once per request, after validation, and is
//! read-only thereafter.

use thiserror::Error;

use crate::RouteRequest;
use crate::request::RouteRequestValidationError;
use crate::travel_time::{TravelTimeMatrix, UNREACHABLE};

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Problems with the travel-time matrix handed to [`RouteGraph`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// The matrix did not have one row per location.
    #[error("travel time matrix has {rows} rows, expected {expected}")]
    RowCount {
        /// Number of locations.
        expected: usize,
        /// Number of rows received.
        rows: usize,
    },
    /// A row did not have one column per location.
    #[error("travel time matrix row {row} has {len} columns, expected {expected}")]
    RowLength {
        /// Offending row.
        row: usize,
        /// Number of locations.
        expected: usize,
        /// Number of columns received.
        len: usize,
    },
    /// An entry was negative or NaN.
    #[error("travel time from {from} to {to} is invalid: {value}")]
    InvalidEntry {
        /// Origin index.
        from: usize,
        /// Destination index.
        to: usize,
        /// Rejected value in minutes.
        value: f64,
    },
}

/// Errors returned while building a [`RouteGraph`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// The request failed validation.
    #[error(transparent)]
    InvalidInput(#[from] RouteRequestValidationError),
    /// The travel-time matrix was malformed.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// Locations, travel times, dwell costs and scores for one request.
///
/// All times are in minutes. Unreachable pairs hold `f64::INFINITY`.
///
/// # Examples
/// ```
/// use roam_core::RouteGraph;
///
/// # fn main() -> Result<(), roam_core::GraphError> {
/// let graph = RouteGraph::from_minutes(
///     vec![vec![0.0, 10.0], vec![12.0, 0.0]],
///     vec![0.0, 5.0],
///     vec![1.0, 3.0],
///     0,
///     1,
///     30.0,
/// )?;
///
/// assert_eq!(graph.travel_time(0, 1), 10.0);
/// assert_eq!(graph.switch_weight(1), 5.0);
/// assert_eq!(graph.max_score(), 3.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGraph {
    len: usize,
    start: usize,
    target: usize,
    budget: f64,
    travel: Vec<f64>,
    switch: Vec<f64>,
    scores: Vec<f64>,
}

impl RouteGraph {
    /// Build the graph for a validated request and a provider matrix.
    ///
    /// Dwell times are converted from hours to minutes and the matrix from
    /// [`Duration`](std::time::Duration) to minutes, mapping
    /// [`UNREACHABLE`] to `f64::INFINITY`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidInput`] when the request is malformed and
    /// [`GraphError::Matrix`] when the matrix is not `V x V`.
    pub fn build(request: &RouteRequest, matrix: &TravelTimeMatrix) -> Result<Self, GraphError> {
        request.validate()?;
        if matrix.len() != request.locations.len() {
            return Err(MatrixError::RowCount {
                expected: request.locations.len(),
                rows: matrix.len(),
            }
            .into());
        }
        let minutes = matrix
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&cell| {
                        if cell == UNREACHABLE {
                            f64::INFINITY
                        } else {
                            cell.as_secs_f64() / SECONDS_PER_MINUTE
                        }
                    })
                    .collect()
            })
            .collect();
        Self::from_minutes(
            minutes,
            request.switch_weights_minutes(),
            request.scores_or_default(),
            request.start,
            request.target,
            request.time_limit,
        )
    }

    /// Build a graph from values already expressed in minutes.
    ///
    /// # Errors
    ///
    /// Applies the same checks as [`RouteRequest::validate`] to the indices,
    /// budget, weights and scores, and rejects malformed matrices.
    pub fn from_minutes(
        matrix: Vec<Vec<f64>>,
        switch_weights: Vec<f64>,
        scores: Vec<f64>,
        start: usize,
        target: usize,
        budget: f64,
    ) -> Result<Self, GraphError> {
        let len = matrix.len();
        check_parameters(len, start, target, budget)?;
        check_per_node(len, &switch_weights, &scores)?;
        let mut travel = Vec::with_capacity(len * len);
        for (row_index, row) in matrix.into_iter().enumerate() {
            if row.len() != len {
                return Err(MatrixError::RowLength {
                    row: row_index,
                    expected: len,
                    len: row.len(),
                }
                .into());
            }
            if let Some((to, &value)) = row
                .iter()
                .enumerate()
                .find(|(_, value)| value.is_nan() || **value < 0.0)
            {
                return Err(MatrixError::InvalidEntry {
                    from: row_index,
                    to,
                    value,
                }
                .into());
            }
            travel.extend(row);
        }
        Ok(Self {
            len,
            start,
            target,
            budget,
            travel,
            switch: switch_weights,
            scores,
        })
    }

    /// Number of locations.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a graph holds at least two locations.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the start location.
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Index of the target location.
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Time budget in minutes.
    pub const fn budget(&self) -> f64 {
        self.budget
    }

    /// Travel time from `u` to `v` in minutes.
    ///
    /// Out-of-range indices read as unreachable.
    pub fn travel_time(&self, u: usize, v: usize) -> f64 {
        if u >= self.len || v >= self.len {
            return f64::INFINITY;
        }
        self.travel
            .get(u * self.len + v)
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// Dwell cost paid on entering `v`, in minutes.
    ///
    /// Out-of-range indices read as infinitely expensive.
    pub fn switch_weight(&self, v: usize) -> f64 {
        self.switch.get(v).copied().unwrap_or(f64::INFINITY)
    }

    /// Value of visiting `v`; zero for out-of-range indices.
    pub fn score(&self, v: usize) -> f64 {
        self.scores.get(v).copied().unwrap_or(0.0)
    }

    /// Largest single-location score.
    pub fn max_score(&self) -> f64 {
        self.scores.iter().copied().fold(0.0, f64::max)
    }

    /// Mean of all off-diagonal travel times.
    ///
    /// Infinite when any pair is unreachable.
    pub fn mean_travel_time(&self) -> f64 {
        let total: f64 = (0..self.len)
            .flat_map(|u| (0..self.len).filter(move |&v| v != u).map(move |v| (u, v)))
            .map(|(u, v)| self.travel_time(u, v))
            .sum();
        total / (self.len * (self.len - 1)) as f64
    }

    /// Mean dwell cost over interior locations (neither start nor target).
    ///
    /// With `outlier_cutoff`, weights at or above the cutoff are ignored.
    /// Returns zero when no location qualifies.
    pub fn mean_switch_weight(&self, outlier_cutoff: Option<f64>) -> f64 {
        let (sum, count) = (0..self.len)
            .filter(|&v| v != self.start && v != self.target)
            .map(|v| self.switch_weight(v))
            .filter(|&w| outlier_cutoff.is_none_or(|cutoff| w < cutoff))
            .fold((0.0, 0_usize), |(sum, count), w| (sum + w, count + 1));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}

fn check_parameters(
    len: usize,
    start: usize,
    target: usize,
    budget: f64,
) -> Result<(), RouteRequestValidationError> {
    if len < 2 {
        return Err(RouteRequestValidationError::TooFewLocations { count: len });
    }
    if start >= len {
        return Err(RouteRequestValidationError::StartOutOfRange { start, len });
    }
    if target >= len {
        return Err(RouteRequestValidationError::TargetOutOfRange { target, len });
    }
    if !(budget.is_finite() && budget > 0.0) {
        return Err(RouteRequestValidationError::InvalidTimeLimit { time_limit: budget });
    }
    Ok(())
}

fn check_per_node(
    len: usize,
    switch_weights: &[f64],
    scores: &[f64],
) -> Result<(), RouteRequestValidationError> {
    if switch_weights.len() != len {
        return Err(RouteRequestValidationError::SwitchWeightsLength {
            expected: len,
            actual: switch_weights.len(),
        });
    }
    if scores.len() != len {
        return Err(RouteRequestValidationError::ScoresLength {
            expected: len,
            actual: scores.len(),
        });
    }
    let invalid = |value: &f64| !(value.is_finite() && *value >= 0.0);
    if let Some((index, &value)) = switch_weights.iter().enumerate().find(|(_, w)| invalid(w)) {
        return Err(RouteRequestValidationError::InvalidSwitchWeight { index, value });
    }
    if let Some((index, &value)) = scores.iter().enumerate().find(|(_, s)| invalid(s)) {
        return Err(RouteRequestValidationError::InvalidScore { index, value });
    }
    Ok(())
}
