//! Distance-matrix API response types.
//!
//! The service answers with one row per origin and one element per
//! destination. Each level carries its own status: the top-level `status`
//! reports whether the request was accepted, and each element's `status`
//! reports whether that pair could be routed.

use std::time::Duration;

use roam_core::{TravelTimeError, TravelTimeMatrix, UNREACHABLE};
use serde::Deserialize;

/// Status string the service uses for success at both levels.
const OK: &str = "OK";

/// Distance-matrix API response.
#[derive(Debug, Deserialize)]
pub struct DistanceMatrixResponse {
    /// Top-level status.
    ///
    /// Common values:
    /// - `"OK"` - the request was valid and `rows` is populated
    /// - `"INVALID_REQUEST"` - malformed parameters
    /// - `"MAX_ELEMENTS_EXCEEDED"` - origins times destinations is too large
    /// - `"OVER_QUERY_LIMIT"` - quota exhausted
    /// - `"REQUEST_DENIED"` - the key was rejected
    pub status: String,

    /// Optional detail when `status` is not `"OK"`.
    pub error_message: Option<String>,

    /// One row per origin.
    #[serde(default)]
    pub rows: Vec<Row>,
}

/// Results for a single origin.
#[derive(Debug, Deserialize)]
pub struct Row {
    /// One element per destination.
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Result for a single origin and destination pair.
#[derive(Debug, Deserialize)]
pub struct Element {
    /// `"OK"`, or a reason such as `"NOT_FOUND"` or `"ZERO_RESULTS"`.
    pub status: String,
    /// Travel duration; present when `status` is `"OK"`.
    pub duration: Option<TextValue>,
}

/// A measured quantity. The service also sends a localised `text`
/// rendering, which is ignored.
#[derive(Debug, Deserialize)]
pub struct TextValue {
    /// Numeric value; seconds for durations.
    pub value: f64,
}

impl DistanceMatrixResponse {
    /// Check if the request as a whole succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == OK
    }

    /// Convert the response into a square matrix for `expected` locations.
    ///
    /// Pairs the service could not route become [`UNREACHABLE`].
    ///
    /// # Errors
    ///
    /// Returns [`TravelTimeError::ServiceError`] when the top-level status is
    /// not `"OK"`, and [`TravelTimeError::ParseError`] when the row or column
    /// counts disagree with `expected` or a routed element lacks a duration.
    pub fn into_matrix(self, expected: usize) -> Result<TravelTimeMatrix, TravelTimeError> {
        if !self.is_ok() {
            return Err(TravelTimeError::ServiceError {
                code: self.status,
                message: self.error_message.unwrap_or_default(),
            });
        }
        if self.rows.len() != expected {
            return Err(TravelTimeError::ParseError {
                message: format!("expected {expected} rows, got {}", self.rows.len()),
            });
        }

        let mut unreachable = 0_usize;
        let matrix = self
            .rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                if row.elements.len() != expected {
                    return Err(TravelTimeError::ParseError {
                        message: format!(
                            "row {index}: expected {expected} elements, got {}",
                            row.elements.len()
                        ),
                    });
                }
                row.elements
                    .into_iter()
                    .map(|element| {
                        let cell = element.into_duration(index)?;
                        if cell == UNREACHABLE {
                            unreachable += 1;
                        }
                        Ok(cell)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<TravelTimeMatrix, _>>()?;

        if unreachable > 0 {
            log::warn!("distance matrix reported {unreachable} unroutable pairs");
        }
        Ok(matrix)
    }
}

impl Element {
    fn into_duration(self, row: usize) -> Result<Duration, TravelTimeError> {
        if self.status != OK {
            return Ok(UNREACHABLE);
        }
        let seconds = self
            .duration
            .map(|duration| duration.value)
            .ok_or_else(|| TravelTimeError::ParseError {
                message: format!("row {row}: routed element is missing its duration"),
            })?;
        // Negative, non-finite and out-of-range values cannot be a Duration.
        Ok(Duration::try_from_secs_f64(seconds).unwrap_or(UNREACHABLE))
    }
}
