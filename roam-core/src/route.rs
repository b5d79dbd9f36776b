//! Routes through the request's locations.
//!
//! A route is an ordered list of location indices with the travel and dwell
//! time it consumes.

/// An ordered path through location indices with its total time.
///
/// An empty route is the "no feasible route" outcome, not an error.
///
/// # Examples
/// ```
/// use roam_core::Route;
///
/// let route = Route::new(vec![0, 2, 3], 41.5);
///
/// assert_eq!(route.stops(), &[0, 2, 3]);
/// assert_eq!(route.total_minutes(), 41.5);
/// assert!(!route.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    #[cfg_attr(feature = "serde", serde(rename = "route"))]
    stops: Vec<usize>,
    total_minutes: f64,
}

impl Route {
    /// Construct a route from stops and total minutes.
    pub const fn new(stops: Vec<usize>, total_minutes: f64) -> Self {
        Self {
            stops,
            total_minutes,
        }
    }

    /// Construct an empty route.
    ///
    /// # Examples
    /// ```
    /// use roam_core::Route;
    ///
    /// let route = Route::empty();
    /// assert!(route.is_empty());
    /// assert_eq!(route.total_minutes(), 0.0);
    /// ```
    pub const fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Location indices in visiting order.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Consume the route, returning its stops.
    pub fn into_stops(self) -> Vec<usize> {
        self.stops
    }

    /// Travel plus dwell time in minutes.
    pub const fn total_minutes(&self) -> f64 {
        self.total_minutes
    }

    /// Whether no feasible route was found.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
