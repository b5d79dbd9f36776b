use geo::Coord;

/// A stop the planner may route through.
///
/// Coordinates are WGS84 degrees. The search never looks at them; they only
/// feed the travel-time provider that builds the matrix.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use roam_core::Location;
///
/// let location = Location::new(51.5, -0.1);
/// let coord: Coord<f64> = location.into();
///
/// assert_eq!(coord.x, -0.1);
/// assert_eq!(coord.y, 51.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Location {
    /// Construct a location from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both coordinates are finite and inside the WGS84 ranges.
    ///
    /// # Examples
    /// ```
    /// use roam_core::Location;
    ///
    /// assert!(Location::new(45.0, 90.0).is_valid());
    /// assert!(!Location::new(91.0, 0.0).is_valid());
    /// assert!(!Location::new(0.0, f64::NAN).is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<Location> for Coord<f64> {
    fn from(location: Location) -> Self {
        Self {
            x: location.lng,
            y: location.lat,
        }
    }
}

impl From<Coord<f64>> for Location {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}
