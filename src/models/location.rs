//! Location type.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};

/// A delivery location (or the depot) on the plane.
///
/// Location 0 of any input sequence is the depot; the remaining entries are
/// delivery stops. Locations are immutable once created.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Location;
///
/// let depot = Location::new(0.0, 0.0);
/// let stop = Location::new(3.0, 4.0);
/// assert_eq!(stop.x(), 3.0);
/// assert!((depot.distance_to(&stop) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    x: f64,
    y: f64,
}

impl Location {
    /// Creates a location at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns `true` if both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another location.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f64, f64)> for Location {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Checks that `locations` can form a tour: at least two entries, all finite.
pub(crate) fn validate_locations(locations: &[Location]) -> Result<()> {
    if locations.len() < 2 {
        return Err(RoutingError::DegenerateInput {
            count: locations.len(),
        });
    }
    if let Some(index) = locations.iter().position(|l| !l.is_finite()) {
        return Err(RoutingError::InvalidLocation { index });
    }
    Ok(())
}
