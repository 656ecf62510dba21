//! Distance matrices.
//!
//! Provides a dense Euclidean distance matrix shared by both solvers.

mod matrix;

pub use matrix::DistanceMatrix;

use crate::models::Location;

/// Builds the pairwise Euclidean distance matrix for `locations`.
///
/// Equivalent to [`DistanceMatrix::from_locations`].
pub fn build_distance_matrix(locations: &[Location]) -> DistanceMatrix {
    DistanceMatrix::from_locations(locations)
}
