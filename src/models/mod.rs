//! Domain model types for fixed-depot delivery tours.
//!
//! Locations on the plane (index 0 is the depot), cyclic tours over location
//! indices, and the solution record both solvers return.

mod location;
mod solution;
mod tour;

pub(crate) use location::validate_locations;
pub use location::Location;
pub use solution::{normalize_tour, Solution};
pub use tour::Tour;

/// Index of the depot in every location sequence.
pub const DEPOT: usize = 0;
