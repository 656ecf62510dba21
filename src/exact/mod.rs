//! Exact solver.
//!
//! - [`ExactSolver`] — Exhaustive swap-based permutation search, O(n!)

mod brute_force;

pub use brute_force::{ExactSolver, MAX_EXACT_LOCATIONS};

use crate::error::Result;
use crate::models::{Location, Solution};

/// Solves `locations` exactly with the default [`ExactSolver`].
///
/// Fails fast with [`RoutingError::Capacity`](crate::error::RoutingError::Capacity)
/// above [`MAX_EXACT_LOCATIONS`].
pub fn solve_exact(locations: &[Location]) -> Result<Solution> {
    ExactSolver::new().solve(locations)
}
