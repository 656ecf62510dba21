//! Solution record and depot normalization.

use serde::{Deserialize, Serialize};

use super::Tour;

/// The result of a solver run.
///
/// `tour` holds 1-based location identifiers, starts at the depot and is
/// explicitly closed back to it (`[1, …, 1]` for depot index 0).
///
/// # Examples
///
/// ```
/// use u_delivery::models::{Solution, Tour};
///
/// let sol = Solution::from_tour(&Tour::new(vec![2, 0, 1]), 0, 12.0).unwrap();
/// assert_eq!(sol.tour, vec![1, 2, 3, 1]);
/// assert_eq!(sol.distance, 12.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Total closed-tour distance.
    pub distance: f64,
    /// 1-based location identifiers, closed at the depot.
    pub tour: Vec<usize>,
    /// Number of complete tours evaluated.
    pub evaluations: usize,
    /// Best distance after each solver round (non-increasing).
    pub history: Vec<f64>,
}

impl Solution {
    /// Builds a solution from a cyclic tour, normalized to start and end at
    /// `depot`.
    ///
    /// Returns `None` if `depot` is not on the tour.
    pub fn from_tour(tour: &Tour, depot: usize, distance: f64) -> Option<Self> {
        Some(Self {
            distance,
            tour: normalize_tour(tour, depot)?,
            evaluations: 0,
            history: vec![distance],
        })
    }

    /// Sets the evaluation count.
    pub fn with_evaluations(mut self, evaluations: usize) -> Self {
        self.evaluations = evaluations;
        self
    }

    /// Replaces the convergence history.
    pub fn with_history(mut self, history: Vec<f64>) -> Self {
        self.history = history;
        self
    }

    /// Number of distinct locations on the tour (depot counted once).
    pub fn num_locations(&self) -> usize {
        self.tour.len().saturating_sub(1)
    }

    /// Returns `true` if this solution is strictly shorter than `other`.
    pub fn is_better_than(&self, other: &Self) -> bool {
        self.distance < other.distance
    }
}

/// Rotates a cyclic tour to start at `depot` and emits the explicit closed
/// sequence of 1-based identifiers (`depot … depot`).
///
/// Rotation never changes the edge set, so the distance of the tour is
/// preserved. Returns `None` if `depot` is not on the tour.
///
/// # Examples
///
/// ```
/// use u_delivery::models::{normalize_tour, Tour};
///
/// let ids = normalize_tour(&Tour::new(vec![3, 1, 0, 2]), 0).unwrap();
/// assert_eq!(ids, vec![1, 3, 4, 2, 1]);
/// ```
pub fn normalize_tour(tour: &Tour, depot: usize) -> Option<Vec<usize>> {
    let rotated = tour.rotate_to(depot)?;
    Some(rotated.closed_order().into_iter().map(|i| i + 1).collect())
}
