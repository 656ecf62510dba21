//! Tour type.

use crate::distance::DistanceMatrix;

/// An ordered visit sequence over location indices, implicitly closed back to
/// its first element.
///
/// A complete tour lists every location exactly once. The closing edge from
/// the last element to the first is not stored.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Tour;
///
/// let tour = Tour::new(vec![2, 0, 1]);
/// assert_eq!(tour.len(), 3);
/// assert_eq!(tour.rotate_to(0).map(|t| t.order().to_vec()), Some(vec![0, 1, 2]));
/// assert_eq!(tour.closed_order(), vec![2, 0, 1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    /// Creates a tour from a visit order.
    pub fn new(order: Vec<usize>) -> Self {
        Self { order }
    }

    /// Returns the visit order (without the closing repeat).
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Number of locations on the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour visits nothing.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates over the tour's edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.order.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |k| (self.order[k], self.order[(k + 1) % n]))
    }

    /// Total cycle length under `distances`.
    pub fn length(&self, distances: &DistanceMatrix) -> f64 {
        distances.cycle_length(&self.order)
    }

    /// Returns this cycle rotated so that it starts at `start`.
    ///
    /// Rotation keeps the edge set, so the length is unchanged. Returns
    /// `None` if `start` is not on the tour.
    pub fn rotate_to(&self, start: usize) -> Option<Tour> {
        let offset = self.order.iter().position(|&i| i == start)?;
        let mut order = self.order.clone();
        order.rotate_left(offset);
        Some(Tour { order })
    }

    /// Explicit closed representation: the order followed by its first element.
    pub fn closed_order(&self) -> Vec<usize> {
        let mut closed = self.order.clone();
        if let Some(&first) = self.order.first() {
            closed.push(first);
        }
        closed
    }

    /// Returns `true` if the tour visits each of `0..n` exactly once.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        if self.order.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &i in &self.order {
            if i >= n || seen[i] {
                return false;
            }
            seen[i] = true;
        }
        true
    }
}

impl From<Vec<usize>> for Tour {
    fn from(order: Vec<usize>) -> Self {
        Self::new(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn rectangle() -> DistanceMatrix {
        DistanceMatrix::from_locations(&[
            Location::new(0.0, 0.0),
            Location::new(0.0, 3.0),
            Location::new(4.0, 0.0),
            Location::new(4.0, 3.0),
        ])
    }

    #[test]
    fn test_edges_include_closing_edge() {
        let tour = Tour::new(vec![0, 1, 3, 2]);
        let edges: Vec<_> = tour.edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 3), (3, 2), (2, 0)]);
    }

    #[test]
    fn test_edges_degenerate() {
        assert_eq!(Tour::new(vec![]).edges().count(), 0);
        assert_eq!(Tour::new(vec![4]).edges().count(), 0);
        let pair: Vec<_> = Tour::new(vec![0, 1]).edges().collect();
        assert_eq!(pair, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_length() {
        let dm = rectangle();
        assert!((Tour::new(vec![0, 1, 3, 2]).length(&dm) - 14.0).abs() < 1e-10);
    }

    #[test]
    fn test_rotate_to() {
        let tour = Tour::new(vec![3, 2, 0, 1]);
        let rotated = tour.rotate_to(0).expect("depot on tour");
        assert_eq!(rotated.order(), &[0, 1, 3, 2]);
        assert!(tour.rotate_to(9).is_none());
    }

    #[test]
    fn test_rotation_preserves_length() {
        let dm = rectangle();
        let tour = Tour::new(vec![2, 0, 1, 3]);
        for start in 0..4 {
            let rotated = tour.rotate_to(start).expect("on tour");
            assert!((rotated.length(&dm) - tour.length(&dm)).abs() < 1e-10);
        }
    }

    #[test]
    fn test_closed_order() {
        assert_eq!(Tour::new(vec![1, 2]).closed_order(), vec![1, 2, 1]);
        assert!(Tour::new(vec![]).closed_order().is_empty());
    }

    #[test]
    fn test_is_permutation_of() {
        assert!(Tour::new(vec![2, 0, 1]).is_permutation_of(3));
        assert!(!Tour::new(vec![2, 0, 0]).is_permutation_of(3));
        assert!(!Tour::new(vec![0, 1]).is_permutation_of(3));
        assert!(!Tour::new(vec![0, 1, 5]).is_permutation_of(3));
    }
}
