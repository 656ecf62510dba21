//! Dense distance matrix.

use crate::error::{Result, RoutingError};
use crate::models::Location;

/// A dense n×n Euclidean distance matrix stored in row-major order.
///
/// Built once from the input locations and read-only afterwards. The matrix
/// is symmetric with a zero diagonal.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Location;
/// use u_delivery::distance::DistanceMatrix;
///
/// let locations = vec![
///     Location::new(0.0, 0.0),
///     Location::new(3.0, 4.0),
///     Location::new(6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_locations(&locations);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the pairwise Euclidean distances between `locations`.
    ///
    /// O(n²) time and space. Each unordered pair is computed once and
    /// mirrored, so `get(i, j) == get(j, i)` holds bit for bit.
    pub fn from_locations(locations: &[Location]) -> Self {
        let size = locations.len();
        let mut data = vec![0.0; size * size];
        for i in 0..size {
            for j in (i + 1)..size {
                let d = locations[i].distance_to(&locations[j]);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }
        Self { data, size }
    }

    /// Returns the distance between locations `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns row `from` as a slice.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.data[from * self.size..(from + 1) * self.size]
    }

    /// Checks that every closed tour over this matrix has a finite length.
    ///
    /// A tour over n ≥ 3 locations uses n distinct edges, so the sum of all
    /// distinct pairs bounds every tour length. A two-location tour uses its
    /// one edge twice.
    ///
    /// # Errors
    ///
    /// [`RoutingError::DistanceOverflow`] naming the first location whose
    /// row pushes that bound past `f64::MAX`.
    pub fn check_tour_bound(&self) -> Result<()> {
        let repeats = if self.size == 2 { 2.0 } else { 1.0 };
        let mut total = 0.0;
        for i in 0..self.size {
            total += self.row(i)[i + 1..].iter().sum::<f64>();
            if !(repeats * total).is_finite() {
                return Err(RoutingError::DistanceOverflow { index: i });
            }
        }
        Ok(())
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Length of the closed cycle visiting `order` and returning to its first
    /// element.
    ///
    /// Returns 0 for sequences shorter than two elements.
    pub fn cycle_length(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let mut length = 0.0;
        for pair in order.windows(2) {
            length += self.get(pair[0], pair[1]);
        }
        length + self.get(order[order.len() - 1], order[0])
    }
}
