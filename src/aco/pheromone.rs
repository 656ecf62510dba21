//! Pheromone trails and derived edge desirability.

use crate::distance::DistanceMatrix;

/// Symmetric pheromone matrix together with the edge desirability it induces.
///
/// For every pair `i != j` the model keeps
///
/// ```text
/// edge_value(i, j) = pheromone(i, j)^alpha / distance(i, j)^beta
/// ```
///
/// and recomputes it in the same call that changes the pheromone, so a
/// reader never observes a stale desirability. The diagonal desirability is
/// 0 since an ant never stays in place.
///
/// # Examples
///
/// ```
/// use u_delivery::aco::PheromoneModel;
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::models::Location;
///
/// let dm = DistanceMatrix::from_locations(&[Location::new(0.0, 0.0), Location::new(2.0, 0.0)]);
/// let mut model = PheromoneModel::new(dm, 1.0, 1.0, 0.5);
/// assert!((model.edge_value(0, 1) - 0.25).abs() < 1e-12);
///
/// model.deposit(0, 1, 0.5);
/// assert_eq!(model.pheromone(1, 0), 1.0);
/// assert!((model.edge_value(1, 0) - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct PheromoneModel {
    size: usize,
    alpha: f64,
    beta: f64,
    pheromone: Vec<f64>,
    edge_value: Vec<f64>,
    distances: DistanceMatrix,
}

impl PheromoneModel {
    /// Creates a model over `distances` with every trail set to `initial`.
    pub fn new(distances: DistanceMatrix, alpha: f64, beta: f64, initial: f64) -> Self {
        let size = distances.size();
        let mut model = Self {
            size,
            alpha,
            beta,
            pheromone: vec![0.0; size * size],
            edge_value: vec![0.0; size * size],
            distances,
        };
        model.initialize(initial);
        model
    }

    /// Resets every trail to `value` and recomputes all desirabilities.
    pub fn initialize(&mut self, value: f64) {
        debug_assert!(value > 0.0, "pheromone must stay strictly positive");
        self.pheromone.fill(value);
        self.refresh_all();
    }

    /// Adds `amount` to the trail between `i` and `j` (both directions) and
    /// refreshes the desirability of that pair only.
    pub fn deposit(&mut self, i: usize, j: usize, amount: f64) {
        debug_assert!(amount > 0.0, "deposits must be positive");
        let n = self.size;
        self.pheromone[i * n + j] += amount;
        if i != j {
            self.pheromone[j * n + i] += amount;
        }
        self.refresh(i, j);
        self.refresh(j, i);
    }

    /// Multiplies every trail by `factor` and recomputes all desirabilities.
    ///
    /// This is not a pure multiplicative decay: trails are floored at
    /// `f64::MIN_POSITIVE`. Configuration checks keep every input positive,
    /// but repeated multiplication alone can still underflow a trail to zero
    /// on very long runs, and a zero trail could never be chosen again.
    pub fn evaporate(&mut self, factor: f64) {
        debug_assert!(factor > 0.0 && factor <= 1.0, "factor must lie in (0, 1]");
        for p in &mut self.pheromone {
            *p = (*p * factor).max(f64::MIN_POSITIVE);
        }
        self.refresh_all();
    }

    /// Pheromone on the edge `i`–`j`.
    pub fn pheromone(&self, i: usize, j: usize) -> f64 {
        self.pheromone[i * self.size + j]
    }

    /// Desirability of moving from `i` to `j`.
    pub fn edge_value(&self, i: usize, j: usize) -> f64 {
        self.edge_value[i * self.size + j]
    }

    /// Desirabilities of every move out of `from`.
    pub fn edge_values_from(&self, from: usize) -> &[f64] {
        &self.edge_value[from * self.size..(from + 1) * self.size]
    }

    /// Underlying distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Smallest trail in the matrix.
    pub fn min_pheromone(&self) -> f64 {
        self.pheromone.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Owned row-per-location copy of the pheromone matrix, e.g. for
    /// rendering trail intensity.
    pub fn snapshot(&self) -> Vec<Vec<f64>> {
        self.pheromone
            .chunks(self.size.max(1))
            .map(|row| row.to_vec())
            .collect()
    }

    fn refresh(&mut self, i: usize, j: usize) {
        self.edge_value[i * self.size + j] = self.desirability(i, j);
    }

    fn refresh_all(&mut self) {
        for i in 0..self.size {
            for j in 0..self.size {
                self.refresh(i, j);
            }
        }
    }

    fn desirability(&self, i: usize, j: usize) -> f64 {
        if i == j {
            return 0.0;
        }
        self.pheromone(i, j).powf(self.alpha) / self.distances.get(i, j).powf(self.beta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;

    fn triangle() -> DistanceMatrix {
        // 3-4-5 right triangle
        DistanceMatrix::from_locations(&[
            Location::new(0.0, 0.0),
            Location::new(3.0, 0.0),
            Location::new(3.0, 4.0),
        ])
    }

    fn assert_consistent(model: &PheromoneModel) {
        for i in 0..model.size() {
            for j in 0..model.size() {
                let expected = if i == j {
                    0.0
                } else {
                    model.pheromone(i, j).powf(model.alpha)
                        / model.distances().get(i, j).powf(model.beta)
                };
                assert_eq!(model.edge_value(i, j), expected, "stale value at ({i}, {j})");
            }
        }
    }

    #[test]
    fn test_initialize_uniform() {
        let model = PheromoneModel::new(triangle(), 1.0, 2.0, 0.001);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(model.pheromone(i, j), 0.001);
            }
        }
        // 0.001 / 3²
        assert!((model.edge_value(0, 1) - 0.001 / 9.0).abs() < 1e-15);
        assert_eq!(model.edge_value(1, 1), 0.0);
        assert_consistent(&model);
    }

    #[test]
    fn test_deposit_symmetric_and_local() {
        let mut model = PheromoneModel::new(triangle(), 1.0, 1.0, 1.0);
        model.deposit(0, 2, 0.5);
        assert_eq!(model.pheromone(0, 2), 1.5);
        assert_eq!(model.pheromone(2, 0), 1.5);
        assert_eq!(model.pheromone(0, 1), 1.0);
        assert_eq!(model.pheromone(1, 2), 1.0);
        assert!((model.edge_value(2, 0) - 1.5 / 5.0).abs() < 1e-12);
        assert_consistent(&model);
    }

    #[test]
    fn test_evaporate() {
        let mut model = PheromoneModel::new(triangle(), 2.0, 1.0, 1.0);
        model.deposit(0, 1, 1.0);
        model.evaporate(0.5);
        assert_eq!(model.pheromone(0, 1), 1.0);
        assert_eq!(model.pheromone(1, 2), 0.5);
        assert_consistent(&model);
    }

    #[test]
    fn test_evaporate_never_reaches_zero() {
        let mut model = PheromoneModel::new(triangle(), 1.0, 1.0, 1e-300);
        for _ in 0..50 {
            model.evaporate(1e-10);
        }
        assert!(model.min_pheromone() > 0.0);
        assert_consistent(&model);
    }

    #[test]
    fn test_alpha_zero_ignores_pheromone() {
        let mut model = PheromoneModel::new(triangle(), 0.0, 1.0, 0.3);
        model.deposit(0, 1, 10.0);
        assert!((model.edge_value(0, 1) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_edge_values_from() {
        let model = PheromoneModel::new(triangle(), 1.0, 1.0, 1.0);
        let row = model.edge_values_from(1);
        assert_eq!(row.len(), 3);
        assert_eq!(row[1], 0.0);
        assert_eq!(row[2], model.edge_value(1, 2));
    }

    #[test]
    fn test_snapshot() {
        let mut model = PheromoneModel::new(triangle(), 1.0, 1.0, 0.2);
        model.deposit(1, 2, 0.3);
        let snap = model.snapshot();
        assert_eq!(snap.len(), 3);
        assert!(snap.iter().all(|row| row.len() == 3));
        assert_eq!(snap[1][2], model.pheromone(1, 2));
        assert_eq!(snap[2][1], snap[1][2]);
    }

    #[test]
    fn test_coincident_locations_are_infinitely_desirable() {
        let dm = DistanceMatrix::from_locations(&[Location::new(1.0, 1.0), Location::new(1.0, 1.0)]);
        let model = PheromoneModel::new(dm, 1.0, 2.0, 0.1);
        assert!(model.edge_value(0, 1).is_infinite());
        assert_eq!(model.edge_value(0, 0), 0.0);
    }
}
