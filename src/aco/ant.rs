//! Single-ant tour construction.
//!
//! An ant starts at a uniformly random location and repeatedly moves to an
//! unvisited location chosen by roulette-wheel sampling over the current
//! edge desirabilities. It only reads the pheromone model, so any number of
//! ants can build tours concurrently.

use rand::Rng;
use tracing::warn;

use crate::distance::DistanceMatrix;
use crate::models::Tour;

use super::PheromoneModel;

/// One ant's tour under construction.
///
/// Created fresh per trial and discarded once its deposit has been applied.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use u_delivery::aco::{Ant, PheromoneModel};
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::models::Location;
///
/// let dm = DistanceMatrix::from_locations(&[
///     Location::new(0.0, 0.0),
///     Location::new(1.0, 0.0),
///     Location::new(1.0, 1.0),
/// ]);
/// let model = PheromoneModel::new(dm, 1.0, 2.0, 0.001);
/// let ant = Ant::travel(&model, &mut ChaCha8Rng::seed_from_u64(1));
/// assert!(ant.is_complete());
/// assert_eq!(ant.path().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Ant {
    path: Vec<usize>,
    visited: Vec<bool>,
    length: f64,
    complete: bool,
}

impl Ant {
    /// Builds one tour over every location of `model`.
    pub fn travel<R: Rng>(model: &PheromoneModel, rng: &mut R) -> Self {
        let n = model.size();
        let start = rng.random_range(0..n);
        Self::construct(n, start, model.distances(), |current, visited| {
            select_next(model.edge_values_from(current), visited, rng.random::<f64>())
        })
    }

    /// Drives construction with an arbitrary selection rule.
    ///
    /// `choose(current, visited)` returns the next location, or `None` when
    /// no candidate could be selected. In that case the ant falls back to its
    /// starting location, which closes the tour early and leaves the ant
    /// incomplete.
    fn construct<F>(n: usize, start: usize, distances: &DistanceMatrix, mut choose: F) -> Self
    where
        F: FnMut(usize, &[bool]) -> Option<usize>,
    {
        let mut ant = Self {
            path: Vec::with_capacity(n),
            visited: vec![false; n],
            length: 0.0,
            complete: false,
        };
        ant.path.push(start);
        ant.visited[start] = true;

        while ant.path.len() < n {
            let current = ant.path[ant.path.len() - 1];
            let next = choose(current, &ant.visited).unwrap_or(start);
            if next == start {
                // Early-closed tours are discarded by the colony.
                warn!(
                    visited = ant.path.len(),
                    locations = n,
                    "roulette selected nothing, closing tour early"
                );
                break;
            }
            ant.length += distances.get(current, next);
            ant.path.push(next);
            ant.visited[next] = true;
        }

        ant.length += distances.get(ant.path[ant.path.len() - 1], start);
        ant.complete = ant.path.len() == n;
        ant
    }

    /// Visit order, starting at the ant's first location.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Closed tour length, including the edge back to the start.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Returns `true` if every location was visited.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Returns `true` if location `i` was visited.
    pub fn has_visited(&self, i: usize) -> bool {
        self.visited[i]
    }

    /// Consumes the ant, returning its tour.
    pub fn into_tour(self) -> Tour {
        Tour::new(self.path)
    }
}

/// Roulette-wheel selection over the unvisited entries of `weights`.
///
/// `draw` is a uniform sample in `[0, 1)`. The wheel position
/// `r = draw * Σ weights[j]` is consumed by subtracting candidate weights in
/// index order until it drops to zero or below. Returns `None` if rounding
/// leaves `r` positive after the last candidate, or if no candidate remains.
///
/// Zero-distance neighbours have infinite weight; the first of them is taken
/// directly since the wheel degenerates to a point mass.
pub(crate) fn select_next(weights: &[f64], visited: &[bool], draw: f64) -> Option<usize> {
    let candidates = move || (0..weights.len()).filter(move |&j| !visited[j]);

    let total: f64 = candidates().map(|j| weights[j]).sum();
    if total.is_infinite() {
        return candidates().find(|&j| weights[j].is_infinite());
    }

    let mut r = draw * total;
    for j in candidates() {
        r -= weights[j];
        if r <= 0.0 {
            return Some(j);
        }
    }
    None
}
