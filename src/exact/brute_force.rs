//! Exhaustive permutation search.
//!
//! # Algorithm
//!
//! The depot is fixed at position 0. The remaining positions are filled by
//! recursive swap-based generation: at depth `k`, each index in `k..n` is
//! swapped into position `k`, the rest is enumerated recursively, and the
//! swap is undone on return. Every complete permutation is scored as a closed
//! cycle and the minimum is kept with a strict `<`, so on ties the first
//! permutation in generation order wins.
//!
//! # Complexity
//!
//! O((n-1)!) permutations, each scored in O(n). Instances above
//! [`MAX_EXACT_LOCATIONS`] are rejected.
//!
//! # Parallelism
//!
//! Each top-level choice for position 1 roots an independent subtree. With
//! parallel search enabled, subtrees are explored on rayon workers, each
//! with a private incumbent, and merged in generation order. The merge uses
//! the same strict `<`, so the result is identical to the sequential one.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};
use crate::models::{validate_locations, Location, Solution, Tour, DEPOT};
use crate::solver::DeliverySolver;

/// Largest instance the exact solver accepts by default (11! ≈ 4·10⁷ tours).
pub const MAX_EXACT_LOCATIONS: usize = 12;

/// Provably optimal solver by exhaustive enumeration.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Location;
/// use u_delivery::exact::ExactSolver;
///
/// let locations = vec![
///     Location::new(0.0, 0.0),
///     Location::new(0.0, 3.0),
///     Location::new(4.0, 0.0),
///     Location::new(4.0, 3.0),
/// ];
/// let solution = ExactSolver::new().solve(&locations).unwrap();
/// assert!((solution.distance - 14.0).abs() < 1e-10);
/// assert_eq!(solution.tour, vec![1, 2, 4, 3, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct ExactSolver {
    max_locations: usize,
    parallel: bool,
}

impl Default for ExactSolver {
    fn default() -> Self {
        Self {
            max_locations: MAX_EXACT_LOCATIONS,
            parallel: true,
        }
    }
}

impl ExactSolver {
    /// Creates an exact solver with the default size cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the size cap.
    pub fn with_max_locations(mut self, max_locations: usize) -> Self {
        self.max_locations = max_locations;
        self
    }

    /// Enables or disables parallel subtree search.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Largest instance size this solver accepts.
    pub fn max_locations(&self) -> usize {
        self.max_locations
    }

    /// Finds the shortest closed tour through `locations`, starting and
    /// ending at the depot.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::DegenerateInput`] for fewer than 2 locations
    /// - [`RoutingError::InvalidLocation`] for non-finite coordinates
    /// - [`RoutingError::DistanceOverflow`] if tour lengths would overflow
    /// - [`RoutingError::Capacity`] above [`max_locations`](Self::max_locations)
    pub fn solve(&self, locations: &[Location]) -> Result<Solution> {
        validate_locations(locations)?;
        let n = locations.len();
        if n > self.max_locations {
            return Err(RoutingError::Capacity {
                count: n,
                max: self.max_locations,
            });
        }

        let distances = DistanceMatrix::from_locations(locations);
        distances.check_tour_bound()?;

        info!(locations = n, parallel = self.parallel, "starting exact search");
        let best = if self.parallel {
            search_parallel(&distances)
        } else {
            search_sequential(&distances)
        };
        info!(
            distance = best.distance,
            evaluated = best.evaluated,
            "exact search finished"
        );

        // An empty incumbent means no permutation scored below infinity.
        let solution = Solution::from_tour(&Tour::new(best.order), DEPOT, best.distance)
            .ok_or(RoutingError::DistanceOverflow { index: DEPOT })?;
        Ok(solution
            .with_evaluations(best.evaluated)
            .with_history(vec![best.distance]))
    }
}

impl DeliverySolver for ExactSolver {
    fn solve(&mut self, locations: &[Location]) -> Result<Solution> {
        ExactSolver::solve(self, locations)
    }

    fn name(&self) -> &'static str {
        "Brute Force"
    }
}

/// Best permutation seen by one search branch.
#[derive(Debug, Clone)]
struct Incumbent {
    distance: f64,
    order: Vec<usize>,
    evaluated: usize,
}

impl Incumbent {
    fn new() -> Self {
        Self {
            distance: f64::INFINITY,
            order: Vec::new(),
            evaluated: 0,
        }
    }

    /// Records a complete permutation; keeps a snapshot on strict improvement.
    fn offer(&mut self, order: &[usize], distance: f64) {
        self.evaluated += 1;
        if distance < self.distance {
            debug!(distance, evaluated = self.evaluated, "new exact minimum");
            self.distance = distance;
            self.order.clear();
            self.order.extend_from_slice(order);
        }
    }

    /// Folds a later branch into this one.
    fn merge(&mut self, later: Incumbent) {
        self.evaluated += later.evaluated;
        if later.distance < self.distance {
            self.distance = later.distance;
            self.order = later.order;
        }
    }
}

fn search_sequential(distances: &DistanceMatrix) -> Incumbent {
    let mut order: Vec<usize> = (0..distances.size()).collect();
    let mut best = Incumbent::new();
    permute(&mut order, 1, distances, &mut best);
    best
}

fn search_parallel(distances: &DistanceMatrix) -> Incumbent {
    let n = distances.size();
    let branches: Vec<Incumbent> = (1..n)
        .into_par_iter()
        .map(|first| {
            let mut order: Vec<usize> = (0..n).collect();
            order.swap(1, first);
            let mut local = Incumbent::new();
            permute(&mut order, 2, distances, &mut local);
            debug!(branch = first, distance = local.distance, "branch explored");
            local
        })
        .collect();

    branches
        .into_iter()
        .fold(Incumbent::new(), |mut best, branch| {
            best.merge(branch);
            best
        })
}

/// Enumerates every arrangement of `order[k..]` in swap-generation order.
fn permute(order: &mut [usize], k: usize, distances: &DistanceMatrix, best: &mut Incumbent) {
    if k == order.len() {
        best.offer(order, distances.cycle_length(order));
        return;
    }
    for i in k..order.len() {
        order.swap(i, k);
        permute(order, k + 1, distances, best);
        order.swap(i, k);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::capture;

    fn rectangle() -> Vec<Location> {
        vec![
            Location::new(0.0, 0.0),
            Location::new(0.0, 3.0),
            Location::new(4.0, 0.0),
            Location::new(4.0, 3.0),
        ]
    }

    fn scattered() -> Vec<Location> {
        vec![
            Location::new(5.0, 5.0),
            Location::new(1.0, 7.0),
            Location::new(9.0, 2.0),
            Location::new(3.0, 1.0),
            Location::new(8.0, 8.0),
            Location::new(0.0, 4.0),
            Location::new(6.0, 0.5),
        ]
    }

    #[test]
    fn test_rectangle_perimeter() {
        let sol = ExactSolver::new().solve(&rectangle()).expect("solvable");
        assert!((sol.distance - 14.0).abs() < 1e-10);
        assert_eq!(sol.tour.len(), 5);
        assert_eq!(sol.tour[0], 1);
        assert_eq!(sol.tour[4], 1);
        let mut visited = sol.tour[..4].to_vec();
        visited.sort_unstable();
        assert_eq!(visited, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_first_found_tie_break() {
        // Generation order at depth 1 tries [0,1,2,3], [0,1,3,2], ...; the
        // perimeter tour [0,1,3,2] comes before its mirror [0,2,3,1].
        let sol = ExactSolver::new()
            .with_parallel(false)
            .solve(&rectangle())
            .expect("solvable");
        assert_eq!(sol.tour, vec![1, 2, 4, 3, 1]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let locations = scattered();
        let seq = ExactSolver::new()
            .with_parallel(false)
            .solve(&locations)
            .expect("solvable");
        let par = ExactSolver::new()
            .with_parallel(true)
            .solve(&locations)
            .expect("solvable");
        assert_eq!(seq.tour, par.tour);
        assert_eq!(seq.distance, par.distance);
        assert_eq!(seq.evaluations, par.evaluations);
    }

    #[test]
    fn test_evaluates_every_permutation() {
        let sol = ExactSolver::new().solve(&scattered()).expect("solvable");
        // (7 - 1)! permutations with the depot fixed
        assert_eq!(sol.evaluations, 720);
    }

    #[test]
    fn test_two_locations() {
        let locations = vec![Location::new(0.0, 0.0), Location::new(3.0, 4.0)];
        let sol = ExactSolver::new().solve(&locations).expect("solvable");
        assert!((sol.distance - 10.0).abs() < 1e-10);
        assert_eq!(sol.tour, vec![1, 2, 1]);
        assert_eq!(sol.evaluations, 1);
        assert_eq!(sol.history, vec![sol.distance]);
    }

    #[test]
    fn test_optimal_against_all_tours() {
        let locations = scattered();
        let dm = DistanceMatrix::from_locations(&locations);
        let sol = ExactSolver::new().solve(&locations).expect("solvable");
        // Any other tour is at least as long
        let naive: Vec<usize> = (0..locations.len()).collect();
        assert!(sol.distance <= dm.cycle_length(&naive) + 1e-10);
        let ids: Vec<usize> = sol.tour[..locations.len()].iter().map(|i| i - 1).collect();
        assert!((dm.cycle_length(&ids) - sol.distance).abs() < 1e-10);
    }

    #[test]
    fn test_rejects_degenerate() {
        let err = ExactSolver::new()
            .solve(&[Location::new(0.0, 0.0)])
            .expect_err("one location");
        assert_eq!(err, RoutingError::DegenerateInput { count: 1 });
    }

    #[test]
    fn test_rejects_overflowing_distances() {
        let locations = vec![
            Location::new(0.0, 0.0),
            Location::new(1e308, 0.0),
            Location::new(-1e308, 0.0),
        ];
        for parallel in [false, true] {
            let err = ExactSolver::new()
                .with_parallel(parallel)
                .solve(&locations)
                .expect_err("tour lengths overflow");
            assert_eq!(err, RoutingError::DistanceOverflow { index: 0 });
        }
    }

    #[test]
    fn test_logs_each_improvement() {
        // Generation order scores [0,1,2,3] = 16, then [0,1,3,2] = 14; nothing
        // later is strictly shorter.
        let (sol, events) = capture(|| {
            ExactSolver::new()
                .with_parallel(false)
                .solve(&rectangle())
                .expect("solvable")
        });
        assert!((sol.distance - 14.0).abs() < 1e-10);
        let improvements = events.with_message("new exact minimum");
        assert_eq!(improvements.len(), 2);
        assert!(improvements[0].fields.contains(&"distance"));
    }

    #[test]
    fn test_rejects_above_cap() {
        let locations: Vec<Location> = (0..13).map(|i| Location::new(i as f64, 0.0)).collect();
        let err = ExactSolver::new().solve(&locations).expect_err("too large");
        assert_eq!(err, RoutingError::Capacity { count: 13, max: 12 });
    }

    #[test]
    fn test_custom_cap() {
        let err = ExactSolver::new()
            .with_max_locations(3)
            .solve(&rectangle())
            .expect_err("above custom cap");
        assert_eq!(err, RoutingError::Capacity { count: 4, max: 3 });
    }

    #[test]
    fn test_trait_name() {
        let solver = ExactSolver::new();
        assert_eq!(DeliverySolver::name(&solver), "Brute Force");
    }
}
