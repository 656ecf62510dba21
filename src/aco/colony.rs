//! Ant colony optimizer.
//!
//! # Algorithm
//!
//! Each iteration runs three phases in a fixed order:
//!
//! 1. **Construct**: `ants` independent ants build tours from the current
//!    desirabilities. Ants only read the model, so they run on rayon workers
//!    when parallel construction is enabled.
//! 2. **Reinforce**: every complete ant deposits `q / length` on each edge
//!    of its tour, and the global best is replaced on strict improvement.
//!    Deposits are merged by a single writer in ant order.
//! 3. **Evaporate**: one pass multiplies every trail by the degradation
//!    factor. It starts only after all deposits of the iteration, and the next
//!    iteration's ants see the post-evaporation state.
//!
//! # Reproducibility
//!
//! The master RNG draws one seed per ant, in ant order, before construction
//! starts. Each ant builds with its own generator, so a seeded run gives the
//! same result whether construction is parallel or sequential.
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant System: Optimization
//! by a Colony of Cooperating Agents", *IEEE Transactions on Systems, Man,
//! and Cybernetics, Part B* 26(1), 29-41.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};
use crate::models::{validate_locations, Location, Solution, Tour, DEPOT};
use crate::solver::DeliverySolver;

use super::{Ant, ColonyConfig, PheromoneModel};

/// Best tour seen so far; only ever replaced by a strictly shorter one.
#[derive(Debug, Clone)]
struct BestTour {
    distance: f64,
    tour: Option<Tour>,
}

impl BestTour {
    fn new() -> Self {
        Self {
            distance: f64::INFINITY,
            tour: None,
        }
    }

    fn offer(&mut self, distance: f64, tour: Tour) -> bool {
        if distance < self.distance {
            self.distance = distance;
            self.tour = Some(tour);
            true
        } else {
            false
        }
    }
}

/// Outcome of one reinforcement phase.
#[derive(Debug, Clone, Copy)]
struct Round {
    /// Ants that finished a full tour.
    completed: usize,
    /// Shortest complete tour of the iteration, or infinity if none.
    shortest: f64,
}

/// An ant colony optimizer for fixed-depot delivery tours.
///
/// The colony owns its configuration and, after a run, the final pheromone
/// model. Nothing is shared between colonies, so independent runs can proceed
/// concurrently. Each run starts from freshly initialized trails.
///
/// # Examples
///
/// ```
/// use u_delivery::aco::{Colony, ColonyConfig};
/// use u_delivery::models::Location;
///
/// let locations = vec![
///     Location::new(0.0, 0.0),
///     Location::new(0.0, 3.0),
///     Location::new(4.0, 0.0),
///     Location::new(4.0, 3.0),
/// ];
/// let config = ColonyConfig::default()
///     .with_iterations(50)
///     .with_ants(10)
///     .with_seed(42);
/// let mut colony = Colony::new(config).unwrap();
/// let solution = colony.run(&locations).unwrap();
///
/// assert!((solution.distance - 14.0).abs() < 1e-9);
/// assert_eq!(solution.tour.first(), Some(&1));
/// assert_eq!(solution.tour.last(), Some(&1));
/// assert!(colony.pheromone_snapshot().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Colony {
    config: ColonyConfig,
    pheromones: Option<PheromoneModel>,
}

impl Colony {
    /// Creates a colony after validating `config`.
    ///
    /// # Errors
    ///
    /// [`RoutingError::Configuration`] if any parameter is out of range.
    pub fn new(config: ColonyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            pheromones: None,
        })
    }

    /// The colony's configuration.
    pub fn config(&self) -> &ColonyConfig {
        &self.config
    }

    /// Pheromone model left by the most recent run, if any.
    pub fn pheromones(&self) -> Option<&PheromoneModel> {
        self.pheromones.as_ref()
    }

    /// Read-only copy of the most recent run's pheromone matrix.
    pub fn pheromone_snapshot(&self) -> Option<Vec<Vec<f64>>> {
        self.pheromones.as_ref().map(PheromoneModel::snapshot)
    }

    /// Runs the colony on `locations`, seeding from the configured seed or,
    /// if none, from the OS.
    ///
    /// # Errors
    ///
    /// - [`RoutingError::DegenerateInput`] for fewer than 2 locations
    /// - [`RoutingError::InvalidLocation`] for non-finite coordinates
    /// - [`RoutingError::DistanceOverflow`] if tour lengths would overflow
    /// - [`RoutingError::NoCompleteTour`] if no ant ever finished a tour
    pub fn run(&mut self, locations: &[Location]) -> Result<Solution> {
        let mut rng = match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        self.run_with_rng(locations, &mut rng)
    }

    /// Runs the colony on `locations`, drawing all randomness from `rng`.
    ///
    /// The configured seed is ignored.
    pub fn run_with_rng<R: Rng>(&mut self, locations: &[Location], rng: &mut R) -> Result<Solution> {
        validate_locations(locations)?;
        let distances = DistanceMatrix::from_locations(locations);
        distances.check_tour_bound()?;

        let config = &self.config;
        info!(
            locations = locations.len(),
            iterations = config.iterations,
            ants = config.ants,
            parallel = config.parallel,
            "starting ant colony"
        );

        let mut model = PheromoneModel::new(
            distances,
            config.alpha,
            config.beta,
            config.initial_pheromone,
        );
        let mut best = BestTour::new();
        let mut history = Vec::with_capacity(config.iterations);
        let mut evaluations = 0;

        for iteration in 0..config.iterations {
            let ants = self.construct(&model, rng);
            let round = self.reinforce(&mut model, ants, &mut best);
            evaluations += round.completed;
            model.evaporate(self.config.degradation_factor);
            history.push(best.distance);
            debug!(
                iteration,
                completed = round.completed,
                iteration_best = round.shortest,
                best = best.distance,
                "iteration finished"
            );
        }

        self.pheromones = Some(model);

        let tour = best.tour.ok_or(RoutingError::NoCompleteTour {
            iterations: self.config.iterations,
        })?;
        info!(distance = best.distance, evaluations, "ant colony finished");

        let solution = Solution::from_tour(&tour, DEPOT, best.distance).ok_or(
            RoutingError::NoCompleteTour {
                iterations: self.config.iterations,
            },
        )?;
        Ok(solution.with_evaluations(evaluations).with_history(history))
    }

    /// Construction phase: builds one tour per ant against a fixed model.
    fn construct<R: Rng>(&self, model: &PheromoneModel, rng: &mut R) -> Vec<Ant> {
        let seeds: Vec<u64> = (0..self.config.ants).map(|_| rng.random::<u64>()).collect();
        let build = |seed: &u64| Ant::travel(model, &mut ChaCha8Rng::seed_from_u64(*seed));
        if self.config.parallel {
            seeds.par_iter().map(build).collect()
        } else {
            seeds.iter().map(build).collect()
        }
    }

    /// Reinforcement phase: applies every complete ant's deposit in ant order
    /// and updates the global best.
    fn reinforce(&self, model: &mut PheromoneModel, ants: Vec<Ant>, best: &mut BestTour) -> Round {
        let mut round = Round {
            completed: 0,
            shortest: f64::INFINITY,
        };
        for ant in ants {
            if !ant.is_complete() {
                continue;
            }
            round.completed += 1;
            let length = ant.length();
            round.shortest = round.shortest.min(length);
            let tour = ant.into_tour();
            // Zero-length tours and amounts that underflow leave trails as they are.
            let amount = self.config.q / length;
            if amount.is_finite() && amount > 0.0 {
                for (i, j) in tour.edges() {
                    model.deposit(i, j, amount);
                }
            }
            if best.offer(length, tour) {
                debug!(distance = length, "new best tour");
            }
        }
        round
    }
}

impl DeliverySolver for Colony {
    fn solve(&mut self, locations: &[Location]) -> Result<Solution> {
        self.run(locations)
    }

    fn name(&self) -> &'static str {
        "Ant Colony Optimization"
    }
}

/// Validates `config` and creates a colony.
pub fn create_colony(config: ColonyConfig) -> Result<Colony> {
    Colony::new(config)
}
