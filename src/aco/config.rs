//! Colony configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoutingError};

/// Parameters of an ant colony run.
///
/// The defaults are tuned for delivery instances of a few dozen locations.
///
/// # Examples
///
/// ```
/// use u_delivery::aco::ColonyConfig;
///
/// let config = ColonyConfig::default()
///     .with_iterations(200)
///     .with_ants(20)
///     .with_degradation_factor(0.9)
///     .with_beta(2.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.ants, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Number of construct/reinforce/evaporate rounds.
    pub iterations: usize,
    /// Ants per round (exploration breadth).
    pub ants: usize,
    /// Multiplier applied to every pheromone once per round; closer to 1
    /// means slower forgetting.
    pub degradation_factor: f64,
    /// Pheromone influence exponent.
    pub alpha: f64,
    /// Distance influence exponent.
    pub beta: f64,
    /// Starting pheromone on every edge.
    pub initial_pheromone: f64,
    /// Reinforcement scale: an ant deposits `q / tour_length` per edge.
    pub q: f64,
    /// Seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Build tours on rayon workers.
    pub parallel: bool,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            iterations: 100,
            ants: 50,
            degradation_factor: 0.8,
            alpha: 1.0,
            beta: 1.6,
            initial_pheromone: 0.001,
            q: 0.0001,
            seed: None,
            parallel: true,
        }
    }
}

impl ColonyConfig {
    /// Sets the number of rounds.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the number of ants per round.
    pub fn with_ants(mut self, ants: usize) -> Self {
        self.ants = ants;
        self
    }

    /// Sets the per-round evaporation multiplier.
    pub fn with_degradation_factor(mut self, degradation_factor: f64) -> Self {
        self.degradation_factor = degradation_factor;
        self
    }

    /// Sets the pheromone exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the distance exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the initial pheromone level.
    pub fn with_initial_pheromone(mut self, initial_pheromone: f64) -> Self {
        self.initial_pheromone = initial_pheromone;
        self
    }

    /// Sets the reinforcement scale.
    pub fn with_q(mut self, q: f64) -> Self {
        self.q = q;
        self
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel tour construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks every parameter against the requirements of a run.
    ///
    /// Pheromone must stay strictly positive for the whole run: a zero entry
    /// permanently removes that edge from selection. That is guaranteed only
    /// when the initial level and `q` are positive and the degradation factor
    /// lies strictly between 0 and 1.
    ///
    /// # Errors
    ///
    /// [`RoutingError::Configuration`] naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(RoutingError::configuration("iterations", self.iterations, "> 0"));
        }
        if self.ants == 0 {
            return Err(RoutingError::configuration("ants", self.ants, "> 0"));
        }
        if !(self.degradation_factor > 0.0 && self.degradation_factor < 1.0) {
            return Err(RoutingError::configuration(
                "degradation_factor",
                self.degradation_factor,
                "a value in (0, 1)",
            ));
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(RoutingError::configuration("alpha", self.alpha, "finite and >= 0"));
        }
        if !(self.beta.is_finite() && self.beta >= 0.0) {
            return Err(RoutingError::configuration("beta", self.beta, "finite and >= 0"));
        }
        if !(self.initial_pheromone.is_finite() && self.initial_pheromone > 0.0) {
            return Err(RoutingError::configuration(
                "initial_pheromone",
                self.initial_pheromone,
                "finite and > 0",
            ));
        }
        if !(self.q.is_finite() && self.q > 0.0) {
            return Err(RoutingError::configuration("q", self.q, "finite and > 0"));
        }
        Ok(())
    }
}
