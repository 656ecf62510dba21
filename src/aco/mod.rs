//! Ant colony optimization for delivery tours.
//!
//! - [`ColonyConfig`] — Run parameters with validation
//! - [`PheromoneModel`] — Pheromone trails and derived edge desirability
//! - [`Ant`] — Probabilistic construction of a single tour
//! - [`Colony`] — Construct / reinforce / evaporate loop tracking the best tour

mod ant;
mod colony;
mod config;
mod pheromone;

pub use ant::Ant;
pub use colony::{create_colony, Colony};
pub use config::ColonyConfig;
pub use pheromone::PheromoneModel;
