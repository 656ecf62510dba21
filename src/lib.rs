//! # u-delivery
//!
//! Fixed-depot delivery tour optimization: given N locations on the plane,
//! location 0 being the depot, find a closed tour that visits every location
//! once with minimum Euclidean length.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Location, Tour, Solution)
//! - [`distance`] — Pairwise Euclidean distance matrix
//! - [`exact`] — Exhaustive permutation search for small instances
//! - [`aco`] — Ant colony optimization for larger instances
//! - [`solver`] — Common solver trait
//! - [`error`] — Input and configuration errors

pub mod aco;
pub mod distance;
pub mod error;
pub mod exact;
pub mod models;
pub mod solver;

#[cfg(test)]
mod testing;
