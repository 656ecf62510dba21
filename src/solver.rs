//! Common interface for delivery tour solvers.

use crate::error::Result;
use crate::models::{Location, Solution};

/// A solver that turns a location sequence (index 0 = depot) into a closed
/// delivery tour.
///
/// Both [`ExactSolver`](crate::exact::ExactSolver) and
/// [`Colony`](crate::aco::Colony) implement this trait, so callers can pick
/// a solver at runtime and drive it uniformly.
///
/// # Examples
///
/// ```
/// use u_delivery::aco::{Colony, ColonyConfig};
/// use u_delivery::exact::ExactSolver;
/// use u_delivery::models::Location;
/// use u_delivery::solver::DeliverySolver;
///
/// let locations = vec![
///     Location::new(0.0, 0.0),
///     Location::new(0.0, 3.0),
///     Location::new(4.0, 0.0),
///     Location::new(4.0, 3.0),
/// ];
/// let colony = Colony::new(ColonyConfig::default().with_seed(7)).unwrap();
/// let mut solvers: Vec<Box<dyn DeliverySolver>> =
///     vec![Box::new(ExactSolver::new()), Box::new(colony)];
///
/// for solver in &mut solvers {
///     let solution = solver.solve(&locations).unwrap();
///     assert_eq!(solution.tour.first(), Some(&1));
///     assert_eq!(solution.tour.last(), Some(&1));
/// }
/// ```
pub trait DeliverySolver {
    /// Solves the instance given by `locations`.
    fn solve(&mut self, locations: &[Location]) -> Result<Solution>;

    /// Human-readable solver name.
    fn name(&self) -> &'static str;
}
