//! Error types for delivery tour optimization.
//!
//! Every variant is raised before any solver work begins: inputs and
//! configuration are validated up front and a failed check never leaves a
//! partially computed result behind.

use thiserror::Error;

/// Result type alias for solver operations.
pub type Result<T> = std::result::Result<T, RoutingError>;

/// Errors produced while validating solver inputs.
///
/// # Examples
///
/// ```
/// use u_delivery::error::RoutingError;
///
/// let err = RoutingError::DegenerateInput { count: 1 };
/// assert!(err.to_string().contains("at least 2 locations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// Fewer than two locations: no meaningful tour exists.
    #[error("a delivery tour needs at least 2 locations, got {count}")]
    DegenerateInput {
        /// Number of locations supplied.
        count: usize,
    },

    /// A location has a non-finite coordinate.
    #[error("location {index} has a non-finite coordinate")]
    InvalidLocation {
        /// Zero-based index of the offending location.
        index: usize,
    },

    /// Coordinates are finite but so far apart that tour lengths overflow
    /// `f64`.
    #[error("distances from location {index} overflow the tour length")]
    DistanceOverflow {
        /// Zero-based index of the first location whose distances push the
        /// total past `f64::MAX`.
        index: usize,
    },

    /// A colony parameter breaks the positivity or progress requirements.
    #[error("invalid configuration: {param} = {value} (expected {constraint})")]
    Configuration {
        /// Parameter name.
        param: &'static str,
        /// Provided value, rendered as text.
        value: String,
        /// Constraint description.
        constraint: &'static str,
    },

    /// No ant finished a tour during the whole colony run.
    #[error("no ant completed a tour in {iterations} iterations")]
    NoCompleteTour {
        /// Iterations run.
        iterations: usize,
    },

    /// The exact solver was asked to enumerate beyond its factorial cap.
    #[error("exact search supports at most {max} locations, got {count}")]
    Capacity {
        /// Number of locations supplied.
        count: usize,
        /// Largest accepted instance size.
        max: usize,
    },
}

impl RoutingError {
    pub(crate) fn configuration(
        param: &'static str,
        value: impl ToString,
        constraint: &'static str,
    ) -> Self {
        Self::Configuration {
            param,
            value: value.to_string(),
            constraint,
        }
    }
}
