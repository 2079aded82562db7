//! Route materialization and solution checking.
//!
//! - [`RouteEvaluator`] - load trace, distance, and fuel for one vehicle
//! - [`check_solution`] - capacity and coverage audit of a whole solution

mod check;
mod evaluator;

pub use check::check_solution;
pub use evaluator::{CapacityModel, RouteEvaluator};
