//! Domain model types for pickup routing.
//!
//! Cities with cargo, a capacity-limited fleet, the immutable problem
//! instance, and the route/solution schema every solver fills in.

mod city;
mod plan;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use city::City;
pub use plan::Plan;
pub use problem::{ProblemBuilder, ProblemInstance};
pub use route::{Route, Stop};
pub use solution::{Costing, Solution, Strategy, Violation, ViolationType};
pub use vehicle::Vehicle;
