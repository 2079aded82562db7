//! # u-pickup
//!
//! Capacitated pickup routing: a fleet of vehicles with individual
//! capacities leaves a depot, collects cargo waiting in cities and brings it
//! back. Three independent solvers share one problem model and one solution
//! schema.
//!
//! ## Modules
//!
//! - [`models`] - Domain model types (City, Vehicle, ProblemInstance, Plan, Route, Solution)
//! - [`distance`] - Distance matrix, full or derived from depot legs
//! - [`evaluation`] - Route costing, load traces, and solution checking
//! - [`exact`] - Optimal city-to-vehicle assignment by branch and bound
//! - [`builder`] - Capacity-dimensioned route building with guided local search
//! - [`constructive`] - Path-cheapest-arc and cheapest insertion
//! - [`local_search`] - 2-opt, relocate, exchange, swap, and guided local search
//! - [`ga`] - Genetic algorithm with greedy vehicle-filling decode
//! - [`report`] - Human-readable solution summaries
//! - [`demo`] - Ready-made instances
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use u_pickup::demo::{inland_cargo, INLAND_CAPACITIES, INLAND_CARGO};
//! use u_pickup::exact::solve_exact;
//! use u_pickup::report::SolutionReport;
//!
//! let instance = inland_cargo(&INLAND_CARGO, &INLAND_CAPACITIES).unwrap();
//! let solution = solve_exact(&instance).unwrap();
//! println!("{}", SolutionReport::new(&instance, &solution));
//! ```

pub mod builder;
pub mod constructive;
pub mod demo;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod exact;
pub mod ga;
pub mod local_search;
pub mod models;
pub mod report;
