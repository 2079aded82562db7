//! Genetic algorithm over city permutations.
//!
//! - [`Individual`] - Permutation chromosome covering every pickup city
//! - [`decode()`] - Greedy vehicle filling that turns a permutation into a plan
//! - [`PickupGaProblem`] - [`GaProblem`](u_metaheur::ga::GaProblem) implementation
//! - [`solve_heuristic`] - Seeded generational search with elitism
//!
//! Fitness is the sum of depot legs plus a penalty per overloaded vehicle
//! and per unserved city, so infeasible permutations stay in the population
//! but lose every tournament against feasible ones.

mod chromosome;
mod config;
mod decode;
mod operators;
mod search;

pub use chromosome::Individual;
pub use config::HeuristicConfig;
pub use decode::{decode, Decoded};
pub use operators::{tournament_select, PickupGaProblem};
pub use search::solve_heuristic;
