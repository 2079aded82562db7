//! Exact whole-block assignment of cities to vehicles.
//!
//! Answers "which vehicle serves which city", not "in what order": the
//! 0/1 program
//!
//! ```text
//! minimize   Σ_v Σ_c distance(depot, c) · x[v, c]
//! subject to Σ_v x[v, c] = 1                    for every city c
//!            Σ_c demand[c] · x[v, c] ≤ cap[v]   for every vehicle v
//!            x[v, c] ∈ {0, 1}
//! ```
//!
//! is solved by parallel branch and bound.

mod search;
mod solver;

pub use solver::{solve_exact, solve_exact_within};
