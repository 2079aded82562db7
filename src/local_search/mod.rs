//! Local search operators for improving plans.
//!
//! Every operator takes a route cost `cost(vehicle, cities)` so the same
//! moves serve the distance and fuel objectives, and keeps each vehicle
//! within its own capacity.
//!
//! - [`two_opt_improve`] - Intra-route segment reversal
//! - [`relocate_improve`] - City relocation within and across routes
//! - [`exchange_improve`] - Inter-route tail exchange (2-opt*)
//! - [`swap_improve`] - Inter-route city swap
//! - [`guided_local_search`] - Arc-penalty metaheuristic over all of the above

mod exchange;
mod guided;
mod relocate;
mod two_opt;

pub use exchange::{exchange_improve, swap_improve};
pub use guided::{guided_local_search, GuidedConfig, GuidedOutcome};
pub use relocate::relocate_improve;
pub use two_opt::two_opt_improve;

use crate::models::{Plan, ProblemInstance};

/// Minimum cost decrease for a move to count as an improvement.
const IMPROVEMENT_EPS: f64 = 1e-10;

/// Runs every operator until none improves `plan`.
///
/// Returns `true` if the plan changed.
pub fn descend<F>(plan: &mut Plan, instance: &ProblemInstance, cost: &F) -> bool
where
    F: Fn(usize, &[usize]) -> f64,
{
    let mut any = false;
    loop {
        let mut improved = two_opt_improve(plan, cost);
        improved |= relocate_improve(plan, instance, cost);
        improved |= exchange_improve(plan, instance, cost);
        improved |= swap_improve(plan, instance, cost);
        if !improved {
            return any;
        }
        any = true;
    }
}

/// Total cost of `plan` under `cost`.
pub fn plan_cost<F>(plan: &Plan, cost: &F) -> f64
where
    F: Fn(usize, &[usize]) -> f64,
{
    (0..plan.num_vehicles())
        .map(|v| cost(v, plan.route(v)))
        .sum()
}
