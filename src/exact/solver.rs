//! Exact assignment entry points.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::error::{Infeasibility, SolveError};
use crate::evaluation::CapacityModel;
use crate::models::{Costing, Plan, ProblemInstance, Solution, Strategy};

use super::search::{AssignmentSearch, SearchOutcome};

/// Solves the whole-block assignment program to optimality.
///
/// Every city is assigned to exactly one vehicle, no vehicle carries more
/// than its capacity, and the objective `Σ distance(depot, city)` over the
/// assignment is minimal. Each used vehicle gets one route visiting its
/// cities in ascending index order, costed with [`Costing::DepotLegs`].
///
/// # Errors
///
/// [`SolveError::Infeasible`] when a city outweighs every vehicle, total
/// cargo exceeds total capacity, or no packing of whole blocks exists.
///
/// # Examples
///
/// ```
/// use u_pickup::exact::solve_exact;
/// use u_pickup::models::ProblemInstance;
///
/// let instance = ProblemInstance::builder()
///     .depot("Durban")
///     .city("Johannesburg", 2)
///     .city("Pretoria", 1)
///     .city("Bloemfontein", 3)
///     .city("Nelspruit", 2)
///     .city("Polokwane", 6)
///     .depot_distances(&[568.0, 635.0, 569.0, 330.0, 392.0])
///     .vehicle_capacities([5, 5, 5, 3, 8])
///     .build()
///     .unwrap();
///
/// let solution = solve_exact(&instance).unwrap();
/// assert_eq!(solution.total_delivered(), 14);
/// assert_eq!(solution.total_distance(), 2494.0);
/// ```
pub fn solve_exact(instance: &ProblemInstance) -> Result<Solution, SolveError> {
    solve_exact_within(instance, None)
}

/// Like [`solve_exact`], bounded by an optional time budget.
///
/// When the budget runs out the best assignment found so far is returned;
/// if none was found yet the call fails with [`SolveError::TimedOut`].
pub fn solve_exact_within(
    instance: &ProblemInstance,
    budget: Option<Duration>,
) -> Result<Solution, SolveError> {
    let started = Instant::now();
    if let Some(obstruction) = instance.fleet_obstruction() {
        debug!("assignment rejected before search: {obstruction}");
        return Err(obstruction.into());
    }

    debug!(
        cities = instance.num_pickups(),
        vehicles = instance.vehicles().len(),
        "exact assignment search started"
    );
    let search = AssignmentSearch::new(instance, budget.map(|b| started + b));
    let (outcome, stats) = search.run();

    match outcome {
        SearchOutcome::Found {
            vehicle_of,
            cost,
            proven,
        } => {
            info!(
                objective = cost,
                proven,
                nodes = stats.nodes,
                branches = stats.branches,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "exact assignment finished"
            );
            Ok(materialize(instance, &vehicle_of))
        }
        SearchOutcome::Exhausted => {
            info!(nodes = stats.nodes, "no whole-block assignment exists");
            Err(Infeasibility::NoFeasibleAssignment.into())
        }
        SearchOutcome::Expired => Err(SolveError::TimedOut {
            elapsed: started.elapsed(),
        }),
    }
}

fn materialize(instance: &ProblemInstance, vehicle_of: &[usize]) -> Solution {
    let mut plan = Plan::new(instance.vehicles().len());
    for city in instance.pickup_cities() {
        plan.push(vehicle_of[city], city);
    }
    plan.to_solution(
        instance,
        Strategy::Exact,
        Costing::DepotLegs,
        CapacityModel::Pickup,
    )
}
