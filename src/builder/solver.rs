//! Route builder entry points.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::constructive::{cheapest_insertion, path_cheapest_arc};
use crate::error::SolveError;
use crate::evaluation::RouteEvaluator;
use crate::local_search::{guided_local_search, GuidedConfig};
use crate::models::{Costing, ProblemInstance, Solution, Strategy};

use super::config::{RouteBuilderConfig, RouteObjective};

/// Builds capacity-respecting routes within `time_budget`, minimizing
/// total arc distance.
///
/// Shorthand for [`solve_routed_with`] with the default configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_pickup::builder::solve_routed;
/// use u_pickup::evaluation::check_solution;
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
/// let solution = solve_routed(&instance, Duration::from_secs(1)).unwrap();
/// assert!(solution.is_complete());
/// assert!(check_solution(&instance, &solution).is_empty());
/// ```
pub fn solve_routed(
    instance: &ProblemInstance,
    time_budget: Duration,
) -> Result<Solution, SolveError> {
    solve_routed_with(
        instance,
        &RouteBuilderConfig::default().with_time_budget(time_budget),
    )
}

/// Builds capacity-respecting routes under `config`.
///
/// Construction tries path-cheapest-arc first and falls back to cheapest
/// insertion, heaviest city first. The first complete plan is then improved
/// by guided local search until the iteration limit or the time budget.
///
/// # Errors
///
/// - [`SolveError::InvalidInput`] for out-of-range parameters.
/// - [`SolveError::NoSolution`] when some city cannot be placed; `unplaced`
///   lists them.
/// - [`SolveError::TimedOut`] when the budget runs out before a complete
///   plan exists.
pub fn solve_routed_with(
    instance: &ProblemInstance,
    config: &RouteBuilderConfig,
) -> Result<Solution, SolveError> {
    config.validate()?;
    let started = Instant::now();
    let deadline = started.checked_add(config.time_budget);
    let expired = || deadline.is_some_and(|d| Instant::now() >= d);

    let largest = instance.max_capacity();
    let too_heavy: Vec<usize> = instance
        .pickup_cities()
        .into_iter()
        .filter(|&c| instance.demand(c) > largest)
        .collect();
    if !too_heavy.is_empty() {
        debug!(cities = ?too_heavy, largest, "cities outweigh every vehicle");
        return Err(SolveError::NoSolution {
            unplaced: too_heavy,
        });
    }

    let model = config.capacity_model;
    let objective = config.objective;
    let cost = |v: usize, cities: &[usize]| -> f64 {
        if cities.is_empty() {
            return 0.0;
        }
        let evaluator =
            RouteEvaluator::new(instance, &instance.vehicles()[v], Costing::Tour).with_model(model);
        match objective {
            RouteObjective::Distance => evaluator.distance(cities),
            RouteObjective::Fuel => evaluator.fuel(cities),
        }
    };

    debug!(
        cities = instance.num_pickups(),
        vehicles = instance.vehicles().len(),
        ?objective,
        ?model,
        "route construction started"
    );
    if expired() {
        return Err(SolveError::TimedOut {
            elapsed: started.elapsed(),
        });
    }

    let first = path_cheapest_arc(instance);
    let plan = if first.is_complete() {
        first.plan
    } else {
        debug!(
            unplaced = first.unplaced.len(),
            "path-cheapest-arc stranded cities, falling back to cheapest insertion"
        );
        if expired() {
            return Err(SolveError::TimedOut {
                elapsed: started.elapsed(),
            });
        }
        let second = cheapest_insertion(instance, &cost);
        if !second.is_complete() {
            info!(unplaced = ?second.unplaced, "no capacity-feasible plan found");
            return Err(SolveError::NoSolution {
                unplaced: second.unplaced,
            });
        }
        second.plan
    };

    let gls = GuidedConfig {
        max_iterations: config.max_iterations,
        lambda_factor: config.lambda_factor,
        deadline,
    };
    let outcome = guided_local_search(plan, instance, &cost, &gls);
    info!(
        objective = outcome.cost,
        iterations = outcome.iterations,
        improvements = outcome.improvements,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "route building finished"
    );

    Ok(outcome
        .plan
        .to_solution(instance, Strategy::Routed, Costing::Tour, model))
}
