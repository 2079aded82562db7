//! City relocation operator, within and across routes.
//!
//! # Algorithm
//!
//! Tries moving each city from its current position to every other
//! position, in its own route or in another vehicle's route with room for
//! it. The single best move is applied, and the search repeats until no
//! move reduces the total cost.
//!
//! Relocating within a route is Or-opt with segment length one.
//!
//! # Complexity
//!
//! O(n² × c) per pass where n = cities and c = cost of one route evaluation.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use crate::models::{Plan, ProblemInstance};

use super::IMPROVEMENT_EPS;

/// A relocate move: move a city from one position to another.
#[derive(Debug, Clone)]
struct RelocateMove {
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: f64,
}

/// Applies relocate moves to `plan` until none improves.
///
/// Only moves that keep every vehicle within its capacity are considered.
/// Returns `true` if the plan changed.
///
/// # Examples
///
/// ```
/// use u_pickup::evaluation::RouteEvaluator;
/// use u_pickup::local_search::relocate_improve;
/// use u_pickup::models::{Costing, Plan, ProblemInstance};
///
/// let instance = ProblemInstance::builder()
///     .depot("D")
///     .city("A", 1)
///     .city("B", 1)
///     .depot_distances(&[3.0, 4.0])
///     .vehicle_capacities([5, 5])
///     .build()
///     .unwrap();
/// let cost = |v: usize, r: &[usize]| {
///     RouteEvaluator::new(&instance, &instance.vehicles()[v], Costing::Tour).distance(r)
/// };
///
/// // On a star metric merging two round trips saves nothing.
/// let mut plan = Plan::from_routes(vec![vec![1], vec![2]]);
/// assert!(!relocate_improve(&mut plan, &instance, &cost));
/// ```
pub fn relocate_improve<F>(plan: &mut Plan, instance: &ProblemInstance, cost: &F) -> bool
where
    F: Fn(usize, &[usize]) -> f64,
{
    let capacities: Vec<i64> = instance
        .vehicles()
        .iter()
        .map(|v| i64::from(v.capacity()))
        .collect();
    let mut loads: Vec<i64> = (0..plan.num_vehicles()).map(|v| plan.load(v, instance)).collect();
    let mut costs: Vec<f64> = (0..plan.num_vehicles())
        .map(|v| cost(v, plan.route(v)))
        .collect();

    let mut any = false;
    while let Some(mv) = find_best_relocate(plan, instance, &capacities, &loads, &costs, cost) {
        let city = plan.route_mut(mv.from_route).remove(mv.from_pos);
        plan.route_mut(mv.to_route).insert(mv.to_pos, city);

        let demand = i64::from(instance.demand(city));
        loads[mv.from_route] -= demand;
        loads[mv.to_route] += demand;
        costs[mv.from_route] = cost(mv.from_route, plan.route(mv.from_route));
        costs[mv.to_route] = cost(mv.to_route, plan.route(mv.to_route));
        any = true;
    }
    any
}

/// Finds the best improving relocate move, if any.
fn find_best_relocate<F>(
    plan: &Plan,
    instance: &ProblemInstance,
    capacities: &[i64],
    loads: &[i64],
    costs: &[f64],
    cost: &F,
) -> Option<RelocateMove>
where
    F: Fn(usize, &[usize]) -> f64,
{
    let mut best: Option<RelocateMove> = None;

    for from_r in 0..plan.num_vehicles() {
        let from_route = plan.route(from_r);
        for from_pos in 0..from_route.len() {
            let city = from_route[from_pos];
            let demand = i64::from(instance.demand(city));

            let mut shortened = from_route.to_vec();
            shortened.remove(from_pos);
            let removal_delta = cost(from_r, &shortened) - costs[from_r];

            for to_r in 0..plan.num_vehicles() {
                if to_r == from_r {
                    // Reinsert into the shortened route at a different place.
                    for to_pos in 0..=shortened.len() {
                        if to_pos == from_pos {
                            continue;
                        }
                        shortened.insert(to_pos, city);
                        let delta = cost(from_r, &shortened) - costs[from_r];
                        shortened.remove(to_pos);
                        consider(&mut best, from_r, from_pos, to_r, to_pos, delta);
                    }
                    continue;
                }

                if loads[to_r] + demand > capacities[to_r] {
                    continue;
                }
                let mut target = plan.route(to_r).to_vec();
                for to_pos in 0..=target.len() {
                    target.insert(to_pos, city);
                    let insertion_delta = cost(to_r, &target) - costs[to_r];
                    target.remove(to_pos);
                    consider(
                        &mut best,
                        from_r,
                        from_pos,
                        to_r,
                        to_pos,
                        removal_delta + insertion_delta,
                    );
                }
            }
        }
    }

    best
}

fn consider(
    best: &mut Option<RelocateMove>,
    from_route: usize,
    from_pos: usize,
    to_route: usize,
    to_pos: usize,
    delta: f64,
) {
    if delta < -IMPROVEMENT_EPS && best.as_ref().is_none_or(|b| delta < b.delta) {
        *best = Some(RelocateMove {
            from_route,
            from_pos,
            to_route,
            to_pos,
            delta,
        });
    }
}
