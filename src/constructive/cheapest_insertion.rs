//! Cheapest feasible insertion, heaviest city first.
//!
//! # Algorithm
//!
//! Cities are taken in order of decreasing demand. Each one is inserted at
//! the position, over every vehicle with room for it, that raises the route
//! cost the least. Placing heavy cities while the fleet is still empty
//! avoids the stranding that greedy path extension runs into.
//!
//! # Complexity
//!
//! O(n² × m × c) where m = vehicles and c = cost of one route evaluation.
//!
//! # Reference
//!
//! Rosenkrantz, D.J., Stearns, R.E. & Lewis, P.M. (1977). "An Analysis of
//! Several Heuristics for the Traveling Salesman Problem", *SIAM Journal on
//! Computing* 6(3), 563-581.

use crate::models::{Plan, ProblemInstance};

use super::Construction;

/// Builds a plan by cheapest insertion, heaviest city first.
///
/// `cost(v, cities)` prices vehicle `v` driving `cities` from and back to
/// the depot; an empty sequence must cost zero.
///
/// # Examples
///
/// ```
/// use u_pickup::constructive::cheapest_insertion;
/// use u_pickup::evaluation::RouteEvaluator;
/// use u_pickup::models::{Costing, ProblemInstance};
///
/// let instance = ProblemInstance::builder()
///     .depot("D")
///     .city("A", 1)
///     .city("B", 1)
///     .city("C", 4)
///     .depot_distances(&[1.0, 2.0, 3.0])
///     .vehicle_capacities([4, 2])
///     .build()
///     .unwrap();
///
/// let cost = |v: usize, cities: &[usize]| {
///     RouteEvaluator::new(&instance, &instance.vehicles()[v], Costing::Tour).distance(cities)
/// };
/// let built = cheapest_insertion(&instance, &cost);
/// assert!(built.is_complete());
/// assert_eq!(built.plan.route(0), &[3]);
/// ```
pub fn cheapest_insertion<F>(instance: &ProblemInstance, cost: &F) -> Construction
where
    F: Fn(usize, &[usize]) -> f64,
{
    let mut order = instance.pickup_cities();
    order.sort_by(|&a, &b| instance.demand(b).cmp(&instance.demand(a)).then(a.cmp(&b)));

    let vehicles = instance.vehicles();
    let mut plan = Plan::new(vehicles.len());
    let mut loads = vec![0i64; vehicles.len()];
    let mut route_costs = vec![0.0; vehicles.len()];
    let mut unplaced = Vec::new();

    for city in order {
        let demand = i64::from(instance.demand(city));
        // (vehicle, position, new route cost, delta)
        let mut best: Option<(usize, usize, f64, f64)> = None;

        for (v, vehicle) in vehicles.iter().enumerate() {
            if !vehicle.can_carry(loads[v] + demand) {
                continue;
            }
            let mut candidate = plan.route(v).to_vec();
            for pos in 0..=candidate.len() {
                candidate.insert(pos, city);
                let new_cost = cost(v, &candidate);
                candidate.remove(pos);

                let delta = new_cost - route_costs[v];
                if best.is_none_or(|(_, _, _, bd)| delta < bd - 1e-10) {
                    best = Some((v, pos, new_cost, delta));
                }
            }
        }

        match best {
            Some((v, pos, new_cost, _)) => {
                plan.route_mut(v).insert(pos, city);
                loads[v] += demand;
                route_costs[v] = new_cost;
            }
            None => unplaced.push(city),
        }
    }

    unplaced.sort_unstable();
    Construction { plan, unplaced }
}
