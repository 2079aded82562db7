//! Inter-route tail exchange (2-opt*) and city swap operators.
//!
//! # Algorithm
//!
//! The 2-opt* operator swaps tail segments between two routes.
//! Given routes R1 = [a₁, ..., aᵢ, aᵢ₊₁, ..., aₙ] and
//! R2 = [b₁, ..., bⱼ, bⱼ₊₁, ..., bₘ], produce:
//!
//! R1' = [a₁, ..., aᵢ, bⱼ₊₁, ..., bₘ]
//! R2' = [b₁, ..., bⱼ, aᵢ₊₁, ..., aₙ]
//!
//! Cuts at position zero are allowed, so a whole route can change vehicle;
//! with heterogeneous capacities that is a real move.
//!
//! The swap operator exchanges one city of R1 with one city of R2, each
//! taking the other's position.
//!
//! Both accept only moves that reduce total cost and keep both vehicles
//! within capacity.
//!
//! # Complexity
//!
//! O(n² × R² × c) per pass, where n = cities per route, R = routes, and
//! c = cost of one route evaluation.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use crate::models::{Plan, ProblemInstance};

use super::IMPROVEMENT_EPS;

/// Applies 2-opt* tail exchanges between pairs of routes.
///
/// Returns `true` if the plan changed.
///
/// # Examples
///
/// ```
/// use u_pickup::local_search::exchange_improve;
/// use u_pickup::models::{Plan, ProblemInstance};
///
/// let instance = ProblemInstance::builder()
///     .depot("D")
///     .city("A", 1)
///     .city("B", 1)
///     .city("C", 1)
///     .city("E", 1)
///     .depot_distances(&[1.0, 1.0, 1.0, 1.0])
///     .vehicle_capacities([2, 2])
///     .build()
///     .unwrap();
///
/// // Penalize a route that mixes odd and even cities.
/// let cost = |_: usize, r: &[usize]| {
///     let odd = r.iter().filter(|&&c| c % 2 == 1).count();
///     (odd.min(r.len() - odd)) as f64
/// };
/// let mut plan = Plan::from_routes(vec![vec![1, 2], vec![4, 3]]);
/// assert!(exchange_improve(&mut plan, &instance, &cost));
/// assert_eq!(plan.route(0), &[1, 3]);
/// assert_eq!(plan.route(1), &[4, 2]);
/// ```
pub fn exchange_improve<F>(plan: &mut Plan, instance: &ProblemInstance, cost: &F) -> bool
where
    F: Fn(usize, &[usize]) -> f64,
{
    let mut any = false;
    let mut improved = true;
    while improved {
        improved = false;
        for r1 in 0..plan.num_vehicles() {
            for r2 in (r1 + 1)..plan.num_vehicles() {
                if let Some((cut1, cut2)) = find_best_exchange(plan, instance, r1, r2, cost) {
                    let tail1: Vec<usize> = plan.route_mut(r1).split_off(cut1);
                    let tail2: Vec<usize> = plan.route_mut(r2).split_off(cut2);
                    plan.route_mut(r1).extend(tail2);
                    plan.route_mut(r2).extend(tail1);
                    improved = true;
                    any = true;
                }
            }
        }
    }
    any
}

/// Finds the best improving tail exchange between two routes.
/// Returns `(cut_r1, cut_r2)`.
fn find_best_exchange<F>(
    plan: &Plan,
    instance: &ProblemInstance,
    r1: usize,
    r2: usize,
    cost: &F,
) -> Option<(usize, usize)>
where
    F: Fn(usize, &[usize]) -> f64,
{
    let route1 = plan.route(r1);
    let route2 = plan.route(r2);
    if route1.is_empty() && route2.is_empty() {
        return None;
    }
    let cap1 = i64::from(instance.vehicles()[r1].capacity());
    let cap2 = i64::from(instance.vehicles()[r2].capacity());
    let demand = |cities: &[usize]| -> i64 {
        cities.iter().map(|&c| i64::from(instance.demand(c))).sum()
    };

    let old = cost(r1, route1) + cost(r2, route2);
    let mut best: Option<(usize, usize, f64)> = None;

    for cut1 in 0..=route1.len() {
        for cut2 in 0..=route2.len() {
            if cut1 == route1.len() && cut2 == route2.len() {
                continue;
            }
            // R1' = route1[..cut1] + route2[cut2..]
            // R2' = route2[..cut2] + route1[cut1..]
            let load1 = demand(&route1[..cut1]) + demand(&route2[cut2..]);
            let load2 = demand(&route2[..cut2]) + demand(&route1[cut1..]);
            if load1 > cap1 || load2 > cap2 {
                continue;
            }

            let new1: Vec<usize> = route1[..cut1].iter().chain(&route2[cut2..]).copied().collect();
            let new2: Vec<usize> = route2[..cut2].iter().chain(&route1[cut1..]).copied().collect();
            let delta = cost(r1, &new1) + cost(r2, &new2) - old;

            if delta < -IMPROVEMENT_EPS && best.is_none_or(|b| delta < b.2) {
                best = Some((cut1, cut2, delta));
            }
        }
    }

    best.map(|(c1, c2, _)| (c1, c2))
}

/// Swaps single cities between pairs of routes.
///
/// Returns `true` if the plan changed.
pub fn swap_improve<F>(plan: &mut Plan, instance: &ProblemInstance, cost: &F) -> bool
where
    F: Fn(usize, &[usize]) -> f64,
{
    let mut any = false;
    let mut improved = true;
    while improved {
        improved = false;
        for r1 in 0..plan.num_vehicles() {
            for r2 in (r1 + 1)..plan.num_vehicles() {
                if let Some((i, j)) = find_best_swap(plan, instance, r1, r2, cost) {
                    let a = plan.route(r1)[i];
                    let b = plan.route(r2)[j];
                    plan.route_mut(r1)[i] = b;
                    plan.route_mut(r2)[j] = a;
                    improved = true;
                    any = true;
                }
            }
        }
    }
    any
}

fn find_best_swap<F>(
    plan: &Plan,
    instance: &ProblemInstance,
    r1: usize,
    r2: usize,
    cost: &F,
) -> Option<(usize, usize)>
where
    F: Fn(usize, &[usize]) -> f64,
{
    let route1 = plan.route(r1);
    let route2 = plan.route(r2);
    if route1.is_empty() || route2.is_empty() {
        return None;
    }
    let room1 = i64::from(instance.vehicles()[r1].capacity()) - plan.load(r1, instance);
    let room2 = i64::from(instance.vehicles()[r2].capacity()) - plan.load(r2, instance);
    let old = cost(r1, route1) + cost(r2, route2);

    let mut new1 = route1.to_vec();
    let mut new2 = route2.to_vec();
    let mut best: Option<(usize, usize, f64)> = None;

    for i in 0..route1.len() {
        for j in 0..route2.len() {
            let (a, b) = (route1[i], route2[j]);
            // Net cargo moving into route 1.
            let shift = i64::from(instance.demand(b)) - i64::from(instance.demand(a));
            if shift > room1 || -shift > room2 {
                continue;
            }
            new1[i] = b;
            new2[j] = a;
            let delta = cost(r1, &new1) + cost(r2, &new2) - old;
            new1[i] = a;
            new2[j] = b;

            if delta < -IMPROVEMENT_EPS && best.is_none_or(|s| delta < s.2) {
                best = Some((i, j, delta));
            }
        }
    }

    best.map(|(i, j, _)| (i, j))
}
