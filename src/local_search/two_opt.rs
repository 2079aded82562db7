//! Intra-route 2-opt improvement.
//!
//! # Algorithm
//!
//! For each pair of positions i < j in a route, reverse the segment
//! `[i..=j]` and keep the reversal if the route gets cheaper. Routes are
//! priced as a whole because fuel depends on the load carried over each
//! arc, and reversing a segment changes those loads; the classic four-arc
//! delta is only exact for the distance objective.
//!
//! Repeats until no reversal improves (first-improvement strategy).
//!
//! # Complexity
//!
//! O(n³) per pass with whole-route pricing.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::models::Plan;

use super::IMPROVEMENT_EPS;

/// Applies 2-opt to every route of `plan`.
///
/// Returns `true` if any route improved.
///
/// # Examples
///
/// ```
/// use u_pickup::local_search::two_opt_improve;
/// use u_pickup::models::Plan;
///
/// // Cities on a line; price a route by the length of its path.
/// let cost = |_: usize, r: &[usize]| {
///     r.windows(2).map(|w| w[0].abs_diff(w[1]) as f64).sum::<f64>()
/// };
/// let mut plan = Plan::from_routes(vec![vec![1, 4, 3, 2, 5]]);
/// assert!(two_opt_improve(&mut plan, &cost));
/// assert_eq!(plan.route(0), &[1, 2, 3, 4, 5]);
/// ```
pub fn two_opt_improve<F>(plan: &mut Plan, cost: &F) -> bool
where
    F: Fn(usize, &[usize]) -> f64,
{
    let mut any = false;
    for v in 0..plan.num_vehicles() {
        any |= improve_route(plan.route_mut(v), |r| cost(v, r));
    }
    any
}

fn improve_route(route: &mut [usize], cost: impl Fn(&[usize]) -> f64) -> bool {
    let n = route.len();
    if n < 2 {
        return false;
    }

    let mut current = cost(route);
    let mut any = false;
    let mut improved = true;
    while improved {
        improved = false;
        for i in 0..n - 1 {
            for j in i + 1..n {
                route[i..=j].reverse();
                let candidate = cost(route);
                if candidate < current - IMPROVEMENT_EPS {
                    current = candidate;
                    improved = true;
                    any = true;
                } else {
                    route[i..=j].reverse();
                }
            }
        }
    }
    any
}
