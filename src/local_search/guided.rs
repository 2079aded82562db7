//! Guided local search over arc penalties.
//!
//! # Algorithm
//!
//! 1. Descend to a local optimum with every operator in [`descend`].
//! 2. Among the arcs of the current plan, penalize those with the highest
//!    utility `distance(a, b) / (1 + penalty(a, b))`.
//! 3. Descend again on the augmented cost
//!    `cost + λ × Σ penalty(arc)`, where `λ` is `lambda_factor` times the
//!    average arc cost of the first local optimum.
//! 4. Track the best plan by true cost; repeat from 2 until the iteration
//!    limit or the deadline.
//!
//! Every step is deterministic, so equal inputs give equal plans.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//! application to the traveling salesman problem", *European Journal of
//! Operational Research* 113(2), 469-499.

use std::time::Instant;

use crate::models::{Plan, ProblemInstance};

use super::{descend, plan_cost, IMPROVEMENT_EPS};

/// Parameters of a guided local search run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuidedConfig {
    /// Penalize-and-descend rounds after the first descent.
    pub max_iterations: usize,
    /// Scale of `λ` relative to the average arc cost.
    pub lambda_factor: f64,
    /// Wall-clock limit; checked between rounds.
    pub deadline: Option<Instant>,
}

impl Default for GuidedConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            lambda_factor: 0.1,
            deadline: None,
        }
    }
}

/// Result of a guided local search run.
#[derive(Debug, Clone)]
pub struct GuidedOutcome {
    /// Best plan found, by true cost.
    pub plan: Plan,
    /// True cost of that plan.
    pub cost: f64,
    /// Penalize-and-descend rounds performed.
    pub iterations: usize,
    /// Rounds that produced a new best plan.
    pub improvements: usize,
}

/// Directed arc penalties over the full city set, depot included.
struct ArcPenalties {
    counts: Vec<u32>,
    size: usize,
}

impl ArcPenalties {
    fn new(size: usize) -> Self {
        Self {
            counts: vec![0; size * size],
            size,
        }
    }

    fn get(&self, from: usize, to: usize) -> u32 {
        self.counts[from * self.size + to]
    }

    fn bump(&mut self, from: usize, to: usize) {
        self.counts[from * self.size + to] += 1;
    }

    /// Sum of penalties over the arcs of `depot → route → depot`.
    fn route_sum(&self, depot: usize, route: &[usize]) -> u32 {
        if route.is_empty() {
            return 0;
        }
        arcs(depot, route).map(|(a, b)| self.get(a, b)).sum()
    }
}

/// Arcs of a depot-anchored route, depot legs included.
fn arcs(depot: usize, route: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let first = route.first().map(|&c| (depot, c));
    let last = route.last().map(|&c| (c, depot));
    first
        .into_iter()
        .chain(route.windows(2).map(|w| (w[0], w[1])))
        .chain(last)
}

/// Improves `plan` by guided local search.
///
/// `cost(v, cities)` is the true route cost; capacity feasibility is kept by
/// the operators themselves.
///
/// # Examples
///
/// ```
/// use u_pickup::evaluation::RouteEvaluator;
/// use u_pickup::local_search::{guided_local_search, GuidedConfig};
/// use u_pickup::models::{Costing, Plan, ProblemInstance};
///
/// let instance = ProblemInstance::builder()
///     .depot("D")
///     .city("A", 1)
///     .city("B", 2)
///     .city("C", 1)
///     .depot_distances(&[5.0, 3.0, 4.0])
///     .vehicle_capacities([2, 2])
///     .build()
///     .unwrap();
/// let cost = |v: usize, r: &[usize]| {
///     RouteEvaluator::new(&instance, &instance.vehicles()[v], Costing::Tour).distance(r)
/// };
///
/// let start = Plan::from_routes(vec![vec![1, 3], vec![2]]);
/// let config = GuidedConfig { max_iterations: 20, ..GuidedConfig::default() };
/// let outcome = guided_local_search(start, &instance, &cost, &config);
/// assert_eq!(outcome.plan.num_served(), 3);
/// assert!((outcome.cost - 24.0).abs() < 1e-9);
/// ```
pub fn guided_local_search<F>(
    mut plan: Plan,
    instance: &ProblemInstance,
    cost: &F,
    config: &GuidedConfig,
) -> GuidedOutcome
where
    F: Fn(usize, &[usize]) -> f64,
{
    descend(&mut plan, instance, cost);
    let mut best_cost = plan_cost(&plan, cost);
    let mut best = plan.clone();

    let depot = instance.depot();
    let num_arcs: usize = plan
        .routes()
        .iter()
        .filter(|r| !r.is_empty())
        .map(|r| r.len() + 1)
        .sum();
    let lambda = if num_arcs == 0 {
        0.0
    } else {
        config.lambda_factor * best_cost / num_arcs as f64
    };

    let mut outcome = GuidedOutcome {
        plan: best.clone(),
        cost: best_cost,
        iterations: 0,
        improvements: 0,
    };
    if lambda <= 0.0 {
        return outcome;
    }

    let mut penalties = ArcPenalties::new(instance.cities().len());
    while outcome.iterations < config.max_iterations {
        if config.deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }
        outcome.iterations += 1;

        penalize(&plan, instance, &mut penalties);
        let augmented = |v: usize, route: &[usize]| {
            cost(v, route) + lambda * f64::from(penalties.route_sum(depot, route))
        };
        descend(&mut plan, instance, &augmented);

        let current = plan_cost(&plan, cost);
        if current < best_cost - IMPROVEMENT_EPS {
            best_cost = current;
            best = plan.clone();
            outcome.improvements += 1;
        }
    }

    outcome.plan = best;
    outcome.cost = best_cost;
    outcome
}

/// Penalizes the maximum-utility arcs of `plan`.
fn penalize(plan: &Plan, instance: &ProblemInstance, penalties: &mut ArcPenalties) {
    let depot = instance.depot();
    let chosen: Vec<(usize, usize)> = {
        let current: &ArcPenalties = penalties;
        let utility = |(a, b): (usize, usize)| {
            instance.distance(a, b) / (1.0 + f64::from(current.get(a, b)))
        };
        let max_utility = plan
            .routes()
            .iter()
            .flat_map(|r| arcs(depot, r))
            .map(utility)
            .fold(f64::NEG_INFINITY, f64::max);
        plan.routes()
            .iter()
            .flat_map(|r| arcs(depot, r))
            .filter(|&arc| utility(arc) >= max_utility - IMPROVEMENT_EPS)
            .collect()
    };
    for (a, b) in chosen {
        penalties.bump(a, b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::evaluation::RouteEvaluator;
    use crate::models::Costing;

    fn grid(capacities: &[i32]) -> ProblemInstance {
        // 3×3 grid of points, depot in the centre.
        let mut pts = vec![(1.0, 1.0)];
        for x in 0..3i32 {
            for y in 0..3i32 {
                if (x, y) != (1, 1) {
                    pts.push((f64::from(x), f64::from(y)));
                }
            }
        }
        let rows: Vec<Vec<f64>> = pts
            .iter()
            .map(|a: &(f64, f64)| {
                pts.iter()
                    .map(|b| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
                    .collect()
            })
            .collect();
        let mut b = ProblemInstance::builder().depot("Centre");
        for i in 1..pts.len() {
            b = b.city(format!("P{i}"), 1);
        }
        b.distances(DistanceMatrix::from_rows(rows).expect("square"))
            .vehicle_capacities(capacities.iter().copied())
            .build()
            .expect("valid")
    }

    fn tour(inst: &ProblemInstance) -> impl Fn(usize, &[usize]) -> f64 + '_ {
        move |v, r| RouteEvaluator::new(inst, &inst.vehicles()[v], Costing::Tour).distance(r)
    }

    #[test]
    fn test_arcs_include_depot_legs() {
        let arcs: Vec<_> = arcs(0, &[3, 1, 2]).collect();
        assert_eq!(arcs, vec![(0, 3), (3, 1), (1, 2), (2, 0)]);
        assert_eq!(super::arcs(0, &[]).count(), 0);
    }

    #[test]
    fn test_penalize_bumps_longest_arc() {
        let inst = grid(&[8]);
        let plan = Plan::from_routes(vec![vec![1, 8]]);
        let mut p = ArcPenalties::new(inst.cities().len());
        penalize(&plan, &inst, &mut p);
        // 1 = (0,0) and 8 = (2,2): the diagonal across is the longest arc.
        assert_eq!(p.get(1, 8), 1);
        assert_eq!(p.get(0, 1), 0);
    }

    #[test]
    fn test_gls_never_worse_than_descent() {
        let inst = grid(&[4, 4]);
        let cost = tour(&inst);
        let start = Plan::from_routes(vec![vec![1, 8, 3, 6], vec![2, 7, 4, 5]]);

        let mut descended = start.clone();
        descend(&mut descended, &inst, &cost);
        let local = plan_cost(&descended, &cost);

        let config = GuidedConfig {
            max_iterations: 30,
            ..GuidedConfig::default()
        };
        let outcome = guided_local_search(start, &inst, &cost, &config);
        assert!(outcome.cost <= local + 1e-9);
        assert!((plan_cost(&outcome.plan, &cost) - outcome.cost).abs() < 1e-9);
        assert_eq!(outcome.plan.num_served(), 8);
        assert!(outcome.plan.load(0, &inst) <= 4);
        assert!(outcome.plan.load(1, &inst) <= 4);
    }

    #[test]
    fn test_gls_deterministic() {
        let inst = grid(&[3, 3, 3]);
        let cost = tour(&inst);
        let start = Plan::from_routes(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8]]);
        let config = GuidedConfig {
            max_iterations: 15,
            ..GuidedConfig::default()
        };
        let a = guided_local_search(start.clone(), &inst, &cost, &config);
        let b = guided_local_search(start, &inst, &cost, &config);
        assert_eq!(a.plan, b.plan);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_gls_elapsed_deadline_still_descends() {
        let inst = grid(&[8]);
        let cost = tour(&inst);
        let start = Plan::from_routes(vec![vec![1, 8, 3, 6, 2, 7, 4, 5]]);
        let before = plan_cost(&start, &cost);
        let config = GuidedConfig {
            deadline: Some(Instant::now()),
            ..GuidedConfig::default()
        };
        let outcome = guided_local_search(start, &inst, &cost, &config);
        assert_eq!(outcome.iterations, 0);
        assert!(outcome.cost < before);
    }

    #[test]
    fn test_gls_empty_plan() {
        let inst = grid(&[8]);
        let outcome = guided_local_search(Plan::new(1), &inst, &tour(&inst), &GuidedConfig::default());
        assert_eq!(outcome.cost, 0.0);
        assert_eq!(outcome.iterations, 0);
    }
}
