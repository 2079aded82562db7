//! Depth-first branch and bound over whole-block assignments.
//!
//! # Algorithm
//!
//! Cities are branched in order of decreasing demand (first-fail); each
//! branch places the city on a vehicle with enough residual capacity.
//! Vehicles whose residual capacities are equal are interchangeable at a node
//! because the objective does not depend on which vehicle serves a city, so
//! only the first of them is expanded.
//!
//! A node is pruned when
//!
//! ```text
//! cost + Σ remaining depot legs ≥ incumbent           (bound)
//! Σ remaining demand > Σ residual capacity            (capacity)
//! ```
//!
//! The children of the root are explored in parallel. They share one
//! best-known bound, updated by compare-and-swap, and a cutoff index: once a
//! branch reaches the root lower bound every later branch stops. The winner
//! is the lowest-cost result, ties going to the lowest branch index, so the
//! assignment does not depend on thread timing.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::models::ProblemInstance;

const EPS: f64 = 1e-9;
const DEADLINE_CHECK_INTERVAL: u64 = 256;

/// Best-known objective shared between branches, stored as `f64` bits.
struct SharedBound(AtomicU64);

impl SharedBound {
    fn new() -> Self {
        Self(AtomicU64::new(f64::INFINITY.to_bits()))
    }

    fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Acquire))
    }

    /// Lowers the bound to `cost` if it improves on it.
    fn offer(&self, cost: f64) -> bool {
        let mut current = self.0.load(Ordering::Acquire);
        loop {
            if f64::from_bits(current) <= cost {
                return false;
            }
            match self.0.compare_exchange_weak(
                current,
                cost.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SearchOutcome {
    /// Best assignment found; `proven` is false when the deadline cut the search.
    Found {
        /// Vehicle per city, indexed by city ID (depot entry unused).
        vehicle_of: Vec<usize>,
        /// Objective value.
        cost: f64,
        /// Whether the search ran to completion.
        proven: bool,
    },
    /// Search completed without any feasible assignment.
    Exhausted,
    /// Deadline reached before any feasible assignment.
    Expired,
}

/// Search statistics, for logging.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SearchStats {
    pub nodes: u64,
    pub branches: usize,
}

/// Static data of one search, shared read-only by every branch.
pub(crate) struct AssignmentSearch {
    order: Vec<usize>,
    demands: Vec<i32>,
    legs: Vec<f64>,
    suffix_demand: Vec<i64>,
    suffix_legs: Vec<f64>,
    capacities: Vec<i32>,
    num_cities: usize,
    deadline: Option<Instant>,
}

struct Shared {
    bound: SharedBound,
    cutoff: AtomicUsize,
    expired: AtomicBool,
}

struct Branch {
    index: usize,
    residual: Vec<i32>,
    free: i64,
    assign: Vec<usize>,
    best: Option<(f64, Vec<usize>)>,
    nodes: u64,
}

impl AssignmentSearch {
    /// Prepares the search for `instance`.
    pub(crate) fn new(instance: &ProblemInstance, deadline: Option<Instant>) -> Self {
        let mut order = instance.pickup_cities();
        order.sort_by(|&a, &b| instance.demand(b).cmp(&instance.demand(a)).then(a.cmp(&b)));

        let demands: Vec<i32> = order.iter().map(|&c| instance.demand(c)).collect();
        let legs: Vec<f64> = order.iter().map(|&c| instance.depot_leg(c)).collect();

        let n = order.len();
        let mut suffix_demand = vec![0i64; n + 1];
        let mut suffix_legs = vec![0.0; n + 1];
        for k in (0..n).rev() {
            suffix_demand[k] = suffix_demand[k + 1] + i64::from(demands[k]);
            suffix_legs[k] = suffix_legs[k + 1] + legs[k];
        }

        Self {
            order,
            demands,
            legs,
            suffix_demand,
            suffix_legs,
            capacities: instance.vehicles().iter().map(|v| v.capacity()).collect(),
            num_cities: instance.cities().len(),
            deadline,
        }
    }

    /// Runs the search.
    pub(crate) fn run(&self) -> (SearchOutcome, SearchStats) {
        if self.order.is_empty() {
            let outcome = SearchOutcome::Found {
                vehicle_of: vec![0; self.num_cities],
                cost: 0.0,
                proven: true,
            };
            return (outcome, SearchStats::default());
        }

        let roots = self.root_vehicles();
        let shared = Shared {
            bound: SharedBound::new(),
            cutoff: AtomicUsize::new(usize::MAX),
            expired: AtomicBool::new(false),
        };

        let branches: Vec<Branch> = roots
            .par_iter()
            .enumerate()
            .map(|(index, &vehicle)| self.explore_root(index, vehicle, &shared))
            .collect();

        let stats = SearchStats {
            nodes: branches.iter().map(|b| b.nodes).sum(),
            branches: branches.len(),
        };

        let expired = shared.expired.load(Ordering::Acquire);
        let winner = branches
            .into_iter()
            .filter_map(|b| b.best.map(|(cost, assign)| (cost, b.index, assign)))
            .min_by(|a, b| {
                if (a.0 - b.0).abs() <= EPS {
                    a.1.cmp(&b.1)
                } else {
                    a.0.total_cmp(&b.0)
                }
            });

        let outcome = match winner {
            Some((cost, _, assign)) => {
                let mut vehicle_of = vec![0; self.num_cities];
                for (k, &city) in self.order.iter().enumerate() {
                    vehicle_of[city] = assign[k];
                }
                SearchOutcome::Found {
                    vehicle_of,
                    cost,
                    proven: !expired,
                }
            }
            None if expired => SearchOutcome::Expired,
            None => SearchOutcome::Exhausted,
        };
        (outcome, stats)
    }

    /// Distinct-residual vehicles able to take the first city.
    fn root_vehicles(&self) -> Vec<usize> {
        let mut seen: Vec<i32> = Vec::new();
        let mut roots = Vec::new();
        for (v, &cap) in self.capacities.iter().enumerate() {
            if cap >= self.demands[0] && !seen.contains(&cap) {
                seen.push(cap);
                roots.push(v);
            }
        }
        roots
    }

    fn explore_root(&self, index: usize, vehicle: usize, shared: &Shared) -> Branch {
        let mut residual = self.capacities.clone();
        residual[vehicle] -= self.demands[0];
        let free = residual.iter().map(|&r| i64::from(r)).sum();
        let mut assign = vec![0; self.order.len()];
        assign[0] = vehicle;

        let mut branch = Branch {
            index,
            residual,
            free,
            assign,
            best: None,
            nodes: 0,
        };
        self.dfs(1, self.legs[0], &mut branch, shared);
        branch
    }

    fn dfs(&self, k: usize, cost: f64, branch: &mut Branch, shared: &Shared) {
        branch.nodes += 1;
        if self.should_stop(branch, shared) {
            return;
        }

        if k == self.order.len() {
            let improves = branch.best.as_ref().is_none_or(|(best, _)| cost < best - EPS);
            if improves {
                branch.best = Some((cost, branch.assign.clone()));
                shared.bound.offer(cost);
                if cost <= self.suffix_legs[0] + EPS {
                    shared.cutoff.fetch_min(branch.index, Ordering::AcqRel);
                }
            }
            return;
        }

        let lower = cost + self.suffix_legs[k];
        if let Some((best, _)) = &branch.best {
            if lower >= best - EPS {
                return;
            }
        }
        if lower > shared.bound.get() + EPS {
            return;
        }
        if self.suffix_demand[k] > branch.free {
            return;
        }

        let demand = self.demands[k];
        let mut tried: Vec<i32> = Vec::new();
        for v in 0..branch.residual.len() {
            let r = branch.residual[v];
            if r < demand || tried.contains(&r) {
                continue;
            }
            tried.push(r);

            branch.residual[v] -= demand;
            branch.free -= i64::from(demand);
            branch.assign[k] = v;
            self.dfs(k + 1, cost + self.legs[k], branch, shared);
            branch.residual[v] += demand;
            branch.free += i64::from(demand);

            if self.should_stop(branch, shared) {
                return;
            }
        }
    }

    fn should_stop(&self, branch: &Branch, shared: &Shared) -> bool {
        if shared.cutoff.load(Ordering::Acquire) < branch.index {
            return true;
        }
        if shared.expired.load(Ordering::Relaxed) {
            return true;
        }
        if let Some(deadline) = self.deadline {
            if branch.nodes % DEADLINE_CHECK_INTERVAL == 0 && Instant::now() >= deadline {
                shared.expired.store(true, Ordering::Release);
                return true;
            }
        }
        false
    }
}
