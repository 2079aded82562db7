//! Solution, costing tags, and violation types.

use serde::{Deserialize, Serialize};

use super::Route;

/// How route distances were measured.
///
/// The assignment solver and the genetic searcher charge every served city
/// its depot leg `distance(depot, city)`; the route builder charges the arcs
/// between consecutive stops. The two are not directly comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Costing {
    /// `Σ distance(depot, city)` over served cities.
    DepotLegs,
    /// `Σ distance(stop[k], stop[k+1])` along the route.
    Tour,
}

/// Which solver produced a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Exact assignment (branch and bound).
    Exact,
    /// Capacity-dimensioned route builder.
    Routed,
    /// Genetic permutation search.
    Heuristic,
}

/// A type of constraint violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// A stop's load rose above the vehicle capacity.
    CapacityExceeded {
        /// Vehicle driving the route.
        vehicle_id: usize,
        /// Load observed.
        load: i64,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// A stop's load dropped below zero.
    NegativeLoad {
        /// Vehicle driving the route.
        vehicle_id: usize,
        /// Load observed.
        load: i64,
    },
    /// The route does not start and end at the depot.
    DetachedFromDepot {
        /// Vehicle driving the route.
        vehicle_id: usize,
    },
    /// Two routes belong to the same vehicle.
    VehicleReused {
        /// Vehicle ID.
        vehicle_id: usize,
    },
    /// A city is neither visited nor reported as unserved.
    Uncovered {
        /// City ID.
        city: usize,
    },
    /// A city is visited more than once.
    VisitedTwice {
        /// City ID.
        city: usize,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// The shared output of every solver.
///
/// Aggregates are always derived from the routes.
///
/// # Examples
///
/// ```
/// use u_pickup::models::{Costing, Route, Solution, Strategy};
///
/// let mut sol = Solution::new(Strategy::Exact, Costing::DepotLegs);
/// sol.add_route(Route::new(0, 5));
/// assert_eq!(sol.num_routes(), 1);
/// assert!(sol.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    routes: Vec<Route>,
    unserved: Vec<usize>,
    strategy: Strategy,
    costing: Costing,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new(strategy: Strategy, costing: Costing) -> Self {
        Self {
            routes: Vec::new(),
            unserved: Vec::new(),
            strategy,
            costing,
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a city as left without a vehicle.
    pub fn add_unserved(&mut self, city: usize) {
        self.unserved.push(city);
    }

    /// Routes, one per used vehicle.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Route driven by `vehicle_id`, if that vehicle is used.
    pub fn route_for(&self, vehicle_id: usize) -> Option<&Route> {
        self.routes.iter().find(|r| r.vehicle_id() == vehicle_id)
    }

    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Cities no vehicle serves.
    pub fn unserved(&self) -> &[usize] {
        &self.unserved
    }

    /// Returns `true` if every city is served.
    pub fn is_complete(&self) -> bool {
        self.unserved.is_empty()
    }

    /// Solver that produced this solution.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Distance convention used by the routes.
    pub fn costing(&self) -> Costing {
        self.costing
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.distance()).sum()
    }

    /// Total fuel across all routes.
    pub fn total_fuel(&self) -> f64 {
        self.routes.iter().map(|r| r.fuel()).sum()
    }

    /// Total cargo collected across all routes.
    pub fn total_delivered(&self) -> i64 {
        self.routes.iter().map(|r| r.collected()).sum()
    }

    /// Number of cities served.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stop;

    fn route(vehicle: usize, cities: &[usize], distance: f64, collected: i64) -> Route {
        let mut r = Route::new(vehicle, 10);
        r.push_stop(Stop { city: 0, load: 0 });
        for &c in cities {
            r.push_stop(Stop { city: c, load: 1 });
        }
        r.push_stop(Stop { city: 0, load: 1 });
        r.set_distance(distance);
        r.set_fuel(distance * 2.0);
        r.set_collected(collected);
        r
    }

    #[test]
    fn test_solution_empty() {
        let sol = Solution::new(Strategy::Routed, Costing::Tour);
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.total_distance(), 0.0);
        assert_eq!(sol.total_delivered(), 0);
        assert_eq!(sol.strategy(), Strategy::Routed);
        assert_eq!(sol.costing(), Costing::Tour);
    }

    #[test]
    fn test_solution_aggregates() {
        let mut sol = Solution::new(Strategy::Heuristic, Costing::DepotLegs);
        sol.add_route(route(0, &[1], 50.0, 4));
        sol.add_route(route(2, &[2, 3], 80.0, 6));
        sol.add_unserved(4);

        assert_eq!(sol.num_served(), 3);
        assert!(!sol.is_complete());
        assert!((sol.total_distance() - 130.0).abs() < 1e-10);
        assert!((sol.total_fuel() - 260.0).abs() < 1e-10);
        assert_eq!(sol.total_delivered(), 10);
        assert!(sol.route_for(2).is_some());
        assert!(sol.route_for(1).is_none());
    }

    #[test]
    fn test_violation_types() {
        let v = Violation::new(ViolationType::CapacityExceeded {
            vehicle_id: 0,
            load: 9,
            capacity: 8,
        });
        assert!(matches!(
            v.kind,
            ViolationType::CapacityExceeded { load: 9, .. }
        ));
    }
}
