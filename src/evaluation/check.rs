//! Whole-solution validation.

use crate::models::{ProblemInstance, Solution, Violation, ViolationType};

/// Checks a solution against the instance.
///
/// Reports every stop whose load leaves `[0, capacity]`, routes that do not
/// start and end at the depot, vehicles driving two routes, and cities that
/// are visited twice or neither visited nor listed as unserved. A feasible
/// solution yields an empty list.
///
/// # Examples
///
/// ```
/// use u_pickup::models::ProblemInstance;
/// use u_pickup::evaluation::check_solution;
/// use u_pickup::exact::solve_exact;
///
/// let instance = ProblemInstance::builder()
///     .depot("D")
///     .city("A", 2)
///     .city("B", 3)
///     .depot_distances(&[10.0, 20.0])
///     .vehicle_capacities([3, 2])
///     .build()
///     .unwrap();
/// let solution = solve_exact(&instance).unwrap();
/// assert!(check_solution(&instance, &solution).is_empty());
/// ```
pub fn check_solution(instance: &ProblemInstance, solution: &Solution) -> Vec<Violation> {
    let depot = instance.depot();
    let mut violations = Vec::new();
    let mut visits = vec![0usize; instance.cities().len()];
    let mut used = vec![false; instance.vehicles().len()];

    for route in solution.routes() {
        let vid = route.vehicle_id();
        if let Some(flag) = used.get_mut(vid) {
            if *flag {
                violations.push(Violation::new(ViolationType::VehicleReused { vehicle_id: vid }));
            }
            *flag = true;
        }

        let ids = route.city_ids();
        if ids.first() != Some(&depot) || ids.last() != Some(&depot) {
            violations.push(Violation::new(ViolationType::DetachedFromDepot { vehicle_id: vid }));
        }

        for stop in route.stops() {
            if stop.load > i64::from(route.capacity()) {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    vehicle_id: vid,
                    load: stop.load,
                    capacity: route.capacity(),
                }));
            } else if stop.load < 0 {
                violations.push(Violation::new(ViolationType::NegativeLoad {
                    vehicle_id: vid,
                    load: stop.load,
                }));
            }
        }

        for city in route.visited_cities() {
            visits[city] += 1;
        }
    }

    for &city in solution.unserved() {
        visits[city] += 1;
    }

    for city in instance.pickup_cities() {
        match visits[city] {
            0 => violations.push(Violation::new(ViolationType::Uncovered { city })),
            1 => {}
            _ => violations.push(Violation::new(ViolationType::VisitedTwice { city })),
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Costing, Route, Stop, Strategy};

    fn instance() -> ProblemInstance {
        ProblemInstance::builder()
            .depot("D")
            .city("A", 2)
            .city("B", 3)
            .depot_distances(&[10.0, 20.0])
            .vehicle_capacities([4, 4])
            .build()
            .expect("valid")
    }

    fn route(vehicle: usize, stops: &[(usize, i64)]) -> Route {
        let mut r = Route::new(vehicle, 4);
        for &(city, load) in stops {
            r.push_stop(Stop { city, load });
        }
        r
    }

    #[test]
    fn test_uncovered_city() {
        let inst = instance();
        let mut sol = Solution::new(Strategy::Routed, Costing::Tour);
        sol.add_route(route(0, &[(0, 0), (1, 2), (0, 2)]));
        let v = check_solution(&inst, &sol);
        assert_eq!(v, vec![Violation::new(ViolationType::Uncovered { city: 2 })]);
    }

    #[test]
    fn test_unserved_counts_as_covered() {
        let inst = instance();
        let mut sol = Solution::new(Strategy::Heuristic, Costing::DepotLegs);
        sol.add_route(route(0, &[(0, 0), (1, 2), (0, 2)]));
        sol.add_unserved(2);
        assert!(check_solution(&inst, &sol).is_empty());
    }

    #[test]
    fn test_overload_and_duplicates() {
        let inst = instance();
        let mut sol = Solution::new(Strategy::Routed, Costing::Tour);
        sol.add_route(route(0, &[(0, 0), (1, 2), (2, 5), (0, 5)]));
        sol.add_route(route(0, &[(0, 0), (2, 3), (1, 3)]));
        let v = check_solution(&inst, &sol);
        assert!(v.iter().any(|v| matches!(v.kind, ViolationType::CapacityExceeded { load: 5, .. })));
        assert!(v.iter().any(|v| matches!(v.kind, ViolationType::VehicleReused { vehicle_id: 0 })));
        assert!(v.iter().any(|v| matches!(v.kind, ViolationType::DetachedFromDepot { .. })));
        assert!(v.iter().any(|v| matches!(v.kind, ViolationType::VisitedTwice { city: 2 })));
    }
}
