//! Per-vehicle city sequences, the working form every solver edits.

use crate::evaluation::{CapacityModel, RouteEvaluator};

use super::{Costing, ProblemInstance, Solution, Strategy};

/// One city sequence per vehicle of the fleet, depot excluded.
///
/// Index `v` of [`Plan::routes`] belongs to vehicle `v`; an empty sequence
/// means the vehicle stays home. Solvers move cities around a plan and
/// materialize it into a [`Solution`] once at the end.
///
/// # Examples
///
/// ```
/// use u_pickup::evaluation::CapacityModel;
/// use u_pickup::models::{Costing, Plan, ProblemInstance, Strategy};
///
/// let instance = ProblemInstance::builder()
///     .depot("D")
///     .city("A", 2)
///     .city("B", 3)
///     .depot_distances(&[4.0, 6.0])
///     .vehicle_capacities([5, 5])
///     .build()
///     .unwrap();
///
/// let mut plan = Plan::new(2);
/// plan.push(1, 2);
/// plan.push(1, 1);
/// assert_eq!(plan.load(1, &instance), 5);
///
/// let sol = plan.to_solution(&instance, Strategy::Routed, Costing::Tour, CapacityModel::Pickup);
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.routes()[0].vehicle_id(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    routes: Vec<Vec<usize>>,
}

impl Plan {
    /// Creates a plan where every vehicle stays home.
    pub fn new(num_vehicles: usize) -> Self {
        Self {
            routes: vec![Vec::new(); num_vehicles],
        }
    }

    /// Creates a plan from explicit sequences, one per vehicle.
    pub fn from_routes(routes: Vec<Vec<usize>>) -> Self {
        Self { routes }
    }

    /// All sequences, indexed by vehicle.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Sequence driven by vehicle `v`.
    pub fn route(&self, v: usize) -> &[usize] {
        &self.routes[v]
    }

    /// Mutable sequence of vehicle `v`.
    pub fn route_mut(&mut self, v: usize) -> &mut Vec<usize> {
        &mut self.routes[v]
    }

    /// Mutable access to every sequence.
    pub fn routes_mut(&mut self) -> &mut [Vec<usize>] {
        &mut self.routes
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.routes.len()
    }

    /// Appends `city` to the end of vehicle `v`'s sequence.
    pub fn push(&mut self, v: usize, city: usize) {
        self.routes[v].push(city);
    }

    /// Cargo vehicle `v` collects.
    pub fn load(&self, v: usize, instance: &ProblemInstance) -> i64 {
        self.routes[v].iter().map(|&c| i64::from(instance.demand(c))).sum()
    }

    /// Number of cities on any sequence.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    /// Materializes the plan: one route per non-empty sequence.
    ///
    /// Capacity violations are not reported here; run
    /// [`check_solution`](crate::evaluation::check_solution) to find them.
    pub fn to_solution(
        &self,
        instance: &ProblemInstance,
        strategy: Strategy,
        costing: Costing,
        model: CapacityModel,
    ) -> Solution {
        let mut solution = Solution::new(strategy, costing);
        for (vehicle, cities) in instance.vehicles().iter().zip(&self.routes) {
            if cities.is_empty() {
                continue;
            }
            let evaluator = RouteEvaluator::new(instance, vehicle, costing).with_model(model);
            let (route, _) = evaluator.build_route(cities);
            solution.add_route(route);
        }
        solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance() -> ProblemInstance {
        ProblemInstance::builder()
            .depot("D")
            .city("A", 2)
            .city("B", 3)
            .city("C", 1)
            .depot_distances(&[4.0, 6.0, 2.0])
            .vehicle_capacities([5, 4, 4])
            .build()
            .expect("valid")
    }

    #[test]
    fn test_plan_new_is_empty() {
        let plan = Plan::new(3);
        assert_eq!(plan.num_vehicles(), 3);
        assert_eq!(plan.num_served(), 0);
        assert!(plan.routes().iter().all(Vec::is_empty));
    }

    #[test]
    fn test_plan_load_and_served() {
        let inst = instance();
        let plan = Plan::from_routes(vec![vec![1, 2], vec![], vec![3]]);
        assert_eq!(plan.load(0, &inst), 5);
        assert_eq!(plan.load(1, &inst), 0);
        assert_eq!(plan.num_served(), 3);
    }

    #[test]
    fn test_to_solution_skips_idle_vehicles() {
        let inst = instance();
        let plan = Plan::from_routes(vec![vec![1, 2], vec![], vec![3]]);
        let sol = plan.to_solution(&inst, Strategy::Routed, Costing::Tour, CapacityModel::Pickup);
        assert_eq!(sol.num_routes(), 2);
        assert!(sol.route_for(1).is_none());
        assert_eq!(sol.route_for(2).expect("used").visited_cities(), vec![3]);
        assert_eq!(sol.total_delivered(), 6);
    }

    #[test]
    fn test_to_solution_delivery_model() {
        let inst = instance();
        let plan = Plan::from_routes(vec![vec![1, 2], vec![], vec![]]);
        let sol = plan.to_solution(&inst, Strategy::Routed, Costing::Tour, CapacityModel::Delivery);
        assert_eq!(sol.routes()[0].load_trace(), vec![5, 3, 0, 0]);
    }
}
