//! Route evaluator that computes the capacity dimension, distance, and fuel.

use serde::{Deserialize, Serialize};

use crate::models::{Costing, ProblemInstance, Route, Stop, Vehicle, Violation, ViolationType};

/// Direction of the capacity dimension along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CapacityModel {
    /// Starts at zero and grows by each city's demand.
    #[default]
    Pickup,
    /// Starts at the vehicle's full capacity and shrinks by each city's demand.
    Delivery,
}

/// Evaluates a city sequence for one vehicle: load trace, distance, fuel,
/// and capacity violations.
///
/// Fuel per leg is `distance × (1 + load_factor × load)` where `load` is the
/// capacity-dimension value while the leg is driven, i.e. before the
/// destination's demand is applied.
///
/// # Examples
///
/// ```
/// use u_pickup::models::{Costing, ProblemInstance};
/// use u_pickup::evaluation::RouteEvaluator;
///
/// let instance = ProblemInstance::builder()
///     .depot("D")
///     .city("A", 2)
///     .city("B", 3)
///     .depot_distances(&[10.0, 20.0])
///     .vehicle_capacities([5])
///     .load_factor(0.5)
///     .build()
///     .unwrap();
///
/// let eval = RouteEvaluator::new(&instance, &instance.vehicles()[0], Costing::Tour);
/// let (route, violations) = eval.build_route(&[1, 2]);
/// assert!(violations.is_empty());
/// assert_eq!(route.load_trace(), vec![0, 2, 5, 5]);
/// // 0→1: 10, 1→2: 30 (via depot), 2→0: 20
/// assert_eq!(route.distance(), 60.0);
/// // 10·1 + 30·(1 + 0.5·2) + 20·(1 + 0.5·5)
/// assert_eq!(route.fuel(), 10.0 + 60.0 + 70.0);
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a ProblemInstance,
    vehicle: &'a Vehicle,
    costing: Costing,
    model: CapacityModel,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator using the pickup capacity model.
    pub fn new(instance: &'a ProblemInstance, vehicle: &'a Vehicle, costing: Costing) -> Self {
        Self {
            instance,
            vehicle,
            costing,
            model: CapacityModel::Pickup,
        }
    }

    /// Switches the capacity model.
    pub fn with_model(mut self, model: CapacityModel) -> Self {
        self.model = model;
        self
    }

    fn start_load(&self) -> i64 {
        match self.model {
            CapacityModel::Pickup => 0,
            CapacityModel::Delivery => i64::from(self.vehicle.capacity()),
        }
    }

    fn apply(&self, load: i64, demand: i32) -> i64 {
        match self.model {
            CapacityModel::Pickup => load + i64::from(demand),
            CapacityModel::Delivery => load - i64::from(demand),
        }
    }

    /// Distance charged for arriving at `to` from `from`.
    fn leg(&self, from: usize, to: usize) -> f64 {
        let depot = self.instance.depot();
        match self.costing {
            Costing::Tour => self.instance.distance(from, to),
            Costing::DepotLegs if to == depot => 0.0,
            Costing::DepotLegs => self.instance.distance(depot, to),
        }
    }

    /// Builds a route over `city_ids` (depot excluded), computing the load
    /// trace, distance, and fuel.
    ///
    /// Returns the route and any capacity violations found.
    pub fn build_route(&self, city_ids: &[usize]) -> (Route, Vec<Violation>) {
        let depot = self.instance.depot();
        let lf = self.instance.load_factor();
        let mut route = Route::new(self.vehicle.id(), self.vehicle.capacity());
        let mut violations = Vec::new();

        let mut load = self.start_load();
        let mut collected = 0;
        let mut distance = 0.0;
        let mut fuel = 0.0;
        let mut prev = depot;
        route.push_stop(Stop { city: depot, load });

        for &cid in city_ids.iter().chain(std::iter::once(&depot)) {
            let leg = self.leg(prev, cid);
            distance += leg;
            fuel += leg * (1.0 + lf * load as f64);

            if cid != depot {
                let demand = self.instance.demand(cid);
                load = self.apply(load, demand);
                collected += i64::from(demand);
                self.check_load(load, &mut violations);
            }
            route.push_stop(Stop { city: cid, load });
            prev = cid;
        }

        route.set_distance(distance);
        route.set_fuel(fuel);
        route.set_collected(collected);
        (route, violations)
    }

    fn check_load(&self, load: i64, violations: &mut Vec<Violation>) {
        if !self.vehicle.can_carry(load) {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                vehicle_id: self.vehicle.id(),
                load,
                capacity: self.vehicle.capacity(),
            }));
        } else if load < 0 {
            violations.push(Violation::new(ViolationType::NegativeLoad {
                vehicle_id: self.vehicle.id(),
                load,
            }));
        }
    }

    /// Distance of a city sequence without materializing a route.
    pub fn distance(&self, city_ids: &[usize]) -> f64 {
        let depot = self.instance.depot();
        let mut prev = depot;
        let mut total = 0.0;
        for &cid in city_ids.iter().chain(std::iter::once(&depot)) {
            total += self.leg(prev, cid);
            prev = cid;
        }
        total
    }

    /// Fuel of a city sequence without materializing a route.
    pub fn fuel(&self, city_ids: &[usize]) -> f64 {
        let depot = self.instance.depot();
        let lf = self.instance.load_factor();
        let mut prev = depot;
        let mut load = self.start_load();
        let mut total = 0.0;
        for &cid in city_ids.iter().chain(std::iter::once(&depot)) {
            total += self.leg(prev, cid) * (1.0 + lf * load as f64);
            if cid != depot {
                load = self.apply(load, self.instance.demand(cid));
            }
            prev = cid;
        }
        total
    }

    /// Cargo collected by a city sequence.
    pub fn collected(&self, city_ids: &[usize]) -> i64 {
        city_ids.iter().map(|&c| i64::from(self.instance.demand(c))).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(load_factor: f64) -> ProblemInstance {
        ProblemInstance::builder()
            .depot("D")
            .city("A", 2)
            .city("B", 3)
            .city("C", 4)
            .depot_distances(&[10.0, 20.0, 5.0])
            .vehicle_capacities([6, 9])
            .load_factor(load_factor)
            .build()
            .expect("valid")
    }

    #[test]
    fn test_build_route_empty() {
        let inst = setup(0.0);
        let eval = RouteEvaluator::new(&inst, &inst.vehicles()[0], Costing::Tour);
        let (route, violations) = eval.build_route(&[]);
        assert!(route.is_empty());
        assert!(violations.is_empty());
        assert_eq!(route.city_ids(), vec![0, 0]);
        assert_eq!(route.distance(), 0.0);
    }

    #[test]
    fn test_pickup_trace_within_capacity() {
        let inst = setup(0.0);
        let eval = RouteEvaluator::new(&inst, &inst.vehicles()[0], Costing::Tour);
        let (route, violations) = eval.build_route(&[1, 3]);
        assert!(violations.is_empty());
        assert_eq!(route.load_trace(), vec![0, 2, 6, 6]);
        assert_eq!(route.collected(), 6);
    }

    #[test]
    fn test_capacity_violated() {
        let inst = setup(0.0);
        let eval = RouteEvaluator::new(&inst, &inst.vehicles()[0], Costing::Tour);
        let (_, violations) = eval.build_route(&[1, 2, 3]);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded {
                load: 9,
                capacity: 6,
                ..
            }
        ));
    }

    #[test]
    fn test_delivery_trace_decreases() {
        let inst = setup(0.0);
        let eval = RouteEvaluator::new(&inst, &inst.vehicles()[1], Costing::Tour)
            .with_model(CapacityModel::Delivery);
        let (route, violations) = eval.build_route(&[2, 3]);
        assert!(violations.is_empty());
        assert_eq!(route.load_trace(), vec![9, 6, 2, 2]);
        assert_eq!(route.collected(), 7);
    }

    #[test]
    fn test_delivery_negative_load() {
        let inst = setup(0.0);
        let eval = RouteEvaluator::new(&inst, &inst.vehicles()[0], Costing::Tour)
            .with_model(CapacityModel::Delivery);
        let (_, violations) = eval.build_route(&[2, 3]);
        assert!(matches!(
            violations[0].kind,
            ViolationType::NegativeLoad { load: -1, .. }
        ));
    }

    #[test]
    fn test_depot_legs_costing() {
        let inst = setup(0.0);
        let eval = RouteEvaluator::new(&inst, &inst.vehicles()[1], Costing::DepotLegs);
        let (route, _) = eval.build_route(&[1, 3]);
        assert!((route.distance() - 15.0).abs() < 1e-10);
        assert!((eval.distance(&[3, 1]) - 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_fuel_uses_load_before_arrival() {
        let inst = setup(0.1);
        let eval = RouteEvaluator::new(&inst, &inst.vehicles()[0], Costing::DepotLegs);
        let (route, _) = eval.build_route(&[1, 3]);
        // leg to 1 at load 0, leg to 3 at load 2
        let expected = 10.0 * 1.0 + 5.0 * (1.0 + 0.1 * 2.0);
        assert!((route.fuel() - expected).abs() < 1e-10);
        assert!((eval.fuel(&[1, 3]) - expected).abs() < 1e-10);
    }

    #[test]
    fn test_tour_fuel_matches_route() {
        let inst = setup(0.05);
        let eval = RouteEvaluator::new(&inst, &inst.vehicles()[1], Costing::Tour);
        let (route, _) = eval.build_route(&[3, 2, 1]);
        assert!((route.fuel() - eval.fuel(&[3, 2, 1])).abs() < 1e-10);
        assert!((route.distance() - eval.distance(&[3, 2, 1])).abs() < 1e-10);
    }

    #[test]
    fn test_zero_load_factor_fuel_equals_distance() {
        let inst = setup(0.0);
        let eval = RouteEvaluator::new(&inst, &inst.vehicles()[1], Costing::Tour);
        let (route, _) = eval.build_route(&[2, 1]);
        assert!((route.fuel() - route.distance()).abs() < 1e-10);
    }

    #[test]
    fn test_loads_past_i32_range() {
        let inst = ProblemInstance::builder()
            .depot("D")
            .city("A", i32::MAX)
            .city("B", 1)
            .depot_distances(&[3.0, 4.0])
            .vehicle_capacities([i32::MAX])
            .load_factor(1.0)
            .build()
            .expect("valid");
        let eval = RouteEvaluator::new(&inst, &inst.vehicles()[0], Costing::DepotLegs);
        let (route, violations) = eval.build_route(&[1, 2]);
        let max = i64::from(i32::MAX);
        assert_eq!(route.load_trace(), vec![0, max, max + 1, max + 1]);
        assert_eq!(route.collected(), max + 1);
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0].kind,
            ViolationType::CapacityExceeded { load, .. } if load == max + 1
        ));
        assert!((route.fuel() - (3.0 + 4.0 * (1.0 + max as f64))).abs() < 1.0);
    }
}
