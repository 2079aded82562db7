//! Greedy vehicle-filling decoder.

use crate::models::{Plan, ProblemInstance};

/// Plan read off a permutation, with what it failed to carry.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// Cities per vehicle in visiting order, overloaded vehicles included.
    pub plan: Plan,
    /// Vehicles whose single first city already exceeds their capacity.
    pub overloaded: Vec<usize>,
    /// Cities left over after the last vehicle, in permutation order.
    pub unserved: Vec<usize>,
    /// `Σ depot leg` over every city placed on a vehicle.
    pub leg_cost: f64,
}

impl Decoded {
    /// Penalized fitness: leg cost plus `penalty` per overloaded vehicle and
    /// per unserved city.
    pub fn fitness(&self, penalty: f64) -> f64 {
        let violations = self.overloaded.len() + self.unserved.len();
        self.leg_cost + penalty * violations as f64
    }
}

/// Decodes a city permutation into a plan.
///
/// Vehicles are filled in fleet order. When the next city does not fit the
/// current vehicle, the decoder moves on to the next one and never comes
/// back. A city that alone exceeds a fresh vehicle is still placed there and
/// marks the vehicle overloaded. Once the fleet runs out, that city and every
/// later one are unserved.
///
/// # Examples
///
/// ```
/// use u_pickup::ga::decode;
/// use u_pickup::models::ProblemInstance;
///
/// let instance = ProblemInstance::builder()
///     .depot("D")
///     .city("A", 3)
///     .city("B", 2)
///     .city("C", 4)
///     .depot_distances(&[10.0, 20.0, 30.0])
///     .vehicle_capacities([5, 4])
///     .build()
///     .unwrap();
///
/// let decoded = decode(&instance, &[1, 2, 3]);
/// assert_eq!(decoded.plan.routes(), &[vec![1, 2], vec![3]]);
/// assert!(decoded.unserved.is_empty());
/// assert_eq!(decoded.leg_cost, 60.0);
/// ```
pub fn decode(instance: &ProblemInstance, cities: &[usize]) -> Decoded {
    let vehicles = instance.vehicles();
    let mut plan = Plan::new(vehicles.len());
    let mut overloaded = Vec::new();
    let mut unserved = Vec::new();
    let mut leg_cost = 0.0;

    let mut v = 0;
    let mut load = 0i64;
    for (k, &city) in cities.iter().enumerate() {
        let demand = i64::from(instance.demand(city));
        if v < vehicles.len() && !plan.route(v).is_empty() && !vehicles[v].can_carry(load + demand)
        {
            v += 1;
            load = 0;
        }
        if v >= vehicles.len() {
            unserved.extend_from_slice(&cities[k..]);
            break;
        }

        plan.push(v, city);
        load += demand;
        leg_cost += instance.depot_leg(city);
        if !vehicles[v].can_carry(load) {
            overloaded.push(v);
        }
    }

    Decoded {
        plan,
        overloaded,
        unserved,
        leg_cost,
    }
}
