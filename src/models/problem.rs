//! Problem instance and its builder.

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::{Infeasibility, InputError, SolveError};

use super::{City, Vehicle};

/// An immutable pickup-routing instance.
///
/// Holds every city (the depot included), the distance table between them,
/// the fleet, and the load factor used for fuel figures. Constructed once per
/// request through [`ProblemInstance::new`] or [`ProblemInstance::builder`],
/// both of which validate the data; solvers only ever borrow it.
/// Deserialization runs the same checks.
///
/// # Examples
///
/// ```
/// use u_pickup::models::ProblemInstance;
///
/// let instance = ProblemInstance::builder()
///     .depot("Durban")
///     .city("Johannesburg", 2)
///     .city("Pretoria", 1)
///     .depot_distances(&[568.0, 635.0])
///     .vehicle_capacities([5, 3])
///     .build()
///     .unwrap();
///
/// assert_eq!(instance.num_pickups(), 2);
/// assert_eq!(instance.total_demand(), 3);
/// assert_eq!(instance.distance(0, 2), 635.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "InstanceData")]
pub struct ProblemInstance {
    cities: Vec<City>,
    depot: usize,
    distances: DistanceMatrix,
    vehicles: Vec<Vehicle>,
    load_factor: f64,
}

impl ProblemInstance {
    /// Creates and validates an instance with a zero load factor.
    pub fn new(
        cities: Vec<City>,
        depot: usize,
        distances: DistanceMatrix,
        vehicles: Vec<Vehicle>,
    ) -> Result<Self, SolveError> {
        let instance = Self {
            cities,
            depot,
            distances,
            vehicles,
            load_factor: 0.0,
        };
        instance.validate()?;
        Ok(instance)
    }

    /// Starts a builder.
    pub fn builder() -> ProblemBuilder {
        ProblemBuilder::default()
    }

    /// Returns a copy with the given load factor.
    pub fn with_load_factor(mut self, load_factor: f64) -> Result<Self, SolveError> {
        if !load_factor.is_finite() || load_factor < 0.0 {
            return Err(InputError::InvalidLoadFactor(load_factor).into());
        }
        self.load_factor = load_factor;
        Ok(self)
    }

    fn validate(&self) -> Result<(), InputError> {
        let n = self.cities.len();
        if self.depot >= n {
            return Err(InputError::DepotOutOfRange {
                depot: self.depot,
                cities: n,
            });
        }
        if let Some((index, c)) = self.cities.iter().enumerate().find(|&(i, c)| c.id() != i) {
            return Err(InputError::CityIdMismatch { index, id: c.id() });
        }
        if self.vehicles.is_empty() {
            return Err(InputError::NoVehicles);
        }
        if let Some((index, v)) = self.vehicles.iter().enumerate().find(|&(i, v)| v.id() != i) {
            return Err(InputError::VehicleIdMismatch { index, id: v.id() });
        }
        if let Some(v) = self.vehicles.iter().find(|v| v.capacity() <= 0) {
            return Err(InputError::NonPositiveCapacity {
                vehicle: v.id(),
                capacity: v.capacity(),
            });
        }
        if let Some(c) = self.cities.iter().find(|c| c.demand() < 0) {
            return Err(InputError::NegativeDemand {
                city: c.id(),
                demand: c.demand(),
            });
        }
        let depot_demand = self.cities[self.depot].demand();
        if depot_demand != 0 {
            return Err(InputError::DepotHasDemand {
                demand: depot_demand,
            });
        }
        if self.distances.size() != n {
            return Err(InputError::MatrixSizeMismatch {
                expected: n,
                actual: self.distances.size(),
            });
        }
        for from in 0..n {
            for to in 0..n {
                if from == to {
                    continue;
                }
                match self.distances.try_get(from, to) {
                    None => return Err(InputError::MissingDistance { from, to }),
                    Some(d) if !d.is_finite() || d < 0.0 => {
                        return Err(InputError::InvalidDistance {
                            from,
                            to,
                            distance: d,
                        })
                    }
                    Some(_) => {}
                }
            }
        }
        if !self.load_factor.is_finite() || self.load_factor < 0.0 {
            return Err(InputError::InvalidLoadFactor(self.load_factor));
        }
        Ok(())
    }

    /// All locations, depot included.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Location at `id`.
    pub fn city(&self, id: usize) -> &City {
        &self.cities[id]
    }

    /// Depot index.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Distance table.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Distance from `from` to `to`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// Distance of the depot leg serving `city`.
    pub fn depot_leg(&self, city: usize) -> f64 {
        self.distances.get(self.depot, city)
    }

    /// Fleet, indexed by vehicle ID.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Fuel coefficient per unit of load.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Cargo waiting at `city`.
    pub fn demand(&self, city: usize) -> i32 {
        self.cities[city].demand()
    }

    /// Indices of every non-depot city, in instance order.
    pub fn pickup_cities(&self) -> Vec<usize> {
        (0..self.cities.len()).filter(|&i| i != self.depot).collect()
    }

    /// Number of non-depot cities.
    pub fn num_pickups(&self) -> usize {
        self.cities.len().saturating_sub(1)
    }

    /// Sum of all demands.
    pub fn total_demand(&self) -> i64 {
        self.cities.iter().map(|c| i64::from(c.demand())).sum()
    }

    /// Sum of all vehicle capacities.
    pub fn total_capacity(&self) -> i64 {
        self.vehicles.iter().map(|v| i64::from(v.capacity())).sum()
    }

    /// Largest vehicle capacity.
    pub fn max_capacity(&self) -> i32 {
        self.vehicles.iter().map(|v| v.capacity()).max().unwrap_or(0)
    }

    /// Checks the two arithmetic obstructions to any feasible plan.
    ///
    /// A city heavier than every vehicle is reported first, then total cargo
    /// above total capacity.
    pub fn fleet_obstruction(&self) -> Option<Infeasibility> {
        let largest = self.max_capacity();
        if let Some(c) = self
            .cities
            .iter()
            .find(|c| c.id() != self.depot && c.demand() > largest)
        {
            return Some(Infeasibility::CityExceedsFleet {
                city: c.id(),
                name: c.name().to_string(),
                demand: c.demand(),
                largest_capacity: largest,
            });
        }
        let demand = self.total_demand();
        let capacity = self.total_capacity();
        if demand > capacity {
            return Some(Infeasibility::DemandExceedsFleet { demand, capacity });
        }
        None
    }
}

/// Wire form of a [`ProblemInstance`], validated on the way in.
#[derive(Deserialize)]
struct InstanceData {
    cities: Vec<City>,
    depot: usize,
    distances: DistanceMatrix,
    vehicles: Vec<Vehicle>,
    #[serde(default)]
    load_factor: f64,
}

impl TryFrom<InstanceData> for ProblemInstance {
    type Error = InputError;

    fn try_from(raw: InstanceData) -> Result<Self, InputError> {
        let instance = Self {
            cities: raw.cities,
            depot: raw.depot,
            distances: raw.distances,
            vehicles: raw.vehicles,
            load_factor: raw.load_factor,
        };
        instance.validate()?;
        Ok(instance)
    }
}

#[derive(Debug, Clone)]
enum DistanceSource {
    Matrix(DistanceMatrix),
    DepotLegs(Vec<f64>),
}

/// Incremental construction of a [`ProblemInstance`].
///
/// Cities receive IDs in the order they are added; the depot is a city too.
#[derive(Debug, Clone, Default)]
pub struct ProblemBuilder {
    cities: Vec<City>,
    depot: Option<usize>,
    distances: Option<DistanceSource>,
    capacities: Vec<i32>,
    load_factor: f64,
}

impl ProblemBuilder {
    /// Adds the depot.
    pub fn depot(mut self, name: impl Into<String>) -> Self {
        self.depot = Some(self.cities.len());
        self.cities.push(City::depot(self.cities.len(), name));
        self
    }

    /// Adds a pickup city.
    pub fn city(mut self, name: impl Into<String>, demand: i32) -> Self {
        self.cities.push(City::new(self.cities.len(), name, demand));
        self
    }

    /// Uses a full distance matrix over all cities.
    pub fn distances(mut self, matrix: DistanceMatrix) -> Self {
        self.distances = Some(DistanceSource::Matrix(matrix));
        self
    }

    /// Uses depot distances only, one per pickup city in insertion order.
    ///
    /// City-to-city travel is the detour through the depot
    /// (see [`DistanceMatrix::from_depot_distances`]).
    pub fn depot_distances(mut self, legs: &[f64]) -> Self {
        self.distances = Some(DistanceSource::DepotLegs(legs.to_vec()));
        self
    }

    /// Sets the fleet.
    pub fn vehicle_capacities(mut self, capacities: impl IntoIterator<Item = i32>) -> Self {
        self.capacities = capacities.into_iter().collect();
        self
    }

    /// Sets the fuel coefficient per unit of load.
    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Validates and builds the instance.
    pub fn build(self) -> Result<ProblemInstance, SolveError> {
        let depot = self.depot.ok_or(InputError::MissingDepot)?;
        let n = self.cities.len();
        let distances = match self.distances {
            Some(DistanceSource::Matrix(m)) => m,
            Some(DistanceSource::DepotLegs(legs)) => {
                if legs.len() + 1 != n {
                    return Err(InputError::MatrixSizeMismatch {
                        expected: n,
                        actual: legs.len() + 1,
                    }
                    .into());
                }
                let mut full = Vec::with_capacity(n);
                let mut it = legs.into_iter();
                for i in 0..n {
                    if i == depot {
                        full.push(0.0);
                    } else {
                        full.push(it.next().unwrap_or(f64::NAN));
                    }
                }
                DistanceMatrix::from_depot_distances(depot, &full)
            }
            None => DistanceMatrix::undefined(n),
        };
        ProblemInstance::new(self.cities, depot, distances, Vehicle::fleet(self.capacities))?
            .with_load_factor(self.load_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_cities() -> ProblemBuilder {
        ProblemInstance::builder()
            .depot("D")
            .city("A", 2)
            .city("B", 3)
            .depot_distances(&[10.0, 20.0])
    }

    #[test]
    fn test_builder_ok() {
        let inst = three_cities().vehicle_capacities([5]).build().expect("valid");
        assert_eq!(inst.depot(), 0);
        assert_eq!(inst.pickup_cities(), vec![1, 2]);
        assert_eq!(inst.depot_leg(2), 20.0);
        assert_eq!(inst.distance(1, 2), 30.0);
        assert_eq!(inst.total_capacity(), 5);
        assert_eq!(inst.load_factor(), 0.0);
    }

    #[test]
    fn test_depot_not_first() {
        let inst = ProblemInstance::builder()
            .city("A", 1)
            .depot("D")
            .city("B", 1)
            .depot_distances(&[4.0, 6.0])
            .vehicle_capacities([2])
            .build()
            .expect("valid");
        assert_eq!(inst.depot(), 1);
        assert_eq!(inst.depot_leg(0), 4.0);
        assert_eq!(inst.depot_leg(2), 6.0);
        assert_eq!(inst.pickup_cities(), vec![0, 2]);
    }

    #[test]
    fn test_no_vehicles() {
        let err = three_cities().build().unwrap_err();
        assert_eq!(err, SolveError::InvalidInput(InputError::NoVehicles));
    }

    #[test]
    fn test_non_positive_capacity() {
        let err = three_cities().vehicle_capacities([5, 0]).build().unwrap_err();
        assert_eq!(
            err,
            SolveError::InvalidInput(InputError::NonPositiveCapacity {
                vehicle: 1,
                capacity: 0
            })
        );
    }

    #[test]
    fn test_negative_demand() {
        let err = ProblemInstance::builder()
            .depot("D")
            .city("A", -1)
            .depot_distances(&[1.0])
            .vehicle_capacities([5])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SolveError::InvalidInput(InputError::NegativeDemand { city: 1, .. })
        ));
    }

    #[test]
    fn test_missing_distance() {
        let mut dm = DistanceMatrix::undefined(3);
        dm.set_symmetric(0, 1, 5.0);
        dm.set_symmetric(0, 2, 5.0);
        let err = ProblemInstance::builder()
            .depot("D")
            .city("A", 1)
            .city("B", 1)
            .distances(dm)
            .vehicle_capacities([5])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SolveError::InvalidInput(InputError::MissingDistance { from: 1, to: 2 })
        );
    }

    #[test]
    fn test_missing_depot() {
        let err = ProblemInstance::builder()
            .city("A", 1)
            .depot_distances(&[])
            .vehicle_capacities([5])
            .build()
            .unwrap_err();
        assert_eq!(err, SolveError::InvalidInput(InputError::MissingDepot));
    }

    #[test]
    fn test_leg_count_mismatch() {
        let err = three_cities()
            .depot_distances(&[1.0])
            .vehicle_capacities([5])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SolveError::InvalidInput(InputError::MatrixSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_negative_load_factor() {
        let err = three_cities()
            .vehicle_capacities([5])
            .load_factor(-0.1)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            SolveError::InvalidInput(InputError::InvalidLoadFactor(_))
        ));
    }

    #[test]
    fn test_depot_with_demand() {
        let cities = vec![City::new(0, "D", 3), City::new(1, "A", 1)];
        let err = ProblemInstance::new(
            cities,
            0,
            DistanceMatrix::from_depot_distances(0, &[0.0, 1.0]),
            Vehicle::fleet([5]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SolveError::InvalidInput(InputError::DepotHasDemand { demand: 3 })
        );
    }

    #[test]
    fn test_fleet_obstruction() {
        let inst = three_cities().vehicle_capacities([2, 2]).build().expect("valid");
        assert!(matches!(
            inst.fleet_obstruction(),
            Some(Infeasibility::CityExceedsFleet { city: 2, demand: 3, .. })
        ));

        let inst = three_cities().vehicle_capacities([3, 1]).build().expect("valid");
        assert_eq!(
            inst.fleet_obstruction(),
            Some(Infeasibility::DemandExceedsFleet {
                demand: 5,
                capacity: 4
            })
        );

        let inst = three_cities().vehicle_capacities([3, 2]).build().expect("valid");
        assert_eq!(inst.fleet_obstruction(), None);
    }

    #[test]
    fn test_city_id_must_match_position() {
        let cities = vec![City::depot(0, "D"), City::new(5, "A", 1)];
        let err = ProblemInstance::new(
            cities,
            0,
            DistanceMatrix::from_depot_distances(0, &[0.0, 1.0]),
            Vehicle::fleet([5]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SolveError::InvalidInput(InputError::CityIdMismatch { index: 1, id: 5 })
        );
    }

    #[test]
    fn test_vehicle_id_must_match_position() {
        let cities = vec![City::depot(0, "D"), City::new(1, "A", 1)];
        let err = ProblemInstance::new(
            cities,
            0,
            DistanceMatrix::from_depot_distances(0, &[0.0, 1.0]),
            vec![Vehicle::new(1, 5), Vehicle::new(0, 5)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SolveError::InvalidInput(InputError::VehicleIdMismatch { index: 0, id: 1 })
        );
    }

    fn wire(demand: i32, capacity: i32, load_factor: f64, data: &[f64]) -> serde_json::Value {
        serde_json::json!({
            "cities": [
                { "id": 0, "name": "D", "demand": 0 },
                { "id": 1, "name": "A", "demand": demand },
            ],
            "depot": 0,
            "distances": { "data": data, "size": 2 },
            "vehicles": [{ "id": 0, "capacity": capacity }],
            "load_factor": load_factor,
        })
    }

    #[test]
    fn test_deserialize_accepts_valid_instance() {
        let inst: ProblemInstance =
            serde_json::from_value(wire(2, 5, 0.5, &[0.0, 7.0, 7.0, 0.0])).expect("valid");
        assert_eq!(inst.depot_leg(1), 7.0);
        assert_eq!(inst.load_factor(), 0.5);

        let again: ProblemInstance =
            serde_json::from_str(&serde_json::to_string(&inst).expect("serializable"))
                .expect("valid");
        assert_eq!(again.total_demand(), 2);
    }

    #[test]
    fn test_deserialize_rejects_what_the_builder_rejects() {
        let square = [0.0, 7.0, 7.0, 0.0];
        let cases = [
            (wire(-3, 5, 0.0, &square), "negative demand"),
            (wire(2, 0, 0.0, &square), "non-positive capacity"),
            (wire(2, -4, 0.0, &square), "non-positive capacity"),
            (wire(2, 5, -1.0, &square), "load factor"),
            (wire(2, 5, 0.0, &[]), "entries"),
            (wire(2, 5, 0.0, &[0.0, 7.0, 7.0]), "entries"),
            (wire(2, 5, 0.0, &[0.0, -7.0, 7.0, 0.0]), "invalid"),
        ];
        for (value, expected) in cases {
            let err = serde_json::from_value::<ProblemInstance>(value).unwrap_err();
            assert!(err.to_string().contains(expected), "{expected}: {err}");
        }
    }

    #[test]
    fn test_deserialize_rejects_shuffled_ids() {
        let mut value = wire(2, 5, 0.0, &[0.0, 7.0, 7.0, 0.0]);
        value["cities"][1]["id"] = serde_json::json!(9);
        let err = serde_json::from_value::<ProblemInstance>(value).unwrap_err();
        assert!(err.to_string().contains("carries id 9"));
    }
}
