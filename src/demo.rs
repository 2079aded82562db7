//! Ready-made instances on South African freight data.
//!
//! Two scenarios ship with the crate:
//!
//! - **Inland cargo**: containers waiting in five inland cities for pickup
//!   to the port of Durban. Only the road distance from each city to Durban
//!   is known, so city-to-city distances are detours through the port.
//! - **Fleet network**: four cities served from Durban over a full road
//!   distance table, with a load-dependent fuel model.

use crate::distance::DistanceMatrix;
use crate::error::SolveError;
use crate::models::ProblemInstance;

/// Inland pickup cities, in ID order after the depot.
pub const INLAND_CITIES: [&str; 5] = [
    "Johannesburg",
    "Pretoria",
    "Bloemfontein",
    "Nelspruit",
    "Polokwane",
];

/// Road distance from Durban to each inland city, km.
pub const INLAND_DEPOT_DISTANCES: [f64; 5] = [568.0, 635.0, 569.0, 330.0, 392.0];

/// Default container count per inland city.
pub const INLAND_CARGO: [i32; 5] = [2, 1, 3, 2, 6];

/// Default inland fleet.
pub const INLAND_CAPACITIES: [i32; 5] = [5, 5, 5, 3, 8];

/// Fleet network cities; index 0 is the depot.
pub const FLEET_CITIES: [&str; 5] = [
    "Durban",
    "Johannesburg",
    "Pretoria",
    "Cape Town",
    "Bloemfontein",
];

/// Road distances between fleet network cities, km.
pub const FLEET_DISTANCES: [[f64; 5]; 5] = [
    [0.0, 568.0, 634.0, 569.0, 392.0],
    [568.0, 0.0, 121.0, 595.0, 100.0],
    [634.0, 121.0, 0.0, 712.0, 216.0],
    [569.0, 595.0, 712.0, 0.0, 497.0],
    [392.0, 100.0, 216.0, 497.0, 0.0],
];

/// Default demand per fleet network city, depot excluded.
pub const FLEET_DEMANDS: [i32; 4] = [1, 3, 2, 4];

/// Default fleet network vehicles.
pub const FLEET_CAPACITIES: [i32; 2] = [5, 5];

/// Default fuel load factor for the fleet network.
pub const FLEET_LOAD_FACTOR: f64 = 0.01;

/// Builds the inland cargo scenario with Durban as depot.
///
/// `cargo` holds one amount per entry of [`INLAND_CITIES`].
///
/// # Examples
///
/// ```
/// use u_pickup::demo::{inland_cargo, INLAND_CAPACITIES, INLAND_CARGO};
///
/// let instance = inland_cargo(&INLAND_CARGO, &INLAND_CAPACITIES).unwrap();
/// assert_eq!(instance.num_pickups(), 5);
/// assert_eq!(instance.total_demand(), 14);
/// ```
pub fn inland_cargo(cargo: &[i32], capacities: &[i32]) -> Result<ProblemInstance, SolveError> {
    let mut builder = ProblemInstance::builder().depot("Durban");
    for (name, &amount) in INLAND_CITIES.iter().zip(cargo) {
        builder = builder.city(*name, amount);
    }
    builder
        .depot_distances(&INLAND_DEPOT_DISTANCES)
        .vehicle_capacities(capacities.iter().copied())
        .build()
}

/// Builds the fleet network scenario with Durban as depot.
///
/// `demands` holds one amount per non-depot entry of [`FLEET_CITIES`].
pub fn fleet_network(
    demands: &[i32],
    capacities: &[i32],
    load_factor: f64,
) -> Result<ProblemInstance, SolveError> {
    let mut matrix = DistanceMatrix::new(FLEET_CITIES.len());
    for (i, row) in FLEET_DISTANCES.iter().enumerate() {
        for (j, &d) in row.iter().enumerate() {
            matrix.set(i, j, d);
        }
    }

    let mut builder = ProblemInstance::builder().depot(FLEET_CITIES[0]);
    for (name, &amount) in FLEET_CITIES[1..].iter().zip(demands) {
        builder = builder.city(*name, amount);
    }
    builder
        .distances(matrix)
        .vehicle_capacities(capacities.iter().copied())
        .load_factor(load_factor)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inland_defaults() {
        let inst = inland_cargo(&INLAND_CARGO, &INLAND_CAPACITIES).expect("valid");
        assert_eq!(inst.city(0).name(), "Durban");
        assert_eq!(inst.city(5).name(), "Polokwane");
        assert_eq!(inst.demand(5), 6);
        assert_eq!(inst.total_capacity(), 26);
        // Star metric through the port.
        assert!((inst.distance(1, 2) - (568.0 + 635.0)).abs() < 1e-10);
    }

    #[test]
    fn test_inland_cargo_count_mismatch() {
        assert!(inland_cargo(&[1, 2], &INLAND_CAPACITIES).is_err());
    }

    #[test]
    fn test_fleet_defaults() {
        let inst = fleet_network(&FLEET_DEMANDS, &FLEET_CAPACITIES, FLEET_LOAD_FACTOR).expect("valid");
        assert_eq!(inst.num_pickups(), 4);
        assert_eq!(inst.total_demand(), inst.total_capacity());
        assert!(inst.distances().is_symmetric(1e-10));
        assert_eq!(inst.distance(1, 4), 100.0);
        assert_eq!(inst.load_factor(), 0.01);
    }

    #[test]
    fn test_fleet_demand_count_mismatch() {
        assert!(fleet_network(&[1, 2], &FLEET_CAPACITIES, 0.0).is_err());
    }

    #[test]
    fn test_single_truck_overloaded() {
        let inst = fleet_network(&[1, 1, 2, 4], &[5], 0.0).expect("valid");
        assert!(inst.fleet_obstruction().is_some());
    }
}
