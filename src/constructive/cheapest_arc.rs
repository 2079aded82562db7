//! Path-cheapest-arc construction.
//!
//! # Algorithm
//!
//! Vehicles are filled one after another in fleet order. Each vehicle starts
//! at the depot and repeatedly extends its path with the cheapest arc to an
//! unvisited city it still has room for; when no city fits, the next
//! vehicle starts. Ties go to the lower city index.
//!
//! Heavy cities can be stranded when lighter ones fill the early vehicles,
//! so a partial result is returned rather than an error; callers fall back
//! to [`cheapest_insertion`](super::cheapest_insertion).
//!
//! # Complexity
//!
//! O(n²) where n = number of cities.

use crate::models::{Plan, ProblemInstance};

use super::Construction;

/// Builds a plan by greedily extending each vehicle's path.
///
/// # Examples
///
/// ```
/// use u_pickup::constructive::path_cheapest_arc;
/// use u_pickup::distance::DistanceMatrix;
/// use u_pickup::models::ProblemInstance;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 2.0, 3.0],
///     vec![1.0, 0.0, 1.0, 2.0],
///     vec![2.0, 1.0, 0.0, 1.0],
///     vec![3.0, 2.0, 1.0, 0.0],
/// ])
/// .unwrap();
/// let instance = ProblemInstance::builder()
///     .depot("D")
///     .city("A", 1)
///     .city("B", 1)
///     .city("C", 1)
///     .distances(dm)
///     .vehicle_capacities([3])
///     .build()
///     .unwrap();
///
/// let built = path_cheapest_arc(&instance);
/// assert!(built.is_complete());
/// assert_eq!(built.plan.route(0), &[1, 2, 3]);
/// ```
pub fn path_cheapest_arc(instance: &ProblemInstance) -> Construction {
    let n = instance.cities().len();
    let depot = instance.depot();
    let mut visited = vec![false; n];
    visited[depot] = true;
    let mut remaining = instance.num_pickups();

    let mut plan = Plan::new(instance.vehicles().len());

    for (v, vehicle) in instance.vehicles().iter().enumerate() {
        if remaining == 0 {
            break;
        }
        let mut current = depot;
        let mut load = 0i64;

        loop {
            let fitting: Vec<usize> = (0..n)
                .filter(|&c| {
                    !visited[c] && vehicle.can_carry(load + i64::from(instance.demand(c)))
                })
                .collect();
            let Some(next) = instance.distances().nearest_neighbor(current, &fitting) else {
                break;
            };
            visited[next] = true;
            remaining -= 1;
            load += i64::from(instance.demand(next));
            plan.push(v, next);
            current = next;
        }
    }

    let unplaced = (0..n).filter(|&c| !visited[c]).collect();
    Construction { plan, unplaced }
}
