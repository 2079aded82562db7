//! Route and stop types.

use serde::{Deserialize, Serialize};

/// One stop on a route together with the capacity-dimension value there.
///
/// In the pickup model `load` is the cargo on board after the stop; in the
/// delivery model it is the residual capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// City visited.
    pub city: usize,
    /// Capacity-dimension value after serving this stop.
    pub load: i64,
}

/// An ordered sequence of stops driven by a single vehicle.
///
/// Unlike a bare visit list, a route stores the depot at both ends, so
/// `stops()` reads exactly as the vehicle drives it.
///
/// # Examples
///
/// ```
/// use u_pickup::models::{Route, Stop};
///
/// let mut route = Route::new(0, 5);
/// route.push_stop(Stop { city: 0, load: 0 });
/// route.push_stop(Stop { city: 3, load: 2 });
/// route.push_stop(Stop { city: 0, load: 2 });
/// assert_eq!(route.city_ids(), vec![0, 3, 0]);
/// assert_eq!(route.visited_cities(), vec![3]);
/// assert_eq!(route.load_trace(), vec![0, 2, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: usize,
    capacity: i32,
    stops: Vec<Stop>,
    distance: f64,
    fuel: f64,
    collected: i64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize, capacity: i32) -> Self {
        Self {
            vehicle_id,
            capacity,
            stops: Vec::new(),
            distance: 0.0,
            fuel: 0.0,
            collected: 0,
        }
    }

    /// Appends a stop.
    pub fn push_stop(&mut self, stop: Stop) {
        self.stops.push(stop);
    }

    /// Vehicle driving this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Capacity of that vehicle.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Stops in driving order, depot at both ends.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// City IDs in driving order, depot at both ends.
    pub fn city_ids(&self) -> Vec<usize> {
        self.stops.iter().map(|s| s.city).collect()
    }

    /// Pickup cities only, in visiting order.
    pub fn visited_cities(&self) -> Vec<usize> {
        match self.stops.len() {
            0..=2 => Vec::new(),
            n => self.stops[1..n - 1].iter().map(|s| s.city).collect(),
        }
    }

    /// Capacity-dimension value at every stop.
    pub fn load_trace(&self) -> Vec<i64> {
        self.stops.iter().map(|s| s.load).collect()
    }

    /// Number of pickup cities.
    pub fn len(&self) -> usize {
        self.stops.len().saturating_sub(2)
    }

    /// Returns `true` if this route serves no city.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Route distance under the solution's costing convention.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Fuel consumed along this route.
    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    /// Cargo collected on this route.
    pub fn collected(&self) -> i64 {
        self.collected
    }

    /// Sets the distance (used by the evaluator).
    pub fn set_distance(&mut self, d: f64) {
        self.distance = d;
    }

    /// Sets the fuel (used by the evaluator).
    pub fn set_fuel(&mut self, f: f64) {
        self.fuel = f;
    }

    /// Sets the collected cargo (used by the evaluator).
    pub fn set_collected(&mut self, c: i64) {
        self.collected = c;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::new(1, 8);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.vehicle_id(), 1);
        assert_eq!(r.capacity(), 8);
        assert!(r.visited_cities().is_empty());
        assert_eq!(r.distance(), 0.0);
    }

    #[test]
    fn test_route_stops() {
        let mut r = Route::new(0, 5);
        for (city, load) in [(0, 0), (2, 1), (4, 3), (0, 3)] {
            r.push_stop(Stop { city, load });
        }
        r.set_collected(3);
        assert_eq!(r.len(), 2);
        assert_eq!(r.visited_cities(), vec![2, 4]);
        assert_eq!(r.load_trace(), vec![0, 1, 3, 3]);
        assert_eq!(r.collected(), 3);
    }
}
