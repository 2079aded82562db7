//! Per-vehicle and whole-solution summaries.

use std::fmt;

use serde::Serialize;

use crate::models::{Costing, ProblemInstance, Route, Solution, Strategy};

/// What one vehicle does in a solution, with city names resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleSummary {
    /// Fleet index, zero-based.
    pub vehicle_id: usize,
    /// Vehicle capacity.
    pub capacity: i32,
    /// Stop names in driving order, depot at both ends.
    pub stops: Vec<String>,
    /// Capacity-dimension value at each stop.
    pub loads: Vec<i64>,
    /// Cargo collected.
    pub collected: i64,
    /// Distance under the solution's costing.
    pub distance: f64,
    /// Load-weighted fuel figure.
    pub fuel: f64,
}

impl VehicleSummary {
    fn new(instance: &ProblemInstance, route: &Route) -> Self {
        Self {
            vehicle_id: route.vehicle_id(),
            capacity: route.capacity(),
            stops: route
                .city_ids()
                .into_iter()
                .map(|c| instance.city(c).name().to_string())
                .collect(),
            loads: route.load_trace(),
            collected: route.collected(),
            distance: route.distance(),
            fuel: route.fuel(),
        }
    }

    /// Names of the pickup cities, depot ends stripped.
    pub fn pickups(&self) -> &[String] {
        match self.stops.len() {
            0..=2 => &[],
            n => &self.stops[1..n - 1],
        }
    }
}

/// Human-readable breakdown of a [`Solution`].
///
/// # Examples
///
/// ```
/// use u_pickup::demo::{inland_cargo, INLAND_CAPACITIES, INLAND_CARGO};
/// use u_pickup::exact::solve_exact;
/// use u_pickup::report::SolutionReport;
///
/// let instance = inland_cargo(&INLAND_CARGO, &INLAND_CAPACITIES).unwrap();
/// let solution = solve_exact(&instance).unwrap();
///
/// let report = SolutionReport::new(&instance, &solution);
/// assert_eq!(report.total_delivered, 14);
/// assert!(report.unserved.is_empty());
/// assert!(report.to_string().contains("picks up cargo from"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionReport {
    /// Solver that produced the solution.
    pub strategy: Strategy,
    /// How distances were charged.
    pub costing: Costing,
    /// One entry per route, in fleet order.
    pub vehicles: Vec<VehicleSummary>,
    /// Sum of route distances.
    pub total_distance: f64,
    /// Sum of route fuel figures.
    pub total_fuel: f64,
    /// Cargo brought back to the depot.
    pub total_delivered: i64,
    /// Names of cities no vehicle serves.
    pub unserved: Vec<String>,
}

impl SolutionReport {
    /// Resolves `solution` against the instance it was solved for.
    pub fn new(instance: &ProblemInstance, solution: &Solution) -> Self {
        let mut vehicles: Vec<VehicleSummary> = solution
            .routes()
            .iter()
            .map(|r| VehicleSummary::new(instance, r))
            .collect();
        vehicles.sort_by_key(|v| v.vehicle_id);

        Self {
            strategy: solution.strategy(),
            costing: solution.costing(),
            vehicles,
            total_distance: solution.total_distance(),
            total_fuel: solution.total_fuel(),
            total_delivered: solution.total_delivered(),
            unserved: solution
                .unserved()
                .iter()
                .map(|&c| instance.city(c).name().to_string())
                .collect(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for v in &self.vehicles {
            writeln!(
                f,
                "Vehicle {} picks up cargo from {} and collects {} units.",
                v.vehicle_id + 1,
                v.pickups().join(", "),
                v.collected
            )?;
            let path: Vec<String> = v
                .stops
                .iter()
                .zip(&v.loads)
                .map(|(name, load)| format!("{name} (Load: {load})"))
                .collect();
            writeln!(f, "  Route: {}", path.join(" -> "))?;
            writeln!(
                f,
                "  Distance: {:.1} km, fuel: {:.2}",
                v.distance, v.fuel
            )?;
        }
        if !self.vehicles.is_empty() {
            writeln!(f)?;
        }
        writeln!(f, "Total distance traveled: {:.1} km", self.total_distance)?;
        writeln!(f, "Total fuel consumed: {:.2}", self.total_fuel)?;
        write!(f, "Total cargo delivered: {} units", self.total_delivered)?;
        if !self.unserved.is_empty() {
            write!(f, "\nUnserved: {}", self.unserved.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::CapacityModel;
    use crate::models::Plan;

    fn instance() -> ProblemInstance {
        ProblemInstance::builder()
            .depot("Durban")
            .city("Johannesburg", 2)
            .city("Pretoria", 1)
            .city("Nelspruit", 4)
            .depot_distances(&[568.0, 635.0, 330.0])
            .vehicle_capacities([3, 5])
            .build()
            .expect("valid")
    }

    fn solution(inst: &ProblemInstance) -> Solution {
        let plan = Plan::from_routes(vec![vec![], vec![1, 2]]);
        let mut sol = plan.to_solution(inst, Strategy::Exact, Costing::DepotLegs, CapacityModel::Pickup);
        sol.add_unserved(3);
        sol
    }

    #[test]
    fn test_report_resolves_names() {
        let inst = instance();
        let report = SolutionReport::new(&inst, &solution(&inst));
        assert_eq!(report.vehicles.len(), 1);
        let v = &report.vehicles[0];
        assert_eq!(v.vehicle_id, 1);
        assert_eq!(v.stops, vec!["Durban", "Johannesburg", "Pretoria", "Durban"]);
        assert_eq!(v.pickups(), ["Johannesburg", "Pretoria"]);
        assert_eq!(v.loads, vec![0, 2, 3, 3]);
        assert_eq!(v.collected, 3);
        assert_eq!(report.total_delivered, 3);
        assert_eq!(report.unserved, vec!["Nelspruit"]);
    }

    #[test]
    fn test_display_text() {
        let inst = instance();
        let text = SolutionReport::new(&inst, &solution(&inst)).to_string();
        assert!(text.starts_with(
            "Vehicle 2 picks up cargo from Johannesburg, Pretoria and collects 3 units.\n"
        ));
        assert!(text.contains(
            "  Route: Durban (Load: 0) -> Johannesburg (Load: 2) -> Pretoria (Load: 3) -> Durban (Load: 3)"
        ));
        assert!(text.contains("Total cargo delivered: 3 units"));
        assert!(text.ends_with("Unserved: Nelspruit"));
    }

    #[test]
    fn test_empty_solution_display() {
        let inst = instance();
        let sol = Solution::new(Strategy::Routed, Costing::Tour);
        let text = SolutionReport::new(&inst, &sol).to_string();
        assert!(text.starts_with("Total distance traveled: 0.0 km"));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_to_json() {
        let inst = instance();
        let json = SolutionReport::new(&inst, &solution(&inst))
            .to_json()
            .expect("serializable");
        assert!(json.contains("\"total_delivered\": 3"));
        assert!(json.contains("\"Nelspruit\""));
    }
}
