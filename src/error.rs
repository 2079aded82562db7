//! Error types shared by every solver.

use std::fmt;
use std::time::Duration;

/// A malformed problem instance or solver parameter.
///
/// Detected before any search starts.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// The fleet is empty.
    NoVehicles,
    /// A vehicle capacity is zero or negative.
    NonPositiveCapacity {
        /// Vehicle index.
        vehicle: usize,
        /// Offending capacity.
        capacity: i32,
    },
    /// A city has negative demand.
    NegativeDemand {
        /// City index.
        city: usize,
        /// Offending demand.
        demand: i32,
    },
    /// The depot index does not name a city.
    DepotOutOfRange {
        /// Requested depot index.
        depot: usize,
        /// Number of cities.
        cities: usize,
    },
    /// The depot carries cargo of its own.
    DepotHasDemand {
        /// Depot demand.
        demand: i32,
    },
    /// No depot was declared.
    MissingDepot,
    /// A city's ID differs from its position in the city list.
    CityIdMismatch {
        /// Position in the list.
        index: usize,
        /// ID the city carries.
        id: usize,
    },
    /// A vehicle's ID differs from its position in the fleet.
    VehicleIdMismatch {
        /// Position in the fleet.
        index: usize,
        /// ID the vehicle carries.
        id: usize,
    },
    /// Flat matrix data whose length is not `size * size`.
    MalformedMatrix {
        /// Declared dimension.
        size: usize,
        /// Number of entries supplied.
        len: usize,
    },
    /// The distance matrix does not match the city list.
    MatrixSizeMismatch {
        /// Number of cities.
        expected: usize,
        /// Matrix dimension.
        actual: usize,
    },
    /// A required distance entry is undefined.
    MissingDistance {
        /// Origin city.
        from: usize,
        /// Destination city.
        to: usize,
    },
    /// A distance entry is negative or not finite.
    InvalidDistance {
        /// Origin city.
        from: usize,
        /// Destination city.
        to: usize,
        /// Offending value.
        distance: f64,
    },
    /// The load factor is negative or not finite.
    InvalidLoadFactor(f64),
    /// A solver parameter is out of range.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Accepted range, human readable.
        expected: &'static str,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoVehicles => write!(f, "at least one vehicle is required"),
            Self::NonPositiveCapacity { vehicle, capacity } => {
                write!(f, "vehicle {vehicle} has non-positive capacity {capacity}")
            }
            Self::NegativeDemand { city, demand } => {
                write!(f, "city {city} has negative demand {demand}")
            }
            Self::DepotOutOfRange { depot, cities } => {
                write!(f, "depot index {depot} is outside the {cities} known cities")
            }
            Self::DepotHasDemand { demand } => {
                write!(f, "depot must not hold cargo, found demand {demand}")
            }
            Self::MissingDepot => write!(f, "no depot was declared"),
            Self::CityIdMismatch { index, id } => {
                write!(f, "city at position {index} carries id {id}")
            }
            Self::VehicleIdMismatch { index, id } => {
                write!(f, "vehicle at position {index} carries id {id}")
            }
            Self::MalformedMatrix { size, len } => write!(
                f,
                "distance matrix of size {size} needs {} entries, got {len}",
                size.saturating_mul(*size)
            ),
            Self::MatrixSizeMismatch { expected, actual } => write!(
                f,
                "distance matrix is {actual}x{actual} but there are {expected} cities"
            ),
            Self::MissingDistance { from, to } => {
                write!(f, "distance from city {from} to city {to} is not defined")
            }
            Self::InvalidDistance { from, to, distance } => write!(
                f,
                "distance from city {from} to city {to} is invalid ({distance})"
            ),
            Self::InvalidLoadFactor(lf) => {
                write!(f, "load factor must be finite and non-negative, got {lf}")
            }
            Self::InvalidParameter {
                name,
                value,
                expected,
            } => write!(f, "parameter `{name}` = {value} is invalid, expected {expected}"),
        }
    }
}

/// Why no assignment can satisfy capacity and coverage.
#[derive(Debug, Clone, PartialEq)]
pub enum Infeasibility {
    /// A single city holds more cargo than any vehicle can carry.
    CityExceedsFleet {
        /// City index.
        city: usize,
        /// City name.
        name: String,
        /// City demand.
        demand: i32,
        /// Largest vehicle capacity.
        largest_capacity: i32,
    },
    /// Total cargo exceeds total fleet capacity.
    DemandExceedsFleet {
        /// Sum of all demands.
        demand: i64,
        /// Sum of all capacities.
        capacity: i64,
    },
    /// Search proved that no packing of whole cargo blocks fits the fleet.
    NoFeasibleAssignment,
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CityExceedsFleet {
                city,
                name,
                demand,
                largest_capacity,
            } => write!(
                f,
                "city {city} ({name}) holds {demand} units but the largest vehicle carries {largest_capacity}"
            ),
            Self::DemandExceedsFleet { demand, capacity } => write!(
                f,
                "total cargo of {demand} units exceeds total fleet capacity of {capacity}"
            ),
            Self::NoFeasibleAssignment => write!(
                f,
                "no assignment of whole cargo blocks to vehicles respects every capacity"
            ),
        }
    }
}

/// Failure reported by a solver call.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The instance or a parameter is malformed.
    InvalidInput(InputError),
    /// No assignment satisfies capacity and coverage.
    Infeasible(Infeasibility),
    /// The route builder could not place these cities on any vehicle.
    NoSolution {
        /// Cities left without a route.
        unplaced: Vec<usize>,
    },
    /// The time budget ran out before any feasible solution was found.
    TimedOut {
        /// Time spent before giving up.
        elapsed: Duration,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(e) => write!(f, "invalid input: {e}"),
            Self::Infeasible(e) => write!(f, "infeasible: {e}"),
            Self::NoSolution { unplaced } => {
                write!(f, "no feasible route order found; unplaced cities: {unplaced:?}")
            }
            Self::TimedOut { elapsed } => write!(
                f,
                "time budget exhausted after {:.3}s without a feasible solution",
                elapsed.as_secs_f64()
            ),
        }
    }
}

impl std::error::Error for InputError {}

impl std::error::Error for SolveError {}

impl From<InputError> for SolveError {
    fn from(e: InputError) -> Self {
        Self::InvalidInput(e)
    }
}

impl From<Infeasibility> for SolveError {
    fn from(e: Infeasibility) -> Self {
        Self::Infeasible(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_culprit() {
        let e = SolveError::from(Infeasibility::CityExceedsFleet {
            city: 5,
            name: "Polokwane".into(),
            demand: 6,
            largest_capacity: 5,
        });
        let msg = e.to_string();
        assert!(msg.contains("Polokwane"));
        assert!(msg.contains('6'));
        assert!(msg.contains('5'));
    }

    #[test]
    fn test_input_error_converts() {
        let e: SolveError = InputError::NoVehicles.into();
        assert!(matches!(e, SolveError::InvalidInput(InputError::NoVehicles)));
    }

    #[test]
    fn test_parameter_message() {
        let e = InputError::InvalidParameter {
            name: "mutation_rate",
            value: 1.5,
            expected: "a value in [0, 1]",
        };
        assert!(e.to_string().contains("mutation_rate"));
    }
}
