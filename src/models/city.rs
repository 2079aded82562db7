//! City (pickup location or depot).

use serde::{Deserialize, Serialize};

/// A location in a pickup problem.
///
/// Every city except the depot holds `demand` units of cargo that must be
/// collected by exactly one vehicle. The depot holds none.
///
/// # Examples
///
/// ```
/// use u_pickup::models::City;
///
/// let c = City::new(1, "Johannesburg", 2);
/// assert_eq!(c.id(), 1);
/// assert_eq!(c.name(), "Johannesburg");
/// assert_eq!(c.demand(), 2);
///
/// let d = City::depot(0, "Durban");
/// assert_eq!(d.demand(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    id: usize,
    name: String,
    demand: i32,
}

impl City {
    /// Creates a city holding `demand` units of cargo.
    pub fn new(id: usize, name: impl Into<String>, demand: i32) -> Self {
        Self {
            id,
            name: name.into(),
            demand,
        }
    }

    /// Creates a depot (no cargo).
    pub fn depot(id: usize, name: impl Into<String>) -> Self {
        Self::new(id, name, 0)
    }

    /// City index within its instance.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units of cargo waiting at this city.
    pub fn demand(&self) -> i32 {
        self.demand
    }
}
