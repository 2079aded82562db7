//! Vehicle type with a cargo capacity.

use serde::{Deserialize, Serialize};

/// A capacity-limited vehicle. Its index in the fleet is its identity.
///
/// # Examples
///
/// ```
/// use u_pickup::models::Vehicle;
///
/// let v = Vehicle::new(0, 8);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 8);
/// assert!(v.can_carry(8));
/// assert!(!v.can_carry(9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
}

impl Vehicle {
    /// Creates a vehicle with the given ID and capacity.
    pub fn new(id: usize, capacity: i32) -> Self {
        Self { id, capacity }
    }

    /// Builds a fleet from a capacity list, assigning IDs by position.
    pub fn fleet(capacities: impl IntoIterator<Item = i32>) -> Vec<Self> {
        capacities
            .into_iter()
            .enumerate()
            .map(|(id, cap)| Self::new(id, cap))
            .collect()
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load capacity.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Returns `true` if `load` fits in this vehicle.
    pub fn can_carry(&self, load: i64) -> bool {
        load <= i64::from(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new(2, 5);
        assert_eq!(v.id(), 2);
        assert_eq!(v.capacity(), 5);
    }

    #[test]
    fn test_fleet_ids_follow_order() {
        let fleet = Vehicle::fleet([5, 5, 3]);
        assert_eq!(fleet.len(), 3);
        assert_eq!(fleet[2].id(), 2);
        assert_eq!(fleet[2].capacity(), 3);
    }
}
