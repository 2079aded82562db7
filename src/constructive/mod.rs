//! Constructive heuristics for the first feasible plan.
//!
//! - [`path_cheapest_arc`] - Greedy path extension, vehicle by vehicle, O(n²)
//! - [`cheapest_insertion`] - Cheapest feasible insertion, heaviest city first

mod cheapest_arc;
mod cheapest_insertion;

pub use cheapest_arc::path_cheapest_arc;
pub use cheapest_insertion::cheapest_insertion;

use crate::models::Plan;

/// Result of a construction: the plan built so far and the cities that
/// did not fit anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construction {
    /// Per-vehicle sequences.
    pub plan: Plan,
    /// Cities left out, ascending.
    pub unplaced: Vec<usize>,
}

impl Construction {
    /// Returns `true` if every city was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}
