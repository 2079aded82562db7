//! Capacity-dimensioned route builder.
//!
//! Every vehicle drives a closed tour from the depot. A capacity dimension
//! tracks the load at each stop, either growing from zero as cargo is
//! picked up or shrinking from full capacity as it is delivered, and must
//! stay within `[0, capacity]` everywhere.
//!
//! The builder constructs a first plan greedily
//! ([`path_cheapest_arc`](crate::constructive::path_cheapest_arc), then
//! [`cheapest_insertion`](crate::constructive::cheapest_insertion) as a
//! fallback) and improves it with
//! [`guided_local_search`](crate::local_search::guided_local_search).
//! No randomness is involved.

mod config;
mod solver;

pub use config::{RouteBuilderConfig, RouteObjective};
pub use solver::{solve_routed, solve_routed_with};
