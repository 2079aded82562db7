//! Plain-text and serializable summaries of solutions.
//!
//! A [`SolutionReport`] resolves city IDs to names and lists, per vehicle,
//! the stops driven, the load at each stop, the cargo collected and the
//! distance and fuel. Totals and unserved cities follow.

mod summary;

pub use summary::{SolutionReport, VehicleSummary};
