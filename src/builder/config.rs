//! Route builder configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::evaluation::CapacityModel;

/// What the route builder minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RouteObjective {
    /// Total arc distance.
    #[default]
    Distance,
    /// Total fuel, `Σ distance × (1 + load_factor × load)`.
    Fuel,
}

/// Parameters of [`solve_routed_with`](super::solve_routed_with).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_pickup::builder::{RouteBuilderConfig, RouteObjective};
/// use u_pickup::evaluation::CapacityModel;
///
/// let config = RouteBuilderConfig::default()
///     .with_time_budget(Duration::from_secs(2))
///     .with_capacity_model(CapacityModel::Delivery)
///     .with_objective(RouteObjective::Fuel);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_iterations, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteBuilderConfig {
    /// Wall-clock budget for construction and improvement.
    pub time_budget: Duration,
    /// Guided local search rounds after the first local optimum.
    pub max_iterations: usize,
    /// Direction of the capacity dimension.
    pub capacity_model: CapacityModel,
    /// Cost minimized.
    pub objective: RouteObjective,
    /// Penalty weight, relative to the average arc cost.
    pub lambda_factor: f64,
}

impl Default for RouteBuilderConfig {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(10),
            max_iterations: 200,
            capacity_model: CapacityModel::Pickup,
            objective: RouteObjective::Distance,
            lambda_factor: 0.1,
        }
    }
}

impl RouteBuilderConfig {
    /// Sets the time budget.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Sets the guided local search iteration limit.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the capacity model.
    pub fn with_capacity_model(mut self, model: CapacityModel) -> Self {
        self.capacity_model = model;
        self
    }

    /// Sets the objective.
    pub fn with_objective(mut self, objective: RouteObjective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the penalty weight factor.
    pub fn with_lambda_factor(mut self, factor: f64) -> Self {
        self.lambda_factor = factor;
        self
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), InputError> {
        if !self.lambda_factor.is_finite() || self.lambda_factor < 0.0 {
            return Err(InputError::InvalidParameter {
                name: "lambda_factor",
                value: self.lambda_factor,
                expected: "a finite value >= 0",
            });
        }
        Ok(())
    }
}
