//! Genetic algorithm configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Parameters of [`solve_heuristic`](super::solve_heuristic).
///
/// # Examples
///
/// ```
/// use u_pickup::ga::HeuristicConfig;
///
/// let config = HeuristicConfig::default()
///     .with_population_size(40)
///     .with_generations(100)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.tournament_size, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicConfig {
    /// Individuals kept per generation.
    pub population_size: usize,
    /// Generations to evolve; zero keeps the initial population.
    pub generations: usize,
    /// Probability that a parent pair is recombined.
    pub crossover_rate: f64,
    /// Probability that an offspring is mutated.
    pub mutation_rate: f64,
    /// Seed of the random generator.
    pub seed: u64,
    /// Contestants per tournament.
    pub tournament_size: usize,
    /// Fitness added per overloaded vehicle and per unserved city.
    pub penalty: f64,
    /// Optional wall-clock limit, checked between generations.
    pub time_budget: Option<Duration>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 200,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            seed: 42,
            tournament_size: 3,
            penalty: 1.0e6,
            time_budget: None,
        }
    }
}

impl HeuristicConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, n: usize) -> Self {
        self.tournament_size = n;
        self
    }

    /// Sets the per-violation fitness penalty.
    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }

    /// Sets a wall-clock limit.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Checks parameter ranges.
    ///
    /// # Errors
    ///
    /// [`InputError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.population_size == 0 {
            return Err(InputError::InvalidParameter {
                name: "population_size",
                value: 0.0,
                expected: "at least 1",
            });
        }
        if self.tournament_size == 0 {
            return Err(InputError::InvalidParameter {
                name: "tournament_size",
                value: 0.0,
                expected: "at least 1",
            });
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(InputError::InvalidParameter {
                    name,
                    value: rate,
                    expected: "a probability in [0, 1]",
                });
            }
        }
        if !self.penalty.is_finite() || self.penalty < 0.0 {
            return Err(InputError::InvalidParameter {
                name: "penalty",
                value: self.penalty,
                expected: "a finite value >= 0",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let c = HeuristicConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.time_budget, None);
    }

    #[test]
    fn test_zero_population_rejected() {
        let c = HeuristicConfig::default().with_population_size(0);
        assert!(matches!(
            c.validate(),
            Err(InputError::InvalidParameter {
                name: "population_size",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_tournament_rejected() {
        let c = HeuristicConfig::default().with_tournament_size(0);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_rate_out_of_range() {
        let c = HeuristicConfig::default().with_crossover_rate(1.5);
        assert!(matches!(
            c.validate(),
            Err(InputError::InvalidParameter {
                name: "crossover_rate",
                ..
            })
        ));
        let c = HeuristicConfig::default().with_mutation_rate(f64::NAN);
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_zero_generations_allowed() {
        assert!(HeuristicConfig::default()
            .with_generations(0)
            .validate()
            .is_ok());
    }
}
