//! Permutation chromosome for the pickup genetic algorithm.
//!
//! An individual orders every pickup city once. The
//! [`decode`](super::decode()) step fills vehicles greedily in that order, so
//! the permutation alone determines the whole plan.

use u_metaheur::ga::Individual as GaIndividual;

/// A permutation of pickup city IDs with its fitness.
///
/// Lower fitness is better. A fresh individual has not been evaluated and
/// carries infinite fitness.
///
/// # Examples
///
/// ```
/// use u_pickup::ga::Individual;
///
/// let mut ind = Individual::new(vec![3, 1, 2]);
/// assert_eq!(ind.cities(), &[3, 1, 2]);
/// assert_eq!(ind.fitness(), f64::INFINITY);
///
/// ind.set_fitness(1200.0);
/// assert_eq!(ind.fitness(), 1200.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    cities: Vec<usize>,
    fitness: f64,
}

impl Individual {
    /// Creates an unevaluated individual from a city permutation.
    pub fn new(cities: Vec<usize>) -> Self {
        Self {
            cities,
            fitness: f64::INFINITY,
        }
    }

    /// The city permutation.
    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// Mutable access to the permutation; invalidates nothing by itself.
    pub fn cities_mut(&mut self) -> &mut Vec<usize> {
        &mut self.cities
    }

    /// Fitness from the last evaluation.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Stores an evaluated fitness.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    /// Number of cities in the permutation.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` if there are no cities to order.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

impl GaIndividual for Individual {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_individual_new() {
        let ind = Individual::new(vec![2, 4, 1, 3]);
        assert_eq!(ind.len(), 4);
        assert!(!ind.is_empty());
        assert_eq!(ind.fitness(), f64::INFINITY);
    }

    #[test]
    fn test_trait_and_inherent_fitness_agree() {
        let mut ind = Individual::new(vec![1]);
        GaIndividual::set_fitness(&mut ind, 7.5);
        assert_eq!(ind.fitness(), 7.5);
        assert_eq!(GaIndividual::fitness(&ind), 7.5);
    }

    #[test]
    fn test_cities_mut() {
        let mut ind = Individual::new(vec![1, 2, 3]);
        ind.cities_mut().swap(0, 2);
        assert_eq!(ind.cities(), &[3, 2, 1]);
    }

    #[test]
    fn test_empty_individual() {
        assert!(Individual::new(Vec::new()).is_empty());
    }
}
