//! Genetic operators over city permutations.
//!
//! # Operators
//!
//! - **Initialization**: Fisher-Yates shuffle of every pickup city
//! - **Crossover**: order crossover (OX), which keeps relative city order
//! - **Mutation**: swap of two positions
//! - **Evaluation**: greedy decode, then penalized depot-leg cost
//! - **Selection**: k-way tournament

use rand::Rng;
use u_metaheur::ga::operators::{order_crossover, swap_mutation};
use u_metaheur::ga::GaProblem;

use crate::models::ProblemInstance;

use super::chromosome::Individual;
use super::decode::decode;

/// GA problem over permutations of the pickup cities.
///
/// OX works on positions `0..n`, so cities are mapped to slots in ascending
/// ID order before recombination and back afterwards. The depot therefore
/// need not be city 0.
///
/// # Examples
///
/// ```
/// use u_metaheur::ga::GaProblem;
/// use u_pickup::ga::PickupGaProblem;
/// use u_pickup::models::ProblemInstance;
///
/// let instance = ProblemInstance::builder()
///     .depot("D")
///     .city("A", 2)
///     .city("B", 3)
///     .depot_distances(&[4.0, 6.0])
///     .vehicle_capacities([5])
///     .build()
///     .unwrap();
///
/// let problem = PickupGaProblem::new(&instance, 1000.0);
/// let mut rng = u_numflow::random::create_rng(1);
/// let ind = problem.create_individual(&mut rng);
/// assert_eq!(problem.evaluate(&ind), 10.0);
/// ```
pub struct PickupGaProblem<'a> {
    instance: &'a ProblemInstance,
    penalty: f64,
    cities: Vec<usize>,
    slot_of: Vec<usize>,
}

impl<'a> PickupGaProblem<'a> {
    /// Creates the problem; `penalty` weighs each overloaded vehicle and
    /// unserved city.
    pub fn new(instance: &'a ProblemInstance, penalty: f64) -> Self {
        let cities = instance.pickup_cities();
        let mut slot_of = vec![usize::MAX; instance.cities().len()];
        for (slot, &city) in cities.iter().enumerate() {
            slot_of[city] = slot;
        }
        Self {
            instance,
            penalty,
            cities,
            slot_of,
        }
    }

    fn to_slots(&self, ind: &Individual) -> Vec<usize> {
        ind.cities().iter().map(|&c| self.slot_of[c]).collect()
    }

    fn from_slots(&self, slots: Vec<usize>) -> Individual {
        Individual::new(slots.into_iter().map(|s| self.cities[s]).collect())
    }
}

impl GaProblem for PickupGaProblem<'_> {
    type Individual = Individual;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Individual {
        let mut perm = self.cities.clone();
        for i in (1..perm.len()).rev() {
            let j = rng.random_range(0..=i as u64) as usize;
            perm.swap(i, j);
        }
        Individual::new(perm)
    }

    fn evaluate(&self, individual: &Individual) -> f64 {
        decode(self.instance, individual.cities()).fitness(self.penalty)
    }

    fn crossover<R: Rng>(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        rng: &mut R,
    ) -> Vec<Individual> {
        if parent1.len() < 2 {
            return vec![
                Individual::new(parent1.cities().to_vec()),
                Individual::new(parent2.cities().to_vec()),
            ];
        }
        let (c1, c2) = order_crossover(&self.to_slots(parent1), &self.to_slots(parent2), rng);
        vec![self.from_slots(c1), self.from_slots(c2)]
    }

    fn mutate<R: Rng>(&self, individual: &mut Individual, rng: &mut R) {
        if individual.len() < 2 {
            return;
        }
        swap_mutation(individual.cities_mut(), rng);
    }
}

/// Picks the fittest of `size` uniformly drawn members of `population`.
///
/// Returns an index into `population`, which must be non-empty. Ties go to
/// the contestant drawn first.
pub fn tournament_select<R: Rng>(population: &[Individual], size: usize, rng: &mut R) -> usize {
    let n = population.len() as u64;
    let mut best = rng.random_range(0..n) as usize;
    for _ in 1..size {
        let challenger = rng.random_range(0..n) as usize;
        if population[challenger].fitness() < population[best].fitness() {
            best = challenger;
        }
    }
    best
}
