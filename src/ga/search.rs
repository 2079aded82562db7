//! Generational search loop.

use std::time::Instant;

use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};
use u_metaheur::ga::GaProblem;

use crate::error::SolveError;
use crate::evaluation::CapacityModel;
use crate::models::{Costing, ProblemInstance, Solution, Strategy};

use super::chromosome::Individual;
use super::config::HeuristicConfig;
use super::decode::decode;
use super::operators::{tournament_select, PickupGaProblem};

/// Searches for a low-cost plan with a genetic algorithm.
///
/// Every generation breeds `population_size` offspring from tournament
/// parents, evaluates them in parallel, and keeps the fittest member of
/// parents and offspring plus tournament winners from the same pool. The
/// best individual ever seen is decoded into the result.
///
/// The result always respects capacity: cities of an overloaded vehicle, and
/// cities left after the fleet ran out, are reported as unserved. Costs use
/// [`Costing::DepotLegs`].
///
/// # Errors
///
/// [`SolveError::InvalidInput`] for out-of-range parameters. Any valid input
/// yields a best-effort solution.
///
/// # Examples
///
/// ```
/// use u_pickup::demo::{inland_cargo, INLAND_CAPACITIES, INLAND_CARGO};
/// use u_pickup::evaluation::check_solution;
/// use u_pickup::ga::{solve_heuristic, HeuristicConfig};
///
/// let instance = inland_cargo(&INLAND_CARGO, &INLAND_CAPACITIES).unwrap();
/// let config = HeuristicConfig::default().with_generations(50).with_seed(1);
///
/// let solution = solve_heuristic(&instance, &config).unwrap();
/// assert!(check_solution(&instance, &solution).is_empty());
/// ```
pub fn solve_heuristic(
    instance: &ProblemInstance,
    config: &HeuristicConfig,
) -> Result<Solution, SolveError> {
    config.validate()?;
    let started = Instant::now();
    let deadline = config.time_budget.and_then(|b| started.checked_add(b));

    let problem = PickupGaProblem::new(instance, config.penalty);
    let mut rng = u_numflow::random::create_rng(config.seed);
    let size = config.population_size;

    let mut population: Vec<Individual> = (0..size)
        .map(|_| problem.create_individual(&mut rng))
        .collect();
    evaluate_all(&problem, &mut population);
    let mut best = population[fittest(&population)].clone();
    debug!(
        cities = instance.num_pickups(),
        population = size,
        fitness = best.fitness(),
        "initial population evaluated"
    );

    let mut generations = 0;
    while generations < config.generations {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            debug!(generations, "time budget exhausted");
            break;
        }
        generations += 1;

        let mut offspring = Vec::with_capacity(size + 1);
        while offspring.len() < size {
            let a = tournament_select(&population, config.tournament_size, &mut rng);
            let b = tournament_select(&population, config.tournament_size, &mut rng);
            let children = if rng.random_bool(config.crossover_rate) {
                problem.crossover(&population[a], &population[b], &mut rng)
            } else {
                vec![
                    Individual::new(population[a].cities().to_vec()),
                    Individual::new(population[b].cities().to_vec()),
                ]
            };
            for mut child in children {
                if rng.random_bool(config.mutation_rate) {
                    problem.mutate(&mut child, &mut rng);
                }
                offspring.push(child);
            }
        }
        offspring.truncate(size);
        evaluate_all(&problem, &mut offspring);

        let mut pool = population;
        pool.append(&mut offspring);
        let elite = fittest(&pool);
        let mut next = Vec::with_capacity(size);
        next.push(pool[elite].clone());
        while next.len() < size {
            let i = tournament_select(&pool, config.tournament_size, &mut rng);
            next.push(pool[i].clone());
        }
        population = next;

        if population[0].fitness() < best.fitness() {
            best = population[0].clone();
            debug!(generation = generations, fitness = best.fitness(), "new best");
        }
    }

    let solution = materialize(instance, best.cities());
    info!(
        fitness = best.fitness(),
        generations,
        served = solution.num_served(),
        unserved = solution.unserved().len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "genetic search finished"
    );
    Ok(solution)
}

/// Decodes `cities` into a capacity-respecting solution; cities of overloaded
/// vehicles join the unserved list, which is sorted.
fn materialize(instance: &ProblemInstance, cities: &[usize]) -> Solution {
    let decoded = decode(instance, cities);
    let mut plan = decoded.plan;
    let mut unserved = decoded.unserved;
    for &v in &decoded.overloaded {
        unserved.append(plan.route_mut(v));
    }
    unserved.sort_unstable();

    let mut solution = plan.to_solution(
        instance,
        Strategy::Heuristic,
        Costing::DepotLegs,
        CapacityModel::Pickup,
    );
    for city in unserved {
        solution.add_unserved(city);
    }
    solution
}

/// Evaluates every individual in parallel; results land at their own index.
fn evaluate_all(problem: &PickupGaProblem<'_>, population: &mut [Individual]) {
    population.par_iter_mut().for_each(|ind| {
        let fitness = problem.evaluate(ind);
        ind.set_fitness(fitness);
    });
}

/// Index of the lowest fitness, first on ties.
fn fittest(population: &[Individual]) -> usize {
    let mut best = 0;
    for (i, ind) in population.iter().enumerate().skip(1) {
        if ind.fitness() < population[best].fitness() {
            best = i;
        }
    }
    best
}
