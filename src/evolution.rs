//! Deriving the next generation from a scored one: elites, crossover and self-mutation.

use crate::{
    agent::Agent,
    config::SimConfig,
    constants::FLAPPER_BREEDING_PARENTS,
    error::{Error, Result},
    network::{Perceptron, Policy},
    random::noise,
};
use rand::RngCore;
use tracing::debug;

/// Breeding pairs, as ranks among the top agents. Crossover first, then each parent with itself.
/// Cycled through when the population needs more offspring than this.
const BREEDING_PAIRS: [(usize, usize); 6] = [(0, 1), (0, 2), (1, 2), (0, 0), (1, 1), (2, 2)];

/// Hands out agent identifiers. Owned by whoever creates agents, so that ids are unique within a
/// run without any global state.
#[derive(Debug, Clone, Default)]
pub struct IdGen {
    pub head: usize,
}

impl IdGen {
    pub fn new(head: usize) -> Self {
        Self { head }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> usize {
        let id = self.head;
        self.head += 1;
        id
    }
}

/// A fresh population with uniformly random weights, everyone at the spawn point
pub fn population_init(
    config: &SimConfig,
    ids: &mut IdGen,
    rng: &mut impl RngCore,
) -> Result<Vec<Agent>> {
    (0..config.population_size)
        .map(|_| {
            Ok(Agent::new(
                ids.next(),
                config.spawn,
                Perceptron::random(config.hidden_width, rng)?,
            ))
        })
        .collect()
}

/// Pair every agent with its fitness, fittest first. The sort is stable, so ties keep their
/// population order.
pub fn rank<P: Policy>(population: Vec<Agent<P>>, fitness: &[f64]) -> Result<Vec<(Agent<P>, f64)>> {
    if population.len() != fitness.len() {
        return Err(Error::FitnessMismatch {
            population: population.len(),
            fitness: fitness.len(),
        });
    }

    let mut ranked = population
        .into_iter()
        .zip(fitness.iter().copied())
        .collect::<Vec<_>>();
    ranked.sort_by(|(_, l), (_, r)| r.total_cmp(l));
    Ok(ranked)
}

/// The next generation, sized `config.population_size`: clones of the top `elite_count` agents,
/// then offspring of the top three following [BREEDING_PAIRS]. A population with fewer agents
/// than `elite_count` contributes every agent as an elite, and breeding fills the rest.
pub fn next_generation(
    population: Vec<Agent>,
    fitness: &[f64],
    config: &SimConfig,
    ids: &mut IdGen,
    rng: &mut impl RngCore,
) -> Result<Vec<Agent>> {
    for actual in [population.len(), config.population_size] {
        if actual < FLAPPER_BREEDING_PARENTS {
            return Err(Error::PopulationTooSmall {
                required: FLAPPER_BREEDING_PARENTS,
                actual,
            });
        }
    }

    let ranked = rank(population, fitness)?;
    let σ = noise(config.mutation_sigma)?;
    let size = config.population_size;
    let elites = config.elite_count.min(size).min(ranked.len());

    let mut next = Vec::with_capacity(size);
    for (elite, _) in ranked.iter().take(elites) {
        next.push(elite.reborn(ids.next(), config.spawn));
    }

    for &(l, r) in BREEDING_PAIRS.iter().cycle().take(size - elites) {
        let child = ranked[l].0.breed(&ranked[r].0, ids.next(), config.spawn, &σ, rng)?;
        next.push(child);
    }

    debug!(
        champion = ranked[0].0.id(),
        fitness = ranked[0].1,
        elites,
        offspring = size - elites,
        "bred next generation"
    );
    Ok(next)
}
