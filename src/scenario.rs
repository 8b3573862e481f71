//! The generational loop: fly an episode, score it, breed the next population, repeat.

use crate::{
    agent::Agent,
    config::SimConfig,
    episode::{Episode, Outcome},
    error::Result,
    evolution::{next_generation, population_init, rank, IdGen},
    frontend::Frontend,
};
use rand::RngCore;
use tracing::{info, warn};

pub enum EvolutionTarget {
    /// Stop after this many generations. At least one generation always runs, so `0` acts as `1`
    Generation(usize),
    /// Stop once an episode passes this many obstacles, or after the configured generations
    Score(usize),
}

impl EvolutionTarget {
    fn satisfied(&self, stats: &Stats, generations: usize) -> bool {
        match self {
            Self::Generation(t) => stats.generation + 1 >= *t,
            Self::Score(t) => stats.score >= *t || stats.generation + 1 >= generations,
        }
    }
}

/// Summary of a single generation's episode
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Stats {
    pub generation: usize,
    pub ticks: u64,
    pub score: usize,
    pub best: f64,
    pub mean: f64,
    pub champion: usize,
}

impl Stats {
    fn new(generation: usize, outcome: &Outcome, population: &[Agent]) -> Self {
        let (idx, best) = outcome.best().unwrap_or((0, f64::MIN));
        Self {
            generation,
            ticks: outcome.ticks,
            score: outcome.score,
            best,
            mean: outcome.mean(),
            champion: population.get(idx).map_or(0, |a| a.id()),
        }
    }
}

/// What training produced
pub struct Trained {
    /// The final generation paired with its fitness, fittest first
    pub ranked: Vec<(Agent, f64)>,
    pub history: Vec<Stats>,
}

/// Owns the configuration and the agent id counter across generations
pub struct Trainer {
    config: SimConfig,
    ids: IdGen,
}

impl Trainer {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ids: IdGen::default(),
        })
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Evolve a freshly bootstrapped population until `target` is satisfied. `hook` sees every
    /// generation's stats as they happen. A generation interrupted by the frontend ends training,
    /// and its partial scores are thrown away.
    pub fn train(
        &mut self,
        target: EvolutionTarget,
        frontend: &mut impl Frontend,
        rng: &mut impl RngCore,
        mut hook: impl FnMut(&Stats),
    ) -> Result<Trained> {
        let mut population = population_init(&self.config, &mut self.ids, rng)?;
        let mut history = Vec::new();
        let mut gen_idx = 0;

        loop {
            let mut episode = Episode::new(population, &self.config, format!("GEN {gen_idx}"), rng)?;
            let outcome = episode.run(frontend, rng)?;
            let agents = episode.into_agents();

            if outcome.interrupted {
                warn!(generation = gen_idx, ticks = outcome.ticks, "training interrupted");
                let fitness = vec![f64::MIN; agents.len()];
                break Ok(Trained {
                    ranked: rank(agents, &fitness)?,
                    history,
                });
            }

            let stats = Stats::new(gen_idx, &outcome, &agents);
            info!(
                generation = stats.generation,
                ticks = stats.ticks,
                score = stats.score,
                best = stats.best,
                mean = stats.mean,
                champion = stats.champion,
                "generation done"
            );
            hook(&stats);
            let done = target.satisfied(&stats, self.config.generations);
            history.push(stats);

            if done {
                break Ok(Trained {
                    ranked: rank(agents, &outcome.fitness)?,
                    history,
                });
            }

            population =
                next_generation(agents, &outcome.fitness, &self.config, &mut self.ids, rng)?;
            gen_idx += 1;
        }
    }
}
