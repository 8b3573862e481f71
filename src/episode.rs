//! A single episode: one population flying until every agent is dead.

use crate::{
    agent::{Agent, Physics},
    config::SimConfig,
    error::{Error, Result},
    frontend::{AgentView, Frame, Frontend},
    network::{Observation, Perceptron, Policy},
    obstacle::{Obstacle, Obstacles},
};
use rand::RngCore;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Terminated,
}

/// What an episode produced
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Per agent, in population order
    pub fitness: Vec<f64>,
    pub score: usize,
    pub ticks: u64,
    /// The frontend asked to stop before every agent died
    pub interrupted: bool,
}

impl Outcome {
    /// Index and fitness of the fittest agent, the earliest one on ties
    pub fn best(&self) -> Option<(usize, f64)> {
        self.fitness
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (idx, f)| match best {
                Some((_, b)) if b >= f => best,
                _ => Some((idx, f)),
            })
    }

    pub fn mean(&self) -> f64 {
        if self.fitness.is_empty() {
            return 0.;
        }
        self.fitness.iter().sum::<f64>() / self.fitness.len() as f64
    }
}

pub struct Episode<P: Policy = Perceptron> {
    agents: Vec<Agent<P>>,
    obstacles: Obstacles,
    physics: Physics,
    agent_size: (f64, f64),
    ground_y: f64,
    observation_scale: f64,
    spawn_obstacle_x: f64,
    max_ticks: Option<u64>,
    label: String,
    score: usize,
    ticks: u64,
    status: Status,
}

impl<P: Policy> Episode<P> {
    /// Start an episode with a single obstacle at the initial offset. The population must not be
    /// empty, since its first agent is the horizontal reference for passing obstacles.
    pub fn new(
        agents: Vec<Agent<P>>,
        config: &SimConfig,
        label: impl Into<String>,
        rng: &mut impl RngCore,
    ) -> Result<Self> {
        if agents.is_empty() {
            return Err(Error::PopulationTooSmall {
                required: 1,
                actual: 0,
            });
        }

        let mut obstacles = Obstacles::new(config);
        obstacles.spawn(config.initial_obstacle_x, rng);

        Ok(Self {
            agents,
            obstacles,
            physics: config.physics(),
            agent_size: config.agent_size,
            ground_y: config.ground_y,
            observation_scale: config.observation_scale,
            spawn_obstacle_x: config.spawn_obstacle_x,
            max_ticks: config.max_ticks,
            label: label.into(),
            score: 0,
            ticks: 0,
            status: Status::Running,
        })
    }

    #[inline]
    pub fn agents(&self) -> &[Agent<P>] {
        &self.agents
    }

    #[inline]
    pub fn obstacles(&self) -> &Obstacles {
        &self.obstacles
    }

    #[inline]
    pub fn score(&self) -> usize {
        self.score
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn alive(&self) -> usize {
        self.agents.iter().filter(|a| a.is_alive()).count()
    }

    /// Hand the population back, typically to be evolved
    pub fn into_agents(self) -> Vec<Agent<P>> {
        self.agents
    }

    fn observe(&self, agent: &Agent<P>, closest: &Obstacle) -> Observation {
        [
            (closest.x + self.obstacles.width() - agent.x()) / self.observation_scale,
            (closest.gap_center - agent.y()) / self.observation_scale,
        ]
    }

    /// Advance every obstacle and every living agent by exactly one tick
    pub fn tick(&mut self, rng: &mut impl RngCore) -> Result<Status> {
        if self.status == Status::Terminated {
            return Ok(self.status);
        }
        self.ticks += 1;

        self.obstacles.advance();
        for agent in self.agents.iter_mut().filter(|a| a.is_alive()) {
            if self.obstacles.collides_with(&*agent, self.agent_size) {
                trace!(id = agent.id(), tick = self.ticks, "agent hit an obstacle");
                agent.kill();
            }
        }

        if self.obstacles.mark_passed(self.agents[0].x()) > 0 {
            self.score += 1;
            self.obstacles.spawn(self.spawn_obstacle_x, rng);
        }
        self.obstacles.retire_offscreen();

        let closest = self
            .obstacles
            .closest_ahead()
            .cloned()
            .ok_or(Error::NoObstacleAhead)?;

        for idx in 0..self.agents.len() {
            if !self.agents[idx].is_alive() {
                continue;
            }
            if self.agents[idx].y() + self.agent_size.1 >= self.ground_y {
                trace!(id = self.agents[idx].id(), tick = self.ticks, "agent hit the ground");
                self.agents[idx].kill();
                continue;
            }

            let observation = self.observe(&self.agents[idx], &closest);
            let agent = &mut self.agents[idx];
            agent.decide(observation, &self.physics);
            agent.advance(&self.physics);
        }

        if self.alive() == 0 {
            self.status = Status::Terminated;
            debug!(label = %self.label, ticks = self.ticks, score = self.score, "episode over");
        } else if self.max_ticks.is_some_and(|max| self.ticks >= max) {
            self.status = Status::Terminated;
            debug!(label = %self.label, ticks = self.ticks, alive = self.alive(), "episode capped");
        }

        Ok(self.status)
    }

    /// Survived ticks minus the position of the closest unpassed obstacle. Agents who died
    /// earlier are measured against the same obstacle as those still flying, so the values may
    /// well be negative.
    pub fn fitness(&self) -> Result<Vec<f64>> {
        let closest = self
            .obstacles
            .closest_ahead()
            .ok_or(Error::NoObstacleAhead)?;
        Ok(self
            .agents
            .iter()
            .map(|a| a.survived() as f64 - closest.x)
            .collect())
    }

    fn outcome(&self, interrupted: bool) -> Result<Outcome> {
        Ok(Outcome {
            fitness: self.fitness()?,
            score: self.score,
            ticks: self.ticks,
            interrupted,
        })
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            generation: &self.label,
            tick: self.ticks,
            score: self.score,
            obstacles: self.obstacles.active(),
            agents: self
                .agents
                .iter()
                .map(|a| AgentView {
                    id: a.id(),
                    x: a.x(),
                    y: a.y(),
                    alive: a.is_alive(),
                    survived: a.survived(),
                })
                .collect(),
        }
    }

    /// Tick until every agent is dead, or the frontend asks to stop
    pub fn run(&mut self, frontend: &mut impl Frontend, rng: &mut impl RngCore) -> Result<Outcome> {
        while self.status == Status::Running {
            if frontend.should_stop() {
                debug!(label = %self.label, ticks = self.ticks, "episode interrupted");
                self.status = Status::Terminated;
                return self.outcome(true);
            }
            frontend.pump();
            self.tick(rng)?;
            frontend.present(&self.frame());
        }
        self.outcome(false)
    }

    /// Tick at most `ticks` times, then end the episode regardless of who is still alive
    pub fn run_for(&mut self, ticks: u64, rng: &mut impl RngCore) -> Result<Outcome> {
        for _ in 0..ticks {
            if self.tick(rng)? == Status::Terminated {
                break;
            }
        }
        self.status = Status::Terminated;
        self.outcome(false)
    }
}
