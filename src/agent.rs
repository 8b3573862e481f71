//! Agents: a policy in a body. The body only moves vertically; horizontal progress is
//! the obstacles scrolling toward it.

use crate::{
    error::Result,
    network::{Observation, Perceptron, Policy},
    obstacle::Rect,
};
use rand::RngCore;
use rand_distr::Normal;

/// Constants governing how agents fall and flap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    pub impulse_velocity: f64,
    pub gravity: f64,
    pub terminal_velocity: f64,
}

#[derive(Debug, Clone)]
pub struct Agent<P: Policy = Perceptron> {
    id: usize,
    x: f64,
    y: f64,
    vel: f64,
    /// ticks since the last impulse
    ticks: u32,
    survived: u64,
    alive: bool,
    policy: P,
}

impl<P: Policy> Agent<P> {
    pub fn new(id: usize, (x, y): (f64, f64), policy: P) -> Self {
        Self {
            id,
            x,
            y,
            vel: 0.,
            ticks: 0,
            survived: 0,
            alive: true,
            policy,
        }
    }

    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn vel(&self) -> f64 {
        self.vel
    }

    #[inline]
    pub fn survived(&self) -> u64 {
        self.survived
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn bounds(&self, (w, h): (f64, f64)) -> Rect {
        Rect::new(self.x, self.y, w, h)
    }

    /// A single flap
    pub fn apply_impulse(&mut self, physics: &Physics) {
        self.vel = physics.impulse_velocity;
        self.ticks = 0;
    }

    /// Move one tick along the current ballistic arc. Dead agents stay where they fell.
    pub fn advance(&mut self, physics: &Physics) {
        if !self.alive {
            return;
        }

        self.ticks += 1;
        self.survived += 1;

        let t = f64::from(self.ticks);
        let displacement = self.vel * t + 0.5 * physics.gravity * t * t;
        self.y += displacement.min(physics.terminal_velocity);
    }

    /// Ask the policy whether to flap, and do so
    pub fn decide(&mut self, observation: Observation, physics: &Physics) {
        if self.alive && self.policy.evaluate(observation) {
            self.apply_impulse(physics);
        }
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// A fresh agent at `spawn` carrying an independent copy of this agent's policy
    pub fn reborn(&self, id: usize, spawn: (f64, f64)) -> Self
    where
        P: Clone,
    {
        Self::new(id, spawn, self.policy.clone())
    }
}

impl Agent<Perceptron> {
    /// Offspring of self and other, whose policy is the mean of both parents' weights plus noise.
    /// See [Perceptron::breed].
    pub fn breed(
        &self,
        other: &Self,
        id: usize,
        spawn: (f64, f64),
        σ: &Normal<f64>,
        rng: &mut impl RngCore,
    ) -> Result<Self> {
        Ok(Self::new(id, spawn, self.policy.breed(&other.policy, σ, rng)?))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        assert_f64_approx,
        config::SimConfig,
        network::Constant,
        random::{noise, WyRng},
    };
    use rand::SeedableRng;

    fn physics() -> Physics {
        SimConfig::default().physics()
    }

    #[test]
    fn test_fall() {
        let physics = physics();
        let mut agent = Agent::new(0, (230., 350.), Constant(false));
        let mut expected = 350.;
        for (t, step) in [(1., 1.5), (2., 6.), (3., 13.5), (4., 16.), (5., 16.)] {
            agent.advance(&physics);
            expected += step;
            assert_f64_approx!(agent.y(), expected);
            assert_eq!(agent.survived(), t as u64);
        }
        assert_eq!(agent.x(), 230.);
    }

    #[test]
    fn test_impulse() {
        let physics = physics();
        let mut agent = Agent::new(0, (230., 350.), Constant(true));
        for _ in 0..3 {
            agent.advance(&physics);
        }
        agent.apply_impulse(&physics);
        assert_eq!(agent.vel(), -10.5);

        let y = agent.y();
        agent.advance(&physics);
        assert_f64_approx!(agent.y(), y - 9.);
        agent.advance(&physics);
        assert_f64_approx!(agent.y(), y - 9. - 15.);
    }

    #[test]
    fn test_decide() {
        let physics = physics();
        let mut flapper = Agent::new(0, (0., 0.), Constant(true));
        let mut sinker = Agent::new(1, (0., 0.), Constant(false));
        flapper.decide([0., 0.], &physics);
        sinker.decide([0., 0.], &physics);
        assert_eq!(flapper.vel(), physics.impulse_velocity);
        assert_eq!(sinker.vel(), 0.);
    }

    #[test]
    fn test_dead_frozen() {
        let physics = physics();
        let mut agent = Agent::new(0, (230., 350.), Constant(true));
        agent.advance(&physics);
        agent.kill();
        agent.kill();
        assert!(!agent.is_alive());

        let (y, vel, survived) = (agent.y(), agent.vel(), agent.survived());
        for _ in 0..10 {
            agent.decide([0.1, 0.1], &physics);
            agent.advance(&physics);
        }
        assert_eq!((y, vel, survived), (agent.y(), agent.vel(), agent.survived()));
    }

    #[test]
    fn test_breed() {
        let mut rng = WyRng::seed_from_u64(3);
        let σ = noise(0.5).unwrap();
        let mut l = Agent::new(0, (230., 350.), Perceptron::random(6, &mut rng).unwrap());
        let r = Agent::new(1, (230., 350.), Perceptron::random(6, &mut rng).unwrap());
        for _ in 0..5 {
            l.advance(&physics());
        }
        let before = l.policy().clone();

        let child = l.breed(&r, 7, (230., 350.), &σ, &mut rng).unwrap();
        assert_eq!(child.id(), 7);
        assert_eq!((child.x(), child.y(), child.survived()), (230., 350., 0));
        assert!(child.is_alive());
        assert_eq!(l.policy(), &before);
        assert_ne!(child.policy(), l.policy());
    }

    #[test]
    fn test_reborn() {
        let mut rng = WyRng::seed_from_u64(4);
        let mut elite = Agent::new(0, (230., 350.), Perceptron::random(6, &mut rng).unwrap());
        for _ in 0..20 {
            elite.advance(&physics());
        }
        elite.kill();

        let clone = elite.reborn(10, (230., 350.));
        assert_eq!(clone.policy(), elite.policy());
        assert_eq!((clone.id(), clone.y(), clone.survived()), (10, 350., 0));
        assert!(clone.is_alive());
    }
}
