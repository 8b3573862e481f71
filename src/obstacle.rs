//! The stream of obstacle pairs agents must fly through.

use crate::{agent::Agent, config::SimConfig, network::Policy};
use rand::{Rng, RngCore};
use serde::Serialize;

/// An axis-aligned rectangle, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap, rectangles sharing only an edge don't overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// A top and bottom segment with a gap between them. Only `x` and `passed` change after spawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    pub x: f64,
    pub gap_center: f64,
    pub passed: bool,
}

/// Every active obstacle, oldest first, along with the geometry they share
#[derive(Debug, Clone)]
pub struct Obstacles {
    active: Vec<Obstacle>,
    width: f64,
    segment_height: f64,
    gap_height: f64,
    gap_range: (f64, f64),
    velocity: f64,
}

impl Obstacles {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            active: Vec::new(),
            width: config.obstacle_width,
            segment_height: config.segment_height,
            gap_height: config.gap_height,
            gap_range: config.gap_range,
            velocity: config.obstacle_velocity,
        }
    }

    #[inline]
    pub fn active(&self) -> &[Obstacle] {
        &self.active
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn spawn(&mut self, x: f64, rng: &mut impl RngCore) -> &Obstacle {
        let (lo, hi) = self.gap_range;
        self.active.push(Obstacle {
            x,
            gap_center: rng.random_range(lo..hi),
            passed: false,
        });
        &self.active[self.active.len() - 1]
    }

    pub fn advance(&mut self) {
        for obstacle in self.active.iter_mut() {
            obstacle.x -= self.velocity;
        }
    }

    /// Drop every obstacle whose trailing edge has left the screen
    pub fn retire_offscreen(&mut self) -> usize {
        let before = self.active.len();
        let width = self.width;
        self.active.retain(|o| o.x + width >= 0.);
        before - self.active.len()
    }

    /// Mark every obstacle whose trailing edge is behind `reference_x` as passed, returning how
    /// many were newly marked
    pub fn mark_passed(&mut self, reference_x: f64) -> usize {
        let width = self.width;
        let mut marked = 0;
        for o in self
            .active
            .iter_mut()
            .filter(|o| !o.passed && o.x + width < reference_x)
        {
            o.passed = true;
            marked += 1;
        }
        marked
    }

    pub fn top(&self, obstacle: &Obstacle) -> Rect {
        let bottom_edge = obstacle.gap_center - self.gap_height / 2.;
        Rect::new(
            obstacle.x,
            bottom_edge - self.segment_height,
            self.width,
            self.segment_height,
        )
    }

    pub fn bottom(&self, obstacle: &Obstacle) -> Rect {
        Rect::new(
            obstacle.x,
            obstacle.gap_center + self.gap_height / 2.,
            self.width,
            self.segment_height,
        )
    }

    /// Whether `agent`, whose bounding box is `agent_size`, overlaps either segment of any
    /// active obstacle
    pub fn collides_with<P: Policy>(&self, agent: &Agent<P>, agent_size: (f64, f64)) -> bool {
        let bounds = agent.bounds(agent_size);
        self.active
            .iter()
            .any(|o| self.top(o).overlaps(&bounds) || self.bottom(o).overlaps(&bounds))
    }

    /// The unpassed obstacle with the smallest x
    pub fn closest_ahead(&self) -> Option<&Obstacle> {
        self.active
            .iter()
            .filter(|o| !o.passed)
            .min_by(|l, r| l.x.total_cmp(&r.x))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{network::Constant, new_t, random::WyRng};
    use rand::SeedableRng;

    fn stream() -> Obstacles {
        Obstacles::new(&SimConfig::default())
    }

    fn at(x: f64, gap_center: f64) -> Obstacles {
        let mut obstacles = stream();
        obstacles.active.push(Obstacle {
            x,
            gap_center,
            passed: false,
        });
        obstacles
    }

    #[test]
    fn test_spawn_range() {
        let mut rng = WyRng::seed_from_u64(8);
        let mut obstacles = stream();
        for _ in 0..1000 {
            let o = obstacles.spawn(550., &mut rng);
            assert!((50.0..450.0).contains(&o.gap_center));
            assert_eq!(o.x, 550.);
            assert!(!o.passed);
        }
        assert_eq!(obstacles.len(), 1000);
    }

    #[test]
    fn test_geometry() {
        let obstacles = at(300., 250.);
        let o = &obstacles.active()[0];
        assert_eq!(obstacles.top(o), Rect::new(300., 150. - 640., 104., 640.));
        assert_eq!(obstacles.bottom(o), Rect::new(300., 350., 104., 640.));
    }

    #[test]
    fn test_advance_retire() {
        let mut obstacles = at(0., 250.);
        obstacles.active.push(Obstacle {
            x: 400.,
            gap_center: 100.,
            passed: false,
        });

        for _ in 0..20 {
            obstacles.advance();
        }
        assert_eq!(obstacles.active()[0].x, -100.);
        assert_eq!(obstacles.retire_offscreen(), 0);

        obstacles.advance();
        assert_eq!(obstacles.retire_offscreen(), 1);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles.active()[0].x, 295.);
        assert_eq!(obstacles.active()[0].gap_center, 100.);
    }

    #[test]
    fn test_collision() {
        let size = (68., 48.);
        let obstacles = at(200., 250.);

        // inside the gap, [150, 350)
        let agent = Agent::new(0, (230., 200.), Constant(false));
        assert!(!obstacles.collides_with(&agent, size));

        // clipping the top segment
        let agent = Agent::new(0, (230., 140.), Constant(false));
        assert!(obstacles.collides_with(&agent, size));

        // clipping the bottom segment
        let agent = Agent::new(0, (230., 310.), Constant(false));
        assert!(obstacles.collides_with(&agent, size));

        // resting exactly on the gap's edges
        let agent = Agent::new(0, (230., 150.), Constant(false));
        assert!(!obstacles.collides_with(&agent, size));
        let agent = Agent::new(0, (230., 302.), Constant(false));
        assert!(!obstacles.collides_with(&agent, size));

        // level with the top segment, but not horizontally overlapping
        let agent = Agent::new(0, (100., 0.), Constant(false));
        assert!(!obstacles.collides_with(&agent, size));
        let agent = Agent::new(0, (132., 0.), Constant(false));
        assert!(!obstacles.collides_with(&agent, size));
        let agent = Agent::new(0, (133., 0.), Constant(false));
        assert!(obstacles.collides_with(&agent, size));
    }

    #[test]
    fn test_collision_tall_gap() {
        let obstacles = Obstacles {
            active: vec![Obstacle {
                x: 200.,
                gap_center: 250.,
                passed: false,
            }],
            ..Obstacles::new(&new_t!(SimConfig, gap_height = 10_000.))
        };
        for y in [-4000., 0., 250., 4000.] {
            let agent = Agent::new(0, (230., y), Constant(false));
            assert!(!obstacles.collides_with(&agent, (68., 48.)));
        }
    }

    #[test]
    fn test_passed_closest() {
        let mut obstacles = at(100., 250.);
        obstacles.active.push(Obstacle {
            x: 400.,
            gap_center: 100.,
            passed: false,
        });
        assert_eq!(obstacles.closest_ahead().map(|o| o.x), Some(100.));

        // trailing edge at 204 is not yet behind 204
        assert_eq!(obstacles.mark_passed(204.), 0);
        assert_eq!(obstacles.mark_passed(230.), 1);
        assert_eq!(obstacles.mark_passed(230.), 0);
        assert_eq!(obstacles.closest_ahead().map(|o| o.x), Some(400.));

        obstacles.active[1].passed = true;
        assert!(obstacles.closest_ahead().is_none());
    }
}
