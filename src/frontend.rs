//! The seam between an episode and whatever displays it. A frontend paces the simulation,
//! receives a [Frame] after every tick, and may ask for the episode to stop. None of this
//! affects the simulation itself, which is deterministic for a given seed.

use crate::obstacle::Obstacle;
use core::time::Duration;
use serde::Serialize;
use std::{thread, time::Instant};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgentView {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub alive: bool,
    pub survived: u64,
}

/// What a frontend gets to see of a single tick
#[derive(Debug, Clone, Serialize)]
pub struct Frame<'a> {
    pub generation: &'a str,
    pub tick: u64,
    pub score: usize,
    pub obstacles: &'a [Obstacle],
    pub agents: Vec<AgentView>,
}

impl Frame<'_> {
    pub fn alive(&self) -> usize {
        self.agents.iter().filter(|a| a.alive).count()
    }
}

pub trait Frontend {
    /// Called once before every tick, to hold some wall-clock rate
    fn pump(&mut self) {}

    /// Called once after every tick
    fn present(&mut self, _frame: &Frame<'_>) {}

    /// Polled before every tick. Returning true ends the episode where it stands
    fn should_stop(&self) -> bool {
        false
    }
}

/// Runs as fast as it can, shows nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl Frontend for Headless {}

/// Sleeps in [Frontend::pump] so that ticks happen no faster than `rate` per second
#[derive(Debug)]
pub struct Paced {
    period: Duration,
    last: Option<Instant>,
}

impl Paced {
    pub fn new(rate: u32) -> Self {
        Self {
            period: Duration::from_secs(1) / rate.max(1),
            last: None,
        }
    }
}

impl Frontend for Paced {
    fn pump(&mut self) {
        if let Some(last) = self.last {
            if let Some(remaining) = self.period.checked_sub(last.elapsed()) {
                thread::sleep(remaining);
            }
        }
        self.last = Some(Instant::now());
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_paced_holds_rate() {
        let mut paced = Paced::new(200);
        let start = Instant::now();
        for _ in 0..11 {
            paced.pump();
        }
        // the first pump never sleeps
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_frame_json() {
        let obstacles = [Obstacle {
            x: 550.,
            gap_center: 120.,
            passed: false,
        }];
        let frame = Frame {
            generation: "GEN 3",
            tick: 12,
            score: 1,
            obstacles: &obstacles,
            agents: vec![AgentView {
                id: 4,
                x: 230.,
                y: 300.,
                alive: false,
                survived: 12,
            }],
        };
        assert_eq!(frame.alive(), 0);

        let v = serde_json::to_value(&frame).unwrap();
        assert_eq!(v["generation"], "GEN 3");
        assert_eq!(v["obstacles"][0]["gap_center"], 120.);
        assert_eq!(v["agents"][0]["id"], 4);
    }
}
