#![allow(mixed_script_confusables)]
#![allow(confusable_idents)]

mod macros;

pub mod agent;
pub mod config;
pub mod constants;
pub mod episode;
pub mod error;
pub mod evolution;
pub mod frontend;
pub mod network;
pub mod obstacle;
pub mod random;
pub mod scenario;
mod serialize;

pub use agent::{Agent, Physics};
pub use config::SimConfig;
pub use episode::{Episode, Outcome, Status};
pub use error::{Error, Result};
pub use evolution::{next_generation, population_init, IdGen};
pub use frontend::{Frame, Frontend, Headless, Paced};
pub use network::{Constant, Perceptron, Policy};
pub use obstacle::{Obstacle, Obstacles};
pub use random::{default_rng, WyRng};
pub use scenario::{EvolutionTarget, Stats, Trainer};
