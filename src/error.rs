//! Error type shared by every fallible operation in the crate. None of these are recoverable:
//! each one describes a violated precondition, and the run that hit it should stop.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("population of {actual} is too small, at least {required} agents are required")]
    PopulationTooSmall { required: usize, actual: usize },
    #[error("weight matrix {layer} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        layer: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("got {fitness} fitness values for a population of {population}")]
    FitnessMismatch { population: usize, fitness: usize },
    #[error("no unpassed obstacle ahead of the population")]
    NoObstacleAhead,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid mutation noise: {0}")]
    Noise(#[from] rand_distr::NormalError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
