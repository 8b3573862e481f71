//! Policies deciding whether an agent flaps. The evolved one is a [Perceptron]; anything else
//! implementing [Policy] can drive an agent too, which is handy for frontends and tests.

pub mod perceptron;

pub use perceptron::Perceptron;

/// Number of observation inputs every policy receives
pub const SENSORY: usize = 2;

/// Number of outputs of an evolved policy
pub const ACTION: usize = 1;

/// Normalized (horizontal distance to the closest obstacle, vertical distance to its gap)
pub type Observation = [f64; SENSORY];

pub mod activate {
    /// Binary threshold unit
    pub fn step(x: f64) -> f64 {
        if x > 0.5 {
            1.
        } else {
            0.
        }
    }
}

/// The trait for every flap policy. Evaluation must be pure: the same observation always
/// yields the same action.
pub trait Policy {
    /// Whether to flap given this observation
    fn evaluate(&self, observation: Observation) -> bool;
}

/// A policy who ignores its observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant(pub bool);

impl Policy for Constant {
    fn evaluate(&self, _: Observation) -> bool {
        self.0
    }
}
