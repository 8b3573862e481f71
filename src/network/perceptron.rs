use super::{activate, Observation, Policy, ACTION, SENSORY};
use crate::{
    error::{Error, Result},
    serialize::{deserialize_matrix_flat, deserialize_matrix_sensory, serialize_matrix},
};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use rulinalg::matrix::{BaseMatrix, BaseMatrixMut, Matrix};
use serde::{Deserialize, Serialize};

/// A fixed-topology two layer perceptron with threshold activations and no bias.
///
/// `w1` maps the observation to the hidden layer and is shaped `hidden × SENSORY`, `w2` maps
/// the hidden layer to the single action and is shaped `ACTION × hidden`. Shapes are checked
/// once at construction and never change afterwards, so every operation below may assume them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Perceptron {
    #[serde(
        serialize_with = "serialize_matrix",
        deserialize_with = "deserialize_matrix_sensory"
    )]
    w1: Matrix<f64>,
    #[serde(
        serialize_with = "serialize_matrix",
        deserialize_with = "deserialize_matrix_flat"
    )]
    w2: Matrix<f64>,
}

impl Perceptron {
    pub fn new(w1: Matrix<f64>, w2: Matrix<f64>) -> Result<Self> {
        let hidden = w1.rows();
        if hidden == 0 || w1.cols() != SENSORY {
            return Err(Error::ShapeMismatch {
                layer: "w1",
                expected: (hidden.max(1), SENSORY),
                actual: (w1.rows(), w1.cols()),
            });
        }
        if w2.rows() != ACTION || w2.cols() != hidden {
            return Err(Error::ShapeMismatch {
                layer: "w2",
                expected: (ACTION, hidden),
                actual: (w2.rows(), w2.cols()),
            });
        }
        Ok(Self { w1, w2 })
    }

    /// Every weight drawn uniformly from [0, 1)
    pub fn random(hidden: usize, rng: &mut impl RngCore) -> Result<Self> {
        let mut draw = |n: usize| (0..n).map(|_| rng.random::<f64>()).collect::<Vec<_>>();
        let w1 = Matrix::new(hidden, SENSORY, draw(hidden * SENSORY));
        let w2 = Matrix::new(ACTION, hidden, draw(ACTION * hidden));
        Self::new(w1, w2)
    }

    #[inline]
    pub fn hidden(&self) -> usize {
        self.w1.rows()
    }

    #[inline]
    pub fn w1(&self) -> &Matrix<f64> {
        &self.w1
    }

    #[inline]
    pub fn w2(&self) -> &Matrix<f64> {
        &self.w2
    }

    /// Every weight, hidden layer first
    pub fn weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.w1.data().iter().chain(self.w2.data().iter()).copied()
    }

    /// Add independent noise drawn from `σ` to every weight
    pub fn mutate(&mut self, σ: &Normal<f64>, rng: &mut impl RngCore) {
        for w in self.w1.mut_data().iter_mut() {
            *w += σ.sample(rng);
        }
        for w in self.w2.mut_data().iter_mut() {
            *w += σ.sample(rng);
        }
    }

    /// The elementwise mean of both parents, mutated by `σ`. Neither parent is touched, and
    /// breeding with oneself isolates the noise term.
    pub fn breed(&self, other: &Self, σ: &Normal<f64>, rng: &mut impl RngCore) -> Result<Self> {
        if self.hidden() != other.hidden() {
            return Err(Error::ShapeMismatch {
                layer: "w1",
                expected: (self.w1.rows(), self.w1.cols()),
                actual: (other.w1.rows(), other.w1.cols()),
            });
        }

        let mut child = Self {
            w1: (&self.w1 + &other.w1) * 0.5,
            w2: (&self.w2 + &other.w2) * 0.5,
        };
        child.mutate(σ, rng);
        Ok(child)
    }

    #[allow(clippy::inherent_to_string)]
    pub fn to_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        let parsed: Self = serde_json::from_str(s)?;
        Self::new(parsed.w1, parsed.w2)
    }
}

impl PartialEq for Perceptron {
    fn eq(&self, other: &Self) -> bool {
        self.hidden() == other.hidden() && self.weights().eq(other.weights())
    }
}

impl Policy for Perceptron {
    fn evaluate(&self, observation: Observation) -> bool {
        let input = Matrix::new(SENSORY, 1, observation.to_vec());
        let hidden = (&self.w1 * &input).apply(&activate::step);
        let output = (&self.w2 * &hidden).apply(&activate::step);
        output.data()[0] == 1.
    }
}
