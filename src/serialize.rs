use crate::network::SENSORY;
use rulinalg::matrix::{BaseMatrix, Matrix};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize_matrix<S: Serializer>(
    matrix: &Matrix<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(matrix.data().iter().map(|&f| f64::to_bits(f)))
}

fn deserialize_bits<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    Vec::<u64>::deserialize(deserializer).map(|v| v.into_iter().map(f64::from_bits).collect())
}

/// A single row of weights, as used by the output layer
pub fn deserialize_matrix_flat<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Matrix<f64>, D::Error> {
    deserialize_bits(deserializer).map(|data| Matrix::new(1, data.len(), data))
}

/// Row-major weights with one column per sensory input, as used by the hidden layer
pub fn deserialize_matrix_sensory<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Matrix<f64>, D::Error> {
    let data = deserialize_bits(deserializer)?;
    if data.len() % SENSORY != 0 {
        return Err(serde::de::Error::invalid_length(
            data.len(),
            &"a multiple of the sensory width",
        ));
    }
    Ok(Matrix::new(data.len() / SENSORY, SENSORY, data))
}
