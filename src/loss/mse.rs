use crate::error::{NetworkError, Result};

pub struct MseError;

impl MseError {
    /// Per-output error: ½(output − target)²
    pub fn error(output: f64, target: f64) -> f64 {
        let diff = output - target;
        0.5 * diff * diff
    }

    /// Per-output gradient: output − target
    pub fn derivative(output: f64, target: f64) -> f64 {
        output - target
    }

    /// Summed error over a whole output vector: ½·Σ(target − output)²
    pub fn total_error(outputs: &[f64], targets: &[f64]) -> Result<f64> {
        if outputs.len() != targets.len() {
            return Err(NetworkError::ArrayLengthMismatch {
                outputs: outputs.len(),
                targets: targets.len(),
            });
        }
        let sum = outputs.iter().zip(targets.iter())
            .map(|(o, t)| (t - o).powi(2))
            .sum::<f64>();
        Ok(0.5 * sum)
    }
}
