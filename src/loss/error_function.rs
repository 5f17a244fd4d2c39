use serde::{Serialize, Deserialize};

use crate::loss::mse::MseError;

/// Selects the error function backpropagation differentiates.
///
/// Only mean-squared error exists today; new variants slot in by adding
/// a match arm here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorFunction {
    #[default]
    MeanSquared,
}

impl ErrorFunction {
    pub fn error(&self, output: f64, target: f64) -> f64 {
        match self {
            ErrorFunction::MeanSquared => MseError::error(output, target),
        }
    }

    pub fn derivative(&self, output: f64, target: f64) -> f64 {
        match self {
            ErrorFunction::MeanSquared => MseError::derivative(output, target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_squared_error_and_slope() {
        let mse = ErrorFunction::default();
        assert_eq!(mse.error(3.0, 1.0), 2.0);
        assert_eq!(mse.derivative(3.0, 1.0), 2.0);
        assert_eq!(mse.derivative(0.0, 1.0), -1.0);
    }
}
