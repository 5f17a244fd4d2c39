use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Element-wise activation applied to a node's total input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Tanh,
    ReLU,
    Sigmoid,
    Linear,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::ReLU => x.max(0.0),
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Linear => x,
        }
    }

    /// Derivative with respect to the total input `x` (not the output).
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => {
                let t = self.function(x);
                1.0 - t * t
            }
            ActivationFunction::ReLU => if x <= 0.0 { 0.0 } else { 1.0 },
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Linear => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn relu_derivative_is_zero_at_origin() {
        assert_eq!(ActivationFunction::ReLU.derivative(0.0), 0.0);
        assert_eq!(ActivationFunction::ReLU.derivative(2.5), 1.0);
        assert_eq!(ActivationFunction::ReLU.function(-3.0), 0.0);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let eps = 1e-6;
        for act in [
            ActivationFunction::Tanh,
            ActivationFunction::Sigmoid,
            ActivationFunction::Linear,
        ] {
            for x in [-1.3, -0.2, 0.4, 2.0] {
                let numeric = (act.function(x + eps) - act.function(x - eps)) / (2.0 * eps);
                assert_relative_eq!(act.derivative(x), numeric, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn sigmoid_is_centered_at_half() {
        assert_relative_eq!(ActivationFunction::Sigmoid.function(0.0), 0.5);
        assert_relative_eq!(ActivationFunction::Sigmoid.derivative(0.0), 0.25);
    }
}
