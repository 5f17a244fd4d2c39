use serde::{Serialize, Deserialize};
use crate::activation::activation::ActivationFunction;

/// Arena coordinates of a node: `layer` 0 is the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub layer: usize,
    pub index: usize,
}

/// One neuron and the values cached by the most recent forward pass.
///
/// Input-layer nodes only ever carry `output`; their bias and total input
/// are never read.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    id: String,
    pub(crate) bias: f64,
    activation: ActivationFunction,
    pub(crate) total_input: f64,
    pub(crate) output: f64,
}

impl Node {
    pub(crate) fn new(id: String, activation: ActivationFunction, bias: f64) -> Node {
        Node {
            id,
            bias,
            activation,
            total_input: 0.0,
            output: 0.0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }

    /// Bias plus the weighted sum of live incoming links.
    pub fn total_input(&self) -> f64 {
        self.total_input
    }

    pub fn output(&self) -> f64 {
        self.output
    }

    /// Recomputes `output` from `total_input`.
    pub(crate) fn activate(&mut self, total_input: f64) -> f64 {
        self.total_input = total_input;
        self.output = self.activation.function(total_input);
        self.output
    }
}
