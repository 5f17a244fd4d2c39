use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::ActivationFunction;
use crate::error::{NetworkError, Result};
use crate::network::network::Network;
use crate::regularization::regularization::RegularizationFunction;

/// A serializable description of a network's architecture.
///
/// Only the shape and strategies are described here; weights are generated
/// fresh by `build` and are never written out.
///
/// ```json
/// {
///   "shape": [2, 3, 2],
///   "hidden_activation": "Tanh",
///   "output_activation": "Tanh",
///   "regularization": "L2",
///   "input_ids": ["0", "1"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Node count per layer, input first.
    pub shape: Vec<usize>,
    pub hidden_activation: ActivationFunction,
    pub output_activation: ActivationFunction,
    /// Applied to every link; absent means no regularization.
    #[serde(default)]
    pub regularization: Option<RegularizationFunction>,
    /// One id per input node.
    pub input_ids: Vec<String>,
    /// Start every weight and bias at exactly 0.
    #[serde(default)]
    pub init_zero: bool,
}

impl NetworkSpec {
    pub fn build(&self) -> Result<Network> {
        self.build_with_rng(&mut rand::thread_rng())
    }

    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Network> {
        Network::build_with_rng(
            &self.shape,
            self.hidden_activation,
            self.output_activation,
            self.regularization,
            &self.input_ids,
            self.init_zero,
            rng,
        )
    }

    pub fn from_json_str(json: &str) -> Result<NetworkSpec> {
        serde_json::from_str(json)
            .map_err(|e| NetworkError::InvalidConfig(format!("network spec: {e}")))
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
