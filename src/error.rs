use std::fmt;

/// Everything that can go wrong when building, evaluating or training a network.
///
/// All variants are usage errors: they are raised before any node, link or
/// accumulator is touched, so the network is left exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Input-id count disagrees with the declared input-layer size.
    ShapeMismatch { expected: usize, actual: usize },
    /// Shape has fewer than two layers or an empty layer.
    InvalidShape(String),
    /// Forward propagation got an input vector of the wrong size.
    InputSizeMismatch { expected: usize, actual: usize },
    /// Backpropagation got a target vector of the wrong size.
    TargetSizeMismatch { expected: usize, actual: usize },
    /// Output and target vectors differ in length during error calculation.
    ArrayLengthMismatch { outputs: usize, targets: usize },
    /// A `Gradients` buffer was built for a different topology.
    GradientShapeMismatch,
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, actual } => write!(
                f,
                "number of input ids ({actual}) must match the number of input nodes ({expected})"
            ),
            Self::InvalidShape(msg) => write!(f, "invalid shape: {msg}"),
            Self::InputSizeMismatch { expected, actual } => write!(
                f,
                "input has {actual} values, input layer has {expected} nodes"
            ),
            Self::TargetSizeMismatch { expected, actual } => write!(
                f,
                "target has {actual} values, output layer has {expected} nodes"
            ),
            Self::ArrayLengthMismatch { outputs, targets } => write!(
                f,
                "output length {outputs} does not match target length {targets}"
            ),
            Self::GradientShapeMismatch => {
                write!(f, "gradient buffer does not match the network topology")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for NetworkError {}
