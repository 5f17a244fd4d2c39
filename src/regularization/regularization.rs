use serde::{Serialize, Deserialize};

/// Penalty applied to a single link weight during the update step.
///
/// `L1` additionally prunes a link whose weight the penalty would push
/// across zero; see `Network::update_weights`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegularizationFunction {
    L1,
    L2,
}

impl RegularizationFunction {
    pub fn calculate(&self, weight: f64) -> f64 {
        match self {
            RegularizationFunction::L1 => weight.abs(),
            RegularizationFunction::L2 => 0.5 * weight * weight,
        }
    }

    pub fn derivative(&self, weight: f64) -> f64 {
        match self {
            RegularizationFunction::L1 => {
                if weight < 0.0 {
                    -1.0
                } else if weight > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            RegularizationFunction::L2 => weight,
        }
    }
}
