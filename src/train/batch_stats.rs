use serde::{Serialize, Deserialize};

/// Summary of one processed mini-batch, returned by `Trainer::train`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    /// 1-based count of batches processed so far, this one included.
    pub epoch: usize,
    /// Samples in this batch.
    pub samples: usize,
    /// Mean over the batch of ½·Σ(target − output)², measured before the update.
    pub mean_error: f64,
}
