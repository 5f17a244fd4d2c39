use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{NetworkError, Result};
use crate::train::batch_stats::BatchStats;
use crate::train::trainer::Trainer;

/// Feeds a whole dataset through `trainer` `passes` times, shuffling sample
/// order with `rng` before each pass.
///
/// Batches are filled across pass boundaries exactly as repeated calls to
/// `Trainer::train` would fill them. Returns the summary of the last batch
/// processed, or `None` if no batch filled up.
pub fn train_loop<R: Rng + ?Sized>(
    trainer: &mut Trainer,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    passes: usize,
    rng: &mut R,
) -> Result<Option<BatchStats>> {
    if inputs.len() != targets.len() {
        return Err(NetworkError::InvalidConfig(format!(
            "{} inputs but {} targets",
            inputs.len(),
            targets.len()
        )));
    }

    let mut last = None;
    let mut indices: Vec<usize> = (0..inputs.len()).collect();

    for _ in 0..passes {
        indices.shuffle(rng);
        for &idx in &indices {
            if let Some(stats) = trainer.train(&inputs[idx], &targets[idx])? {
                last = Some(stats);
            }
        }
    }

    Ok(last)
}
