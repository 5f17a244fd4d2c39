use log::debug;

use crate::error::{NetworkError, Result};
use crate::loss::error_function::ErrorFunction;
use crate::loss::mse::MseError;
use crate::network::gradients::Gradients;
use crate::network::network::Network;
use crate::train::batch_stats::BatchStats;
use crate::train::train_config::TrainingParameters;

/// Mini-batch trainer.
///
/// Samples are buffered until `batch_size` of them are pending; the batch is
/// then run forward and backward sample by sample, and the network gets
/// exactly one weight update for the whole batch.
#[derive(Debug, Clone)]
pub struct Trainer {
    network: Network,
    parameters: TrainingParameters,
    grads: Gradients,
    batch_inputs: Vec<Vec<f64>>,
    batch_targets: Vec<Vec<f64>>,
    current_error: f64,
    epoch_count: usize,
}

impl Trainer {
    /// Takes ownership of `network` and applies the learning and
    /// regularization rates from `parameters` to it.
    pub fn new(mut network: Network, parameters: TrainingParameters) -> Result<Trainer> {
        parameters.validate()?;
        network.learning_rate = parameters.learning_rate;
        network.regularization_rate = parameters.regularization;
        let grads = network.gradients();
        Ok(Trainer {
            network,
            batch_inputs: Vec::with_capacity(parameters.batch_size),
            batch_targets: Vec::with_capacity(parameters.batch_size),
            parameters,
            grads,
            current_error: 0.0,
            epoch_count: 0,
        })
    }

    /// Queues one sample. Returns the batch summary when this sample filled
    /// the batch and a weight update was applied, `None` otherwise.
    ///
    /// Malformed samples are rejected here, before they can reach a batch.
    pub fn train(&mut self, input: &[f64], target: &[f64]) -> Result<Option<BatchStats>> {
        let input_size = self.network.input_size();
        if input.len() != input_size {
            return Err(NetworkError::InputSizeMismatch { expected: input_size, actual: input.len() });
        }
        let output_size = self.network.output_size();
        if target.len() != output_size {
            return Err(NetworkError::ArrayLengthMismatch { outputs: output_size, targets: target.len() });
        }

        self.batch_inputs.push(input.to_vec());
        self.batch_targets.push(target.to_vec());

        if self.batch_inputs.len() >= self.parameters.batch_size {
            return self.process_batch().map(Some);
        }
        Ok(None)
    }

    fn process_batch(&mut self) -> Result<BatchStats> {
        let samples = self.batch_inputs.len();

        let total_error = match self.accumulate_batch() {
            Ok(total) => total,
            Err(e) => {
                self.grads.reset();
                self.batch_inputs.clear();
                self.batch_targets.clear();
                return Err(e);
            }
        };
        self.current_error = total_error / samples as f64;

        self.network.update_weights(&mut self.grads)?;

        self.batch_inputs.clear();
        self.batch_targets.clear();
        self.epoch_count += 1;

        debug!(
            "batch processed: epoch={} samples={samples} error={:.6}",
            self.epoch_count, self.current_error
        );

        Ok(BatchStats {
            epoch: self.epoch_count,
            samples,
            mean_error: self.current_error,
        })
    }

    /// Forward + backward over every buffered sample; returns the summed error.
    fn accumulate_batch(&mut self) -> Result<f64> {
        let mut total_error = 0.0;
        for (input, target) in self.batch_inputs.iter().zip(self.batch_targets.iter()) {
            let output = self.network.forward_prop(input)?;
            total_error += MseError::total_error(&output, target)?;
            self.network.back_prop(target, ErrorFunction::MeanSquared, &mut self.grads)?;
        }
        Ok(total_error)
    }

    /// Mean error of the most recently processed batch.
    pub fn current_error(&self) -> f64 {
        self.current_error
    }

    /// Number of batches processed so far.
    pub fn epoch_count(&self) -> usize {
        self.epoch_count
    }

    /// Samples waiting for the batch to fill.
    pub fn pending(&self) -> usize {
        self.batch_inputs.len()
    }

    pub fn parameters(&self) -> &TrainingParameters {
        &self.parameters
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Mutable access for adjusting rates or weights between batches.
    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    pub fn into_network(self) -> Network {
        self.network
    }
}
