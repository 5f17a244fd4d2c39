use serde::{Serialize, Deserialize};

use crate::error::{NetworkError, Result};

/// Hyperparameters for a `Trainer`.
///
/// # Fields
/// - `learning_rate`  — copied onto the network when the trainer is created
/// - `momentum`       — accepted and stored, not used by the update rule
/// - `batch_size`     — samples per weight update; must be at least 1
/// - `regularization` — copied onto the network's regularization rate
///
/// Every field has a default, so a JSON config only needs the ones it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParameters {
    pub learning_rate: f64,
    pub momentum: f64,
    pub batch_size: usize,
    pub regularization: f64,
}

impl Default for TrainingParameters {
    fn default() -> Self {
        TrainingParameters {
            learning_rate: 0.1,
            momentum: 0.9,
            batch_size: 32,
            regularization: 0.0001,
        }
    }
}

impl TrainingParameters {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(NetworkError::InvalidConfig("batch_size must be at least 1".to_owned()));
        }
        if !self.learning_rate.is_finite() || !self.regularization.is_finite() {
            return Err(NetworkError::InvalidConfig(
                "learning_rate and regularization must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<TrainingParameters> {
        let params: TrainingParameters = serde_json::from_str(json)
            .map_err(|e| NetworkError::InvalidConfig(format!("training parameters: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    pub fn load_json(path: &str) -> Result<TrainingParameters> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| NetworkError::InvalidConfig(format!("{path}: {e}")))?;
        TrainingParameters::from_json_str(&json)
    }
}
