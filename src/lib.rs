pub mod error;
pub mod activation;
pub mod loss;
pub mod regularization;
pub mod network;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use activation::activation::ActivationFunction;
pub use loss::error_function::ErrorFunction;
pub use regularization::regularization::RegularizationFunction;
pub use network::gradients::Gradients;
pub use network::link::Link;
pub use network::network::Network;
pub use network::node::{Node, NodeRef};
pub use network::spec::NetworkSpec;
pub use train::trainer::Trainer;
pub use train::train_config::TrainingParameters;
pub use train::batch_stats::BatchStats;
pub use train::loop_fn::train_loop;
