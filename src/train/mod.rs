pub mod trainer;
pub mod batch_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::Trainer;
pub use batch_stats::BatchStats;
pub use train_config::TrainingParameters;
pub use loop_fn::train_loop;
