pub mod mse;
pub mod error_function;

pub use mse::MseError;
pub use error_function::ErrorFunction;
