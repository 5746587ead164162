//! `runner` crate — the decrypt runner: existence check, primary attempt,
//! single fallback, and the console report of each step.

pub mod models;
pub mod error;
pub mod executor;

pub use models::{exit_code, Method, EXIT_FAILURE, EXIT_SUCCESS};
pub use error::RunError;
pub use executor::DecryptRunner;

#[cfg(test)]
mod executor_tests;
