//! Common types for all UseCases

pub mod usecase_result;

// Re-exports
pub use usecase_result::{UseCaseResult, ValidationError};
