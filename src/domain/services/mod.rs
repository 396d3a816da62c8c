//! Pure domain services: request construction and failure classification.

mod failure_classifier;
mod prompt_builder;

pub use failure_classifier::*;
pub use prompt_builder::*;
