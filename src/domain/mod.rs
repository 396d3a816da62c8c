//! # Domain Layer
//!
//! Topic models, the completion request shape, and the rules for building
//! prompts and classifying failures.
//! This layer is independent of external frameworks and infrastructure.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
