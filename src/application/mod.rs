//! # Application Layer
//!
//! Adapter interfaces and the topic session that orchestrates a submission.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
