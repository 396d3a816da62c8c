//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Topic generation (Gemini over HTTP, plus an offline mock)
//! - Credential storage and terminal key re-selection
//! - The command-line api: container, router and controllers

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
