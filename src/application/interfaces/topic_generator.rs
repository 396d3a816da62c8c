use async_trait::async_trait;

use crate::domain::{ApiResponse, DomainError};

/// Turns raw keyword text into structured thesis topic suggestions.
///
/// Implementors own prompt construction, transport and response validation.
/// Errors surface unchanged except for malformed payloads, which are reported
/// as [`DomainError::Parse`] or [`DomainError::Shape`].
#[async_trait]
pub trait TopicGenerator: Send + Sync {
    async fn generate(&self, keywords: &str) -> Result<ApiResponse, DomainError>;

    fn model_name(&self) -> &str;
}
