use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::DomainError;

/// A host-provided way to let the user pick a different API key.
#[async_trait]
pub trait CredentialSelector: Send + Sync {
    /// Runs the selection flow. `Ok` means a key was chosen and stored where the
    /// topic generator will read it on its next call.
    async fn select(&self) -> Result<(), DomainError>;
}

/// Whether the current environment can offer key re-selection at all.
#[derive(Clone, Default)]
pub enum CredentialAccess {
    Available(Arc<dyn CredentialSelector>),
    #[default]
    Unavailable,
}

impl CredentialAccess {
    pub fn available(selector: Arc<dyn CredentialSelector>) -> Self {
        Self::Available(selector)
    }
}

impl std::fmt::Debug for CredentialAccess {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(_) => f.write_str("CredentialAccess::Available"),
            Self::Unavailable => f.write_str("CredentialAccess::Unavailable"),
        }
    }
}
