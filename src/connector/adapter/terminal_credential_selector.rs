use async_trait::async_trait;
use tracing::debug;

use crate::application::CredentialSelector;
use crate::connector::adapter::{CredentialStore, TerminalInput};
use crate::domain::DomainError;

const KEY_PROMPT: &str = "Gemini API key: ";

/// Asks for a replacement API key on the terminal and stores it for the next
/// generator call.
pub struct TerminalCredentialSelector {
    input: TerminalInput,
    store: CredentialStore,
}

impl TerminalCredentialSelector {
    pub fn new(input: TerminalInput, store: CredentialStore) -> Self {
        Self { input, store }
    }
}

#[async_trait]
impl CredentialSelector for TerminalCredentialSelector {
    async fn select(&self) -> Result<(), DomainError> {
        let Some(line) = self.input.read_line(KEY_PROMPT).await? else {
            return Err(DomainError::credential_selection("input closed"));
        };

        let key = line.trim();
        if key.is_empty() {
            return Err(DomainError::credential_selection("no key entered"));
        }

        self.store.replace(key);
        debug!("Stored a new API key ({} chars)", key.len());
        Ok(())
    }
}
