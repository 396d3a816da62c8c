use std::sync::Arc;

use tracing::debug;

use crate::application::{CredentialAccess, TopicGenerator, TopicSession};
use crate::connector::adapter::{
    CredentialStore, GeminiClient, MockTopicGenerator, TerminalCredentialSelector, TerminalInput,
};

#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    /// Use the offline generator instead of calling Gemini.
    pub mock: bool,
    /// Overrides `GEMINI_MODEL`.
    pub model: Option<String>,
    /// Overrides `GEMINI_BASE_URL`.
    pub base_url: Option<String>,
}

pub struct Container {
    generator: Arc<dyn TopicGenerator>,
    credentials: CredentialStore,
    input: TerminalInput,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let credentials = CredentialStore::from_env();

        let generator: Arc<dyn TopicGenerator> = if config.mock {
            debug!("Using mock topic generator");
            Arc::new(MockTopicGenerator::new())
        } else {
            let client =
                GeminiClient::with_overrides(credentials.clone(), config.model, config.base_url);
            debug!(
                "Using Gemini model {} (API key configured: {})",
                client.model_name(),
                credentials.is_configured()
            );
            Arc::new(client)
        };

        Self::with_parts(generator, credentials, TerminalInput::stdin())
    }

    pub fn with_parts(
        generator: Arc<dyn TopicGenerator>,
        credentials: CredentialStore,
        input: TerminalInput,
    ) -> Self {
        Self {
            generator,
            credentials,
            input,
        }
    }

    /// A session for one-shot use, where nobody is around to pick a new key.
    pub fn session(&self) -> TopicSession {
        TopicSession::new(self.generator.clone(), CredentialAccess::Unavailable)
    }

    /// A session whose credential prompt asks for a new key on the terminal.
    pub fn interactive_session(&self) -> TopicSession {
        let selector =
            TerminalCredentialSelector::new(self.input.clone(), self.credentials.clone());
        TopicSession::new(
            self.generator.clone(),
            CredentialAccess::available(Arc::new(selector)),
        )
    }

    pub fn input(&self) -> &TerminalInput {
        &self.input
    }
}
