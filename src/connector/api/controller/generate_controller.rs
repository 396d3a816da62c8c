use anyhow::Result;

use crate::cli::OutputFormat;
use crate::domain::{ApiResponse, SessionPhase};

use super::super::Container;
use super::topic_cards::{format_topics, spinner, CREDENTIAL_PROMPT};

const CREDENTIAL_HINT: &str =
    "Set GEMINI_API_KEY to a valid key, or run `thesis-topics interactive` to enter one.";

pub struct GenerateController<'a> {
    container: &'a Container,
}

impl<'a> GenerateController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn generate(&self, keywords: Vec<String>, format: OutputFormat) -> Result<String> {
        let mut session = self.container.session();

        let progress = (format == OutputFormat::Text).then(|| spinner("در حال پردازش..."));
        let phase = session.submit(keywords.join(" ")).await;
        if let Some(progress) = progress {
            progress.finish_and_clear();
        }

        let message = session.error().unwrap_or_default().to_string();
        match phase {
            SessionPhase::Success => {
                let topics = session.topics().unwrap_or_default();
                Ok(match format {
                    OutputFormat::Json => {
                        serde_json::to_string_pretty(&ApiResponse::new(topics.to_vec()))?
                    }
                    OutputFormat::Text => format_topics(topics),
                })
            }
            SessionPhase::CredentialPromptShown => {
                anyhow::bail!("{message}\n\n{CREDENTIAL_PROMPT}\n{CREDENTIAL_HINT}")
            }
            _ => anyhow::bail!("{message}"),
        }
    }
}
