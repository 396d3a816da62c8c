use async_trait::async_trait;
use tracing::debug;

use crate::application::TopicGenerator;
use crate::domain::{ApiResponse, DomainError, ThesisTopic};

/// Separators accepted between keywords: ASCII and Arabic-script commas, and newlines.
const KEYWORD_SEPARATORS: [char; 3] = [',', '،', '\n'];

/// Offline [`TopicGenerator`] that derives one topic per keyword without any
/// network access. Output is a pure function of the input.
pub struct MockTopicGenerator;

impl MockTopicGenerator {
    pub fn new() -> Self {
        Self
    }

    fn split_keywords(keywords: &str) -> Vec<String> {
        keywords
            .split(&KEYWORD_SEPARATORS[..])
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn topic_for(keyword: &str, all: &[String]) -> ThesisTopic {
        let related: Vec<String> = std::iter::once(keyword.to_string())
            .chain(all.iter().filter(|k| k.as_str() != keyword).cloned())
            .collect();

        ThesisTopic::new(
            format!("بررسی نقش {keyword} در پژوهش‌های میان‌رشته‌ای"),
            format!(
                "این پژوهش کاربردهای {keyword} را در کنار {} مطالعه می‌کند.",
                related.join("، ")
            ),
            related,
        )
        .with_research_questions(vec![
            format!("{keyword} چه تأثیری بر نتایج پژوهش دارد؟"),
            format!("چالش‌های اصلی به‌کارگیری {keyword} کدام‌اند؟"),
        ])
    }
}

impl Default for MockTopicGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TopicGenerator for MockTopicGenerator {
    async fn generate(&self, keywords: &str) -> Result<ApiResponse, DomainError> {
        let keywords = Self::split_keywords(keywords);
        debug!("MockTopicGenerator: {} keywords", keywords.len());

        let topics = keywords
            .iter()
            .map(|k| Self::topic_for(k, &keywords))
            .collect();

        Ok(ApiResponse::new(topics))
    }

    fn model_name(&self) -> &str {
        "mock-topics"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_one_topic_per_keyword() {
        let generator = MockTopicGenerator::new();
        let response = generator
            .generate("یادگیری ماشین، سلامت, robotics")
            .await
            .unwrap();

        assert_eq!(response.len(), 3);
        assert_eq!(response.topics()[2].keywords()[0], "robotics");
        assert!(response.topics().iter().all(|t| t.has_research_questions()));
    }

    #[tokio::test]
    async fn test_output_is_deterministic() {
        let generator = MockTopicGenerator::new();
        let first = generator.generate("a, b").await.unwrap();
        let second = generator.generate("a, b").await.unwrap();
        assert_eq!(first, second);
    }
}
