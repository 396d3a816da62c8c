use serde::{Deserialize, Serialize};

/// One suggested thesis subject as returned by the completion service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThesisTopic {
    title: String,
    description: String,
    keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    potential_research_questions: Option<Vec<String>>,
}

impl ThesisTopic {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            keywords,
            potential_research_questions: None,
        }
    }

    pub fn with_research_questions(mut self, questions: Vec<String>) -> Self {
        self.potential_research_questions = Some(questions);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn potential_research_questions(&self) -> Option<&[String]> {
        self.potential_research_questions.as_deref()
    }

    pub fn has_research_questions(&self) -> bool {
        self.potential_research_questions
            .as_ref()
            .is_some_and(|q| !q.is_empty())
    }
}

/// The structured payload of one successful completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    topics: Vec<ThesisTopic>,
}

impl ApiResponse {
    pub fn new(topics: Vec<ThesisTopic>) -> Self {
        Self { topics }
    }

    pub fn topics(&self) -> &[ThesisTopic] {
        &self.topics
    }

    pub fn into_topics(self) -> Vec<ThesisTopic> {
        self.topics
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}
