use crate::domain::{CompletionRequest, ResponseSchema};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// How many topics the model is asked to suggest per submission.
const TOPIC_COUNT: usize = 5;

const TOPIC_FIELDS: [&str; 4] = [
    "title",
    "description",
    "keywords",
    "potentialResearchQuestions",
];

/// Builds the fixed instruction text and output schema for one set of keywords.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    model: String,
}

impl PromptBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build(&self, keywords: &str) -> CompletionRequest {
        CompletionRequest::new(
            self.model.clone(),
            Self::generation_prompt(keywords),
            Self::topics_schema(),
        )
    }

    fn generation_prompt(keywords: &str) -> String {
        format!(
            "You are an experienced academic supervisor helping a graduate student choose a thesis topic.\n\
             Based on the following keywords, suggest {TOPIC_COUNT} distinct, original and researchable thesis topics.\n\
             \n\
             Keywords: {}\n\
             \n\
             For each topic provide:\n\
             - title: a concise, academic thesis title\n\
             - description: two or three sentences explaining the scope and significance of the research\n\
             - keywords: the most relevant keywords for the topic\n\
             - potentialResearchQuestions: two or three research questions the thesis could answer\n\
             \n\
             Write every field in Persian (Farsi). Respond only with JSON matching the provided schema.",
            keywords.trim()
        )
    }

    /// `{topics: [{title, description, keywords[], potentialResearchQuestions[]?}]}`
    pub fn topics_schema() -> ResponseSchema {
        let topic = ResponseSchema::object()
            .with_property("title", ResponseSchema::string())
            .with_property("description", ResponseSchema::string())
            .with_property("keywords", ResponseSchema::array(ResponseSchema::string()))
            .with_property(
                "potentialResearchQuestions",
                ResponseSchema::array(ResponseSchema::string()),
            )
            .with_required(&["title", "description", "keywords"])
            .with_property_ordering(&TOPIC_FIELDS);

        ResponseSchema::object()
            .with_property("topics", ResponseSchema::array(topic))
            .with_required(&["topics"])
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}
