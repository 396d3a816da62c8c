use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    Object,
    Array,
    String,
}

/// Output schema in the shape the Gemini `responseSchema` field accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    schema_type: SchemaType,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, ResponseSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Box<ResponseSchema>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    required: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    property_ordering: Vec<String>,
}

impl ResponseSchema {
    fn of(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            properties: BTreeMap::new(),
            items: None,
            required: Vec::new(),
            property_ordering: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    pub fn array(items: ResponseSchema) -> Self {
        let mut schema = Self::of(SchemaType::Array);
        schema.items = Some(Box::new(items));
        schema
    }

    pub fn object() -> Self {
        Self::of(SchemaType::Object)
    }

    pub fn with_property(mut self, name: impl Into<String>, schema: ResponseSchema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    pub fn with_required(mut self, names: &[&str]) -> Self {
        self.required = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn with_property_ordering(mut self, names: &[&str]) -> Self {
        self.property_ordering = names.iter().map(|n| n.to_string()).collect();
        self
    }

    pub fn schema_type(&self) -> SchemaType {
        self.schema_type
    }

    pub fn property(&self, name: &str) -> Option<&ResponseSchema> {
        self.properties.get(name)
    }

    pub fn items(&self) -> Option<&ResponseSchema> {
        self.items.as_deref()
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn property_ordering(&self) -> &[String] {
        &self.property_ordering
    }
}

/// Everything needed for one structured completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    model: String,
    prompt: String,
    response_mime_type: String,
    response_schema: ResponseSchema,
}

impl CompletionRequest {
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        response_schema: ResponseSchema,
    ) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            response_mime_type: JSON_MIME_TYPE.to_string(),
            response_schema,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn response_mime_type(&self) -> &str {
        &self.response_mime_type
    }

    pub fn response_schema(&self) -> &ResponseSchema {
        &self.response_schema
    }
}
