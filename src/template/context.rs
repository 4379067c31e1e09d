// ABOUTME: Template context management for rendering
// ABOUTME: Builds the key/value map templates are evaluated against from variables, files and JSON

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;

use super::error::{Result, TemplateError};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TemplateContext {
    values: Map<String, JsonValue>,
}

impl TemplateContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from plain string variables
    pub fn from_variables(variables: &HashMap<String, String>) -> Self {
        let mut context = Self::new();
        context.extend_variables(variables.clone());
        context
    }

    /// Wrap a JSON object. Any other JSON value is rejected.
    pub fn from_json(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(values) => Ok(Self { values }),
            other => Err(TemplateError::InvalidContext(json_kind(&other).to_string())),
        }
    }

    /// Add or update a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a value
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key)
    }

    /// Add multiple string variables, overriding existing keys
    pub fn extend_variables(&mut self, vars: HashMap<String, String>) {
        for (key, value) in vars {
            self.values.insert(key, JsonValue::String(value));
        }
    }

    /// Overlay another context; its keys win
    pub fn merge(&mut self, other: TemplateContext) {
        self.values.extend(other.values);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Convert context to JSON for handlebars rendering
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.values.clone())
    }

    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.values
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
