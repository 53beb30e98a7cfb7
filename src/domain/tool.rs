use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    pub name: String,
    pub args: Map<String, Value>,
}

impl ToolCallRequest {
    pub fn new(name: impl Into<String>, args: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// String argument lookup; blank strings count as absent.
    pub fn str_arg(&self, key: &str) -> Option<&str> {
        self.args
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Outcome of a tool invocation as seen by the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success(Map<String, Value>),
    Error(String),
}

/// The function response handed back to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallResult {
    pub name: String,
    pub outcome: ToolOutcome,
}

impl ToolCallResult {
    pub fn success(name: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            outcome: ToolOutcome::Success(payload),
        }
    }

    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: ToolOutcome::Error(message.into()),
        }
    }

    /// Rebuilds a result from a `functionResponse.response` mapping. A mapping
    /// whose only key is a string `error` is an error result.
    pub fn from_response(name: impl Into<String>, response: Map<String, Value>) -> Self {
        if response.len() == 1 {
            if let Some(Value::String(message)) = response.get("error") {
                return Self::error(name, message.clone());
            }
        }
        Self::success(name, response)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, ToolOutcome::Error(_))
    }

    pub fn response_payload(&self) -> Map<String, Value> {
        match &self.outcome {
            ToolOutcome::Success(payload) => payload.clone(),
            ToolOutcome::Error(message) => {
                let mut payload = Map::new();
                payload.insert("error".to_string(), Value::String(message.clone()));
                payload
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Integer,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub kind: ParameterType,
    pub description: String,
}

/// Object schema describing a tool's named parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSchema {
    properties: BTreeMap<String, ParameterSpec>,
    required: Vec<String>,
}

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn optional(
        mut self,
        name: impl Into<String>,
        kind: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        self.properties.insert(
            name.into(),
            ParameterSpec {
                kind,
                description: description.into(),
            },
        );
        self
    }

    pub fn required(
        self,
        name: impl Into<String>,
        kind: ParameterType,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let mut schema = self.optional(name.clone(), kind, description);
        if !schema.required.contains(&name) {
            schema.required.push(name);
        }
        schema
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn required_names(&self) -> &[String] {
        &self.required
    }
}

impl Serialize for ParameterSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.required.is_empty() { 2 } else { 3 };
        let mut state = serializer.serialize_struct("ParameterSchema", fields)?;
        state.serialize_field("type", "object")?;
        state.serialize_field("properties", &self.properties)?;
        if !self.required.is_empty() {
            state.serialize_field("required", &self.required)?;
        }
        state.end()
    }
}

/// A tool as announced to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ToolDeclaration {
    pub name: String,
    pub description: String,
    // Gemini rejects object schemas without properties.
    #[serde(skip_serializing_if = "ParameterSchema::is_empty")]
    #[schema(value_type = Object)]
    pub parameters: ParameterSchema,
}

impl ToolDeclaration {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: ParameterSchema,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}
