use super::error::ToolError;
use super::registry::Tool;
use crate::domain::{ParameterSchema, ToolCallRequest, ToolDeclaration};
use async_trait::async_trait;
use chrono::Local;
use serde_json::{Map, Value};

pub const CLOCK_TOOL_NAME: &str = "getCurrentTime";

/// Local date/time layout (day/month/year, 24h clock).
pub const CLOCK_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Reads the server's local clock.
pub struct ClockTool {
    declaration: ToolDeclaration,
}

impl ClockTool {
    pub fn new() -> Self {
        Self {
            declaration: ToolDeclaration::new(
                CLOCK_TOOL_NAME,
                "Obtém a data e hora atuais. Use quando o usuário perguntar sobre horas, data, ou tempo atual.",
                ParameterSchema::new(),
            ),
        }
    }
}

impl Default for ClockTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ClockTool {
    fn declaration(&self) -> &ToolDeclaration {
        &self.declaration
    }

    async fn invoke(&self, _request: &ToolCallRequest) -> Result<Map<String, Value>, ToolError> {
        let now = Local::now().format(CLOCK_FORMAT).to_string();
        let mut payload = Map::new();
        payload.insert("currentTime".to_string(), Value::String(now));
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[tokio::test]
    async fn returns_parseable_timestamp_and_ignores_arguments() {
        let tool = ClockTool::new();
        let mut args = Map::new();
        args.insert("timezone".into(), Value::String("Mars/Olympus".into()));

        let payload = tool
            .invoke(&ToolCallRequest::new(CLOCK_TOOL_NAME, args))
            .await
            .expect("clock never fails");

        let rendered = payload
            .get("currentTime")
            .and_then(Value::as_str)
            .expect("currentTime string");
        assert!(NaiveDateTime::parse_from_str(rendered, CLOCK_FORMAT).is_ok());
    }

    #[test]
    fn declares_no_parameters() {
        assert!(ClockTool::new().declaration().parameters.is_empty());
    }
}
