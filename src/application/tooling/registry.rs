use super::clock::ClockTool;
use super::error::ToolError;
use super::weather::WeatherTool;
use crate::config::WeatherConfig;
use crate::domain::{ToolCallRequest, ToolDeclaration};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A locally executable function the model may call.
#[async_trait]
pub trait Tool: Send + Sync {
    fn declaration(&self) -> &ToolDeclaration;

    async fn invoke(&self, request: &ToolCallRequest) -> Result<Map<String, Value>, ToolError>;
}

/// Fixed set of tools, built once at startup and shared read-only.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the clock and weather tools.
    pub fn with_default_tools(weather: WeatherConfig) -> Result<Self, reqwest::Error> {
        let mut registry = Self::new();
        registry.register(ClockTool::new());
        registry.register(WeatherTool::new(weather)?);
        Ok(registry)
    }

    /// Adds a tool; a later registration under the same name replaces the earlier one.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.declaration().name.clone();
        let tool: Arc<dyn Tool> = Arc::new(tool);
        match self.index.get(&name) {
            Some(&slot) => self.tools[slot] = tool,
            None => {
                self.index.insert(name.clone(), self.tools.len());
                self.tools.push(tool);
            }
        }
        debug!(tool = %name, "Registered tool");
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&slot| Arc::clone(&self.tools[slot]))
    }

    /// Declarations in registration order.
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        self.tools
            .iter()
            .map(|tool| tool.declaration().clone())
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools
            .iter()
            .map(|tool| tool.declaration().name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParameterSchema;

    struct Echo(ToolDeclaration);

    #[async_trait]
    impl Tool for Echo {
        fn declaration(&self) -> &ToolDeclaration {
            &self.0
        }

        async fn invoke(
            &self,
            request: &ToolCallRequest,
        ) -> Result<Map<String, Value>, ToolError> {
            Ok(request.args.clone())
        }
    }

    fn echo(name: &str, description: &str) -> Echo {
        Echo(ToolDeclaration::new(name, description, ParameterSchema::new()))
    }

    #[test]
    fn declarations_follow_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(echo("b", "second"));
        registry.register(echo("a", "first"));

        assert_eq!(registry.names(), vec!["b", "a"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn re_registering_replaces_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(echo("a", "old"));
        registry.register(echo("a", "new"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.declarations()[0].description, "new");
    }

    #[test]
    fn default_registry_exposes_clock_and_weather() {
        let registry = ToolRegistry::with_default_tools(WeatherConfig {
            endpoint: "http://127.0.0.1:9".into(),
            api_key: None,
            units: "metric".into(),
            lang: "pt_br".into(),
            timeout: std::time::Duration::from_secs(1),
        })
        .expect("registry builds");

        assert_eq!(registry.names(), vec!["getCurrentTime", "getWeather"]);
        assert!(registry.get("getWeather").is_some());
        assert!(registry.get("getHoroscope").is_none());
    }
}
