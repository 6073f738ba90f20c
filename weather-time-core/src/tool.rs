use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::{fmt::Debug, sync::Arc};
use tracing::warn;

use crate::{
    credentials::CredentialSource, model::ToolResult, provider::DataProvider,
    timezone::TimezoneResolver,
};

pub mod time;
pub mod weather;

pub use time::TimeTool;
pub use weather::WeatherTool;

/// A tool the agent can call with a single city name.
#[async_trait]
pub trait CityTool: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Never fails: every problem comes back as [`ToolResult::Error`].
    async fn lookup(&self, city: &str) -> ToolResult;

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: city_schema(),
        }
    }
}

/// How a tool is advertised to the agent runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

fn city_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "city": {
                "type": "string",
                "description": "The name of the city, e.g. 'London' or 'New York'"
            }
        },
        "required": ["city"]
    })
}

#[derive(Debug, Deserialize)]
struct CityArgs {
    city: String,
}

/// Named tools, callable the way an agent runtime calls them.
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn CityTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the weather and current-time tools.
    pub fn standard(
        provider: Arc<dyn DataProvider>,
        credentials: Arc<dyn CredentialSource>,
        resolver: Arc<dyn TimezoneResolver>,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(WeatherTool::new(provider.clone(), credentials.clone())));
        registry.register(Arc::new(TimeTool::new(provider, credentials, resolver)));
        registry
    }

    /// Adds a tool, replacing any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn CityTool>) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn CityTool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    /// Invokes `name` with a JSON argument object like `{"city": "Paris"}`.
    pub async fn call(&self, name: &str, arguments: Value) -> ToolResult {
        let Some(tool) = self.get(name) else {
            warn!(tool = name, "call to unknown tool");
            return ToolResult::error(format!("Unknown tool '{name}'."));
        };

        match serde_json::from_value::<CityArgs>(arguments) {
            Ok(args) => tool.lookup(&args.city).await,
            Err(err) => ToolResult::error(format!("Invalid arguments for '{name}': {err}")),
        }
    }
}
