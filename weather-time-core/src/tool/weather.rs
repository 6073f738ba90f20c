use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    credentials::CredentialSource,
    error::LookupError,
    model::ToolResult,
    provider::DataProvider,
    text::{capitalize, celsius_to_fahrenheit, format_decimal, title_case},
};

use super::CityTool;

const MISSING_KEY: &str = "API key not found. Please set OPENWEATHER_API_KEY in your .env file.";

/// Current conditions for a city.
#[derive(Debug, Clone)]
pub struct WeatherTool {
    provider: Arc<dyn DataProvider>,
    credentials: Arc<dyn CredentialSource>,
}

impl WeatherTool {
    pub fn new(provider: Arc<dyn DataProvider>, credentials: Arc<dyn CredentialSource>) -> Self {
        Self { provider, credentials }
    }

    pub async fn report(&self, city: &str) -> Result<String, LookupError> {
        let api_key = self
            .credentials
            .api_key()
            .ok_or(LookupError::MissingCredential(MISSING_KEY))?;

        if city.trim().is_empty() {
            return Err(LookupError::EmptyCity);
        }

        let conditions = self.provider.current_weather(city, &api_key).await?;

        let fahrenheit = celsius_to_fahrenheit(conditions.temperature_c);

        Ok(format!(
            "The weather in {} is {} with a temperature of {}°C ({}°F).",
            title_case(city),
            capitalize(&conditions.description),
            conditions.temperature_text,
            format_decimal(fahrenheit),
        ))
    }
}

#[async_trait]
impl CityTool for WeatherTool {
    fn name(&self) -> &'static str {
        "get_weather"
    }

    fn description(&self) -> &'static str {
        "Fetches real-time weather for a city: condition description and temperature in Celsius and Fahrenheit."
    }

    async fn lookup(&self, city: &str) -> ToolResult {
        match self.report(city).await {
            Ok(report) => {
                info!(city, "weather lookup succeeded");
                ToolResult::success(report)
            }
            Err(err) => {
                warn!(city, error = %err, "weather lookup failed");
                ToolResult::error(err.to_string())
            }
        }
    }
}
