use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    config::Endpoints,
    error::LookupError,
    model::{CurrentConditions, GeoPoint},
};

use super::DataProvider;

const WEATHER_FALLBACK: &str = "Failed to fetch weather data.";
const GEOCODING_FALLBACK: &str = "Failed to fetch geocoding data.";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    endpoints: Endpoints,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            http: Client::new(),
        }
    }

    /// Sends a GET and returns the status plus the raw body.
    ///
    /// Transport errors lose the request URL on conversion into
    /// [`LookupError`], since it carries the API key.
    async fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<(StatusCode, String), LookupError> {
        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let body = res.text().await?;

        Ok((status, body))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: serde_json::Number,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwGeoMatch {
    lat: f64,
    lon: f64,
}

#[async_trait]
impl DataProvider for OpenWeatherProvider {
    async fn current_weather(
        &self,
        city: &str,
        api_key: &str,
    ) -> Result<CurrentConditions, LookupError> {
        debug!(city, url = %self.endpoints.weather_url, "requesting current weather");

        let (status, body) = self
            .get(
                &self.endpoints.weather_url,
                &[("q", city), ("appid", api_key), ("units", "metric")],
            )
            .await?;

        if !status.is_success() {
            let message = provider_message(&body).unwrap_or_else(|| WEATHER_FALLBACK.to_string());
            warn!(city, %status, %message, "weather request rejected");
            return Err(LookupError::Provider(message));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| LookupError::Malformed("Weather response contained no conditions".into()))?;

        let temp = parsed.main.temp;
        let temperature_c = temp
            .as_f64()
            .ok_or_else(|| LookupError::Malformed(format!("Temperature {temp} is out of range")))?;

        Ok(CurrentConditions {
            temperature_c,
            temperature_text: temp.to_string(),
            description,
        })
    }

    async fn geocode(&self, city: &str, api_key: &str) -> Result<Option<GeoPoint>, LookupError> {
        debug!(city, url = %self.endpoints.geocoding_url, "geocoding city");

        let (status, body) = self
            .get(
                &self.endpoints.geocoding_url,
                &[("q", city), ("limit", "1"), ("appid", api_key)],
            )
            .await?;

        if !status.is_success() {
            let message =
                provider_message(&body).unwrap_or_else(|| GEOCODING_FALLBACK.to_string());
            warn!(city, %status, %message, "geocoding request rejected");
            return Err(LookupError::Provider(message));
        }

        let matches: Vec<OwGeoMatch> = serde_json::from_str(&body)?;

        Ok(matches.into_iter().next().map(|m| GeoPoint {
            latitude: m.lat,
            longitude: m.lon,
        }))
    }
}

/// The `message` field of an OpenWeather error payload, if there is one.
fn provider_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_owned)
}
