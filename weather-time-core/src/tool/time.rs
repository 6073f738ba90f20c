use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    credentials::CredentialSource,
    error::LookupError,
    model::ToolResult,
    provider::DataProvider,
    text::title_case,
    timezone::{TimezoneResolver, format_local_time},
};

use super::CityTool;

const MISSING_KEY: &str = "Missing API key in .env file";

/// Current local time in a city: geocode, resolve the zone offline, format.
#[derive(Debug, Clone)]
pub struct TimeTool {
    provider: Arc<dyn DataProvider>,
    credentials: Arc<dyn CredentialSource>,
    resolver: Arc<dyn TimezoneResolver>,
    clock: fn() -> DateTime<Utc>,
}

impl TimeTool {
    pub fn new(
        provider: Arc<dyn DataProvider>,
        credentials: Arc<dyn CredentialSource>,
        resolver: Arc<dyn TimezoneResolver>,
    ) -> Self {
        Self {
            provider,
            credentials,
            resolver,
            clock: Utc::now,
        }
    }

    /// Replaces the source of "now".
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn report(&self, city: &str) -> Result<String, LookupError> {
        let api_key = self
            .credentials
            .api_key()
            .ok_or(LookupError::MissingCredential(MISSING_KEY))?;

        if city.trim().is_empty() {
            return Err(LookupError::EmptyCity);
        }

        let point = self
            .provider
            .geocode(city, &api_key)
            .await?
            .ok_or_else(|| LookupError::NotFound(format!("City '{city}' not found.")))?;

        let tz_name = self.resolver.timezone_at(point).ok_or_else(|| {
            LookupError::NotFound(format!("Could not determine time zone for '{city}'."))
        })?;
        debug!(city, lat = point.latitude, lon = point.longitude, tz = %tz_name, "resolved time zone");

        let timestamp = format_local_time((self.clock)(), &tz_name)?;

        Ok(format!("The current time in {} is {}", title_case(city), timestamp))
    }
}

#[async_trait]
impl CityTool for TimeTool {
    fn name(&self) -> &'static str {
        "get_current_time"
    }

    fn description(&self) -> &'static str {
        "Returns the current local time in a city, resolved from its coordinates and time zone."
    }

    async fn lookup(&self, city: &str) -> ToolResult {
        match self.report(city).await {
            Ok(report) => {
                info!(city, "time lookup succeeded");
                ToolResult::success(report)
            }
            Err(err) if err.is_not_found() => {
                info!(city, error = %err, "time lookup found nothing");
                ToolResult::error(err.to_string())
            }
            Err(err) => {
                warn!(city, error = %err, "time lookup failed");
                ToolResult::error(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        credentials::StaticCredentials,
        model::GeoPoint,
        tool::testing::{FakeProvider, FakeResolver},
    };
    use chrono::TimeZone;
    use std::sync::atomic::Ordering;

    const LONDON: GeoPoint = GeoPoint { latitude: 51.5073, longitude: -0.1276 };

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 13, 3, 9).unwrap()
    }

    fn tool(
        provider: &Arc<FakeProvider>,
        resolver: &Arc<FakeResolver>,
        key: Option<&str>,
    ) -> TimeTool {
        TimeTool::new(
            provider.clone(),
            Arc::new(StaticCredentials(key.map(str::to_owned))),
            resolver.clone(),
        )
        .with_clock(fixed_now)
    }

    fn located(point: Option<GeoPoint>) -> Arc<FakeProvider> {
        Arc::new(FakeProvider {
            location: point,
            ..Default::default()
        })
    }

    fn zone(name: Option<&'static str>) -> Arc<FakeResolver> {
        Arc::new(FakeResolver {
            zone: name,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn reports_local_time_for_resolved_zone() {
        let provider = located(Some(LONDON));
        let resolver = zone(Some("Europe/London"));
        let res = tool(&provider, &resolver, Some("KEY")).lookup("london").await;

        assert_eq!(
            res,
            ToolResult::success("The current time in London is 2025-06-01 14:03:09 BST+0100")
        );
        assert_eq!(provider.geocode_calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_provider() {
        let provider = located(Some(LONDON));
        let resolver = zone(Some("Europe/London"));
        let res = tool(&provider, &resolver, None).lookup("london").await;

        assert_eq!(res, ToolResult::error(MISSING_KEY));
        assert_eq!(provider.calls(), 0);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_city_skips_timezone_resolution() {
        let provider = located(None);
        let resolver = zone(Some("Europe/London"));
        let res = tool(&provider, &resolver, Some("KEY")).lookup("atlantis").await;

        assert_eq!(res, ToolResult::error("City 'atlantis' not found."));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unresolvable_zone_names_the_city() {
        let provider = located(Some(GeoPoint { latitude: 0.0, longitude: -30.0 }));
        let resolver = zone(None);
        let res = tool(&provider, &resolver, Some("KEY")).lookup("point nemo").await;

        assert_eq!(res, ToolResult::error("Could not determine time zone for 'point nemo'."));
    }

    #[tokio::test]
    async fn zone_unknown_to_tz_database_is_an_error() {
        let provider = located(Some(LONDON));
        let resolver = zone(Some("Nowhere/Special"));
        let res = tool(&provider, &resolver, Some("KEY")).lookup("london").await;

        assert_eq!(res, ToolResult::error("Unknown time zone 'Nowhere/Special'"));
    }

    #[tokio::test]
    async fn geocoding_fault_text_becomes_the_message() {
        let provider = Arc::new(FakeProvider {
            fault: Some("dns error: failed to lookup address information"),
            ..Default::default()
        });
        let resolver = zone(Some("Europe/London"));
        let res = tool(&provider, &resolver, Some("KEY")).lookup("london").await;

        assert_eq!(res, ToolResult::error("dns error: failed to lookup address information"));
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 0);
    }
}
