use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::LookupError,
    model::{CurrentConditions, GeoPoint},
};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Remote source of weather and geocoding data.
///
/// One request per call, no retries. Implementations map a rejected request
/// to [`LookupError::Provider`] and anything they cannot decode to
/// [`LookupError::Decode`] or [`LookupError::Malformed`].
#[async_trait]
pub trait DataProvider: Send + Sync + Debug {
    async fn current_weather(
        &self,
        city: &str,
        api_key: &str,
    ) -> Result<CurrentConditions, LookupError>;

    /// Best match for `city`, or `None` when the provider knows no such place.
    async fn geocode(&self, city: &str, api_key: &str) -> Result<Option<GeoPoint>, LookupError>;
}
