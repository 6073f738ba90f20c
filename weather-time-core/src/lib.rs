//! Weather and local-time tools for a conversational agent.
//!
//! This crate defines:
//! - The two city tools (`get_weather`, `get_current_time`) and a registry the
//!   agent runtime calls them through
//! - The OpenWeather data provider and offline time zone resolution
//! - Configuration & credentials handling
//!
//! Every tool call returns a [`ToolResult`]; failures never escape as errors.

pub mod config;
pub mod credentials;
pub mod error;
pub mod model;
pub mod provider;
pub mod text;
pub mod timezone;
pub mod tool;

pub use config::{Config, Endpoints};
pub use credentials::{CredentialSource, EnvCredentials, StaticCredentials};
pub use error::LookupError;
pub use model::{CurrentConditions, GeoPoint, ToolResult};
pub use provider::{DataProvider, OpenWeatherProvider};
pub use timezone::{TimezoneResolver, TzfResolver};
pub use tool::{CityTool, TimeTool, ToolDescriptor, ToolRegistry, WeatherTool};
