use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use tracing::debug;
use weather_time_core::{
    Config, EnvCredentials, OpenWeatherProvider, ToolRegistry, ToolResult, TzfResolver,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-time", version, about = "Weather and local-time tools for agents")]
pub struct Cli {
    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather for a city.
    Weather { city: String },

    /// Show the current local time in a city.
    Time { city: String },

    /// Print the tool descriptors as JSON.
    Tools,

    /// Call a tool by name with JSON arguments and print the raw result.
    Call {
        /// Tool name, e.g. "get_weather".
        tool: String,

        /// JSON argument object, e.g. '{"city": "Paris"}'.
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        debug!(?config.endpoints, "loaded configuration");

        match self.command {
            Command::Configure => {
                configure(config, self.config)?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Weather { city } => {
                let result = registry(&config).call("get_weather", city_args(&city)).await;
                Ok(print_report(&result))
            }
            Command::Time { city } => {
                let result = registry(&config).call("get_current_time", city_args(&city)).await;
                Ok(print_report(&result))
            }
            Command::Tools => {
                let descriptors = registry(&config).descriptors();
                let json = serde_json::to_string_pretty(&descriptors)
                    .context("Failed to serialize tool descriptors")?;
                println!("{json}");
                Ok(ExitCode::SUCCESS)
            }
            Command::Call { tool, args } => {
                let arguments: serde_json::Value = serde_json::from_str(&args)
                    .with_context(|| format!("Tool arguments are not valid JSON: {args}"))?;
                let result = registry(&config).call(&tool, arguments).await;
                let json = serde_json::to_string_pretty(&result)
                    .context("Failed to serialize tool result")?;
                println!("{json}");
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn registry(config: &Config) -> ToolRegistry {
    ToolRegistry::standard(
        Arc::new(OpenWeatherProvider::new(config.endpoints.clone())),
        Arc::new(EnvCredentials::new(config.api_key.clone())),
        Arc::new(TzfResolver::new()),
    )
}

fn city_args(city: &str) -> serde_json::Value {
    serde_json::json!({ "city": city })
}

fn print_report(result: &ToolResult) -> ExitCode {
    match result {
        ToolResult::Success { report } => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        ToolResult::Error { message } => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn configure(mut config: Config, path: Option<PathBuf>) -> Result<()> {
    let key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to remove the stored key")
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(&key);

    let saved = match path {
        Some(path) => {
            config.save_to(&path)?;
            path
        }
        None => config.save()?,
    };

    println!("Saved configuration to {}", saved.display());
    Ok(())
}
