use std::fmt::Debug;

pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Supplies the provider API key. Read on every lookup; `None` means the
/// tools must fail fast without touching the network.
pub trait CredentialSource: Send + Sync + Debug {
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from the process environment, falling back to a key taken
/// from the config file.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
    fallback: Option<String>,
}

impl EnvCredentials {
    pub fn new(fallback: Option<String>) -> Self {
        Self::with_var(API_KEY_VAR, fallback)
    }

    pub fn with_var(var: impl Into<String>, fallback: Option<String>) -> Self {
        Self { var: var.into(), fallback }
    }
}

impl CredentialSource for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.fallback.clone().filter(|key| !key.trim().is_empty()))
    }
}

/// A fixed key, or a fixed absence of one.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(pub Option<String>);

impl StaticCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.0.clone().filter(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNSET_VAR: &str = "WEATHER_TIME_TEST_KEY_THAT_IS_NEVER_SET";

    #[test]
    fn env_falls_back_to_config_key() {
        let creds = EnvCredentials::with_var(UNSET_VAR, Some("from-config".into()));
        assert_eq!(creds.api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn env_without_any_key_is_none() {
        let creds = EnvCredentials::with_var(UNSET_VAR, None);
        assert!(creds.api_key().is_none());
    }

    #[test]
    fn env_prefers_variable_over_fallback() {
        // PATH is set in any sane test environment.
        let creds = EnvCredentials::with_var("PATH", Some("from-config".into()));
        assert_ne!(creds.api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn blank_static_key_counts_as_missing() {
        assert!(StaticCredentials::new("  ").api_key().is_none());
        assert!(StaticCredentials::none().api_key().is_none());
        assert_eq!(StaticCredentials::new("k").api_key().as_deref(), Some("k"));
    }
}
