//! Endpoint configuration for the local model server.

use std::time::Duration;

/// Default base URL of the local server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/v1beta";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "local-model";

/// Default single-shot timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "LOCAL_MODEL_BASE_URL";

/// Environment variable overriding the model identifier.
pub const ENV_MODEL: &str = "LOCAL_MODEL_NAME";

/// Environment variable overriding the single-shot timeout, in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "LOCAL_MODEL_TIMEOUT_MS";

/// Errors from loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Source of the base URL and model identifier.
///
/// Consulted once per call, so an implementation backed by shared state can
/// change the target between calls.
pub trait EndpointSource: Send + Sync {
    /// Base URL, e.g. `http://localhost:8080/v1beta`.
    fn base_url(&self) -> String;
    /// Model identifier.
    fn model(&self) -> String;
}

/// Static configuration for [`LocalModel`](crate::LocalModel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalConfig {
    /// Base URL of the server.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Wall-clock deadline for single-shot calls. Streaming calls have none.
    pub timeout: Duration,
}

impl LocalConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Reads [`ENV_BASE_URL`], [`ENV_MODEL`] and [`ENV_TIMEOUT_MS`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&'static str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            config.base_url = url;
        }
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.is_empty()) {
            config.model = model;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            let ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: ENV_TIMEOUT_MS,
                    value: raw.clone(),
                })?;
            config.timeout = Duration::from_millis(ms);
        }
        Ok(config)
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl EndpointSource for LocalConfig {
    fn base_url(&self) -> String {
        self.base_url.clone()
    }

    fn model(&self) -> String {
        self.model.clone()
    }
}

/// Which generateContent method a call targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `:generateContent`
    SingleShot,
    /// `:streamGenerateContent`
    Streaming,
}

impl Mode {
    fn method(self) -> &'static str {
        match self {
            Self::SingleShot => "generateContent",
            Self::Streaming => "streamGenerateContent",
        }
    }
}

/// Resolved target of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Base URL, without trailing slash.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Method selector.
    pub mode: Mode,
}

impl Endpoint {
    /// Resolve an endpoint from `source` for `mode`.
    pub fn resolve(source: &dyn EndpointSource, mode: Mode) -> Self {
        Self {
            base_url: source.base_url().trim_end_matches('/').to_string(),
            model: source.model(),
            mode,
        }
    }

    /// Full request URL: `{base_url}/models/{model}:{method}`.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/models/{}:{}", self.base_url, self.model, self.mode.method())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = LocalConfig::from_lookup(lookup(&[])).expect("valid");
        assert_eq!(config, LocalConfig::default());
        assert_eq!(config.timeout, Duration::from_millis(60_000));
    }

    #[test]
    fn env_overrides_all_fields() {
        let config = LocalConfig::from_lookup(lookup(&[
            (ENV_BASE_URL, "http://gpu-box:9000/v1beta"),
            (ENV_MODEL, "gemma-2b"),
            (ENV_TIMEOUT_MS, "1500"),
        ]))
        .expect("valid");
        assert_eq!(config.base_url, "http://gpu-box:9000/v1beta");
        assert_eq!(config.model, "gemma-2b");
        assert_eq!(config.timeout, Duration::from_millis(1500));
    }

    #[test]
    fn empty_env_values_keep_defaults() {
        let config =
            LocalConfig::from_lookup(lookup(&[(ENV_BASE_URL, ""), (ENV_MODEL, "")])).expect("valid");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn unparsable_timeout_is_rejected() {
        let err = LocalConfig::from_lookup(lookup(&[(ENV_TIMEOUT_MS, "soon")])).unwrap_err();
        assert!(
            matches!(&err, ConfigError::InvalidValue { var, value } if *var == ENV_TIMEOUT_MS && value == "soon")
        );
        assert!(err.to_string().contains(ENV_TIMEOUT_MS));
    }

    #[test]
    fn single_shot_url() {
        let config = LocalConfig {
            base_url: "http://localhost:9999/v1beta".into(),
            model: "m".into(),
            ..Default::default()
        };
        let endpoint = Endpoint::resolve(&config, Mode::SingleShot);
        assert_eq!(endpoint.url(), "http://localhost:9999/v1beta/models/m:generateContent");
    }

    #[test]
    fn streaming_url_ignores_trailing_slash() {
        let config = LocalConfig {
            base_url: "http://localhost:9999/".into(),
            model: "m".into(),
            ..Default::default()
        };
        let endpoint = Endpoint::resolve(&config, Mode::Streaming);
        assert_eq!(endpoint.url(), "http://localhost:9999/models/m:streamGenerateContent");
    }
}
