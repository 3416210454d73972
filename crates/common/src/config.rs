use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(".")
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/default")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(
                File::with_name(
                    path.as_ref()
                        .join("config/local")
                        .to_string_lossy()
                        .as_ref(),
                )
                .required(false),
            )
            .add_source(Environment::default().separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "ApiConfig::default_bind")]
    pub bind: String,
    /// Seed a handful of demo users and memes into the in-memory store
    /// so the API is explorable without a persistence backend.
    #[serde(default)]
    pub demo_seed: bool,
}

impl ApiConfig {
    fn default_bind() -> String {
        "127.0.0.1:8080".to_string()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
            demo_seed: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "FeedConfig::default_limit")]
    pub default_limit: usize,
    #[serde(default = "FeedConfig::default_max_limit")]
    pub max_limit: usize,
}

impl FeedConfig {
    const fn default_limit() -> usize {
        20
    }

    const fn default_max_limit() -> usize {
        100
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_limit: Self::default_limit(),
            max_limit: Self::default_max_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "ObservabilityConfig::default_metrics_path")]
    pub metrics_path: String,
    /// Filter directives used when RUST_LOG is unset.
    #[serde(default = "ObservabilityConfig::default_log_level")]
    pub log_level: String,
}

impl ObservabilityConfig {
    fn default_metrics_path() -> String {
        "/metrics".to_string()
    }

    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_path: Self::default_metrics_path(),
            log_level: Self::default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api.bind, "127.0.0.1:8080");
        assert_eq!(cfg.feed.default_limit, 20);
        assert!(cfg.feed.max_limit >= cfg.feed.default_limit);
        assert_eq!(cfg.observability.metrics_path, "/metrics");
        assert_eq!(cfg.observability.log_level, "info");
    }
}
