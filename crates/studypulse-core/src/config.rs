//! Configuration management for StudyPulse
//!
//! Sources, lowest priority first: built-in defaults, an optional config
//! file, `STUDYPULSE__*` environment variables, then the conventional
//! `PORT` and `API_KEY` variables.

use std::path::{Path, PathBuf};

use config::{Environment, File};
use serde::{Deserialize, Serialize};

use crate::analytics::{ActivityRatios, ACTIVE_PARTICIPANT_RATIO, ACTIVE_STUDY_RATIO};
use crate::error::{Error, Result};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// API authentication
    pub auth: AuthConfig,

    /// Data file locations
    pub data: DataConfig,

    /// Aggregation tuning
    pub analytics: AnalyticsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&Config::default())?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let mut config: Config = builder
            .add_source(
                Environment::with_prefix("STUDYPULSE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| Error::config(format!("PORT must be a port number, got {port:?}")))?;
        }
        if let Ok(api_key) = std::env::var("API_KEY") {
            config.auth.api_key = api_key;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.auth.api_key.is_empty() {
            return Err(Error::config("auth.api_key must not be empty"));
        }
        for (name, ratio) in [
            ("analytics.active_participant_ratio", self.analytics.active_participant_ratio),
            ("analytics.active_study_ratio", self.analytics.active_study_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(Error::config(format!("{name} must be within 0..=1, got {ratio}")));
            }
        }
        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// HTTP port
    pub port: u16,
    /// Allowed CORS origin; any origin when unset
    pub cors_origin: Option<String>,
    /// Directory holding the built frontend
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors_origin: None,
            static_dir: Some(PathBuf::from("dist")),
        }
    }
}

/// API authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret expected in `x-api-key` or `Authorization: Bearer`
    pub api_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: "your-secure-api-key-here".to_string(),
        }
    }
}

/// Data file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON array of daily metric records
    pub metrics_path: PathBuf,
    /// JSON filter options document; canonical lists are served when unset
    pub filter_options_path: Option<PathBuf>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            metrics_path: PathBuf::from("data/dailyMetrics.json"),
            filter_options_path: None,
        }
    }
}

/// Aggregation configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Fraction of new participants reported as active
    pub active_participant_ratio: f64,
    /// Fraction of distinct studies reported as active
    pub active_study_ratio: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            active_participant_ratio: ACTIVE_PARTICIPANT_RATIO,
            active_study_ratio: ACTIVE_STUDY_RATIO,
        }
    }
}

impl From<AnalyticsConfig> for ActivityRatios {
    fn from(config: AnalyticsConfig) -> Self {
        Self {
            participants: config.active_participant_ratio,
            studies: config.active_study_ratio,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (json or pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_dashboard_conventions() {
        let config = Config::default();

        assert_eq!(config.server.port, 3001);
        assert_eq!(config.data.metrics_path, PathBuf::from("data/dailyMetrics.json"));
        assert_eq!(config.analytics.active_participant_ratio, 0.7);
        assert_eq!(config.analytics.active_study_ratio, 0.6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nhost = \"127.0.0.1\"\n\n[analytics]\nactive_study_ratio = 0.5\n\n[data]\nmetrics_path = \"/srv/metrics.json\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.analytics.active_study_ratio, 0.5);
        assert_eq!(config.analytics.active_participant_ratio, 0.7);
        assert_eq!(config.data.metrics_path, PathBuf::from("/srv/metrics.json"));
    }

    #[test]
    fn rejects_out_of_range_ratio() {
        let mut config = Config::default();
        config.analytics.active_participant_ratio = 1.5;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_empty_api_key() {
        let mut config = Config::default();
        config.auth.api_key.clear();
        assert!(config.validate().is_err());
    }
}
