//! Server settings

use inference_engine::ArtifactConfig;
use serde::{Deserialize, Serialize};

/// Environment variable naming an optional config file
pub const CONFIG_PATH_ENV: &str = "CAREER_PREDICTOR_CONFIG";

/// Prefix for per-setting environment overrides, e.g.
/// `CAREER_PREDICTOR__ARTIFACTS__DIR=/srv/models`
pub const ENV_PREFIX: &str = "CAREER_PREDICTOR";

const DEFAULT_CONFIG_FILE: &str = "career-predictor";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Socket address to listen on
    pub bind_addr: String,
    /// Default level filter when `RUST_LOG` is unset
    pub log_level: String,
    pub log_format: LogFormat,
    /// Scaler and classifier locations
    pub artifacts: ArtifactConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            artifacts: ArtifactConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from the file named by `CAREER_PREDICTOR_CONFIG` (or
    /// `career-predictor.toml` in the working directory, if present), then
    /// apply environment overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_from(path.as_deref())
    }

    pub fn load_from(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::with_name(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }
}
