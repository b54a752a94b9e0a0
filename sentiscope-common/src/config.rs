//! Configuration loading for sentiscope
//!
//! Every setting is resolved with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing TOML file is not an error: a warning is logged and the compiled
//! defaults are used. A TOML file that exists but cannot be parsed is an error.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_UPLOAD_FOLDER: &str = "./uploads";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
/// Hugging Face's legacy serverless host. The fine-tuned default model is not
/// guaranteed to be served there; point `classifier.endpoint` at a
/// self-hosted or compatible text-classification server for production use.
pub const DEFAULT_INFERENCE_ENDPOINT: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_MODEL: &str = "BaharehJozranjbar/finetuning-sentiment-model-3000-samples";
pub const DEFAULT_CLASSIFIER_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BATCH_SIZE: usize = 16;

pub const ENV_CONFIG: &str = "SENTISCOPE_CONFIG";
pub const ENV_UPLOAD_FOLDER: &str = "SENTISCOPE_UPLOAD_FOLDER";
pub const ENV_HOST: &str = "SENTISCOPE_HOST";
pub const ENV_PORT: &str = "SENTISCOPE_PORT";
pub const ENV_HF_TOKEN: &str = "SENTISCOPE_HF_TOKEN";

/// Bootstrap configuration as read from the TOML file
///
/// All fields are optional so that a partial file only overrides what it names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Folder holding uploads and result files
    #[serde(default)]
    pub upload_folder: Option<PathBuf>,

    /// Address to bind the HTTP server to
    #[serde(default)]
    pub host: Option<String>,

    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Maximum accepted request body size in bytes
    #[serde(default)]
    pub max_upload_bytes: Option<usize>,

    /// Sentiment inference endpoint settings
    #[serde(default)]
    pub classifier: ClassifierToml,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[classifier]` table of the TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassifierToml {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub batch_size: Option<usize>,
}

/// `[logging]` table of the TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Command-line overrides, highest priority
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub upload_folder: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_token: Option<String>,
    pub debug: bool,
}

/// Resolved settings for the inference client
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Base URL; the model id is appended as a path segment
    pub endpoint: String,
    pub model: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    /// Maximum number of texts sent in one inference request
    pub batch_size: usize,
}

impl ClassifierConfig {
    /// Full URL of the model's inference route
    pub fn model_url(&self) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.model.trim_start_matches('/')
        )
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_INFERENCE_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_CLASSIFIER_TIMEOUT_SECS),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Complete service configuration, constructed once at startup
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub upload_folder: PathBuf,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub classifier: ClassifierConfig,
    pub log_level: String,
    /// Development toggle: verbose logging
    pub debug: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            upload_folder: PathBuf::from(DEFAULT_UPLOAD_FOLDER),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            classifier: ClassifierConfig::default(),
            log_level: default_log_level(),
            debug: false,
        }
    }
}

impl ServiceConfig {
    /// Load the TOML file (if any) and merge it with env and CLI overrides
    ///
    /// Config file location: `--config` → `SENTISCOPE_CONFIG` →
    /// `<config dir>/sentiscope/config.toml`.
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let toml_config = match config_file_path(overrides.config_path.as_deref()) {
            Some(path) => load_toml_config(&path)?,
            None => {
                warn!("Could not determine a config file location, using defaults");
                TomlConfig::default()
            }
        };

        Self::from_sources(toml_config, overrides)
    }

    /// Merge already-loaded TOML with env and CLI overrides
    pub fn from_sources(toml_config: TomlConfig, overrides: ConfigOverrides) -> Result<Self> {
        let upload_folder = overrides
            .upload_folder
            .or_else(|| env_value(ENV_UPLOAD_FOLDER).map(PathBuf::from))
            .or(toml_config.upload_folder)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_FOLDER));

        let host = overrides
            .host
            .or_else(|| env_value(ENV_HOST))
            .or(toml_config.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let env_port = match env_value(ENV_PORT) {
            Some(raw) => Some(raw.parse::<u16>().map_err(|e| {
                Error::Config(format!("Invalid {} value '{}': {}", ENV_PORT, raw, e))
            })?),
            None => None,
        };
        let port = overrides
            .port
            .or(env_port)
            .or(toml_config.port)
            .unwrap_or(DEFAULT_PORT);

        let max_upload_bytes = toml_config
            .max_upload_bytes
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        if max_upload_bytes == 0 {
            return Err(Error::Config("max_upload_bytes must be greater than 0".to_string()));
        }

        let classifier_toml = toml_config.classifier;
        let batch_size = classifier_toml.batch_size.unwrap_or(DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            return Err(Error::Config("classifier.batch_size must be at least 1".to_string()));
        }

        let classifier = ClassifierConfig {
            endpoint: classifier_toml
                .endpoint
                .unwrap_or_else(|| DEFAULT_INFERENCE_ENDPOINT.to_string()),
            model: classifier_toml
                .model
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_token: overrides
                .api_token
                .or_else(|| env_value(ENV_HF_TOKEN))
                .or(classifier_toml.api_token)
                .filter(|token| !token.trim().is_empty()),
            timeout: Duration::from_secs(
                classifier_toml
                    .timeout_secs
                    .unwrap_or(DEFAULT_CLASSIFIER_TIMEOUT_SECS),
            ),
            batch_size,
        };

        let log_level = if overrides.debug {
            "debug".to_string()
        } else {
            toml_config.logging.level
        };

        Ok(Self {
            upload_folder,
            host,
            port,
            max_upload_bytes,
            classifier,
            log_level,
            debug: overrides.debug,
        })
    }

    /// `host:port` string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Read and parse a TOML config file
///
/// A missing file yields the compiled defaults with a warning.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!("Config file {} not found, using defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str::<TomlConfig>(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Default location of the TOML file for the current user
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sentiscope").join("config.toml"))
}

fn config_file_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| env_value(ENV_CONFIG).map(PathBuf::from))
        .or_else(default_config_path)
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert_eq!(LoggingConfig::default().level, "info");
    }

    #[test]
    fn test_model_url_joins_without_double_slash() {
        let config = ClassifierConfig {
            endpoint: "http://localhost:8080/models/".to_string(),
            model: "org/model".to_string(),
            ..ClassifierConfig::default()
        };
        assert_eq!(config.model_url(), "http://localhost:8080/models/org/model");
    }

    #[test]
    fn test_partial_toml_parses() {
        let config: TomlConfig = toml::from_str(
            r#"
            port = 8080

            [classifier]
            batch_size = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.port, Some(8080));
        assert_eq!(config.classifier.batch_size, Some(4));
        assert!(config.upload_folder.is_none());
        assert_eq!(config.logging.level, "info");
    }
}
