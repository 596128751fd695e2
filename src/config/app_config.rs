//! Predictor configuration - server address, artifact paths and model options
//!
//! Each struct implements `Default` with the built-in constants from
//! [`super::defaults`], so the service runs unchanged when no config file is
//! present.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `PredictorConfig::load()` which searches:
/// 1. `$CAREER_PREDICTOR_CONFIG` env var
/// 2. `./predictor.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictorConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Pipeline and model artifact locations
    #[serde(default)]
    pub artifacts: ArtifactConfig,

    /// Classifier output interpretation
    #[serde(default)]
    pub model: ModelConfig,
}

impl PredictorConfig {
    /// Load configuration using the standard search order.
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {}", defaults::CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./predictor.toml
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

        // Unknown keys only warn; existing configs keep working
        for w in super::validation::validate_unknown_keys(&contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate the configuration, collecting every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_values(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ============================================================================
// Server Config
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address.
    ///
    /// Can be overridden by `CAREER_PREDICTOR_ADDR` env var or `--addr` CLI flag.
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    defaults::DEFAULT_SERVER_ADDR.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

// ============================================================================
// Artifact Config
// ============================================================================

/// Where the fitted pipeline and trained model live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_pipeline_path")]
    pub pipeline_path: PathBuf,

    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
}

fn default_pipeline_path() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_PIPELINE_PATH)
}

fn default_model_path() -> PathBuf {
    PathBuf::from(defaults::DEFAULT_MODEL_PATH)
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            pipeline_path: default_pipeline_path(),
            model_path: default_model_path(),
        }
    }
}

// ============================================================================
// Model Config
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Index into the class-probability row treated as "success".
    #[serde(default = "default_positive_class_index")]
    pub positive_class_index: usize,
}

fn default_positive_class_index() -> usize {
    defaults::DEFAULT_POSITIVE_CLASS_INDEX
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            positive_class_index: default_positive_class_index(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_validates() {
        let config = PredictorConfig::default();
        assert!(config.validate().is_ok(), "Default config must always validate");
    }

    #[test]
    fn test_empty_toml_produces_defaults() {
        let config: PredictorConfig = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert_eq!(config.artifacts.pipeline_path, PathBuf::from("models/pipeline.json"));
        assert_eq!(config.artifacts.model_path, PathBuf::from("models/placement.json"));
        assert_eq!(config.model.positive_class_index, 1);
    }

    #[test]
    fn test_partial_toml_override() {
        let toml_str = r#"
[artifacts]
model_path = "/srv/models/placement-v2.json"
"#;
        let config: PredictorConfig = toml::from_str(toml_str).expect("partial TOML should parse");
        assert_eq!(config.artifacts.model_path, PathBuf::from("/srv/models/placement-v2.json"));
        // Non-overridden values retain defaults
        assert_eq!(config.artifacts.pipeline_path, PathBuf::from("models/pipeline.json"));
        assert_eq!(config.server.addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_roundtrip_toml() {
        let original = PredictorConfig::default();
        let toml_str = original.to_toml().expect("serialization should work");
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[artifacts]"));
        assert!(toml_str.contains("[model]"));
        let roundtripped: PredictorConfig = toml::from_str(&toml_str).expect("deserialization should work");
        assert_eq!(original.server.addr, roundtripped.server.addr);
        assert_eq!(original.artifacts.model_path, roundtripped.artifacts.model_path);
    }

    #[test]
    fn test_load_from_file_rejects_bad_addr() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\naddr = \"not an address\"").unwrap();
        let err = PredictorConfig::load_from_file(file.path()).unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert!(errors.iter().any(|e| e.contains("server.addr"))),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_load_from_file_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\naddr = 1").unwrap();
        assert!(matches!(
            PredictorConfig::load_from_file(file.path()),
            Err(ConfigError::Parse(..))
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(matches!(
            PredictorConfig::load_from_file(Path::new("/no/such/predictor.toml")),
            Err(ConfigError::Io(..))
        ));
    }
}
