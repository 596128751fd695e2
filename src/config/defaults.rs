//! System-wide default constants.
//!
//! Centralises the fixed paths, addresses and environment variable names.

// ============================================================================
// Artifacts
// ============================================================================

/// Fitted preprocessing pipeline, relative to the working directory.
pub const DEFAULT_PIPELINE_PATH: &str = "models/pipeline.json";

/// Trained placement model, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "models/placement.json";

/// Probability-row index reported as the positive class.
pub const DEFAULT_POSITIVE_CLASS_INDEX: usize = 1;

// ============================================================================
// Server
// ============================================================================

pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:8080";

/// Maximum accepted request body (bytes). A form body is a few hundred bytes.
pub const MAX_REQUEST_BODY_BYTES: usize = 16 * 1024;

// ============================================================================
// Config discovery
// ============================================================================

/// Environment variable holding an explicit config file path.
pub const CONFIG_ENV_VAR: &str = "CAREER_PREDICTOR_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "predictor.toml";

/// Environment variable overriding `[server] addr`.
pub const ADDR_ENV_VAR: &str = "CAREER_PREDICTOR_ADDR";

/// Comma-separated list of allowed CORS origins.
pub const CORS_ENV_VAR: &str = "CAREER_PREDICTOR_CORS_ORIGINS";
