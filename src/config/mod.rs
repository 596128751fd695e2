//! Predictor Configuration Module
//!
//! Loaded from a TOML file, with every value defaulting to the built-in
//! constants in [`defaults`].
//!
//! ## Loading Order
//!
//! 1. `CAREER_PREDICTOR_CONFIG` environment variable (path to TOML file)
//! 2. `predictor.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! config::init(PredictorConfig::load());
//! let model_path = &config::get().artifacts.model_path;
//! ```

mod app_config;
pub mod defaults;
pub mod validation;

pub use app_config::*;

use std::sync::OnceLock;

/// Global configuration, initialized once at startup.
static CONFIG: OnceLock<PredictorConfig> = OnceLock::new();

/// Initialize the global configuration.
///
/// Later calls are ignored with a warning.
pub fn init(config: PredictorConfig) {
    if CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global configuration.
///
/// Falls back to built-in defaults if `init()` was never called.
pub fn get() -> &'static PredictorConfig {
    CONFIG.get_or_init(|| {
        tracing::warn!("config::get() called before config::init(), using defaults");
        PredictorConfig::default()
    })
}

/// Check whether the config has been initialized.
pub fn is_initialized() -> bool {
    CONFIG.get().is_some()
}
