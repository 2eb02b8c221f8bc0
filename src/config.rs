//! Configuration System
//!
//! Layered configuration: built-in defaults, the user's global config file,
//! a workspace file and `FSTREE_*` environment variables, merged with the
//! `config` crate and deserialized into [`FstreeConfig`].

use crate::error::AppError;
use crate::logging::{self, LoggingConfig};
use crate::mirror::MirrorConfig;
use crate::tree::ScanConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FstreeConfig {
    /// Tree construction settings
    #[serde(default)]
    pub scan: ScanConfig,

    /// Mirror defaults
    #[serde(default)]
    pub mirror: MirrorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl FstreeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !levels.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError::Logging(format!(
                "Invalid log level '{}'",
                self.logging.level
            )));
        }
        if let Err(e) = logging::validate_format(&self.logging.format) {
            errors.push(ValidationError::Logging(e.to_string()));
        }
        if let Err(e) = logging::validate_output(&self.logging.output) {
            errors.push(ValidationError::Logging(e.to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// [`validate`](Self::validate), folded into a single `ConfigError`.
    pub fn ensure_valid(&self) -> Result<(), AppError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            AppError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }
}
