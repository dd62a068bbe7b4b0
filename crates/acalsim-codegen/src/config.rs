// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generator configuration.
//!
//! Supports both programmatic and file-based configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Root under which every artifact path is written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory of replacement templates. Embedded templates when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,

    /// Emit project scaffolding under this name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            template_dir: None,
            project_name: None,
            log_level: default_log_level(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output_dir must not be empty".into()));
        }
        if let Some(name) = &self.project_name {
            if name.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "project_name must not be empty when set".into(),
                ));
            }
        }
        if let Some(dir) = &self.template_dir {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "template_dir must not be empty when set".into(),
                ));
            }
        }
        Ok(())
    }
}
