//! Configuration file support for the shellform CLI.
//!
//! A `shellform.toml` describes the generator environment and the
//! relativization topology once, so repeated invocations do not need to
//! repeat the flags:
//!
//! ```toml
//! [env]
//! windows_shell = true
//! nmake = true
//!
//! [paths]
//! source_top = "/proj/src"
//! binary_top = "/proj/build"
//! ```
//!
//! All fields are optional; missing sections fall back to defaults (a POSIX
//! shell with no topology).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::convert::GeneratorEnv;

/// Shellform configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target generator environment.
    pub env: GeneratorEnv,

    /// Relativization topology.
    pub paths: PathsConfig,
}

/// Source/binary tree tops for the `relative` command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Highest source directory of the generation scope.
    pub source_top: Option<String>,

    /// Highest binary directory of the generation scope.
    pub binary_top: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't
    /// exist or doesn't parse.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!(
                    "failed to load config from {}: {}; using defaults",
                    path.display(),
                    e
                );
                Config::default()
            })
        } else {
            Config::default()
        }
    }
}
