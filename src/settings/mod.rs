// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings for the `smenv` binary and for [`crate::facade::Env::from_settings`].
//!
//! # Settings Hierarchy
//!
//! ```text
//! Priority (low -> high)
//! 1. defaults
//! 2. smart-env.toml (cwd, optional)
//! 3. --config FILE
//! 4. SMART_ENV_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! SMART_ENV_AUTO_CAST=true    -> auto_cast = true
//! SMART_ENV_LOG_LEVEL=4       -> log_level = 4
//! SMART_ENV_LOG_FILE=out.log  -> log_file = "out.log"
//! SMART_ENV_ANYTHING_ELSE     -> ignored
//! ```

pub mod loader;


use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::logging::LogLevel;

pub use loader::SettingsLoader;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "SMART_ENV";

/// Settings file looked up in the working directory.
pub const DEFAULT_FILE: &str = "smart-env.toml";

/// Merged settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Start facades with automatic decoding enabled.
    pub auto_cast: bool,
    /// Console verbosity.
    pub log_level: LogLevel,
    /// Optional log file, written at trace level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl Settings {
    /// Field names, as read from TOML and from `SMART_ENV_{KEY}`.
    pub const KEYS: [&'static str; 3] = ["auto_cast", "log_level", "log_file"];

    #[must_use]
    pub fn builder() -> SettingsLoader {
        SettingsLoader::new()
    }

    /// Loads a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or does
    /// not match the `Settings` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Settings` structure.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }
}
