// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! SettingsLoader::new()
//!   .add_toml_file(req)
//!   .add_toml_file_optional(opt)
//!   .add_toml_str()
//!   .with_env_prefix()       SMART_ENV_{AUTO_CAST,LOG_LEVEL,LOG_FILE} from the process
//!   .with_env_store(store)   ... or from any EnvStore snapshot
//!                            (other SMART_ENV_* names are ignored)
//!   .set()
//!        |
//!        v
//!    build() --> validate() --> Settings
//! ```

use std::path::{Path, PathBuf};

use config::{ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use tracing::debug;

use super::Settings;
use crate::error::{Result, SettingsError};
use crate::store::{EnvStore, SystemEnv};

/// Builder for loading settings from layered sources.
pub struct SettingsLoader {
    builder: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    env_source: Option<config::Map<String, String>>,
    files: Vec<PathBuf>,
}

impl SettingsLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            env_source: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML file that must exist when `build()` runs.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(p.to_path_buf());
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(p.to_path_buf());
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self
    }

    /// Reads `{prefix}_{KEY}` variables at build time, one per settings key.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_owned());
        self
    }

    /// Takes prefixed variables from `store` instead of the process.
    ///
    /// Only has an effect together with [`with_env_prefix`](Self::with_env_prefix).
    #[must_use]
    pub fn with_env_store<S: EnvStore>(mut self, store: &S) -> Self {
        self.env_source = Some(store.vars().into_iter().collect());
        self
    }

    /// Sets an override that wins over every other source.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid config path.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("settings error: {e}"))?;
        Ok(self)
    }

    /// Builds and validates the merged settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required file is missing or has invalid TOML syntax.
    /// - A key is unknown or a value has the wrong type.
    /// - A value is out of range (e.g. `log_level = 9`).
    pub fn build(self) -> Result<Settings> {
        let builder = match &self.env_prefix {
            Some(prefix) => {
                let vars = self
                    .env_source
                    .unwrap_or_else(|| SystemEnv.vars().into_iter().collect());
                self.builder.add_source(
                    Environment::with_prefix(prefix)
                        .try_parsing(true)
                        .source(Some(settings_vars(prefix, vars))),
                )
            }
            None => self.builder,
        };
        let settings: Settings = builder.build()?.try_deserialize()?;
        validate(&settings)?;
        debug!(
            auto_cast = settings.auto_cast,
            log_level = %settings.log_level,
            files = self.files.len(),
            "settings loaded"
        );
        Ok(settings)
    }

    /// Files that were (or will be) read, in priority order.
    #[must_use]
    pub fn loaded_files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps only `{prefix}_{KEY}` for the keys [`Settings`] knows; other
/// variables sharing the prefix are not settings.
fn settings_vars(
    prefix: &str,
    vars: config::Map<String, String>,
) -> config::Map<String, String> {
    vars.into_iter()
        .filter(|(name, _)| {
            name.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
                && name[prefix.len()..].strip_prefix('_').is_some_and(|key| {
                    Settings::KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
                })
        })
        .collect()
}

fn validate(settings: &Settings) -> std::result::Result<(), SettingsError> {
    if settings.log_file.as_deref().is_some_and(str::is_empty) {
        return Err(SettingsError::InvalidValue {
            key: "log_file",
            message: "path must not be empty".to_owned(),
        });
    }
    Ok(())
}
