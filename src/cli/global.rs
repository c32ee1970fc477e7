// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     <- settings file, on top of ./smart-env.toml
//! --auto-cast       <- auto_cast = true
//! --log-level N     <- console verbosity (0-5)
//! --log-file FILE   <- trace-level log file
//!
//! Precedence: CLI flags > SMART_ENV_* > --config > smart-env.toml > defaults
//! ```

use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, SettingsError};
use crate::settings::{DEFAULT_FILE, ENV_PREFIX, SettingsLoader};

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Settings file to load after ./smart-env.toml.
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Decodes variable values into typed values when reading.
    #[arg(short = 'a', long = "auto-cast", global = true)]
    pub auto_cast: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        global = true,
        value_parser = clap::value_parser!(u8).range(0..=5)
    )]
    pub log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Settings loader with every layer these options imply.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NotFound`] if `--config` names a missing file.
    pub fn settings_loader(&self) -> Result<SettingsLoader> {
        let mut loader = SettingsLoader::new().add_toml_file_optional(DEFAULT_FILE);

        if let Some(path) = &self.config {
            if !path.is_file() {
                return Err(SettingsError::NotFound(path.display().to_string()).into());
            }
            loader = loader.add_toml_file(path);
        }

        loader = loader.with_env_prefix(ENV_PREFIX);

        if self.auto_cast {
            loader = loader.set("auto_cast", true)?;
        }
        if let Some(level) = self.log_level {
            loader = loader.set("log_level", i64::from(level))?;
        }
        if let Some(path) = &self.log_file {
            loader = loader.set("log_file", path.display().to_string())?;
        }

        Ok(loader)
    }
}
