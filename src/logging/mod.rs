// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Subscriber setup for `smenv`.
//!
//! ```text
//! Settings { log_level, log_file }
//!     |
//!     |  LogConfig::from(&settings)
//!     v
//! init_logging --> stderr     at log_level (0 silences it)
//!              \-> log_file   every event, plain text (optional)
//!     |
//!     v
//! LogGuard, drains the file writer when dropped
//! ```
//!
//! Codecs, stores and the facade only emit `tracing` events. Nothing in the
//! library installs a subscriber.

use std::fmt;
use std::fs::File;
use std::path::Path;

use anyhow::Context;
use bon::Builder;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt as sfmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Result, SettingsError};
use crate::settings::Settings;

/// Log verbosity (0-5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogLevel(u8);

impl Default for LogLevel {
    fn default() -> Self {
        Self::WARN
    }
}

impl LogLevel {
    pub const SILENT: Self = Self(0);
    pub const ERROR: Self = Self(1);
    pub const WARN: Self = Self(2);
    pub const INFO: Self = Self(3);
    pub const DEBUG: Self = Self(4);
    pub const TRACE: Self = Self(5);

    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] if the level is greater than 5.
    pub fn new(level: u8) -> std::result::Result<Self, SettingsError> {
        Self::from_u8(level).ok_or_else(|| SettingsError::InvalidValue {
            key: "log_level",
            message: format!("log level must be 0-5, got {level}"),
        })
    }

    #[must_use]
    pub const fn from_u8(level: u8) -> Option<Self> {
        if level <= 5 { Some(Self(level)) } else { None }
    }

    /// `EnvFilter` directive for this level.
    #[must_use]
    pub const fn to_filter_string(self) -> &'static str {
        match self.0 {
            0 => "off",
            1 => "error",
            2 => "warn",
            3 => "info",
            4 => "debug",
            _ => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_filter_string())
    }
}

impl Serialize for LogLevel {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// Where log events go and how verbose the console is.
#[derive(Debug, Clone, Builder)]
pub struct LogConfig {
    #[builder(setters(name = with_console_level), default = LogLevel::WARN)]
    console_level: LogLevel,
    #[builder(setters(name = with_log_file))]
    log_file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl From<&Settings> for LogConfig {
    fn from(settings: &Settings) -> Self {
        Self::builder()
            .with_console_level(settings.log_level)
            .maybe_with_log_file(settings.log_file.clone())
            .build()
    }
}

/// Holds the file writer's worker; pending lines are written out on drop.
pub struct LogGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the process-wide subscriber: stderr, plus the log file if set.
///
/// # Errors
///
/// Fails when the log file cannot be opened or another subscriber is
/// already installed.
///
/// ```no_run
/// use smart_env::logging::{init_logging, LogConfig};
/// use smart_env::settings::Settings;
///
/// let settings = Settings::from_toml_str("log_level = 3\nlog_file = 'smenv.log'")?;
/// let _guard = init_logging(&LogConfig::from(&settings))?;
/// tracing::info!("ready");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(config: &LogConfig) -> Result<LogGuard> {
    let console = sfmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(config.console_level.to_filter_string()));

    let (file, file_guard) = match config.log_file.as_deref() {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(open_log_file(Path::new(path))?);
            let layer = sfmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new(LogLevel::TRACE.to_filter_string()));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .context("failed to install log subscriber")?;

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

/// Creates (or truncates) the log file, making missing parent directories.
fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    File::create(path).with_context(|| format!("failed to create log file {}", path.display()))
}

#[cfg(test)]
mod tests;
