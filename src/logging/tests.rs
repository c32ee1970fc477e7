// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel, open_log_file};
use crate::settings::Settings;

#[test]
fn test_log_level_bounds() {
    assert_eq!(LogLevel::new(0), Ok(LogLevel::SILENT));
    assert_eq!(LogLevel::new(5), Ok(LogLevel::TRACE));
    insta::assert_snapshot!(
        LogLevel::new(6).unwrap_err(),
        @"invalid value for 'log_level': log level must be 0-5, got 6"
    );
    assert_eq!(LogLevel::from_u8(200), None);
}

#[test]
fn test_log_level_filter_strings() {
    let filters: Vec<_> = (0..=5)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::to_filter_string)
        .collect();
    assert_eq!(filters, ["off", "error", "warn", "info", "debug", "trace"]);
}

#[test]
fn test_log_level_serde() {
    let level: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert_eq!(serde_json::to_string(&level).unwrap(), "4");
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level, LogLevel::WARN);
    assert_eq!(config.log_file, None);
}

#[test]
fn test_log_config_from_settings() {
    let settings = Settings {
        log_level: LogLevel::DEBUG,
        log_file: Some("logs/smenv.log".to_owned()),
        ..Settings::default()
    };
    let config = LogConfig::from(&settings);
    assert_eq!(config.console_level, LogLevel::DEBUG);
    assert_eq!(config.log_file.as_deref(), Some("logs/smenv.log"));

    let quiet = LogConfig::from(&Settings {
        log_level: LogLevel::SILENT,
        ..Settings::default()
    });
    assert_eq!(quiet.console_level.to_filter_string(), "off");
    assert_eq!(quiet.log_file, None);
}

#[test]
fn test_open_log_file_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/smenv.log");
    open_log_file(&path).unwrap();
    assert!(path.is_file());
}
