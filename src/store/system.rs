// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::env;

use tracing::warn;

use super::EnvStore;

/// The live process environment.
///
/// # Thread Safety
///
/// Mutation goes through `std::env::set_var`/`remove_var`, which race with
/// any other thread reading or writing the environment (including libc
/// `getenv` calls in C code). Nothing here locks: write variables during
/// single-threaded startup, before spawning threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvStore for SystemEnv {
    fn var(&self, name: &str) -> Option<String> {
        let value = env::var_os(name)?;
        Some(value.into_string().unwrap_or_else(|raw| {
            warn!(name, "environment value is not valid UTF-8, reading lossily");
            raw.to_string_lossy().into_owned()
        }))
    }

    fn set_var(&self, name: &str, value: &str) {
        // SAFETY: Callers accept the process-wide race documented on
        // `SystemEnv`; name and value were validated (no '=' or NUL).
        unsafe {
            env::set_var(name, value);
        }
    }

    fn remove_var(&self, name: &str) {
        // SAFETY: Same as `set_var`.
        unsafe {
            env::remove_var(name);
        }
    }

    fn vars(&self) -> BTreeMap<String, String> {
        env::vars_os()
            .map(|(k, v)| {
                (
                    k.to_string_lossy().into_owned(),
                    v.to_string_lossy().into_owned(),
                )
            })
            .collect()
    }
}
