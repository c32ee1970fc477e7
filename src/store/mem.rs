// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::EnvStore;

/// In-memory environment, isolated from the process.
///
/// All methods take `&self`; the map sits behind a `Mutex` so the store is
/// `Send + Sync`.
#[derive(Debug, Default)]
pub struct MemEnv {
    vars: Mutex<BTreeMap<String, String>>,
}

impl MemEnv {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from name/value pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: Mutex::new(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Copies the current process environment.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            vars: Mutex::new(super::SystemEnv.vars()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.vars.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EnvStore for MemEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.lock().get(name).cloned()
    }

    fn set_var(&self, name: &str, value: &str) {
        self.lock().insert(name.to_owned(), value.to_owned());
    }

    fn remove_var(&self, name: &str) {
        self.lock().remove(name);
    }

    fn vars(&self) -> BTreeMap<String, String> {
        self.lock().clone()
    }

    fn names(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }
}
