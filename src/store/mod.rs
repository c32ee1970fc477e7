// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable storage.
//!
//! # Architecture
//!
//! ```text
//! EnvStore (trait)
//!   var / set_var / remove_var / vars
//!      |
//!   +--+-----------+
//!   v              v
//! SystemEnv      MemEnv
//! std::env       Mutex<BTreeMap<String, String>>
//! (process)      (tests, embedding)
//! ```
//!
//! Stores only hold text. Typing happens in [`crate::facade`].

mod mem;
mod system;


use std::collections::BTreeMap;

pub use mem::MemEnv;
pub use system::SystemEnv;

/// A name to string mapping owned outside the facade.
///
/// Absence is a normal state: `var` returns `None` and `remove_var` on a
/// missing name does nothing. Names passed to the mutating methods have been
/// validated by the facade.
pub trait EnvStore {
    fn var(&self, name: &str) -> Option<String>;

    fn set_var(&self, name: &str, value: &str);

    fn remove_var(&self, name: &str);

    /// Snapshot of every variable, sorted by name.
    fn vars(&self) -> BTreeMap<String, String>;

    /// Sorted variable names.
    fn names(&self) -> Vec<String> {
        self.vars().into_keys().collect()
    }
}

impl<S: EnvStore + ?Sized> EnvStore for &S {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }

    fn set_var(&self, name: &str, value: &str) {
        (**self).set_var(name, value);
    }

    fn remove_var(&self, name: &str) {
        (**self).remove_var(name);
    }

    fn vars(&self) -> BTreeMap<String, String> {
        (**self).vars()
    }

    fn names(&self) -> Vec<String> {
        (**self).names()
    }
}
