// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Typed facade over an environment store.
//!
//! # Architecture
//!
//! ```text
//!             Env<S: EnvStore>
//!   auto_cast: AtomicBool    codecs: CodecRegistry
//!                  |
//!   get(name) -----+----------------------------------+
//!     reserved?  --> field value (store untouched)    |
//!     absent     --> None                             |
//!     cast off   --> Value::Str(raw)                  |
//!     cast on    --> codecs.decode(raw)               |
//!                                                     |
//!   set(name, v) --> reserved? --> ImmutableField     |
//!                    codecs.encode(v)?  (no write on failure)
//!                    store.set_var(name, text)
//!
//!   unset(name)  --> reserved? --> ImmutableField
//!                    store.remove_var (absent: no-op)
//! ```
//!
//! # Thread Safety
//!
//! The auto-cast flag is an `AtomicBool` with relaxed ordering: toggles are
//! data-race free but not ordered against variable reads and writes. Each
//! operation touches one variable; sequences of operations are not atomic.
//! With [`SystemEnv`] every write carries the process-wide hazard documented
//! on that type.


use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::codec::CodecRegistry;
use crate::error::{DeserializeError, EnvError, EnvResult, FieldOp};
use crate::settings::Settings;
use crate::store::{EnvStore, SystemEnv};
use crate::value::Value;

/// Facade fields that are never environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedField {
    /// Action: turn automatic decoding on.
    EnableAutoCast,
    /// Action: turn automatic decoding off.
    DisableAutoCast,
    /// Current mode; may be assigned a boolean.
    IsAutoCastEnabled,
}

impl ReservedField {
    pub const ALL: [Self; 3] = [
        Self::EnableAutoCast,
        Self::DisableAutoCast,
        Self::IsAutoCastEnabled,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EnableAutoCast => "enable_auto_cast",
            Self::DisableAutoCast => "disable_auto_cast",
            Self::IsAutoCastEnabled => "is_auto_cast_enabled",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Whether the field can never be assigned.
    #[must_use]
    pub const fn is_action(self) -> bool {
        matches!(self, Self::EnableAutoCast | Self::DisableAutoCast)
    }
}

impl fmt::Display for ReservedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Typed view of an environment store.
#[derive(Debug)]
pub struct Env<S: EnvStore = SystemEnv> {
    store: S,
    codecs: CodecRegistry,
    auto_cast: AtomicBool,
}

impl Env<SystemEnv> {
    /// Facade over the live process environment, auto-cast disabled.
    #[must_use]
    pub fn system() -> Self {
        Self::new(SystemEnv)
    }
}

impl Default for Env<SystemEnv> {
    fn default() -> Self {
        Self::system()
    }
}

impl<S: EnvStore> Env<S> {
    /// Facade with the standard codecs, auto-cast disabled.
    pub fn new(store: S) -> Self {
        Self::with_registry(store, CodecRegistry::standard())
    }

    pub const fn with_registry(store: S, codecs: CodecRegistry) -> Self {
        Self {
            store,
            codecs,
            auto_cast: AtomicBool::new(false),
        }
    }

    /// Facade whose initial mode comes from loaded settings.
    pub fn from_settings(store: S, settings: &Settings) -> Self {
        let env = Self::new(store);
        if settings.auto_cast {
            env.enable_auto_cast();
        }
        env
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn codecs(&self) -> &CodecRegistry {
        &self.codecs
    }

    // --- Mode ---

    pub fn enable_auto_cast(&self) {
        self.auto_cast.store(true, Ordering::Relaxed);
        debug!("automatic type cast enabled");
    }

    pub fn disable_auto_cast(&self) {
        self.auto_cast.store(false, Ordering::Relaxed);
        debug!("automatic type cast disabled");
    }

    #[must_use]
    pub fn is_auto_cast_enabled(&self) -> bool {
        self.auto_cast.load(Ordering::Relaxed)
    }

    // --- Reads ---

    /// Reads a variable, decoding it when auto-cast is enabled.
    ///
    /// `is_auto_cast_enabled` yields the current mode and the two action
    /// fields yield `None`; none of them consult the store.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.lookup(name, self.is_auto_cast_enabled())
    }

    /// Reads a variable's stored text, ignoring the mode.
    #[must_use]
    pub fn get_raw(&self, name: &str) -> Option<String> {
        if ReservedField::from_name(name).is_some() || !is_valid_name(name) {
            return None;
        }
        self.store.var(name)
    }

    /// Decodes a variable into `T`, whatever the mode.
    ///
    /// If the decoded value does not fit `T` but the raw text does (e.g. a
    /// `String` holding `"123"`), the raw text is used.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Deserialize`] when neither form fits `T`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> EnvResult<Option<T>> {
        let Some(value) = self.lookup(name, true) else {
            return Ok(None);
        };

        match value.deserialize_into() {
            Ok(typed) => Ok(Some(typed)),
            Err(source) => {
                if !matches!(value, Value::Str(_))
                    && let Some(raw) = self.get_raw(name)
                    && let Ok(typed) = Value::Str(raw).deserialize_into()
                {
                    return Ok(Some(typed));
                }
                Err(DeserializeError {
                    name: name.to_owned(),
                    source,
                }
                .into())
            }
        }
    }

    fn lookup(&self, name: &str, cast: bool) -> Option<Value> {
        if let Some(field) = ReservedField::from_name(name) {
            return match field {
                ReservedField::IsAutoCastEnabled => Some(Value::Bool(self.is_auto_cast_enabled())),
                ReservedField::EnableAutoCast | ReservedField::DisableAutoCast => None,
            };
        }

        let raw = self.get_raw(name)?;
        if cast {
            Some(self.codecs.decode(&raw))
        } else {
            Some(Value::Str(raw))
        }
    }

    /// Whether `name` is a set variable. Reserved fields never are.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get_raw(name).is_some()
    }

    // --- Writes ---

    /// Encodes `value` and stores it under `name`.
    ///
    /// Assigning a boolean to `is_auto_cast_enabled` switches the mode.
    ///
    /// # Errors
    ///
    /// - [`EnvError::ImmutableField`] for the action fields.
    /// - [`EnvError::FieldType`] for a non-boolean mode assignment.
    /// - [`EnvError::InvalidName`] / [`EnvError::InvalidValue`] for text the
    ///   environment cannot hold.
    /// - [`EnvError::NotSerializable`] when no codec accepts the value; the
    ///   variable is left unchanged.
    pub fn set(&self, name: &str, value: impl Into<Value>) -> EnvResult<()> {
        let value = value.into();

        if let Some(field) = ReservedField::from_name(name) {
            return self.assign_field(field, &value);
        }

        validate_name(name)?;
        let text = self.codecs.encode(&value)?;
        if text.contains('\0') {
            return Err(EnvError::InvalidValue(name.into()));
        }

        debug!(name, kind = value.kind(), "setting environment variable");
        self.store.set_var(name, &text);
        Ok(())
    }

    /// Stores `Some(value)`, or unsets the variable for `None`.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set) and [`unset`](Self::unset).
    pub fn set_optional(&self, name: &str, value: Option<Value>) -> EnvResult<()> {
        match value {
            Some(value) => self.set(name, value),
            None => match ReservedField::from_name(name) {
                Some(field) if field.is_action() => Err(EnvError::ImmutableField {
                    field,
                    op: FieldOp::Reassigned,
                }),
                _ => self.unset(name),
            },
        }
    }

    /// Serializes any serde value and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::NotSerializable`] naming `T` when serde cannot
    /// represent it, plus everything [`set`](Self::set) returns.
    pub fn set_serialized<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> EnvResult<()> {
        self.set(name, Value::from_serialize(value)?)
    }

    /// Removes a variable. Removing an absent variable is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::ImmutableField`] for reserved fields.
    pub fn unset(&self, name: &str) -> EnvResult<()> {
        if let Some(field) = ReservedField::from_name(name) {
            return Err(EnvError::ImmutableField {
                field,
                op: FieldOp::Deleted,
            });
        }
        if !is_valid_name(name) {
            return Ok(());
        }

        debug!(name, "unsetting environment variable");
        self.store.remove_var(name);
        Ok(())
    }

    fn assign_field(&self, field: ReservedField, value: &Value) -> EnvResult<()> {
        if field.is_action() {
            return Err(EnvError::ImmutableField {
                field,
                op: FieldOp::Reassigned,
            });
        }
        match value {
            Value::Bool(true) => self.enable_auto_cast(),
            Value::Bool(false) => self.disable_auto_cast(),
            other => {
                return Err(EnvError::FieldType {
                    field,
                    type_name: other.kind(),
                });
            }
        }
        Ok(())
    }

    // --- Introspection ---

    /// Sorted names present right now; later changes do not affect it.
    #[must_use]
    pub fn iter(&self) -> Names {
        Names {
            inner: self.store.names().into_iter(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.names().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whole environment as a JSON object of raw strings.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        let object: serde_json::Map<String, serde_json::Value> = self
            .store
            .vars()
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        serde_json::Value::Object(object).to_string()
    }

    /// Sorted variable names as a list literal, e.g. `['HOME', 'PATH']`.
    #[must_use]
    pub fn to_debug_repr(&self) -> String {
        Value::List(self.store.names().into_iter().map(Value::Str).collect()).to_string()
    }

    /// Reserved field names plus variable names, sorted.
    #[must_use]
    pub fn list_all_field_names(&self) -> Vec<String> {
        ReservedField::ALL
            .iter()
            .map(|f| f.name().to_owned())
            .chain(self.store.names())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl<S: EnvStore> fmt::Display for Env<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl<'a, S: EnvStore> IntoIterator for &'a Env<S> {
    type Item = String;
    type IntoIter = Names;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Snapshot iterator over variable names, from [`Env::iter`].
#[derive(Debug, Clone)]
pub struct Names {
    inner: std::vec::IntoIter<String>,
}

impl Iterator for Names {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Names {}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['=', '\0'])
}

fn validate_name(name: &str) -> EnvResult<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(EnvError::InvalidName(name.into()))
    }
}
