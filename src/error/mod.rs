// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 EnvError (<= 24 bytes)
//!                        |
//!   +---------+---------+---------+---------+---------+---------+
//!   |         |         |         |         |         |         |
//!   v         v         v         v         v         v         v
//! NotSer.  TypeMism. FieldType Immutable InvalidName InvalidVal Deserialize
//! &'static &'static  u8+&'st.  u8 + u8   Box<str>    Box<str>   Box<..>
//!
//! CodecError (per-codec, recovered inside the registry)
//!   Decode   input not recognised by this codec
//!   Encode   value has no shape this codec can write
//!
//! SettingsError (binary configuration)
//!   InvalidValue   out-of-range setting (e.g. log level 9)
//!   NotFound       --config path does not exist
//! ```
//!
//! Only registry-exhausted failures and facade policy violations reach
//! callers. `CodecError` never crosses the facade.

use std::fmt;

use thiserror::Error;

use crate::facade::ReservedField;

/// Convenience alias for `anyhow::Result`, used by the binary.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`EnvError`].
pub type EnvResult<T> = std::result::Result<T, EnvError>;

/// Errors surfaced by the environment facade and codec registry.
#[derive(Debug, Error)]
pub enum EnvError {
    /// No codec could encode the value.
    #[error("'{type_name}' value is not serializable")]
    NotSerializable { type_name: &'static str },

    /// Decode was handed something other than a string.
    #[error("value must be str, not {type_name}")]
    TypeMismatch { type_name: &'static str },

    /// Mode field assigned something other than a boolean.
    #[error("own field '{field}' must be bool, not {type_name}")]
    FieldType {
        field: ReservedField,
        type_name: &'static str,
    },

    /// Attempt to reassign or unset a reserved facade field.
    #[error("own field '{field}' cannot be {op}")]
    ImmutableField { field: ReservedField, op: FieldOp },

    /// Variable name cannot be stored in the environment.
    #[error("invalid variable name '{0}': names must be non-empty and contain no '=' or NUL")]
    InvalidName(Box<str>),

    /// Encoded value cannot be stored in the environment.
    #[error("value for '{0}' contains a NUL byte")]
    InvalidValue(Box<str>),

    /// Decoded value did not match the requested type.
    #[error(transparent)]
    Deserialize(#[from] Box<DeserializeError>),
}

/// Raised by [`crate::facade::Env::get_as`] when the decoded value has the wrong shape.
#[derive(Debug, Error)]
#[error("failed to deserialize '{name}': {source}")]
pub struct DeserializeError {
    pub name: String,
    #[source]
    pub source: serde_json::Error,
}

impl From<DeserializeError> for EnvError {
    fn from(err: DeserializeError) -> Self {
        Self::Deserialize(Box::new(err))
    }
}

/// Which mutation was refused on a reserved field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOp {
    Reassigned,
    Deleted,
}

impl fmt::Display for FieldOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reassigned => f.write_str("reinitialized"),
            Self::Deleted => f.write_str("deleted"),
        }
    }
}

/// Per-codec failure.
///
/// Returned by individual [`crate::codec::Codec`] implementations and
/// absorbed by [`crate::codec::CodecRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Input text is not in this codec's grammar.
    #[error("{codec}: cannot decode input: {message}")]
    Decode { codec: &'static str, message: String },

    /// Value has no representation in this codec.
    #[error("{codec}: cannot encode {kind} value")]
    Encode {
        codec: &'static str,
        kind: &'static str,
    },
}

impl CodecError {
    pub(crate) fn decode(codec: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            codec,
            message: message.into(),
        }
    }

    pub(crate) const fn encode(codec: &'static str, kind: &'static str) -> Self {
        Self::Encode { codec, kind }
    }
}

// --- Settings Errors ---

/// Rejected settings value, raised after the layers are merged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Value outside its allowed range.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: &'static str, message: String },

    /// Settings file given explicitly but absent.
    #[error("settings file not found: {0}")]
    NotFound(String),
}
