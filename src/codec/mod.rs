// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Codec registry: ordered decode/encode fallback chain.
//!
//! ```text
//! decode(raw)                      encode(value)
//!   |                                Str --> unchanged
//!   v                                  |
//! JsonCodec ---ok--> Value             v
//!   | err                          JsonCodec ---ok--> String
//!   v                                | err
//! BooleanCodec ---ok--> Value      BooleanCodec ---ok--> String
//!   | err                            | err
//!   v                                v
//! CollectionCodec ---ok--> Value   CollectionCodec ---ok--> String
//!   | err                            | err
//!   v                                v
//! Value::Str(raw)                  EnvError::NotSerializable
//! ```
//!
//! Both directions use the same order. The JSON codec already writes booleans,
//! so [`BooleanCodec::encode`] is only reached by custom registries that put it
//! first or drop JSON.

pub mod boolean;
pub mod collection;
pub mod json;
pub mod literal;


use std::fmt;

use tracing::trace;

pub use boolean::BooleanCodec;
pub use collection::CollectionCodec;
pub use json::JsonCodec;

use crate::error::{CodecError, EnvError, EnvResult};
use crate::value::Value;

/// One value-shape family: a decoder and an encoder.
///
/// Codecs are stateless; failures are recovered by [`CodecRegistry`].
pub trait Codec: fmt::Debug + Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Parses raw environment text.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] when the text is not in this codec's grammar.
    fn decode(&self, raw: &str) -> Result<Value, CodecError>;

    /// Renders a value as environment text.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] when the value has no shape in this codec.
    fn encode(&self, value: &Value) -> Result<String, CodecError>;
}

/// Immutable, ordered list of codecs.
#[derive(Debug)]
pub struct CodecRegistry {
    codecs: Vec<Box<dyn Codec>>,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl CodecRegistry {
    /// JSON, then boolean, then collection literals.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_codecs(vec![
            Box::new(JsonCodec),
            Box::new(BooleanCodec),
            Box::new(CollectionCodec),
        ])
    }

    /// Builds a registry that tries `codecs` in the given order.
    #[must_use]
    pub fn from_codecs(codecs: Vec<Box<dyn Codec>>) -> Self {
        Self { codecs }
    }

    /// Codec names in dispatch order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.codecs.iter().map(|c| c.name())
    }

    /// Decodes with the first codec that accepts `raw`.
    ///
    /// Text no codec recognises is returned unchanged as [`Value::Str`].
    #[must_use]
    pub fn decode(&self, raw: &str) -> Value {
        self.decode_with_codec(raw).0
    }

    /// Like [`decode`](Self::decode), also naming the codec that matched.
    #[must_use]
    pub fn decode_with_codec(&self, raw: &str) -> (Value, Option<&'static str>) {
        for codec in &self.codecs {
            match codec.decode(raw) {
                Ok(value) => {
                    trace!(codec = codec.name(), kind = value.kind(), "decoded value");
                    return (value, Some(codec.name()));
                }
                Err(e) => trace!(error = %e, "codec declined"),
            }
        }
        trace!("no codec matched, keeping raw text");
        (Value::Str(raw.to_owned()), None)
    }

    /// Decodes a value that may or may not be text.
    ///
    /// `None` stays `None`; only [`Value::Str`] is decoded.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::TypeMismatch`] for any non-string value.
    pub fn decode_value(&self, input: Option<&Value>) -> EnvResult<Option<Value>> {
        match input {
            None => Ok(None),
            Some(Value::Str(raw)) => Ok(Some(self.decode(raw))),
            Some(other) => Err(EnvError::TypeMismatch {
                type_name: other.kind(),
            }),
        }
    }

    /// Encodes with the first codec that accepts `value`.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::NotSerializable`] when every codec declines.
    pub fn encode(&self, value: &Value) -> EnvResult<String> {
        if let Value::Str(s) = value {
            return Ok(s.clone());
        }

        for codec in &self.codecs {
            match codec.encode(value) {
                Ok(text) => {
                    trace!(codec = codec.name(), kind = value.kind(), "encoded value");
                    return Ok(text);
                }
                Err(e) => trace!(error = %e, "codec declined"),
            }
        }
        Err(EnvError::NotSerializable {
            type_name: value.kind(),
        })
    }
}
