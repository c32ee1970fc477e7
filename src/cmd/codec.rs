// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Codec inspection commands: decode, encode.

use crate::codec::CodecRegistry;
use crate::error::Result;

/// Output of `decode`: matching codec, value kind and literal form.
#[must_use]
pub fn format_decode(codecs: &CodecRegistry, text: &str) -> Vec<String> {
    let (value, codec) = codecs.decode_with_codec(text);
    vec![
        format!("codec: {}", codec.unwrap_or("none")),
        format!("kind:  {}", value.kind()),
        format!("value: {value}"),
    ]
}

/// Output of `encode`: `text` decoded, then encoded the way `set` stores it.
///
/// # Errors
///
/// Returns an error if no codec can encode the decoded value.
pub fn format_encode(codecs: &CodecRegistry, text: &str) -> Result<String> {
    let value = codecs.decode(text);
    Ok(codecs.encode(&value)?)
}

pub fn run_decode_command(codecs: &CodecRegistry, text: &str) {
    for line in format_decode(codecs, text) {
        println!("{line}");
    }
}

/// # Errors
///
/// Returns an error if no codec can encode the decoded value.
pub fn run_encode_command(codecs: &CodecRegistry, text: &str) -> Result<()> {
    println!("{}", format_encode(codecs, text)?);
    Ok(())
}
