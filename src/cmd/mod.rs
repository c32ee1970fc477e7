// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   inspect  get / list / dump / fields   (Env<SystemEnv>)
//!   codec    decode / encode              (CodecRegistry)
//!   run      run                          (Env<MemEnv> -> child process)
//! ```
//!
//! `format_*` functions build the output; `run_*` print it.

pub mod codec;
pub mod inspect;
pub mod run;

#[cfg(test)]
mod tests;
