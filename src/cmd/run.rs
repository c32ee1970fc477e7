// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `run`: set typed variables, then spawn a command with them.
//!
//! ```text
//! --set NAME=TEXT --> codecs.decode(TEXT) --> env.set(NAME, value)
//!                                                   |
//!                 Env<MemEnv> (copy of the process) v
//! Command::new(CMD).env_clear().envs(store.vars()) --> exit code
//! ```
//!
//! Variables go into an in-memory copy, so the parent process environment is
//! never mutated.

use std::process::Command;

use anyhow::{Context, anyhow};
use tracing::{debug, info};

use crate::cli::RunArgs;
use crate::error::Result;
use crate::facade::Env;
use crate::store::EnvStore;

/// Decodes each `(name, text)` pair and writes it through the facade.
///
/// # Errors
///
/// Returns an error naming the first variable that cannot be set.
pub fn apply_assignments<S: EnvStore>(env: &Env<S>, assignments: &[(String, String)]) -> Result<()> {
    for (name, text) in assignments {
        let value = env.codecs().decode(text);
        debug!(name, kind = value.kind(), "applying assignment");
        env.set(name, value)
            .with_context(|| format!("failed to set '{name}'"))?;
    }
    Ok(())
}

/// Runs the command with exactly the variables in `env` and returns its exit
/// code (1 if it was killed by a signal).
///
/// # Errors
///
/// Returns an error if an assignment fails or the command cannot be spawned.
pub fn run_command<S: EnvStore>(env: &Env<S>, args: &RunArgs) -> Result<u8> {
    apply_assignments(env, &args.assignments)?;

    let (program, rest) = args
        .command
        .split_first()
        .ok_or_else(|| anyhow!("no command given"))?;

    info!(program, vars = args.assignments.len(), "running command");
    let status = Command::new(program)
        .args(rest)
        .env_clear()
        .envs(env.store().vars())
        .status()
        .with_context(|| format!("failed to run '{program}'"))?;

    debug!(%status, "command finished");
    Ok(status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(1))
}
