// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only commands: get, list, dump, fields.

use anyhow::anyhow;

use crate::cli::GetArgs;
use crate::error::Result;
use crate::facade::Env;
use crate::store::EnvStore;
use crate::value::{SetPolicy, Value};

/// Output of `get`: the decoded value as JSON, or the stored text.
///
/// # Errors
///
/// Returns an error if the variable is not set.
pub fn format_get<S: EnvStore>(env: &Env<S>, args: &GetArgs) -> Result<String> {
    let not_set = || anyhow!("variable '{}' is not set", args.name);
    if args.raw {
        return env.get_raw(&args.name).ok_or_else(not_set);
    }
    let value = env.get(&args.name).ok_or_else(not_set)?;
    render_json(&value)
}

/// # Errors
///
/// Returns an error if the variable is not set.
pub fn run_get_command<S: EnvStore>(env: &Env<S>, args: &GetArgs) -> Result<()> {
    println!("{}", format_get(env, args)?);
    Ok(())
}

pub fn run_list_command<S: EnvStore>(env: &Env<S>) {
    for name in env {
        println!("{name}");
    }
}

pub fn run_dump_command<S: EnvStore>(env: &Env<S>) {
    println!("{env}");
}

pub fn run_fields_command<S: EnvStore>(env: &Env<S>) {
    for name in env.list_all_field_names() {
        println!("{name}");
    }
}

pub(crate) fn render_json(value: &Value) -> Result<String> {
    let json = value
        .to_json(SetPolicy::AsArray)
        .map_err(|kind| anyhow!("cannot render {kind} value as JSON"))?;
    Ok(serde_json::to_string(&json)?)
}
