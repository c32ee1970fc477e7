// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for `smenv` using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! smenv [global options] <command>
//! get NAME [--raw]
//! list
//! dump
//! fields
//! decode TEXT
//! encode TEXT
//! run [--set NAME=VALUE]... -- CMD [ARGS]...
//! version
//! ```

pub mod global;


use clap::{Args, Parser, Subcommand};

use crate::cli::global::GlobalOptions;

/// Typed access to process environment variables.
#[derive(Debug, Parser)]
#[command(
    name = "smenv",
    author,
    version,
    about = "Typed access to process environment variables",
    long_about = "smart-env Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Reads environment variables as JSON, booleans or collection literals\n\
                  (lists, tuples, sets, dicts), and writes typed values back as text.\n\
                  Use `smenv <command> --help` for more information about a command.",
    after_help = "SETTINGS:\n\n\
                  smenv reads `smart-env.toml` from the current directory if present,\n\
                  then the file given with --config, then SMART_ENV_* variables\n\
                  (SMART_ENV_AUTO_CAST, SMART_ENV_LOG_LEVEL, SMART_ENV_LOG_FILE).\n\
                  Command-line flags override all of them."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Prints one variable, decoded as JSON unless --raw.
    Get(GetArgs),

    /// Lists variable names, sorted.
    List,

    /// Prints the whole environment as a JSON object.
    Dump,

    /// Lists variable names together with the reserved field names.
    Fields,

    /// Shows which codec accepts TEXT and the resulting value.
    Decode(TextArgs),

    /// Decodes TEXT, then prints the string it would be stored as.
    Encode(TextArgs),

    /// Sets typed variables and runs a command with them.
    Run(RunArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    /// Variable name
    pub name: String,

    /// Prints the stored text without decoding.
    #[arg(short = 'r', long)]
    pub raw: bool,
}

#[derive(Debug, Clone, Args)]
pub struct TextArgs {
    /// Value text, e.g. '[1, 2]' or "{'a': True}"
    #[arg(allow_hyphen_values = true)]
    pub text: String,
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Sets NAME to the encoded form of VALUE. Can be specified multiple times.
    #[arg(
        short = 's',
        long = "set",
        value_name = "NAME=VALUE",
        value_parser = parse_assignment,
        action = clap::ArgAction::Append
    )]
    pub assignments: Vec<(String, String)>,

    /// Command and arguments to run
    #[arg(last = true, required = true, value_name = "CMD")]
    pub command: Vec<String>,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_owned(), value.to_owned())),
        _ => Err(format!("expected NAME=VALUE, got '{s}'")),
    }
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
