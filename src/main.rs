// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Settings --> Logging --> Command Dispatch
//!   Get | List | Dump | Fields | Decode | Encode | Run
//! ```

use std::process::ExitCode;

use smart_env::cli::global::GlobalOptions;
use smart_env::cli::{self, Command};
use smart_env::cmd::codec::{run_decode_command, run_encode_command};
use smart_env::cmd::inspect::{
    run_dump_command, run_fields_command, run_get_command, run_list_command,
};
use smart_env::cmd::run::run_command;
use smart_env::facade::Env;
use smart_env::logging::{LogConfig, init_logging};
use smart_env::settings::Settings;
use smart_env::store::{MemEnv, SystemEnv};

fn main() -> ExitCode {
    let cli = cli::parse();

    let settings = match load_settings(&cli.global) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&LogConfig::from(&settings)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &settings)
}

fn load_settings(global: &GlobalOptions) -> smart_env::error::Result<Settings> {
    global.settings_loader()?.build()
}

fn dispatch_command(cli: &cli::Cli, settings: &Settings) -> ExitCode {
    let env = Env::from_settings(SystemEnv, settings);

    let result = match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Command::Get(args)) => run_get_command(&env, args),
        Some(Command::List) => {
            run_list_command(&env);
            Ok(())
        }
        Some(Command::Dump) => {
            run_dump_command(&env);
            Ok(())
        }
        Some(Command::Fields) => {
            run_fields_command(&env);
            Ok(())
        }
        Some(Command::Decode(args)) => {
            run_decode_command(env.codecs(), &args.text);
            Ok(())
        }
        Some(Command::Encode(args)) => run_encode_command(env.codecs(), &args.text),
        Some(Command::Run(args)) => {
            let child_env = Env::from_settings(MemEnv::from_process(), settings);
            return match run_command(&child_env, args) {
                Ok(code) => ExitCode::from(code),
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    ExitCode::FAILURE
                }
            };
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
