// smart-env: Typed access to process environment variables
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs (smenv)
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          inspect / codec / run
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |   facade::Env<S>          |
//!              |   reserved fields, mode,  |
//!              |   get / set / unset       |
//!              '-----+---------------+-----'
//!                    |               |
//!                    v               v
//!              codec registry     store
//!           json/boolean/       EnvStore
//!           collection       SystemEnv/MemEnv
//!                    |
//!                    v
//!                  value
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging, settings  |
//!   +-----------------------------------------+
//! ```
//!
//! # Example
//!
//! ```
//! use smart_env::facade::Env;
//! use smart_env::store::MemEnv;
//! use smart_env::value::Value;
//!
//! let env = Env::new(MemEnv::from_pairs([("RATIO", "0.5")]));
//! assert_eq!(env.get("RATIO"), Some(Value::from("0.5")));
//!
//! env.enable_auto_cast();
//! assert_eq!(env.get("RATIO"), Some(Value::Float(0.5)));
//!
//! env.set("PORTS", vec![80, 443])?;
//! assert_eq!(env.get_raw("PORTS").as_deref(), Some("[80,443]"));
//! # Ok::<(), smart_env::error::EnvError>(())
//! ```

pub mod cli;
pub mod cmd;
pub mod codec;
pub mod error;
pub mod facade;
pub mod logging;
pub mod settings;
pub mod store;
pub mod value;
