// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replays a touch script through a Handlebox stage and prints one line per
//! stage event.
//!
//! ```text
//! handlebox_demos --script drag.json --config tuning.json --verbose
//! ```
//!
//! Without `--script`, a built-in scenario taps an item, drags a corner,
//! rotates it a quarter turn, pinches it and deletes it. Set `RUST_LOG` (or
//! pass `--verbose`) to see how each touch was classified.

mod error;
mod script;

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use handlebox_gesture::EngineConfig;
use serde::de::DeserializeOwned;

use crate::error::DemoError;
use crate::script::{Script, describe, play};

#[derive(Debug, Parser)]
#[command(name = "handlebox_demos", about = "Replay touch scripts through a Handlebox stage")]
struct Args {
    /// JSON script of items and touch events.
    #[arg(long)]
    script: Option<PathBuf>,
    /// JSON engine configuration; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log gesture classification at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, DemoError> {
    let text = fs::read_to_string(path).map_err(|source| DemoError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DemoError::Json {
        path: path.to_owned(),
        source,
    })
}

fn main() -> Result<(), DemoError> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &args.config {
        Some(path) => read_json(path)?,
        None => EngineConfig::default(),
    };
    let script = match &args.script {
        Some(path) => read_json(path)?,
        None => {
            log::info!("no script given, running the built-in scenario");
            Script::builtin()
        }
    };

    let stage = play(config, &script, |event| println!("{}", describe(event)))?;
    log::info!(
        "{} event(s) replayed, {} item(s) left",
        script.events.len(),
        stage.len()
    );
    Ok(())
}
