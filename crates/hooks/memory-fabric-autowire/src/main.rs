//! memory-fabric-autowire: host lifecycle hook for the memory-fabric hub.
//!
//! Reads one event as JSON (stdin or `--event`), handles it, and prints the
//! resulting bootstrap file list as JSON on stdout.

use anyhow::{Context, Result};
use clap::Parser;
use hook_common::log::CONSOLE_PREFIX;
use hook_common::{DuctRunner, HookInput, HookOutput};
use memory_fabric_autowire::{Dispatcher, HookConfig};
use std::fs;
use std::path::PathBuf;

/// Handle one host lifecycle event for memory-fabric.
#[derive(Debug, Parser)]
#[command(name = "memory-fabric-autowire", version)]
struct Cli {
    /// Read the event from this file instead of stdin
    #[arg(long, value_name = "FILE")]
    event: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut input = match &cli.event {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read event file: {}", path.display()))?;
            HookInput::from_json(&json)
                .with_context(|| format!("Failed to parse event file: {}", path.display()))?
        }
        None => HookInput::from_stdin()?,
    };

    let dispatcher = Dispatcher::new(runner_for);
    if let Err(e) = dispatcher.dispatch(&mut input) {
        // Never fail the host over a single event.
        eprintln!("{} {}", CONSOLE_PREFIX, e);
    }

    HookOutput::from_context(&input.context).write_stdout()?;
    Ok(())
}

fn runner_for(config: &HookConfig) -> DuctRunner {
    match config.timeout() {
        Some(timeout) => DuctRunner::with_timeout(timeout),
        None => DuctRunner::new(),
    }
}
