//! Diagnostic log for hooks.
//!
//! Appends `[timestamp] message` lines to a per-workspace log file. The file
//! is never truncated or rotated here.

use chrono::{Local, SecondsFormat};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Prefix used for console diagnostics.
pub const CONSOLE_PREFIX: &str = "[memory-fabric]";

/// Append-only diagnostic log.
#[derive(Debug, Clone)]
pub struct HookLog {
    path: PathBuf,
}

impl HookLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one timestamped line.
    pub fn append(&self, message: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // Held until `file` is dropped.
        FileExt::lock_exclusive(&file)?;
        file.write_all(format_line(message).as_bytes())?;
        Ok(())
    }

    /// Append a line and mirror it to stderr, ignoring I/O failures.
    pub fn record(&self, message: &str) {
        eprintln!("{} {}", CONSOLE_PREFIX, message);
        if let Err(e) = self.append(message) {
            eprintln!(
                "{} Failed to append to {}: {}",
                CONSOLE_PREFIX,
                self.path.display(),
                e
            );
        }
    }
}

/// Format a single log line, newline included.
pub fn format_line(message: &str) -> String {
    let timestamp = Local::now().to_rfc3339_opts(SecondsFormat::Millis, false);
    // Keep one entry per line even when subprocess output spans several.
    let message = message.replace(['\r', '\n'], " ");
    format!("[{}] {}\n", timestamp, message)
}
