//! Common utilities for agent lifecycle hooks.
//!
//! This crate provides shared functionality for all Rust-based hooks:
//! - Event input parsing and classification
//! - JSON output for the host
//! - Subprocess execution
//! - Diagnostic logging

pub mod input;
pub mod log;
pub mod output;
pub mod subprocess;

pub use input::{BootstrapFile, EventContext, HookEvent, HookInput, InputError};
pub use log::HookLog;
pub use output::HookOutput;
pub use subprocess::{CommandRunner, DuctRunner, SubprocessError};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::input::{BootstrapFile, EventContext, HookEvent, HookInput, InputError};
    pub use crate::log::HookLog;
    pub use crate::output::HookOutput;
    pub use crate::subprocess::{CommandRunner, DuctRunner, SubprocessError};
    pub use anyhow::{Context, Result};
    pub use serde::{Deserialize, Serialize};
}
