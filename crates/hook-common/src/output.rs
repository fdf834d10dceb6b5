//! Hook output generation for stdout.

use crate::input::{BootstrapFile, EventContext};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Output handed back to the host runtime after an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    /// Bootstrap file list, including any entries appended by the hook
    pub bootstrap_files: Vec<BootstrapFile>,
}

impl HookOutput {
    /// Build the output from the (possibly updated) event context.
    pub fn from_context(context: &EventContext) -> Self {
        Self {
            bootstrap_files: context.bootstrap_files.clone(),
        }
    }

    /// Write the output to stdout.
    pub fn write_stdout(&self) -> anyhow::Result<()> {
        let json = serde_json::to_string(self)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
