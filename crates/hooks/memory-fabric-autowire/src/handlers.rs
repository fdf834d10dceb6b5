//! The four lifecycle routines.
//!
//! Handlers never return errors: every failure ends up as a log line and a
//! [`Dispatch`] outcome, so nothing escapes to the host.

use crate::config::ContextPaths;
use crate::dispatch::Dispatch;
use crate::tools::{TOOLS_BOOTSTRAP_NAME, TOOLS_MD};
use hook_common::prelude::*;
use hook_memory::{Assembled, MemoryHub, format_context};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

pub(crate) struct Handlers<'a, R> {
    pub hub: MemoryHub<R>,
    pub paths: &'a ContextPaths,
    pub log: &'a HookLog,
    pub max_tokens: u32,
}

impl<R: CommandRunner> Handlers<'_, R> {
    /// `agent:bootstrap`
    pub fn bootstrap(&self, context: &mut EventContext) -> Dispatch {
        let agent_id = context.agent_id().to_string();
        self.log.record(&format!("agent:bootstrap agent={}", agent_id));

        if let Err(e) = write_atomic(&self.paths.tools, TOOLS_MD) {
            let message = format!("Failed to write {}: {}", self.paths.tools.display(), e);
            self.log.record(&message);
            return Dispatch::Failed(message);
        }
        self.log.record(&format!("Created TOOLS.md at {}", self.paths.tools.display()));

        let seed = format!("agent {} bootstrap", agent_id);
        let context_written = self.assemble_into_pack(&seed).is_ok();

        context.bootstrap_files.push(BootstrapFile {
            name: TOOLS_BOOTSTRAP_NAME.to_string(),
            path: self.paths.tools.clone(),
        });
        self.log.record(&format!(
            "Registered bootstrap file {} ({} total)",
            TOOLS_BOOTSTRAP_NAME,
            context.bootstrap_files.len()
        ));

        Dispatch::Bootstrapped { context_written }
    }

    /// `message:received`
    pub fn context_assemble(&self, content: Option<&str>) -> Dispatch {
        self.log.record("message:received");

        let Some(prompt) = content else {
            self.log.record("No message content, skipping assemble");
            return Dispatch::Skipped;
        };

        match self.assemble_into_pack(prompt) {
            Ok(()) => Dispatch::ContextAssembled,
            Err(message) => Dispatch::Failed(message),
        }
    }

    /// `message:sent`
    pub fn write_memory(&self, content: Option<&str>) -> Dispatch {
        self.log.record("message:sent");

        let Some(text) = content else {
            self.log.record("No message content, skipping write");
            return Dispatch::Skipped;
        };

        match self.hub.write_note(text) {
            Ok(()) => {
                self.log.record("Wrote assistant output to session memory");
                Dispatch::MemoryWritten
            }
            Err(e) => {
                let message = format!("write failed: {}", e);
                self.log.record(&message);
                Dispatch::Failed(message)
            }
        }
    }

    /// `command:stop`
    pub fn summarize(&self) -> Dispatch {
        self.log.record("command:stop");

        match self.hub.summarize() {
            Ok(()) => {
                self.log.record("Summarized and promoted session notes");
                Dispatch::Summarized
            }
            Err(e) => {
                let message = format!("summarize failed: {}", e);
                self.log.record(&message);
                Dispatch::Failed(message)
            }
        }
    }

    /// Run `assemble` and overwrite the context pack. The pack is left alone on any failure.
    fn assemble_into_pack(&self, text: &str) -> Result<(), String> {
        let result = match self.hub.assemble(text, self.max_tokens) {
            Ok(Assembled::Result(result)) => result,
            Ok(Assembled::Invalid(reason)) => {
                let message = format!("Failed to parse assemble output: {}", reason);
                self.log.record(&message);
                return Err(message);
            }
            Err(e) => {
                let message = format!("assemble failed: {}", e);
                self.log.record(&message);
                return Err(message);
            }
        };

        let pack = format_context(Some(&result));
        if let Err(e) = write_atomic(&self.paths.context_pack, &pack) {
            let message = format!(
                "Failed to write {}: {}",
                self.paths.context_pack.display(),
                e
            );
            self.log.record(&message);
            return Err(message);
        }

        self.log.record(&format!(
            "Wrote context to {} ({} memories, {} summaries)",
            self.paths.context_pack.display(),
            result.memories.len(),
            result.summaries.len()
        ));
        Ok(())
    }
}

/// Replace `path` with `contents` via a temp file in the same directory.
fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
