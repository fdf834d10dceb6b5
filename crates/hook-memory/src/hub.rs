//! Client for the external `memory-hub` executable.

use crate::schema::{Assembled, NoteScope, NoteType};
use camino::{Utf8Path, Utf8PathBuf};
use hook_common::subprocess::{CommandRunner, SubprocessError};

/// Invokes `memory-hub` subcommands through a [`CommandRunner`].
#[derive(Debug, Clone)]
pub struct MemoryHub<R> {
    /// Path to the memory-hub executable
    path: Utf8PathBuf,
    runner: R,
}

impl<R: CommandRunner> MemoryHub<R> {
    pub fn new(path: impl Into<Utf8PathBuf>, runner: R) -> Self {
        Self {
            path: path.into(),
            runner,
        }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// `assemble <text> --max-tokens <n> --json`
    pub fn assemble(&self, text: &str, max_tokens: u32) -> Result<Assembled, SubprocessError> {
        let stdout = self.run(&assemble_args(text, max_tokens))?;
        Ok(Assembled::decode(&stdout))
    }

    /// `write <text> --type note --scope session`
    pub fn write_note(&self, text: &str) -> Result<(), SubprocessError> {
        self.run(&write_args(text, NoteType::Note, NoteScope::Session))?;
        Ok(())
    }

    /// `summarize --type note --promote`
    pub fn summarize(&self) -> Result<(), SubprocessError> {
        self.run(&summarize_args(NoteType::Note))?;
        Ok(())
    }

    fn run(&self, args: &[String]) -> Result<String, SubprocessError> {
        self.runner.run(self.path.as_std_path(), args)
    }
}

pub fn assemble_args(text: &str, max_tokens: u32) -> Vec<String> {
    vec![
        "assemble".to_string(),
        text.to_string(),
        "--max-tokens".to_string(),
        max_tokens.to_string(),
        "--json".to_string(),
    ]
}

pub fn write_args(text: &str, note_type: NoteType, scope: NoteScope) -> Vec<String> {
    vec![
        "write".to_string(),
        text.to_string(),
        "--type".to_string(),
        note_type.to_string(),
        "--scope".to_string(),
        scope.to_string(),
    ]
}

pub fn summarize_args(note_type: NoteType) -> Vec<String> {
    vec![
        "summarize".to_string(),
        "--type".to_string(),
        note_type.to_string(),
        "--promote".to_string(),
    ]
}
